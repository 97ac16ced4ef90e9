use serde::Serialize;
use utoipa::ToSchema;

/// List responses report their row count; single-object responses leave it empty.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub total: Option<i64>,
}

impl Meta {
    pub fn total(total: usize) -> Self {
        Self {
            total: Some(total as i64),
        }
    }

    pub fn empty() -> Self {
        Self { total: None }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_meta_counts_rows() {
        assert_eq!(Meta::total(3).total, Some(3));
        assert!(Meta::empty().total.is_none());
    }

    #[test]
    fn success_serializes_envelope() {
        let resp = ApiResponse::success("OK", vec![1, 2], Some(Meta::total(2)));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["message"], "OK");
        assert_eq!(value["data"], serde_json::json!([1, 2]));
        assert_eq!(value["meta"]["total"], 2);
    }
}
