use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of an order. Owners may only move `Placed` to `Cancelled`;
/// providers may set any value.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OrderStatus {
    #[sea_orm(string_value = "Placed")]
    Placed,
    #[sea_orm(string_value = "Processed")]
    Processed,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "Placed",
            OrderStatus::Processed => "Processed",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Placed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Placed" => Ok(OrderStatus::Placed),
            "Processed" => Ok(OrderStatus::Processed),
            "Completed" => Ok(OrderStatus::Completed),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("\"{other}\" is not a valid order status")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub order_id: i32,
    pub owner_id: i32,
    pub service_id: i32,
    pub service_name: String,
    pub service_provider_name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub service_charges: Decimal,
    pub scheduled_date_time: DateTimeWithTimeZone,
    pub status: OrderStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owners::Entity",
        from = "Column::OwnerId",
        to = "super::owners::Column::OwnerId",
        on_delete = "Cascade"
    )]
    Owners,
}

impl Related<super::owners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owners.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_status() {
        for status in [
            OrderStatus::Placed,
            OrderStatus::Processed,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn rejects_unknown_and_lowercase_status() {
        assert!("Shipped".parse::<OrderStatus>().is_err());
        assert!("placed".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn only_placed_is_cancellable() {
        assert!(OrderStatus::Placed.is_cancellable());
        assert!(!OrderStatus::Processed.is_cancellable());
        assert!(!OrderStatus::Completed.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }
}
