use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub auth: AuthConfig,
}

/// Token signing settings shared with the request extractor.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Reject a missing or blank variable with an error naming it.
fn required_var(name: &str, value: Option<String>) -> anyhow::Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("{name} is not set"))
}

impl AppConfig {
    /// Only the connection string; tools that never issue tokens use this
    /// instead of `from_env`.
    pub fn database_url() -> anyhow::Result<String> {
        required_var("DATABASE_URL", env::var("DATABASE_URL").ok())
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = Self::database_url()?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(10);
        let jwt_secret = required_var("JWT_SECRET", env::var("JWT_SECRET").ok())?;
        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(24);
        Ok(Self {
            port,
            database_url,
            host,
            max_connections,
            auth: AuthConfig {
                jwt_secret,
                token_ttl_hours,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_var_rejects_missing_and_blank() {
        let err = required_var("DATABASE_URL", None).unwrap_err();
        assert_eq!(err.to_string(), "DATABASE_URL is not set");
        assert!(required_var("JWT_SECRET", Some("  ".into())).is_err());
    }

    #[test]
    fn required_var_keeps_value() {
        let url = Some("postgres://localhost/petcare".to_string());
        let url = required_var("DATABASE_URL", url).unwrap();
        assert_eq!(url, "postgres://localhost/petcare");
    }
}
