//! Append-only trail of security-relevant actions.

use serde_json::Value;
use uuid::Uuid;

use crate::db::DbPool;

/// Write one `audit_logs` row. A failed write is logged at `warn` and never
/// fails the request that triggered it.
pub async fn record(
    pool: &DbPool,
    account_id: Uuid,
    action: &str,
    resource: &str,
    metadata: Value,
) {
    let written = sqlx::query(
        r#"
        INSERT INTO audit_logs (id, account_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(action)
    .bind(resource)
    .bind(metadata)
    .execute(pool)
    .await;

    if let Err(err) = written {
        tracing::warn!(error = %err, %account_id, action, resource, "audit log write failed");
    }
}
