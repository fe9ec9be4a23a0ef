use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

/// Liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness of a database-backed service: 200 when the database answers a ping.
pub async fn database_ready(db: &DatabaseConnection) -> StatusCode {
    match db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
