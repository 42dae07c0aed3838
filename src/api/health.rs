use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use super::users::UsersAppState;

pub async fn health_check(State(state): State<UsersAppState>) -> (StatusCode, Json<Value>) {
    let (status, database) = match state.service.ping().await {
        Ok(()) => (StatusCode::OK, "up"),
        Err(err) => {
            tracing::error!(error = ?err, "Health check could not reach the database");
            (StatusCode::SERVICE_UNAVAILABLE, "down")
        }
    };

    let body = json!({
        "status": if status == StatusCode::OK { "healthy" } else { "unhealthy" },
        "service": "personas",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (status, Json(body))
}
