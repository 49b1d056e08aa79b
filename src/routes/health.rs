use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use super::SharedStore;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    players: Option<i64>,
}

// GET /health - Readiness: the store must answer a count query
pub async fn health_check(
    State(store): State<SharedStore>,
) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = chrono::Utc::now().timestamp();

    match store.count().await {
        Ok(players) => (
            StatusCode::OK,
            Json(HealthResponse { status: "ok", timestamp, players: Some(players) }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "health check could not reach the store");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { status: "unavailable", timestamp, players: None }),
            )
        }
    }
}
