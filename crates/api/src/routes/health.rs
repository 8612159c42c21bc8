use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/ping", get(ping))
}

/// Full health check: verifies the store answers.
async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::Internal(format!("store health check failed: {e}")))?;

    Ok(Json(json!({
        "status": "ok",
        "store": state.store().backend_name(),
    })))
}

/// Lightweight ping, no store access.
async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
