use axum::{extract::State, routing::post, Json, Router};
use lifeflow_core::user::{LoginRequest, SignupRequest, User};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
}

/// 409 when the email is already registered.
async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users().signup(req).await?))
}

/// 404 for an unknown email, 401 for a wrong password.
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users().login(req).await?))
}
