use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lifeflow_core::page::{Page, PageInput};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/pages", get(list_pages).post(save_page))
        .route("/api/pages/{id}", get(get_page).delete(delete_page))
        .route("/api/pages/{id}/restore", post(restore_page))
        // Outside the `/api/pages/{id}` space so no page id is shadowed.
        .route("/api/trash/pages", get(list_trash))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerQuery {
    user_id: Option<String>,
}

async fn list_pages(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Json<Vec<Page>>> {
    Ok(Json(state.pages().list(query.user_id).await?))
}

async fn list_trash(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Json<Vec<Page>>> {
    Ok(Json(state.pages().trash(query.user_id).await?))
}

async fn get_page(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Page>> {
    Ok(Json(state.pages().get(&id).await?))
}

/// Upsert by id: create the page or replace every field of the stored one.
async fn save_page(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PageInput>,
) -> ApiResult<Json<Page>> {
    Ok(Json(state.pages().upsert(input).await?))
}

/// Soft delete. Always 200 with an empty body, even for unknown ids.
async fn delete_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.pages().soft_delete(&id).await?;
    Ok(StatusCode::OK)
}

async fn restore_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Page>> {
    Ok(Json(state.pages().restore(&id).await?))
}
