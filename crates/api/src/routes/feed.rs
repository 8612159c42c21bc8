use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use lifeflow_core::feed::{FeedItem, FeedItemInput};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/feed", get(list_feed).post(create_item))
        .route("/api/feed/{id}/like", post(like_item))
}

#[derive(Debug, Default, Deserialize)]
struct FeedQuery {
    #[serde(rename = "type")]
    item_type: Option<String>,
}

/// Newest first.
async fn list_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<Vec<FeedItem>>> {
    Ok(Json(state.feed().list(query.item_type.as_deref()).await?))
}

async fn create_item(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<FeedItemInput>,
) -> ApiResult<Json<FeedItem>> {
    Ok(Json(state.feed().create(input).await?))
}

async fn like_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FeedItem>> {
    Ok(Json(state.feed().like(&id).await?))
}
