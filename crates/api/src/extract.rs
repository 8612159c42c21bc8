use axum::{extract::FromRequest, Json};

use crate::error::ApiError;

/// `Json` body extractor whose rejections use the API error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
