//! HTTP surface of the LifeFlow backend.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// The router with its middleware stack, as served by the binary.
pub fn app(state: AppState) -> Router {
    let cors = middleware::cors::cors_layer(&state.config().allowed_origins);
    routes::build_router(state)
        .layer(middleware::request_tracing::trace_layer())
        .layer(cors)
}
