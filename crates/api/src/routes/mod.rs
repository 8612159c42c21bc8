pub mod auth;
pub mod feed;
pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(pages::routes())
        .merge(feed::routes())
        .merge(auth::routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use lifeflow_core::store::{MemoryStore, Store};
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::state::AppState;

    fn state(origins: &str) -> AppState {
        let origins = origins.to_string();
        let config = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("memory://".to_string()),
            "ALLOWED_ORIGINS" => Some(origins.clone()),
            _ => None,
        })
        .unwrap();
        AppState::new(Store::Memory(MemoryStore::new()), config)
    }

    #[tokio::test]
    async fn ping_and_health_answer() {
        let app = crate::app(state("*"));

        let res = app
            .clone()
            .oneshot(Request::get("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["store"], "memory");
    }

    #[tokio::test]
    async fn configured_origin_is_allowed() {
        let app = crate::app(state("http://localhost:3000"));

        let res = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/pages")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:3000")
        );
    }

    #[tokio::test]
    async fn unlisted_origin_gets_no_cors_header() {
        let app = crate::app(state("http://localhost:3000"));

        let res = app
            .oneshot(
                Request::get("/api/feed")
                    .header(header::ORIGIN, "http://evil.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn wildcard_origin_allows_anyone() {
        let app = crate::app(state("*"));

        let res = app
            .oneshot(
                Request::get("/api/feed")
                    .header(header::ORIGIN, "http://phone.local:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
