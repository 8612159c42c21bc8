use std::sync::Arc;

use lifeflow_core::feed::FeedService;
use lifeflow_core::page::PageService;
use lifeflow_core::store::Store;
use lifeflow_core::user::UserService;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: Store,
    config: AppConfig,
    pages: PageService,
    feed: FeedService,
    users: UserService,
}

impl AppState {
    pub fn new(store: Store, config: AppConfig) -> Self {
        let pages = PageService::new(store.pages());
        let feed = FeedService::new(store.feed());
        let users = UserService::new(store.users(), config.password_mode);
        Self {
            inner: Arc::new(InnerState {
                store,
                config,
                pages,
                feed,
                users,
            }),
        }
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn pages(&self) -> &PageService {
        &self.inner.pages
    }

    pub fn feed(&self) -> &FeedService {
        &self.inner.feed
    }

    pub fn users(&self) -> &UserService {
        &self.inner.users
    }
}
