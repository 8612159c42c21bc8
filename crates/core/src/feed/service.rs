use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::model::{FeedItem, FeedItemInput};
use super::store::FeedStore;
use crate::error::{CoreError, CoreResult};
use crate::id;

/// Feed operations: listing, posting and liking.
#[derive(Clone)]
pub struct FeedService {
    store: Arc<dyn FeedStore>,
}

impl FeedService {
    pub fn new(store: Arc<dyn FeedStore>) -> Self {
        Self { store }
    }

    /// All items, newest first.
    pub async fn list(&self, item_type: Option<&str>) -> CoreResult<Vec<FeedItem>> {
        self.store.list_feed(item_type).await
    }

    pub async fn create(&self, input: FeedItemInput) -> CoreResult<FeedItem> {
        let item = input.into_item(id::generate(), Utc::now());
        let item = self.store.insert_feed_item(&item).await?;
        info!(feed_item_id = %item.id, item_type = ?item.item_type, "feed item created");
        Ok(item)
    }

    /// Like an item. Unknown ids fail with `NotFound`.
    pub async fn like(&self, id: &str) -> CoreResult<FeedItem> {
        let item = self
            .store
            .increment_likes(id)
            .await?
            .ok_or_else(|| CoreError::not_found("feed item", id))?;
        info!(feed_item_id = %item.id, likes = item.likes, "feed item liked");
        Ok(item)
    }
}
