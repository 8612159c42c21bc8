use async_trait::async_trait;

use super::model::FeedItem;
use crate::error::CoreResult;

/// Persistence for feed items.
#[async_trait]
pub trait FeedStore: Send + Sync + 'static {
    /// Items newest first, optionally limited to one type tag.
    async fn list_feed(&self, item_type: Option<&str>) -> CoreResult<Vec<FeedItem>>;

    async fn insert_feed_item(&self, item: &FeedItem) -> CoreResult<FeedItem>;

    /// Add exactly one like as a single atomic store operation. The counter
    /// saturates at `i32::MAX` instead of overflowing.
    /// `None` if the id is unknown.
    async fn increment_likes(&self, id: &str) -> CoreResult<Option<FeedItem>>;
}
