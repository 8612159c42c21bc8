use async_trait::async_trait;

use super::model::{Page, PageFilter, PageWrite};
use crate::error::CoreResult;

/// Persistence for pages.
#[async_trait]
pub trait PageStore: Send + Sync + 'static {
    /// Pages matching `filter`, ordered by creation time then id.
    async fn list_pages(&self, filter: &PageFilter) -> CoreResult<Vec<Page>>;

    /// Look a page up by id, whatever its deleted flag.
    async fn find_page(&self, id: &str) -> CoreResult<Option<Page>>;

    /// Insert or fully replace a page. `created_at` is set on first insert
    /// only; `updated_at` is refreshed and strictly increases on replace.
    async fn upsert_page(&self, page: &PageWrite) -> CoreResult<Page>;

    /// Set the deleted flag and refresh `updated_at`. `None` if the id is unknown.
    async fn set_page_deleted(&self, id: &str, deleted: bool) -> CoreResult<Option<Page>>;
}
