use std::sync::Arc;

use tracing::{debug, info};

use super::model::{Page, PageFilter, PageInput};
use super::store::PageStore;
use crate::error::{CoreError, CoreResult};
use crate::id;

/// Page operations: listing, upsert, soft delete and restore.
#[derive(Clone)]
pub struct PageService {
    store: Arc<dyn PageStore>,
}

impl PageService {
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }

    /// Live (not deleted) pages, optionally restricted to one owner.
    /// A blank owner means no owner filter.
    pub async fn list(&self, user_id: Option<String>) -> CoreResult<Vec<Page>> {
        self.store
            .list_pages(&PageFilter::live(id::non_blank(user_id)))
            .await
    }

    /// Soft-deleted pages, optionally restricted to one owner.
    pub async fn trash(&self, user_id: Option<String>) -> CoreResult<Vec<Page>> {
        self.store
            .list_pages(&PageFilter::trash(id::non_blank(user_id)))
            .await
    }

    pub async fn get(&self, id: &str) -> CoreResult<Page> {
        self.store
            .find_page(id)
            .await?
            .ok_or_else(|| CoreError::not_found("page", id))
    }

    /// Insert a new page or fully replace the stored one with the same id.
    pub async fn upsert(&self, input: PageInput) -> CoreResult<Page> {
        let write = input.into_write()?;
        let page = self.store.upsert_page(&write).await?;
        info!(page_id = %page.id, user_id = ?page.user_id, "page saved");
        Ok(page)
    }

    /// Move a page to the trash. Unknown ids are a silent no-op.
    pub async fn soft_delete(&self, id: &str) -> CoreResult<()> {
        match self.store.set_page_deleted(id, true).await? {
            Some(page) => info!(page_id = %page.id, "page moved to trash"),
            None => debug!(page_id = %id, "soft delete of unknown page ignored"),
        }
        Ok(())
    }

    /// Bring a page back from the trash.
    pub async fn restore(&self, id: &str) -> CoreResult<Page> {
        let page = self
            .store
            .set_page_deleted(id, false)
            .await?
            .ok_or_else(|| CoreError::not_found("page", id))?;
        info!(page_id = %page.id, "page restored");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn service() -> PageService {
        PageService::new(Arc::new(MemoryStore::new()))
    }

    fn input(id: &str, user_id: Option<&str>) -> PageInput {
        PageInput {
            id: Some(id.to_string()),
            title: Some(format!("Page {id}")),
            user_id: user_id.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn soft_deleted_page_leaves_listing_but_stays_addressable() {
        let pages = service();
        pages.upsert(input("p1", Some("u1"))).await.unwrap();
        pages.upsert(input("p2", Some("u1"))).await.unwrap();

        pages.soft_delete("p1").await.unwrap();

        let live = pages.list(None).await.unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, "p2");

        let deleted = pages.get("p1").await.unwrap();
        assert!(deleted.deleted);

        let trash = pages.trash(Some("u1".into())).await.unwrap();
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].id, "p1");
    }

    #[tokio::test]
    async fn soft_delete_of_unknown_page_is_a_no_op() {
        let pages = service();
        pages.soft_delete("missing").await.unwrap();
        assert!(pages.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_filters_by_owner() {
        let pages = service();
        pages.upsert(input("a", Some("u1"))).await.unwrap();
        pages.upsert(input("b", Some("u2"))).await.unwrap();
        pages.upsert(input("c", None)).await.unwrap();

        let mine = pages.list(Some("u1".into())).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "a");
        assert_eq!(pages.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn blank_owner_means_no_filter() {
        let pages = service();
        pages.upsert(input("a", Some("u1"))).await.unwrap();
        pages.upsert(input("b", None)).await.unwrap();

        assert_eq!(pages.list(Some(String::new())).await.unwrap().len(), 2);
        assert_eq!(pages.list(Some("  ".into())).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn upsert_is_idempotent_apart_from_updated_at() {
        let pages = service();
        let first = pages.upsert(input("p1", Some("u1"))).await.unwrap();
        let second = pages.upsert(input("p1", Some("u1"))).await.unwrap();

        assert_eq!(first.created_at, second.created_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(
            Page {
                updated_at: first.updated_at,
                ..second
            },
            first
        );
    }

    #[tokio::test]
    async fn upsert_replaces_every_field() {
        let pages = service();
        pages
            .upsert(PageInput {
                id: Some("p1".into()),
                title: Some("Old".into()),
                icon: Some("📄".into()),
                favorite: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let replaced = pages
            .upsert(PageInput {
                id: Some("p1".into()),
                title: Some("New".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(replaced.title.as_deref(), Some("New"));
        assert_eq!(replaced.icon, None);
        assert!(!replaced.favorite);
    }

    #[tokio::test]
    async fn upsert_without_id_is_rejected() {
        let pages = service();
        let err = pages.upsert(PageInput::default()).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn restore_brings_page_back() {
        let pages = service();
        pages.upsert(input("p1", None)).await.unwrap();
        pages.soft_delete("p1").await.unwrap();

        let restored = pages.restore("p1").await.unwrap();
        assert!(!restored.deleted);
        assert_eq!(pages.list(None).await.unwrap().len(), 1);

        assert!(matches!(
            pages.restore("missing").await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn get_unknown_page_is_not_found() {
        let pages = service();
        assert!(matches!(pages.get("nope").await, Err(CoreError::NotFound(_))));
    }
}
