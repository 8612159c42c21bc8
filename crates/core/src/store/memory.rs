//! In-process backend. Each table is a map behind its own `RwLock`, and
//! every mutation happens under the write lock, so read-modify-write
//! operations such as likes are atomic.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::feed::{FeedItem, FeedStore};
use crate::page::{Page, PageFilter, PageStore, PageWrite};
use crate::user::{User, UserStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    pages: RwLock<HashMap<String, Page>>,
    feed_items: RwLock<HashMap<String, FeedItem>>,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Next `updated_at` for a row last written at `previous`: now, but never
/// equal to or earlier than the stored value.
fn next_update(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    async fn list_pages(&self, filter: &PageFilter) -> CoreResult<Vec<Page>> {
        let pages = self.inner.pages.read().await;
        let mut matched: Vec<Page> = pages
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(matched)
    }

    async fn find_page(&self, id: &str) -> CoreResult<Option<Page>> {
        Ok(self.inner.pages.read().await.get(id).cloned())
    }

    async fn upsert_page(&self, write: &PageWrite) -> CoreResult<Page> {
        let mut pages = self.inner.pages.write().await;
        let (created_at, updated_at) = match pages.get(&write.id) {
            Some(existing) => (existing.created_at, next_update(existing.updated_at)),
            None => {
                let now = Utc::now();
                (now, now)
            }
        };
        let page = Page {
            id: write.id.clone(),
            title: write.title.clone(),
            icon: write.icon.clone(),
            cover_image: write.cover_image.clone(),
            blocks_json: write.blocks_json.clone(),
            parent_id: write.parent_id.clone(),
            user_id: write.user_id.clone(),
            favorite: write.favorite,
            deleted: write.deleted,
            created_at,
            updated_at,
        };
        pages.insert(page.id.clone(), page.clone());
        Ok(page)
    }

    async fn set_page_deleted(&self, id: &str, deleted: bool) -> CoreResult<Option<Page>> {
        let mut pages = self.inner.pages.write().await;
        Ok(pages.get_mut(id).map(|page| {
            page.deleted = deleted;
            page.updated_at = next_update(page.updated_at);
            page.clone()
        }))
    }
}

#[async_trait]
impl FeedStore for MemoryStore {
    async fn list_feed(&self, item_type: Option<&str>) -> CoreResult<Vec<FeedItem>> {
        let items = self.inner.feed_items.read().await;
        let mut matched: Vec<FeedItem> = items
            .values()
            .filter(|i| item_type.map_or(true, |t| i.item_type.as_deref() == Some(t)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(matched)
    }

    async fn insert_feed_item(&self, item: &FeedItem) -> CoreResult<FeedItem> {
        let mut items = self.inner.feed_items.write().await;
        if items.contains_key(&item.id) {
            return Err(CoreError::Conflict(format!(
                "feed item '{}' already exists",
                item.id
            )));
        }
        items.insert(item.id.clone(), item.clone());
        Ok(item.clone())
    }

    async fn increment_likes(&self, id: &str) -> CoreResult<Option<FeedItem>> {
        let mut items = self.inner.feed_items.write().await;
        Ok(items.get_mut(id).map(|item| {
            item.likes = item.likes.saturating_add(1);
            item.clone()
        }))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> CoreResult<Option<User>> {
        let users = self.inner.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_user(&self, user: &User) -> CoreResult<User> {
        let mut users = self.inner.users.write().await;
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(CoreError::Conflict(format!(
                "email '{}' is already registered",
                user.email
            )));
        }
        if users.contains_key(&user.id) {
            return Err(CoreError::Conflict(format!("user '{}' already exists", user.id)));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(id: &str) -> PageWrite {
        PageWrite {
            id: id.to_string(),
            title: None,
            icon: None,
            cover_image: None,
            blocks_json: None,
            parent_id: Some("missing-parent".to_string()),
            user_id: None,
            favorite: false,
            deleted: false,
        }
    }

    #[test]
    fn next_update_never_goes_backwards() {
        let future = Utc::now() + Duration::seconds(60);
        assert!(next_update(future) > future);
    }

    #[tokio::test]
    async fn dangling_parent_is_stored_as_is() {
        let store = MemoryStore::new();
        let page = store.upsert_page(&write("orphan")).await.unwrap();
        assert_eq!(page.parent_id.as_deref(), Some("missing-parent"));
    }

    #[tokio::test]
    async fn soft_delete_refreshes_updated_at() {
        let store = MemoryStore::new();
        let page = store.upsert_page(&write("p1")).await.unwrap();
        let deleted = store.set_page_deleted("p1", true).await.unwrap().unwrap();
        assert!(deleted.deleted);
        assert!(deleted.updated_at > page.updated_at);
        assert_eq!(deleted.created_at, page.created_at);
        assert!(store.set_page_deleted("nope", true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn likes_saturate_at_counter_limit() {
        let store = MemoryStore::new();
        let item = FeedItem {
            id: "f1".into(),
            title: None,
            description: None,
            author_name: None,
            author_avatar: None,
            item_type: None,
            likes: i32::MAX,
            tags: Vec::new(),
            created_at: Utc::now(),
        };
        store.insert_feed_item(&item).await.unwrap();

        let liked = store.increment_likes("f1").await.unwrap().unwrap();
        assert_eq!(liked.likes, i32::MAX);
    }

    #[tokio::test]
    async fn duplicate_user_id_conflicts() {
        let store = MemoryStore::new();
        let user = User {
            id: "u1".into(),
            email: "a@x.com".into(),
            password: "p".into(),
            name: None,
        };
        store.insert_user(&user).await.unwrap();
        let other = User {
            email: "b@x.com".into(),
            ..user
        };
        assert!(matches!(
            store.insert_user(&other).await,
            Err(CoreError::Conflict(_))
        ));
    }
}
