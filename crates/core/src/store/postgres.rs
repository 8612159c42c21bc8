//! PostgreSQL backend built on `sqlx` runtime queries.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::{CoreError, CoreResult};
use crate::feed::{FeedItem, FeedStore};
use crate::page::{Page, PageFilter, PageStore, PageWrite};
use crate::user::{User, UserStore};

const PAGE_COLUMNS: &str = "id, title, icon, cover_image, blocks_json, parent_id, user_id, \
                            favorite, deleted, created_at, updated_at";

const FEED_COLUMNS: &str =
    "id, title, description, author_name, author_avatar, item_type, likes, tags, created_at";

/// Connection pool sizing.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(url: &str, settings: &PoolSettings) -> CoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> CoreResult<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| CoreError::Database(e.into()))
    }

    pub async fn ping(&self) -> CoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Translate a unique-key violation into `Conflict`; pass everything else on.
fn conflict_on_duplicate(err: sqlx::Error, message: impl FnOnce() -> String) -> CoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => CoreError::Conflict(message()),
        _ => CoreError::Database(err),
    }
}

#[async_trait]
impl PageStore for PgStore {
    async fn list_pages(&self, filter: &PageFilter) -> CoreResult<Vec<Page>> {
        let sql = format!(
            "SELECT {PAGE_COLUMNS} FROM pages \
             WHERE deleted = $1 AND ($2::TEXT IS NULL OR user_id = $2) \
             ORDER BY created_at, id"
        );
        let pages = sqlx::query_as::<_, Page>(&sql)
            .bind(filter.deleted)
            .bind(filter.user_id.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(pages)
    }

    async fn find_page(&self, id: &str) -> CoreResult<Option<Page>> {
        let sql = format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = $1");
        let page = sqlx::query_as::<_, Page>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(page)
    }

    async fn upsert_page(&self, write: &PageWrite) -> CoreResult<Page> {
        // created_at is only ever written by the insert arm.
        let sql = format!(
            "INSERT INTO pages ({PAGE_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW()) \
             ON CONFLICT (id) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 icon = EXCLUDED.icon, \
                 cover_image = EXCLUDED.cover_image, \
                 blocks_json = EXCLUDED.blocks_json, \
                 parent_id = EXCLUDED.parent_id, \
                 user_id = EXCLUDED.user_id, \
                 favorite = EXCLUDED.favorite, \
                 deleted = EXCLUDED.deleted, \
                 updated_at = GREATEST(NOW(), pages.updated_at + INTERVAL '1 microsecond') \
             RETURNING {PAGE_COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&sql)
            .bind(&write.id)
            .bind(&write.title)
            .bind(&write.icon)
            .bind(&write.cover_image)
            .bind(&write.blocks_json)
            .bind(&write.parent_id)
            .bind(&write.user_id)
            .bind(write.favorite)
            .bind(write.deleted)
            .fetch_one(&self.pool)
            .await?;
        Ok(page)
    }

    async fn set_page_deleted(&self, id: &str, deleted: bool) -> CoreResult<Option<Page>> {
        let sql = format!(
            "UPDATE pages SET deleted = $2, \
                 updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond') \
             WHERE id = $1 RETURNING {PAGE_COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&sql)
            .bind(id)
            .bind(deleted)
            .fetch_optional(&self.pool)
            .await?;
        Ok(page)
    }
}

#[async_trait]
impl FeedStore for PgStore {
    async fn list_feed(&self, item_type: Option<&str>) -> CoreResult<Vec<FeedItem>> {
        let sql = format!(
            "SELECT {FEED_COLUMNS} FROM feed_items \
             WHERE ($1::TEXT IS NULL OR item_type = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        let items = sqlx::query_as::<_, FeedItem>(&sql)
            .bind(item_type)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn insert_feed_item(&self, item: &FeedItem) -> CoreResult<FeedItem> {
        let sql = format!(
            "INSERT INTO feed_items ({FEED_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {FEED_COLUMNS}"
        );
        sqlx::query_as::<_, FeedItem>(&sql)
            .bind(&item.id)
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.author_name)
            .bind(&item.author_avatar)
            .bind(&item.item_type)
            .bind(item.likes)
            .bind(&item.tags)
            .bind(item.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_on_duplicate(e, || format!("feed item '{}' already exists", item.id)))
    }

    async fn increment_likes(&self, id: &str) -> CoreResult<Option<FeedItem>> {
        // Single-statement increment: concurrent likes cannot overwrite each other.
        // The counter saturates at the INTEGER maximum.
        let sql = format!(
            "UPDATE feed_items \
             SET likes = CASE WHEN likes < 2147483647 THEN likes + 1 ELSE likes END \
             WHERE id = $1 RETURNING {FEED_COLUMNS}"
        );
        let item = sqlx::query_as::<_, FeedItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> CoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, name FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> CoreResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password, name) VALUES ($1, $2, $3, $4) \
             RETURNING id, email, password, name",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_duplicate(e, || format!("email '{}' is already registered", user.email))
        })
    }
}
