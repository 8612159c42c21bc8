use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shareable feed post. Maps to the `feed_items` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
    /// Open-ended category such as `template`, `blog` or `workspace_update`.
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub likes: i32,
    /// Free-text tags in the order given; duplicates are kept.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Inbound feed item. `id`, `likes` and `createdAt` are not read from
/// the client at all, so whatever it sends for them is discarded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedItemInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl FeedItemInput {
    /// Build the stored item with a server id, zero likes and `created_at`.
    pub fn into_item(self, id: String, created_at: DateTime<Utc>) -> FeedItem {
        FeedItem {
            id,
            title: self.title,
            description: self.description,
            author_name: self.author_name,
            author_avatar: self.author_avatar,
            item_type: self.item_type,
            likes: 0,
            tags: self.tags.unwrap_or_default(),
            created_at,
        }
    }
}
