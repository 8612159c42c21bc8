use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{require_non_empty, ValidationError};

/// A workspace page. Maps to the `pages` table.
///
/// `parent_id` and `user_id` are plain references; a dangling parent
/// simply renders as an orphan.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub cover_image: Option<String>,
    /// Serialized block document, opaque to the backend.
    pub blocks_json: Option<String>,
    pub parent_id: Option<String>,
    pub user_id: Option<String>,
    pub favorite: bool,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inbound page representation.
///
/// Every field is optional and unknown keys are dropped, so partial or
/// over-full payloads from the editor never fail to parse. Timestamps
/// sent by the client are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub cover_image: Option<String>,
    pub blocks_json: Option<String>,
    pub parent_id: Option<String>,
    pub user_id: Option<String>,
    #[serde(alias = "isFavorite")]
    pub favorite: Option<bool>,
    #[serde(alias = "isDeleted")]
    pub deleted: Option<bool>,
}

/// Validated full-replace payload handed to a [`PageStore`](super::PageStore).
#[derive(Debug, Clone, PartialEq)]
pub struct PageWrite {
    pub id: String,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub cover_image: Option<String>,
    pub blocks_json: Option<String>,
    pub parent_id: Option<String>,
    pub user_id: Option<String>,
    pub favorite: bool,
    pub deleted: bool,
}

impl PageInput {
    /// Turn the tolerant input into a strict write. Only the id is required;
    /// absent flags fall back to `false`.
    pub fn into_write(self) -> Result<PageWrite, ValidationError> {
        Ok(PageWrite {
            id: require_non_empty("id", self.id)?,
            title: self.title,
            icon: self.icon,
            cover_image: self.cover_image,
            blocks_json: self.blocks_json,
            parent_id: self.parent_id,
            user_id: self.user_id,
            favorite: self.favorite.unwrap_or(false),
            deleted: self.deleted.unwrap_or(false),
        })
    }
}

/// Selection used by page listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFilter {
    /// `false` for the live workspace, `true` for the trash.
    pub deleted: bool,
    pub user_id: Option<String>,
}

impl PageFilter {
    pub fn live(user_id: Option<String>) -> Self {
        Self {
            deleted: false,
            user_id,
        }
    }

    pub fn trash(user_id: Option<String>) -> Self {
        Self {
            deleted: true,
            user_id,
        }
    }

    pub fn matches(&self, page: &Page) -> bool {
        page.deleted == self.deleted
            && self
                .user_id
                .as_ref()
                .map_or(true, |uid| page.user_id.as_ref() == Some(uid))
    }
}
