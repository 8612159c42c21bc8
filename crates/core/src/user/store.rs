use async_trait::async_trait;

use super::model::User;
use crate::error::CoreResult;

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Case-insensitive lookup by email.
    async fn find_user_by_email(&self, email: &str) -> CoreResult<Option<User>>;

    /// Insert a new user. Fails with `Conflict` if the email or id is taken.
    async fn insert_user(&self, user: &User) -> CoreResult<User>;
}
