use std::sync::Arc;

use tracing::{info, warn};

use super::model::{LoginRequest, SignupRequest, User};
use super::password::PasswordMode;
use super::store::UserStore;
use crate::error::{CoreError, CoreResult};
use crate::id;
use crate::validate::{normalize_email, require_non_empty, ValidationError};

/// Signup and login.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    mode: PasswordMode,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, mode: PasswordMode) -> Self {
        Self { store, mode }
    }

    pub async fn signup(&self, req: SignupRequest) -> CoreResult<User> {
        let email = normalize_email(req.email)?;
        let password = req
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ValidationError::MissingField("password"))?;

        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(CoreError::Conflict(format!("email '{email}' is already registered")));
        }

        let user = User {
            id: id::non_blank(req.id).unwrap_or_else(id::generate),
            email,
            password: self.mode.protect(&password)?,
            name: req.name,
        };
        let user = self.store.insert_user(&user).await?;
        info!(user_id = %user.id, "user signed up");
        Ok(user)
    }

    pub async fn login(&self, req: LoginRequest) -> CoreResult<User> {
        let email = require_non_empty("email", req.email)?.to_lowercase();
        let password = req
            .password
            .ok_or(ValidationError::MissingField("password"))?;

        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| CoreError::NotFound("user not found".to_string()))?;

        if !self.mode.verify(&password, &user.password)? {
            warn!(user_id = %user.id, "login rejected: password mismatch");
            return Err(CoreError::Unauthorized("invalid password".to_string()));
        }

        info!(user_id = %user.id, "user logged in");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn service(mode: PasswordMode) -> UserService {
        UserService::new(Arc::new(MemoryStore::new()), mode)
    }

    fn signup(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            name: Some("A".to_string()),
            ..Default::default()
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn signup_then_login() {
        let users = service(PasswordMode::Argon2);
        let created = users.signup(signup("a@x.com", "p1")).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.email, "a@x.com");
        assert_ne!(created.password, "p1");

        let logged_in = users.login(login("a@x.com", "p1")).await.unwrap();
        assert_eq!(logged_in.id, created.id);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_regardless_of_case() {
        let users = service(PasswordMode::Plaintext);
        users.signup(signup("a@x.com", "p1")).await.unwrap();

        assert!(matches!(
            users.signup(signup("a@x.com", "p2")).await,
            Err(CoreError::Conflict(_))
        ));
        assert!(matches!(
            users.signup(signup("A@X.COM", "p2")).await,
            Err(CoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        for mode in [PasswordMode::Argon2, PasswordMode::Plaintext] {
            let users = service(mode);
            users.signup(signup("a@x.com", "p1")).await.unwrap();
            assert!(matches!(
                users.login(login("a@x.com", "wrong")).await,
                Err(CoreError::Unauthorized(_))
            ));
        }
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let users = service(PasswordMode::Argon2);
        assert!(matches!(
            users.login(login("ghost@x.com", "p1")).await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn client_supplied_id_is_kept() {
        let users = service(PasswordMode::Plaintext);
        let user = users
            .signup(SignupRequest {
                id: Some("user-7".into()),
                ..signup("b@x.com", "p1")
            })
            .await
            .unwrap();
        assert_eq!(user.id, "user-7");
    }

    #[tokio::test]
    async fn signup_requires_email_and_password() {
        let users = service(PasswordMode::Plaintext);
        assert!(matches!(
            users.signup(SignupRequest::default()).await,
            Err(CoreError::Validation(ValidationError::MissingField("email")))
        ));
        assert!(matches!(
            users.signup(signup("a@x.com", "")).await,
            Err(CoreError::Validation(ValidationError::MissingField("password")))
        ));
    }
}
