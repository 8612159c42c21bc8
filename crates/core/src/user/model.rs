use serde::{Deserialize, Serialize};

/// An account. Maps to the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    /// Stored lower-cased; unique across all users.
    pub email: String,
    /// Credential as stored: an Argon2 PHC string, or clear text in
    /// [`PasswordMode::Plaintext`](super::PasswordMode::Plaintext).
    #[serde(skip_serializing)]
    pub password: String,
    pub name: Option<String>,
}

/// Signup payload. A caller may suggest an id; otherwise one is generated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub id: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
