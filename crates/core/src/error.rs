use thiserror::Error;

use crate::validate::ValidationError;

/// Errors produced by services and stores.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("credential error: {0}")]
    Credential(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CoreError {
    pub fn not_found(what: &str, id: &str) -> Self {
        CoreError::NotFound(format!("{what} '{id}' does not exist"))
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
