//! Credential storage and verification.

use std::str::FromStr;

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use tracing::warn;

use crate::error::{CoreError, CoreResult};

/// How passwords are stored and compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordMode {
    /// Salted Argon2id hashes, verified in constant time.
    #[default]
    Argon2,
    /// Clear text with byte-for-byte comparison. Test and local use only.
    Plaintext,
}

impl FromStr for PasswordMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" => Ok(PasswordMode::Argon2),
            "plaintext" => Ok(PasswordMode::Plaintext),
            other => Err(format!(
                "unknown password mode '{other}', expected 'argon2' or 'plaintext'"
            )),
        }
    }
}

impl PasswordMode {
    /// Produce the value to persist for `password`.
    pub fn protect(&self, password: &str) -> CoreResult<String> {
        match self {
            PasswordMode::Plaintext => Ok(password.to_string()),
            PasswordMode::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map_err(|e| CoreError::Credential(format!("password hashing failed: {e}")))?;
                Ok(hash.to_string())
            }
        }
    }

    /// Check `password` against a stored value.
    pub fn verify(&self, password: &str, stored: &str) -> CoreResult<bool> {
        match self {
            PasswordMode::Plaintext => Ok(password == stored),
            PasswordMode::Argon2 => {
                let parsed = match PasswordHash::new(stored) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        warn!("stored credential is not an argon2 hash: {e}");
                        return Ok(false);
                    }
                };
                match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(CoreError::Credential(format!(
                        "password verification failed: {e}"
                    ))),
                }
            }
        }
    }
}
