//! Credential check for the single operator account.
//!
//! The dashboard is gated by a username/password pair. Only the SHA-256 of
//! the password is configured; the submitted password is hashed and the two
//! digests are compared without early exit. Any mismatch yields the same
//! [`AuthError::InvalidCredentials`], whichever field was wrong.

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::error::ErrorCode;

/// Identity carried by an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl AuthError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCredentials => ErrorCode::InvalidCredentials,
        }
    }
}

/// Something that turns submitted credentials into a session.
pub trait Authenticator {
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the pair is rejected.
    fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError>;
}

/// Checks against the account from [`AuthConfig`].
#[derive(Debug, Clone)]
pub struct CredentialAuthenticator {
    account: AuthConfig,
}

impl CredentialAuthenticator {
    #[must_use]
    pub fn new(account: AuthConfig) -> Self {
        Self { account }
    }
}

impl Authenticator for CredentialAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let user_ok = constant_time_eq(username.as_bytes(), self.account.username.as_bytes());
        let digest = sha256_hex(password.as_bytes());
        let expected = self.account.password_sha256.trim().to_ascii_lowercase();
        let pass_ok = constant_time_eq(digest.as_bytes(), expected.as_bytes());

        if user_ok && pass_ok {
            info!(user_id = %self.account.user_id, "login accepted");
            Ok(Session {
                id: self.account.user_id.clone(),
                name: self.account.display_name.clone(),
                email: self.account.email.clone(),
            })
        } else {
            warn!("login rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
