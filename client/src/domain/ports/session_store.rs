//! Port for persisting the token issued at sign-in.

use crate::domain::SessionToken;

/// Errors raised by session storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    /// The backing medium could not be read or written.
    #[error("session storage unavailable: {message}")]
    Unavailable {
        /// Underlying I/O failure.
        message: String,
    },
    /// A stored token was unreadable.
    #[error("stored session token is invalid: {message}")]
    Corrupt {
        /// Why the stored value was rejected.
        message: String,
    },
}

impl SessionStoreError {
    /// Storage medium failure.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Stored value did not parse.
    #[must_use]
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }
}

/// Persists the session token between runs.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Persist `token`, replacing any previous one.
    fn store_token(&self, token: &SessionToken) -> Result<(), SessionStoreError>;

    /// Read the stored token, if any.
    fn load_token(&self) -> Result<Option<SessionToken>, SessionStoreError>;

    /// Forget the stored token.
    fn clear(&self) -> Result<(), SessionStoreError>;
}
