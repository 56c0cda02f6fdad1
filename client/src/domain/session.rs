//! Signed-in identity passed explicitly to the flows that need it.
//!
//! There is no process-wide "current user". A [`SessionContext`] exists only
//! after a successful sign-in and is handed to callers by value.

use std::fmt;

use zeroize::Zeroizing;

/// Validation errors returned by [`SessionToken::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTokenError {
    /// The token was empty or only whitespace.
    Blank,
}

impl fmt::Display for SessionTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "session token must not be blank"),
        }
    }
}

impl std::error::Error for SessionTokenError {}

/// Opaque token issued by the sign-in endpoint.
///
/// The client never interprets it; it is stored by the session collaborator
/// and optionally replayed as a bearer credential.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Wrap a token string, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionTokenError> {
        let token = raw.into();
        if token.trim().is_empty() {
            return Err(SessionTokenError::Blank);
        }
        Ok(Self(Zeroizing::new(token)))
    }

    /// Raw token text.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Identity of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    email: String,
}

impl CurrentUser {
    /// Identity keyed by the email used to sign in.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Sign-in email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Explicit session produced by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user: CurrentUser,
    token: Option<SessionToken>,
}

impl SessionContext {
    /// Build a session for `user`, with the token the service returned, if any.
    #[must_use]
    pub const fn new(user: CurrentUser, token: Option<SessionToken>) -> Self {
        Self { user, token }
    }

    /// Who is signed in.
    #[must_use]
    pub const fn user(&self) -> &CurrentUser {
        &self.user
    }

    /// Token issued at sign-in.
    #[must_use]
    pub const fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }
}
