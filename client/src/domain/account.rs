//! Account forms: sign-in and registration.
//!
//! Drafts hold raw keystrokes; the validated values are produced only by
//! [`LoginSchema`](super::LoginSchema) and
//! [`RegistrationSchema`](super::RegistrationSchema). Passwords live in
//! zeroizing buffers once validated and never appear in `Debug` output.

use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use zeroize::Zeroizing;

/// Inputs of the sign-in form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    /// Login email.
    Email,
    /// Account password.
    Password,
}

impl fmt::Display for LoginField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Password => f.write_str("password"),
        }
    }
}

/// Raw sign-in form values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    /// Email as typed.
    pub email: String,
    /// Password as typed.
    pub password: String,
}

impl fmt::Debug for LoginDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDraft")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sign-in credentials that passed validation.
///
/// ## Invariants
/// - `email` matches the email grammar.
/// - `password` is non-empty and keeps caller-provided whitespace.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub(crate) fn new_unchecked(email: String, password: String) -> Self {
        Self {
            email,
            password: Zeroizing::new(password),
        }
    }

    /// Email the account was registered with.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as typed.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Serialize for LoginCredentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LoginCredentials", 2)?;
        state.serialize_field("email", self.email())?;
        state.serialize_field("password", self.password())?;
        state.end()
    }
}

/// Inputs of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistrationField {
    /// Display name.
    Name,
    /// Login email.
    Email,
    /// Chosen password.
    Password,
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Email => f.write_str("email"),
            Self::Password => f.write_str("password"),
        }
    }
}

/// Raw registration form values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    /// Name as typed.
    pub name: String,
    /// Email as typed.
    pub email: String,
    /// Password as typed.
    pub password: String,
}

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration details that passed validation.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl Registration {
    pub(crate) fn new_unchecked(name: String, email: String, password: String) -> Self {
        Self {
            name,
            email,
            password: Zeroizing::new(password),
        }
    }

    /// Display name for the new account.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Sign-in email for the new account.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Serialize for Registration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Registration", 3)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("email", self.email())?;
        state.serialize_field("password", self.password())?;
        state.end()
    }
}
