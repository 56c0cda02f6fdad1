//! Failures surfaced by the gateway and the form lifecycle.
//!
//! These errors are transport agnostic: the HTTP adapter maps reqwest
//! failures into [`GatewayError`], and controllers alone decide which text
//! the user sees.

use std::fmt;

use super::validation::FieldErrors;

/// Text shown when the service gives no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";

/// Category of a gateway failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// No response was received.
    Transport,
    /// The service answered with a non-2xx status.
    Status,
    /// A 2xx response body could not be decoded.
    Decode,
}

/// Failure of one contact or account service round-trip.
///
/// `status` is absent for transport failures. `server_message` holds the
/// `message` field of the error body when the service supplied one.
///
/// # Examples
/// ```
/// use contact_client::domain::GatewayError;
///
/// let err = GatewayError::status(404, None);
/// assert_eq!(err.message(), "Something went wrong.");
/// assert_eq!(err.message_or("Failed to load contact."), "Failed to load contact.");
///
/// let err = GatewayError::status(409, Some("duplicate email".to_owned()));
/// assert_eq!(err.message_or("Failed to load contact."), "duplicate email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.describe())]
pub struct GatewayError {
    kind: GatewayErrorKind,
    status: Option<u16>,
    server_message: Option<String>,
    detail: Option<String>,
}

impl GatewayError {
    /// Transport failure: the request never produced a response.
    #[must_use]
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            kind: GatewayErrorKind::Transport,
            status: None,
            server_message: None,
            detail: Some(detail.into()),
        }
    }

    /// Non-2xx response, carrying the body's message when one was given.
    #[must_use]
    pub fn status(status: u16, server_message: Option<String>) -> Self {
        Self {
            kind: GatewayErrorKind::Status,
            status: Some(status),
            server_message: server_message.filter(|message| !message.trim().is_empty()),
            detail: None,
        }
    }

    /// 2xx response whose body did not match the wire contract.
    #[must_use]
    pub fn decode(status: u16, detail: impl Into<String>) -> Self {
        Self {
            kind: GatewayErrorKind::Decode,
            status: Some(status),
            server_message: None,
            detail: Some(detail.into()),
        }
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> GatewayErrorKind {
        self.kind
    }

    /// HTTP status, absent for transport failures.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status
    }

    /// Message supplied by the service, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.server_message.as_deref()
    }

    /// User-facing message: the service text or the generic fallback.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message_or(GENERIC_FAILURE_MESSAGE)
    }

    /// User-facing message with a caller-chosen fallback.
    #[must_use]
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message.as_deref().unwrap_or(fallback)
    }

    fn describe(&self) -> String {
        let message = self.message();
        match (self.status, self.detail.as_deref()) {
            (Some(status), Some(detail)) => format!("{message} (status {status}: {detail})"),
            (Some(status), None) => format!("{message} (status {status})"),
            (None, Some(detail)) => format!("{message} ({detail})"),
            (None, None) => message.to_owned(),
        }
    }
}

/// Why a submission did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError<F: Ord> {
    /// The schema rejected the draft; nothing was sent.
    Invalid(FieldErrors<F>),
    /// A request from this form is still outstanding.
    InFlight,
    /// The form is not interactive yet (prefill pending or failed).
    NotReady,
    /// The form already succeeded.
    Completed,
    /// The gateway call failed.
    Gateway(GatewayError),
}

impl<F: Ord> SubmitError<F> {
    /// Whether the request reached the gateway.
    #[must_use]
    pub const fn reached_gateway(&self) -> bool {
        matches!(self, Self::Gateway(_))
    }
}

impl<F: Ord + Copy + fmt::Display> fmt::Display for SubmitError<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "form is invalid: {errors}"),
            Self::InFlight => write!(f, "a submission is already in progress"),
            Self::NotReady => write!(f, "form is not ready for submission"),
            Self::Completed => write!(f, "form was already submitted"),
            Self::Gateway(error) => write!(f, "{error}"),
        }
    }
}

impl<F: Ord + Copy + fmt::Debug + fmt::Display> std::error::Error for SubmitError<F> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gateway(error) => Some(error),
            _ => None,
        }
    }
}
