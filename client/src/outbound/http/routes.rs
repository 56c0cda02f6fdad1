//! Path layout of the contact service.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::ContactId;

/// Which path family the service exposes for single-record operations.
///
/// Listing is always `GET /contacts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteStyle {
    /// `/contacts` and `/contacts/{id}` for every operation.
    #[default]
    Canonical,
    /// `POST /` to create and `/{id}` for fetch, update and delete.
    RootAlias,
}

/// Raised when a route style name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route style `{0}`; expected `canonical` or `root-alias`")]
pub struct RouteStyleParseError(String);

impl FromStr for RouteStyle {
    type Err = RouteStyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" => Ok(Self::Canonical),
            "root-alias" | "root_alias" | "root" => Ok(Self::RootAlias),
            _ => Err(RouteStyleParseError(s.to_owned())),
        }
    }
}

impl fmt::Display for RouteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical => f.write_str("canonical"),
            Self::RootAlias => f.write_str("root-alias"),
        }
    }
}

/// One addressable operation of the service.
#[derive(Debug, Clone, Copy)]
pub(super) enum Endpoint<'a> {
    ListContacts,
    CreateContact,
    Contact(&'a ContactId),
    SignUp,
    SignIn,
}

impl RouteStyle {
    /// Unencoded path segments for `endpoint`, relative to the base URL.
    pub(super) fn segments<'a>(self, endpoint: Endpoint<'a>) -> Vec<&'a str> {
        match (self, endpoint) {
            (_, Endpoint::ListContacts)
            | (Self::Canonical, Endpoint::CreateContact) => vec!["contacts"],
            (Self::Canonical, Endpoint::Contact(id)) => vec!["contacts", id.as_ref()],
            (Self::RootAlias, Endpoint::CreateContact) => Vec::new(),
            (Self::RootAlias, Endpoint::Contact(id)) => vec![id.as_ref()],
            (_, Endpoint::SignUp) => vec!["signup"],
            (_, Endpoint::SignIn) => vec!["signin"],
        }
    }
}
