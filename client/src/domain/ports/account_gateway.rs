//! Driven port for the sign-up and sign-in endpoints.

use async_trait::async_trait;

use crate::domain::{GatewayError, LoginCredentials, Registration, SessionToken};

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignInOutcome {
    /// Token issued by the service, when it issues one.
    pub token: Option<SessionToken>,
}

/// Account endpoints of the contact service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Register a new account.
    async fn sign_up(&self, registration: &Registration) -> Result<(), GatewayError>;

    /// Exchange credentials for an optional session token.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignInOutcome, GatewayError>;
}
