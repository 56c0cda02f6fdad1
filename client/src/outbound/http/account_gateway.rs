//! Reqwest-backed account gateway.

use async_trait::async_trait;
use reqwest::Method;
use tracing::warn;

use super::dto::SignInResponseDto;
use super::routes::Endpoint;
use super::transport::HttpTransport;
use crate::domain::ports::{AccountGateway, SignInOutcome};
use crate::domain::{GatewayError, LoginCredentials, Registration, SessionToken};

/// [`AccountGateway`] over the `/signup` and `/signin` endpoints.
#[derive(Debug, Clone)]
pub struct HttpAccountGateway {
    transport: HttpTransport,
}

impl HttpAccountGateway {
    /// Gateway sharing `transport`.
    #[must_use]
    pub const fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AccountGateway for HttpAccountGateway {
    async fn sign_up(&self, registration: &Registration) -> Result<(), GatewayError> {
        let request = self
            .transport
            .request(Method::POST, Endpoint::SignUp)?
            .json(registration);
        self.transport.send(request).await?;
        Ok(())
    }

    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignInOutcome, GatewayError> {
        let request = self
            .transport
            .request(Method::POST, Endpoint::SignIn)?
            .json(credentials);
        let response = self.transport.send(request).await?;
        // A body without a token is still a successful sign-in.
        let dto: SignInResponseDto = response.decode("sign-in").unwrap_or_default();
        let token = dto.token.and_then(|raw| {
            SessionToken::new(raw)
                .inspect_err(|error| warn!(%error, "ignoring unusable session token"))
                .ok()
        });
        Ok(SignInOutcome { token })
    }
}
