//! Shared reqwest plumbing for the contact service adapters.
//!
//! This module owns transport details only: URL construction, headers,
//! timeouts and the mapping from HTTP outcomes to [`GatewayError`].

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::dto::error_message;
use super::routes::{Endpoint, RouteStyle};
use crate::domain::{GatewayError, SessionToken};

/// Correlation header attached to every request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wiring options for the HTTP adapters.
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Service root; paths are appended to it.
    pub base_url: Url,
    /// Path family for single-record operations.
    pub route_style: RouteStyle,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer_token: Option<SessionToken>,
}

impl HttpGatewayConfig {
    /// Canonical routes, no timeout, no credentials.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            route_style: RouteStyle::default(),
            timeout: None,
            bearer_token: None,
        }
    }

    /// Use `route_style` for single-record paths.
    #[must_use]
    pub fn with_route_style(mut self, route_style: RouteStyle) -> Self {
        self.route_style = route_style;
        self
    }

    /// Abort requests that take longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Authenticate requests with `token`.
    #[must_use]
    pub fn with_bearer_token(mut self, token: SessionToken) -> Self {
        self.bearer_token = Some(token);
        self
    }
}

/// Connection pool plus request conventions shared by the adapters.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    route_style: RouteStyle,
    bearer_token: Option<SessionToken>,
}

/// Status and raw body of a successful response.
pub(super) struct SuccessBody {
    pub(super) status: StatusCode,
    pub(super) body: Vec<u8>,
}

impl SuccessBody {
    /// Decode the body, mapping failures to a decode error.
    pub(super) fn decode<T: DeserializeOwned>(&self, what: &str) -> Result<T, GatewayError> {
        serde_json::from_slice(&self.body).map_err(|error| {
            GatewayError::decode(self.status.as_u16(), format!("invalid {what} payload: {error}"))
        })
    }
}

impl HttpTransport {
    /// Build the transport and its reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: HttpGatewayConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url,
            route_style: config.route_style,
            bearer_token: config.bearer_token,
        })
    }

    /// Configured path family.
    #[must_use]
    pub const fn route_style(&self) -> RouteStyle {
        self.route_style
    }

    pub(super) fn url(&self, endpoint: Endpoint<'_>) -> Result<Url, GatewayError> {
        build_url(&self.base_url, &self.route_style.segments(endpoint))
    }

    pub(super) fn request(
        &self,
        method: Method,
        endpoint: Endpoint<'_>,
    ) -> Result<RequestBuilder, GatewayError> {
        let url = self.url(endpoint)?;
        let request_id = Uuid::new_v4();
        debug!(%method, %url, %request_id, "sending contact service request");
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(token) = &self.bearer_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose()));
        }
        Ok(builder)
    }

    /// Send `request` and return the body of a 2xx response.
    pub(super) async fn send(&self, request: RequestBuilder) -> Result<SuccessBody, GatewayError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(SuccessBody {
            status,
            body: body.to_vec(),
        })
    }
}

fn build_url(base: &Url, segments: &[&str]) -> Result<Url, GatewayError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| GatewayError::transport(format!("base URL `{base}` cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::transport(format!("request timed out: {error}"))
    } else {
        GatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    GatewayError::status(status.as_u16(), error_message(body))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network transport helpers.
    use super::*;
    use crate::domain::{ContactId, GatewayErrorKind};
    use rstest::rstest;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("valid URL")
    }

    #[rstest]
    #[case("http://localhost:5000", &["contacts"], "http://localhost:5000/contacts")]
    #[case("http://localhost:5000/", &["contacts", "7"], "http://localhost:5000/contacts/7")]
    #[case("https://api.test/v1/", &["contacts"], "https://api.test/v1/contacts")]
    #[case("https://api.test/v1", &[], "https://api.test/v1")]
    #[case("http://localhost:5000", &["a/b c"], "http://localhost:5000/a%2Fb%20c")]
    fn builds_urls_under_the_base(
        #[case] base: &str,
        #[case] segments: &[&str],
        #[case] expected: &str,
    ) {
        let built = build_url(&url(base), segments).expect("url builds");
        assert_eq!(built.as_str(), expected);
    }

    #[test]
    fn rejects_bases_without_paths() {
        let err = build_url(&url("mailto:ops@example.com"), &["contacts"]).expect_err("no path");
        assert_eq!(err.kind(), GatewayErrorKind::Transport);
    }

    #[rstest]
    #[case::with_message(StatusCode::NOT_FOUND, br#"{"message":"No such contact"}"#.as_slice(), Some("No such contact"))]
    #[case::without_message(StatusCode::INTERNAL_SERVER_ERROR, b"oops".as_slice(), None)]
    fn maps_statuses_with_optional_server_message(
        #[case] status: StatusCode,
        #[case] body: &[u8],
        #[case] expected: Option<&str>,
    ) {
        let error = map_status_error(status, body);
        assert_eq!(error.status_code(), Some(status.as_u16()));
        assert_eq!(error.server_message(), expected);
    }

    #[test]
    fn item_urls_encode_the_id_as_one_segment() {
        let transport =
            HttpTransport::new(HttpGatewayConfig::new(url("http://localhost:5000")))
                .expect("client builds");
        let id = ContactId::new("a/b").expect("id");

        let built = transport.url(Endpoint::Contact(&id)).expect("url builds");

        assert_eq!(built.as_str(), "http://localhost:5000/contacts/a%2Fb");
    }

    #[test]
    fn decode_failures_keep_the_status() {
        let body = SuccessBody {
            status: StatusCode::OK,
            body: b"[1,2]".to_vec(),
        };
        let error = body.decode::<String>("contact").expect_err("not a string");
        assert_eq!(error.kind(), GatewayErrorKind::Decode);
        assert_eq!(error.status_code(), Some(200));
    }
}
