//! Reqwest adapters for the remote contact and account service.
//!
//! [`HttpContactGateway`] and [`HttpAccountGateway`] share one
//! [`HttpTransport`] so they reuse the connection pool, the bearer token and
//! the route layout.

mod account_gateway;
mod contact_gateway;
mod dto;
mod routes;
mod transport;

pub use account_gateway::HttpAccountGateway;
pub use contact_gateway::HttpContactGateway;
pub use routes::{RouteStyle, RouteStyleParseError};
pub use transport::{HttpGatewayConfig, HttpTransport, REQUEST_ID_HEADER};
