//! Outbound adapters: the contact service over HTTP and session storage.

pub mod http;
pub mod session;
