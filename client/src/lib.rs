//! Contact client library modules.
//!
//! The crate is split the hexagonal way: [`domain`] owns the contact record
//! lifecycle (validation, list store, form controllers) and the ports it
//! drives, [`outbound`] adapts those ports to the remote contact service and
//! session storage, and [`inbound`] exposes the page flows on the command
//! line.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
