//! Domain ports and supporting types for the hexagonal boundary.

mod account_gateway;
mod contact_gateway;
mod dialog;
mod navigator;
mod session_store;

#[cfg(test)]
pub use account_gateway::MockAccountGateway;
pub use account_gateway::{AccountGateway, SignInOutcome};
#[cfg(test)]
pub use contact_gateway::MockContactGateway;
pub use contact_gateway::ContactGateway;
#[cfg(test)]
pub use dialog::MockUserDialog;
pub use dialog::UserDialog;
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::{Navigator, Route};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
