//! Port for moving between views after a flow completes.

use std::fmt;

/// Views a flow can hand over to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The contact list.
    ContactList,
    /// The sign-in form.
    Login,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContactList => f.write_str("contact-list"),
            Self::Login => f.write_str("login"),
        }
    }
}

/// Switches the visible view.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Switch to `route`.
    fn navigate(&self, route: Route);
}
