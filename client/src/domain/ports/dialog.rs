//! Port for blocking confirmations and non-blocking alerts.

/// Talks to the user outside the current view.
#[cfg_attr(test, mockall::automock)]
pub trait UserDialog: Send + Sync {
    /// Ask a yes/no question. `true` means the user agreed.
    fn confirm(&self, prompt: &str) -> bool;

    /// Show a message without waiting for an answer.
    fn alert(&self, message: &str);
}
