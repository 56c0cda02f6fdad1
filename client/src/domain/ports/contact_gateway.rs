//! Driven port for the remote contact collection.
//!
//! Each method is a single round-trip with no retry. Nothing here is
//! idempotent: calling `create` twice creates two records.

use async_trait::async_trait;

use crate::domain::{Contact, ContactId, GatewayError, ValidatedContact};

/// CRUD operations against the contact collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactGateway: Send + Sync {
    /// Fetch the full collection. An empty list is a valid result.
    async fn list(&self) -> Result<Vec<Contact>, GatewayError>;

    /// Fetch one record, used to prefill the edit form.
    async fn fetch_one(&self, id: &ContactId) -> Result<Contact, GatewayError>;

    /// Create a record; the service assigns the id.
    async fn create(&self, contact: &ValidatedContact) -> Result<Contact, GatewayError>;

    /// Replace every attribute of an existing record.
    async fn update(
        &self,
        id: &ContactId,
        contact: &ValidatedContact,
    ) -> Result<Contact, GatewayError>;

    /// Delete a record.
    async fn remove(&self, id: &ContactId) -> Result<(), GatewayError>;
}
