//! Client-side view of the contact collection.
//!
//! The store is refreshed wholesale by [`ContactListStore::load`] and only
//! shrinks locally once the service has confirmed a deletion. Creations and
//! updates are picked up by the next load.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::ports::{ContactGateway, UserDialog};
use super::{Contact, ContactId, GatewayError};

/// Shown when the collection cannot be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load contacts. Please try again.";
/// Asked before any deletion request is sent.
pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this contact?";
/// Alerted when the service refuses a deletion.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete contact.";

/// Lifecycle of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// A fetch is outstanding, or none has completed yet.
    Loading,
    /// The stored contacts mirror the last successful fetch.
    Ready,
    /// The last fetch failed; the stored sequence is empty.
    Failed {
        /// Text shown in place of the list.
        message: String,
    },
}

/// What happened to a deletion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    /// The service confirmed the deletion and the record was dropped locally.
    Deleted,
    /// The service refused; the store is unchanged.
    Failed(GatewayError),
}

/// Ordered contact collection backed by a [`ContactGateway`].
///
/// ## Invariants
/// - Stored ids are unique.
/// - A record leaves the store only after the gateway confirms its removal.
pub struct ContactListStore<G: ?Sized> {
    gateway: Arc<G>,
    view: ListView,
    contacts: Vec<Contact>,
}

impl<G> ContactListStore<G>
where
    G: ContactGateway + ?Sized,
{
    /// Create an empty store in the loading state.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            view: ListView::Loading,
            contacts: Vec::new(),
        }
    }

    /// Current view state.
    #[must_use]
    pub const fn view(&self) -> &ListView {
        &self.view
    }

    /// Contacts in service order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Look up a contact by id.
    #[must_use]
    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id() == id)
    }

    /// Number of stored contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Replace the stored sequence with the service's current collection.
    ///
    /// On failure the sequence is cleared and the view carries
    /// [`LOAD_FAILED_MESSAGE`]; the gateway error is returned to the caller.
    pub async fn load(&mut self) -> Result<(), GatewayError> {
        self.view = ListView::Loading;
        debug!("loading contacts");
        match self.gateway.list().await {
            Ok(contacts) => {
                self.contacts = dedupe_by_id(contacts);
                self.view = ListView::Ready;
                debug!(count = self.contacts.len(), "contacts loaded");
                Ok(())
            }
            Err(error) => {
                warn!(%error, "failed to load contacts");
                self.contacts.clear();
                self.view = ListView::Failed {
                    message: LOAD_FAILED_MESSAGE.to_owned(),
                };
                Err(error)
            }
        }
    }

    /// Delete `id` remotely, then drop it locally.
    ///
    /// The stored sequence is untouched when the gateway fails.
    pub async fn apply_deletion(&mut self, id: &ContactId) -> Result<(), GatewayError> {
        self.gateway.remove(id).await.inspect_err(|error| {
            warn!(%id, %error, "failed to delete contact");
        })?;
        self.contacts.retain(|contact| contact.id() != id);
        info!(%id, "contact deleted");
        Ok(())
    }

    /// Ask for confirmation, then run [`Self::apply_deletion`].
    ///
    /// A refusal sends nothing. A gateway failure is alerted to the user.
    pub async fn confirm_and_delete<D>(&mut self, id: &ContactId, dialog: &D) -> DeletionOutcome
    where
        D: UserDialog + ?Sized,
    {
        if !dialog.confirm(DELETE_CONFIRMATION_PROMPT) {
            debug!(%id, "deletion cancelled");
            return DeletionOutcome::Cancelled;
        }
        match self.apply_deletion(id).await {
            Ok(()) => DeletionOutcome::Deleted,
            Err(error) => {
                dialog.alert(DELETE_FAILED_MESSAGE);
                DeletionOutcome::Failed(error)
            }
        }
    }
}

fn dedupe_by_id(contacts: Vec<Contact>) -> Vec<Contact> {
    let mut seen = HashSet::with_capacity(contacts.len());
    contacts
        .into_iter()
        .filter(|contact| {
            let fresh = seen.insert(contact.id().clone());
            if !fresh {
                warn!(id = %contact.id(), "dropping duplicate contact from list response");
            }
            fresh
        })
        .collect()
}
