//! Add and edit flows for a single contact.
//!
//! Both flows navigate back to the list after a successful save; the list
//! re-fetches on its next visit rather than patching itself.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::FormController;
use crate::domain::error::{GENERIC_FAILURE_MESSAGE, GatewayError, SubmitError};
use crate::domain::ports::{ContactGateway, Navigator, Route};
use crate::domain::{Contact, ContactField, ContactId, ContactSchema};

/// Shown when the edit prefill cannot be fetched.
pub const LOAD_CONTACT_FAILED_MESSAGE: &str = "Failed to load contact.";
/// Fallback when an update fails without a service message.
pub const UPDATE_CONTACT_FAILED_MESSAGE: &str = "Failed to update contact.";

/// Form for creating a contact.
pub struct AddContactForm<G: ?Sized, N: ?Sized> {
    gateway: Arc<G>,
    navigator: Arc<N>,
    form: FormController<ContactSchema>,
}

impl<G, N> AddContactForm<G, N>
where
    G: ContactGateway + ?Sized,
    N: Navigator + ?Sized,
{
    /// Empty add form.
    #[must_use]
    pub fn new(gateway: Arc<G>, navigator: Arc<N>) -> Self {
        Self {
            gateway,
            navigator,
            form: FormController::new(),
        }
    }

    /// Underlying form state.
    #[must_use]
    pub const fn form(&self) -> &FormController<ContactSchema> {
        &self.form
    }

    /// Record user input.
    pub fn edit(&mut self, field: ContactField, value: impl Into<String>) {
        self.form.edit(field, value);
    }

    /// Validate and create the contact, then return to the list.
    ///
    /// Repeated calls after a success are rejected, but two separate forms
    /// can still create the same record twice.
    pub async fn submit(&mut self) -> Result<Contact, SubmitError<ContactField>> {
        let gateway = &self.gateway;
        let created = self
            .form
            .submit_with(
                |contact| async move { gateway.create(&contact).await },
                GENERIC_FAILURE_MESSAGE,
            )
            .await
            .inspect_err(log_gateway_failure)?;
        info!(id = %created.id(), "contact created");
        self.navigator.navigate(Route::ContactList);
        Ok(created)
    }
}

/// Lifecycle of the edit form around its prefill fetch.
#[derive(Debug)]
pub enum EditState {
    /// Prefill outstanding; the form is not interactive.
    Loading,
    /// Prefill done; the form accepts input.
    Ready(FormController<ContactSchema>),
    /// Prefill failed. Terminal: there is no retry and no submit.
    LoadFailed {
        /// User-facing text.
        message: String,
        /// Underlying gateway failure.
        error: GatewayError,
    },
}

/// Form for replacing an existing contact.
pub struct EditContactForm<G: ?Sized, N: ?Sized> {
    id: ContactId,
    gateway: Arc<G>,
    navigator: Arc<N>,
    state: EditState,
}

impl<G, N> EditContactForm<G, N>
where
    G: ContactGateway + ?Sized,
    N: Navigator + ?Sized,
{
    /// Edit form for `id`; call [`Self::mount`] to fetch the record.
    #[must_use]
    pub const fn new(id: ContactId, gateway: Arc<G>, navigator: Arc<N>) -> Self {
        Self {
            id,
            gateway,
            navigator,
            state: EditState::Loading,
        }
    }

    /// Edit form built from a record the caller already holds.
    #[must_use]
    pub fn preloaded(contact: Contact, gateway: Arc<G>, navigator: Arc<N>) -> Self {
        let (id, fields) = contact.into_parts();
        Self {
            id,
            gateway,
            navigator,
            state: EditState::Ready(FormController::with_draft(fields)),
        }
    }

    /// Id of the record being edited.
    #[must_use]
    pub const fn id(&self) -> &ContactId {
        &self.id
    }

    /// Prefill and form state.
    #[must_use]
    pub const fn state(&self) -> &EditState {
        &self.state
    }

    /// Form state once the prefill resolved.
    #[must_use]
    pub const fn form(&self) -> Option<&FormController<ContactSchema>> {
        match &self.state {
            EditState::Ready(form) => Some(form),
            EditState::Loading | EditState::LoadFailed { .. } => None,
        }
    }

    /// Whether a submit would be accepted right now.
    #[must_use]
    pub fn is_submit_enabled(&self) -> bool {
        self.form().is_some_and(FormController::is_submit_enabled)
    }

    /// Fetch the record and make the form interactive.
    ///
    /// Does nothing once the prefill has resolved; a failed prefill keeps
    /// returning its original error.
    pub async fn mount(&mut self) -> Result<(), GatewayError> {
        match &self.state {
            EditState::Ready(_) => return Ok(()),
            EditState::LoadFailed { error, .. } => return Err(error.clone()),
            EditState::Loading => {}
        }
        debug!(id = %self.id, "prefilling edit form");
        match self.gateway.fetch_one(&self.id).await {
            Ok(contact) => {
                let (_, fields) = contact.into_parts();
                self.state = EditState::Ready(FormController::with_draft(fields));
                Ok(())
            }
            Err(error) => {
                warn!(id = %self.id, %error, "failed to load contact for editing");
                self.state = EditState::LoadFailed {
                    message: error.message_or(LOAD_CONTACT_FAILED_MESSAGE).to_owned(),
                    error: error.clone(),
                };
                Err(error)
            }
        }
    }

    /// Record user input. Ignored until the prefill has resolved.
    pub fn edit(&mut self, field: ContactField, value: impl Into<String>) {
        match &mut self.state {
            EditState::Ready(form) => form.edit(field, value),
            EditState::Loading | EditState::LoadFailed { .. } => {
                debug!(%field, "ignoring edit on non-interactive form");
            }
        }
    }

    /// Validate and replace the record, then return to the list.
    pub async fn submit(&mut self) -> Result<Contact, SubmitError<ContactField>> {
        let EditState::Ready(form) = &mut self.state else {
            return Err(SubmitError::NotReady);
        };
        let id = &self.id;
        let gateway = &self.gateway;
        let updated = form
            .submit_with(
                |contact| async move { gateway.update(id, &contact).await },
                UPDATE_CONTACT_FAILED_MESSAGE,
            )
            .await
            .inspect_err(log_gateway_failure)?;
        info!(id = %updated.id(), "contact updated");
        self.navigator.navigate(Route::ContactList);
        Ok(updated)
    }
}

fn log_gateway_failure(error: &SubmitError<ContactField>) {
    if let SubmitError::Gateway(cause) = error {
        warn!(error = %cause, "contact save failed");
    }
}
