//! Form lifecycle shared by every submit flow.
//!
//! A [`FormController`] owns the draft and walks
//! `Idle → Validating → Submitting → {Success, Failed}`. Validation failures
//! return to `Idle` without any network call; a gateway failure keeps the
//! draft so the user can retry. The concrete flows in [`contact_forms`] and
//! [`account_forms`] only choose which gateway call to make and what happens
//! after it succeeds.

use std::fmt;
use std::future::Future;

use tracing::debug;

use super::error::{GatewayError, SubmitError};
use super::validation::{FieldErrors, FormSchema};

pub mod account_forms;
pub mod contact_forms;

/// Position of a form in its submit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Accepting input; submit is enabled.
    Idle,
    /// The schema is running.
    Validating,
    /// A gateway call is outstanding; submit is disabled.
    Submitting,
    /// The gateway call succeeded; the form is finished.
    Success,
    /// The gateway call failed; submit is enabled again.
    Failed,
}

impl fmt::Display for FormPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Draft plus submit state for one form described by `S`.
///
/// # Examples
/// ```
/// use contact_client::domain::form::{FormController, FormPhase};
/// use contact_client::domain::{ContactField, ContactSchema};
///
/// let mut form = FormController::<ContactSchema>::new();
/// form.edit(ContactField::CompanyName, "A");
/// assert!(form.begin_submit().is_err());
/// assert_eq!(form.phase(), FormPhase::Idle);
/// assert!(form.field_errors().get(ContactField::CompanyName).is_some());
/// ```
pub struct FormController<S: FormSchema> {
    draft: S::Draft,
    phase: FormPhase,
    field_errors: FieldErrors<S::Field>,
    failure: Option<String>,
}

impl<S: FormSchema> fmt::Debug for FormController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("draft", &self.draft)
            .field("phase", &self.phase)
            .field("field_errors", &self.field_errors)
            .field("failure", &self.failure)
            .finish()
    }
}

impl<S: FormSchema> Default for FormController<S> {
    fn default() -> Self {
        Self::with_draft(S::Draft::default())
    }
}

impl<S: FormSchema> FormController<S> {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled with `draft`.
    #[must_use]
    pub fn with_draft(draft: S::Draft) -> Self {
        Self {
            draft,
            phase: FormPhase::Idle,
            field_errors: FieldErrors::default(),
            failure: None,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Values as typed so far.
    #[must_use]
    pub const fn draft(&self) -> &S::Draft {
        &self.draft
    }

    /// Errors from the last rejected submit. Empty until one happens.
    #[must_use]
    pub const fn field_errors(&self) -> &FieldErrors<S::Field> {
        &self.field_errors
    }

    /// Message from the last gateway failure, while the form is `Failed`.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Whether a submit would be accepted right now.
    #[must_use]
    pub const fn is_submit_enabled(&self) -> bool {
        matches!(self.phase, FormPhase::Idle | FormPhase::Failed)
    }

    /// Record user input for `field`.
    ///
    /// An edit after a failure returns the form to `Idle`.
    pub fn edit(&mut self, field: S::Field, value: impl Into<String>) {
        S::assign(&mut self.draft, field, value.into());
        if self.phase == FormPhase::Failed {
            self.transition(FormPhase::Idle);
            self.failure = None;
        }
    }

    /// Validate the draft and, if it passes, enter `Submitting`.
    ///
    /// The caller must follow an `Ok` with [`Self::complete`] or [`Self::fail`].
    pub fn begin_submit(&mut self) -> Result<S::Valid, SubmitError<S::Field>> {
        match self.phase {
            FormPhase::Submitting => return Err(SubmitError::InFlight),
            FormPhase::Success => return Err(SubmitError::Completed),
            FormPhase::Idle | FormPhase::Validating | FormPhase::Failed => {}
        }
        self.transition(FormPhase::Validating);
        match S::validate(&self.draft) {
            Ok(valid) => {
                self.field_errors = FieldErrors::default();
                self.failure = None;
                self.transition(FormPhase::Submitting);
                Ok(valid)
            }
            Err(errors) => {
                self.field_errors = errors.clone();
                self.transition(FormPhase::Idle);
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    /// Mark the outstanding submission as successful.
    pub fn complete(&mut self) {
        if self.phase == FormPhase::Submitting {
            self.transition(FormPhase::Success);
        }
    }

    /// Mark the outstanding submission as failed with a user-facing message.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.phase == FormPhase::Submitting {
            self.failure = Some(message.into());
            self.transition(FormPhase::Failed);
        }
    }

    /// Run a full submit: validate, call the gateway, settle the phase.
    ///
    /// On failure the form shows the service's message, or `fallback` when
    /// the service supplied none.
    pub async fn submit_with<T, C, Fut>(
        &mut self,
        call: C,
        fallback: &str,
    ) -> Result<T, SubmitError<S::Field>>
    where
        C: FnOnce(S::Valid) -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let valid = self.begin_submit()?;
        match call(valid).await {
            Ok(value) => {
                self.complete();
                Ok(value)
            }
            Err(error) => {
                self.fail(error.message_or(fallback));
                Err(SubmitError::Gateway(error))
            }
        }
    }

    fn transition(&mut self, next: FormPhase) {
        debug!(from = %self.phase, to = %next, "form phase change");
        self.phase = next;
    }
}
