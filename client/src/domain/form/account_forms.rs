//! Sign-in and registration flows.

use std::sync::Arc;

use tracing::{info, warn};

use super::FormController;
use crate::domain::error::SubmitError;
use crate::domain::ports::{AccountGateway, Navigator, Route, SessionStore};
use crate::domain::{
    CurrentUser, LoginField, LoginSchema, RegistrationField, RegistrationSchema, SessionContext,
};

/// Fallback when sign-in fails without a service message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Try again.";
/// Fallback when registration fails without a service message.
pub const REGISTER_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Sign-in form.
///
/// A successful submit stores the issued token, moves to the contact list and
/// hands back the [`SessionContext`] for the caller to carry.
pub struct LoginForm<A: ?Sized, S: ?Sized, N: ?Sized> {
    gateway: Arc<A>,
    sessions: Arc<S>,
    navigator: Arc<N>,
    form: FormController<LoginSchema>,
}

impl<A, S, N> LoginForm<A, S, N>
where
    A: AccountGateway + ?Sized,
    S: SessionStore + ?Sized,
    N: Navigator + ?Sized,
{
    /// Empty sign-in form.
    #[must_use]
    pub fn new(gateway: Arc<A>, sessions: Arc<S>, navigator: Arc<N>) -> Self {
        Self {
            gateway,
            sessions,
            navigator,
            form: FormController::new(),
        }
    }

    /// Underlying form state.
    #[must_use]
    pub const fn form(&self) -> &FormController<LoginSchema> {
        &self.form
    }

    /// Record user input.
    pub fn edit(&mut self, field: LoginField, value: impl Into<String>) {
        self.form.edit(field, value);
    }

    /// Validate and sign in.
    pub async fn submit(&mut self) -> Result<SessionContext, SubmitError<LoginField>> {
        let gateway = &self.gateway;
        let (email, outcome) = self
            .form
            .submit_with(
                |credentials| async move {
                    let outcome = gateway.sign_in(&credentials).await?;
                    Ok((credentials.email().to_owned(), outcome))
                },
                LOGIN_FAILED_MESSAGE,
            )
            .await
            .inspect_err(|error| {
                if let SubmitError::Gateway(cause) = error {
                    warn!(error = %cause, "sign-in failed");
                }
            })?;

        if let Some(token) = &outcome.token {
            if let Err(error) = self.sessions.store_token(token) {
                warn!(%error, "signed in but the session token could not be stored");
            }
        }
        info!("signed in");
        self.navigator.navigate(Route::ContactList);
        Ok(SessionContext::new(CurrentUser::new(email), outcome.token))
    }
}

/// Registration form. A successful submit moves to the sign-in form.
pub struct RegisterForm<A: ?Sized, N: ?Sized> {
    gateway: Arc<A>,
    navigator: Arc<N>,
    form: FormController<RegistrationSchema>,
}

impl<A, N> RegisterForm<A, N>
where
    A: AccountGateway + ?Sized,
    N: Navigator + ?Sized,
{
    /// Empty registration form.
    #[must_use]
    pub fn new(gateway: Arc<A>, navigator: Arc<N>) -> Self {
        Self {
            gateway,
            navigator,
            form: FormController::new(),
        }
    }

    /// Underlying form state.
    #[must_use]
    pub const fn form(&self) -> &FormController<RegistrationSchema> {
        &self.form
    }

    /// Record user input.
    pub fn edit(&mut self, field: RegistrationField, value: impl Into<String>) {
        self.form.edit(field, value);
    }

    /// Validate and register.
    pub async fn submit(&mut self) -> Result<(), SubmitError<RegistrationField>> {
        let gateway = &self.gateway;
        self.form
            .submit_with(
                |registration| async move { gateway.sign_up(&registration).await },
                REGISTER_FAILED_MESSAGE,
            )
            .await
            .inspect_err(|error| {
                if let SubmitError::Gateway(cause) = error {
                    warn!(error = %cause, "registration failed");
                }
            })?;
        info!("account registered");
        self.navigator.navigate(Route::Login);
        Ok(())
    }
}
