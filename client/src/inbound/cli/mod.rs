//! Command-line adapter for the contact flows.
//!
//! The binary parses arguments and wires adapters; [`execute`] runs one
//! command against injected ports so it can be exercised in tests without
//! spawning a subprocess or a server.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::domain::contact_list::{DELETE_FAILED_MESSAGE, LOAD_FAILED_MESSAGE};
use crate::domain::form::account_forms::{LoginForm, RegisterForm};
use crate::domain::form::contact_forms::{AddContactForm, EditContactForm, EditState};
use crate::domain::form::FormController;
use crate::domain::ports::{AccountGateway, ContactGateway, Navigator, SessionStore, UserDialog};
use crate::domain::{
    ContactField, ContactId, ContactIdError, ContactListStore, DeletionOutcome, FormSchema,
    GatewayError, LoginField, RegistrationField, SubmitError,
};
use crate::outbound::http::RouteStyle;

pub mod render;
pub mod terminal;

use self::terminal::PreConfirmed;

/// `contacts` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "contacts",
    about = "Manage contacts stored by the remote contact service",
    version
)]
pub struct Cli {
    /// Service root URL. Overrides `CONTACTS_BASE_URL`.
    #[arg(long = "base-url", value_name = "url", global = true)]
    pub base_url: Option<String>,
    /// `canonical` or `root-alias`. Overrides `CONTACTS_ROUTE_STYLE`.
    #[arg(long = "route-style", value_name = "style", global = true)]
    pub route_style: Option<RouteStyle>,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed on the command line.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every contact.
    List,
    /// Create a contact.
    Add(NewContactArgs),
    /// Replace fields of an existing contact.
    Edit {
        /// Id of the contact to edit.
        id: String,
        /// Replacement field values.
        #[command(flatten)]
        changes: ContactChangeArgs,
    },
    /// Delete a contact after confirmation.
    Delete {
        /// Id of the contact to delete.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Sign in and remember the session token.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    Register {
        /// Display name, at least two characters.
        #[arg(long)]
        name: String,
        /// Sign-in email.
        #[arg(long)]
        email: String,
        /// Password, at least six characters.
        #[arg(long)]
        password: String,
    },
}

/// Fields of a new contact.
#[derive(Debug, Clone, Args)]
pub struct NewContactArgs {
    /// Company name.
    #[arg(long)]
    pub name: String,
    /// Company email.
    #[arg(long)]
    pub email: String,
    /// Company phone.
    #[arg(long)]
    pub phone: String,
    /// Company address.
    #[arg(long, default_value = "")]
    pub address: String,
}

/// Fields to change on an existing contact. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Args)]
pub struct ContactChangeArgs {
    /// New company name.
    #[arg(long)]
    pub name: Option<String>,
    /// New company email.
    #[arg(long)]
    pub email: Option<String>,
    /// New company phone.
    #[arg(long)]
    pub phone: Option<String>,
    /// New company address.
    #[arg(long)]
    pub address: Option<String>,
}

impl ContactChangeArgs {
    fn into_edits(self) -> impl Iterator<Item = (ContactField, String)> {
        [
            (ContactField::CompanyName, self.name),
            (ContactField::CompanyEmail, self.email),
            (ContactField::CompanyPhone, self.phone),
            (ContactField::CompanyAddress, self.address),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
    }
}

/// Failures reported by a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The id argument is not a valid contact id.
    #[error("invalid contact id: {0}")]
    InvalidId(#[from] ContactIdError),
    /// Form input broke the validation rules.
    #[error("{0}")]
    Invalid(String),
    /// The service rejected the request or could not be reached.
    #[error("{message}")]
    Gateway {
        /// Text shown to the user.
        message: String,
        /// Failure reported by the gateway.
        #[source]
        source: GatewayError,
    },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Ports a command runs against.
pub struct Services {
    /// Contact service.
    pub contacts: Arc<dyn ContactGateway>,
    /// Account service.
    pub accounts: Arc<dyn AccountGateway>,
    /// Token storage.
    pub sessions: Arc<dyn SessionStore>,
    /// Flow hand-over.
    pub navigator: Arc<dyn Navigator>,
    /// Confirmations and alerts.
    pub dialog: Arc<dyn UserDialog>,
}

/// Run `command` and write its output to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when validation or the gateway fails, so the binary
/// can exit non-zero.
pub async fn execute(
    command: Command,
    services: &Services,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::List => list(services, out).await,
        Command::Add(args) => add(args, services, out).await,
        Command::Edit { id, changes } => {
            edit(ContactId::new(id)?, changes, services, out).await
        }
        Command::Delete { id, yes } => delete(ContactId::new(id)?, yes, services, out).await,
        Command::Login { email, password } => login(email, password, services, out).await,
        Command::Register {
            name,
            email,
            password,
        } => register(name, email, password, services, out).await,
    }
}

async fn list(services: &Services, out: &mut impl Write) -> Result<(), CliError> {
    let mut store = ContactListStore::new(Arc::clone(&services.contacts));
    if let Err(source) = store.load().await {
        return Err(CliError::Gateway {
            message: LOAD_FAILED_MESSAGE.to_owned(),
            source,
        });
    }
    render::write_contacts(out, store.contacts())?;
    Ok(())
}

async fn add(
    args: NewContactArgs,
    services: &Services,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut form = AddContactForm::new(
        Arc::clone(&services.contacts),
        Arc::clone(&services.navigator),
    );
    form.edit(ContactField::CompanyName, args.name);
    form.edit(ContactField::CompanyEmail, args.email);
    form.edit(ContactField::CompanyPhone, args.phone);
    form.edit(ContactField::CompanyAddress, args.address);
    let created = match form.submit().await {
        Ok(contact) => contact,
        Err(error) => return Err(submit_failure(error, form.form())),
    };
    writeln!(out, "Created contact {}", created.id())?;
    Ok(())
}

async fn edit(
    id: ContactId,
    changes: ContactChangeArgs,
    services: &Services,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut form = EditContactForm::new(
        id,
        Arc::clone(&services.contacts),
        Arc::clone(&services.navigator),
    );
    if let Err(source) = form.mount().await {
        let message = match form.state() {
            EditState::LoadFailed { message, .. } => message.clone(),
            EditState::Loading | EditState::Ready(_) => source.message().to_owned(),
        };
        return Err(CliError::Gateway { message, source });
    }
    for (field, value) in changes.into_edits() {
        form.edit(field, value);
    }
    let updated = match form.submit().await {
        Ok(contact) => contact,
        Err(SubmitError::NotReady) => {
            return Err(CliError::Invalid("Contact is not ready for editing.".to_owned()));
        }
        Err(error) => {
            let shown = form.form().and_then(FormController::failure_message);
            return Err(submit_failure_from(error, shown));
        }
    };
    writeln!(out, "Updated contact {}", updated.id())?;
    Ok(())
}

async fn delete(
    id: ContactId,
    yes: bool,
    services: &Services,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut store = ContactListStore::new(Arc::clone(&services.contacts));
    let dialog = services.dialog.as_ref();
    let outcome = if yes {
        store.confirm_and_delete(&id, &PreConfirmed(dialog)).await
    } else {
        store.confirm_and_delete(&id, dialog).await
    };
    match outcome {
        DeletionOutcome::Deleted => writeln!(out, "Deleted contact {id}")?,
        DeletionOutcome::Cancelled => writeln!(out, "Deletion cancelled.")?,
        DeletionOutcome::Failed(source) => {
            return Err(CliError::Gateway {
                message: DELETE_FAILED_MESSAGE.to_owned(),
                source,
            });
        }
    }
    Ok(())
}

async fn login(
    email: String,
    password: String,
    services: &Services,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut form = LoginForm::new(
        Arc::clone(&services.accounts),
        Arc::clone(&services.sessions),
        Arc::clone(&services.navigator),
    );
    form.edit(LoginField::Email, email);
    form.edit(LoginField::Password, password);
    let session = match form.submit().await {
        Ok(context) => context,
        Err(error) => return Err(submit_failure(error, form.form())),
    };
    writeln!(out, "Signed in as {}", session.user().email())?;
    Ok(())
}

async fn register(
    name: String,
    email: String,
    password: String,
    services: &Services,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut form = RegisterForm::new(
        Arc::clone(&services.accounts),
        Arc::clone(&services.navigator),
    );
    form.edit(RegistrationField::Name, name);
    form.edit(RegistrationField::Email, email.as_str());
    form.edit(RegistrationField::Password, password);
    if let Err(error) = form.submit().await {
        return Err(submit_failure(error, form.form()));
    }
    writeln!(out, "Registered {email}. You can now sign in.")?;
    Ok(())
}

fn submit_failure<S>(error: SubmitError<S::Field>, form: &FormController<S>) -> CliError
where
    S: FormSchema,
{
    submit_failure_from(error, form.failure_message())
}

fn submit_failure_from<F>(error: SubmitError<F>, shown: Option<&str>) -> CliError
where
    F: Ord + Copy + fmt::Display,
{
    match error {
        SubmitError::Invalid(errors) => CliError::Invalid(render::format_field_errors(&errors)),
        SubmitError::Gateway(source) => CliError::Gateway {
            message: shown.unwrap_or_else(|| source.message()).to_owned(),
            source,
        },
        other => CliError::Invalid(other.to_string()),
    }
}
