//! Domain primitives, ports and flows of the contact client.
//!
//! Purpose: Define the contact and account types, the pure validation
//! schemas, the list store and the submit flows. Nothing here performs I/O
//! directly; every side effect goes through a port in [`ports`].
//!
//! Public surface:
//! - Contact, ContactId, ContactFields, ValidatedContact: the record and its
//!   parts; see each type's Rustdoc for the wire contract.
//! - ContactSchema, LoginSchema, RegistrationSchema: form rulesets.
//! - GatewayError, SubmitError: failures seen by controllers.
//! - ContactListStore: the list view backed by a `ContactGateway`.
//! - form: the generic `FormController` and the add, edit, login and
//!   register flows.

pub mod account;
pub mod contact;
pub mod contact_list;
pub mod error;
pub mod form;
pub mod ports;
pub mod schemas;
pub mod session;
pub mod validation;

pub use self::account::{
    LoginCredentials, LoginDraft, LoginField, Registration, RegistrationDraft, RegistrationField,
};
pub use self::contact::{
    Contact, ContactField, ContactFields, ContactId, ContactIdError, ValidatedContact,
};
pub use self::contact_list::{ContactListStore, DeletionOutcome, ListView};
pub use self::error::{GENERIC_FAILURE_MESSAGE, GatewayError, GatewayErrorKind, SubmitError};
pub use self::schemas::{ContactSchema, LoginSchema, RegistrationSchema};
pub use self::session::{CurrentUser, SessionContext, SessionToken, SessionTokenError};
pub use self::validation::{FieldError, FieldErrors, FormSchema, Rule, has_min_length, is_email};
