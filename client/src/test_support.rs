//! Test utilities for the contact client crate.
//!
//! In-memory doubles for every port, shared by unit tests (in `src/`) and
//! behaviour tests (in `tests/`). They record each call so scenarios can
//! assert on network traffic without a server. Only compiled for tests or
//! with the `test-support` feature.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{AccountGateway, ContactGateway, Navigator, Route, SignInOutcome, UserDialog};
use crate::domain::{
    Contact, ContactFields, ContactId, GatewayError, LoginCredentials, Registration,
    SessionToken, ValidatedContact,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Contact gateway operations, used to script failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactOperation {
    /// `ContactGateway::list`.
    List,
    /// `ContactGateway::fetch_one`.
    FetchOne,
    /// `ContactGateway::create`.
    Create,
    /// `ContactGateway::update`.
    Update,
    /// `ContactGateway::remove`.
    Remove,
}

/// One recorded contact gateway call with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactCall {
    /// The whole collection was requested.
    List,
    /// One record was requested for prefill.
    FetchOne(ContactId),
    /// A record was created with these fields.
    Create(ContactFields),
    /// A record was replaced with these fields.
    Update(ContactId, ContactFields),
    /// A record was deleted.
    Remove(ContactId),
}

impl ContactCall {
    /// Operation this call belongs to.
    #[must_use]
    pub const fn operation(&self) -> ContactOperation {
        match self {
            Self::List => ContactOperation::List,
            Self::FetchOne(_) => ContactOperation::FetchOne,
            Self::Create(_) => ContactOperation::Create,
            Self::Update(..) => ContactOperation::Update,
            Self::Remove(_) => ContactOperation::Remove,
        }
    }
}

#[derive(Debug, Default)]
struct ContactState {
    contacts: Vec<Contact>,
    calls: Vec<ContactCall>,
    failures: HashMap<ContactOperation, VecDeque<GatewayError>>,
    next_ids: VecDeque<String>,
    issued: u64,
}

/// In-memory contact service that records every call.
///
/// Created records get ids from [`Self::queue_ids`] first, then `c1`, `c2`,
/// and so on.
#[derive(Debug, Default)]
pub struct RecordingContactGateway {
    state: Mutex<ContactState>,
}

impl RecordingContactGateway {
    /// Empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Service holding `contacts`, in order.
    #[must_use]
    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let gateway = Self::new();
        lock(&gateway.state).contacts = contacts.into_iter().collect();
        gateway
    }

    /// Replace the stored collection.
    pub fn set_contacts(&self, contacts: impl IntoIterator<Item = Contact>) {
        lock(&self.state).contacts = contacts.into_iter().collect();
    }

    /// Make the next call to `operation` fail with `error`.
    pub fn fail_next(&self, operation: ContactOperation, error: GatewayError) {
        lock(&self.state)
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Ids handed to the next created records.
    pub fn queue_ids<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lock(&self.state)
            .next_ids
            .extend(ids.into_iter().map(Into::into));
    }

    /// Records currently held by the service.
    #[must_use]
    pub fn contacts(&self) -> Vec<Contact> {
        lock(&self.state).contacts.clone()
    }

    /// Every call so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ContactCall> {
        lock(&self.state).calls.clone()
    }

    /// Number of calls to `operation`.
    #[must_use]
    pub fn call_count(&self, operation: ContactOperation) -> usize {
        lock(&self.state)
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    fn record(&self, call: ContactCall) -> Result<MutexGuard<'_, ContactState>, GatewayError> {
        let mut state = lock(&self.state);
        let operation = call.operation();
        state.calls.push(call);
        if let Some(error) = state
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }
        Ok(state)
    }
}

fn not_found() -> GatewayError {
    GatewayError::status(404, Some("Contact not found".to_owned()))
}

#[async_trait]
impl ContactGateway for RecordingContactGateway {
    async fn list(&self) -> Result<Vec<Contact>, GatewayError> {
        let state = self.record(ContactCall::List)?;
        Ok(state.contacts.clone())
    }

    async fn fetch_one(&self, id: &ContactId) -> Result<Contact, GatewayError> {
        let state = self.record(ContactCall::FetchOne(id.clone()))?;
        state
            .contacts
            .iter()
            .find(|contact| contact.id() == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create(&self, contact: &ValidatedContact) -> Result<Contact, GatewayError> {
        let mut state = self.record(ContactCall::Create(contact.fields().clone()))?;
        let raw = state.next_ids.pop_front().unwrap_or_else(|| {
            state.issued += 1;
            format!("c{}", state.issued)
        });
        let id = ContactId::new(raw)
            .map_err(|error| GatewayError::decode(201, format!("scripted id: {error}")))?;
        let created = Contact::new(id, contact.fields().clone());
        state.contacts.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &ContactId,
        contact: &ValidatedContact,
    ) -> Result<Contact, GatewayError> {
        let mut state =
            self.record(ContactCall::Update(id.clone(), contact.fields().clone()))?;
        let slot = state
            .contacts
            .iter_mut()
            .find(|stored| stored.id() == id)
            .ok_or_else(not_found)?;
        *slot = Contact::new(id.clone(), contact.fields().clone());
        Ok(slot.clone())
    }

    async fn remove(&self, id: &ContactId) -> Result<(), GatewayError> {
        let mut state = self.record(ContactCall::Remove(id.clone()))?;
        let before = state.contacts.len();
        state.contacts.retain(|contact| contact.id() != id);
        if state.contacts.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

/// One recorded account gateway call. Passwords are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCall {
    /// An account was registered.
    SignUp {
        /// Display name sent to the service.
        name: String,
        /// Login email sent to the service.
        email: String,
    },
    /// A sign-in was attempted.
    SignIn {
        /// Login email sent to the service.
        email: String,
    },
}

#[derive(Debug, Default)]
struct AccountState {
    calls: Vec<AccountCall>,
    token: Option<SessionToken>,
    failures: VecDeque<GatewayError>,
}

/// Account service double that accepts every well-formed request.
#[derive(Debug, Default)]
pub struct RecordingAccountGateway {
    state: Mutex<AccountState>,
}

impl RecordingAccountGateway {
    /// Service that signs in without issuing a token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Service that issues `token` on every sign-in.
    #[must_use]
    pub fn issuing(token: SessionToken) -> Self {
        let gateway = Self::new();
        lock(&gateway.state).token = Some(token);
        gateway
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: GatewayError) {
        lock(&self.state).failures.push_back(error);
    }

    /// Every call so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<AccountCall> {
        lock(&self.state).calls.clone()
    }

    fn record(&self, call: AccountCall) -> Result<MutexGuard<'_, AccountState>, GatewayError> {
        let mut state = lock(&self.state);
        state.calls.push(call);
        state.failures.pop_front().map_or(Ok(state), Err)
    }
}

#[async_trait]
impl AccountGateway for RecordingAccountGateway {
    async fn sign_up(&self, registration: &Registration) -> Result<(), GatewayError> {
        self.record(AccountCall::SignUp {
            name: registration.name().to_owned(),
            email: registration.email().to_owned(),
        })?;
        Ok(())
    }

    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignInOutcome, GatewayError> {
        let state = self.record(AccountCall::SignIn {
            email: credentials.email().to_owned(),
        })?;
        Ok(SignInOutcome {
            token: state.token.clone(),
        })
    }
}

/// Navigator double that remembers every route change.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// No navigation yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes visited, in order.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        lock(&self.routes).clone()
    }

    /// Most recent route.
    #[must_use]
    pub fn last(&self) -> Option<Route> {
        lock(&self.routes).last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        lock(&self.routes).push(route);
    }
}

/// Dialog double with a fixed answer that records prompts and alerts.
#[derive(Debug)]
pub struct ScriptedDialog {
    answer: bool,
    prompts: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl ScriptedDialog {
    /// Dialog answering every confirmation with `answer`.
    #[must_use]
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::default(),
            alerts: Mutex::default(),
        }
    }

    /// Confirmation prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// Alerts shown so far.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }
}

impl UserDialog for ScriptedDialog {
    fn confirm(&self, prompt: &str) -> bool {
        lock(&self.prompts).push(prompt.to_owned());
        self.answer
    }

    fn alert(&self, message: &str) {
        lock(&self.alerts).push(message.to_owned());
    }
}

/// Contact with a placeholder company derived from `id`.
///
/// # Panics
///
/// Panics when `id` is not a valid contact id.
#[expect(clippy::expect_used, reason = "fixture helper for tests")]
#[must_use]
pub fn sample_contact(id: &str) -> Contact {
    Contact::new(
        ContactId::new(id).expect("fixture id must be valid"),
        ContactFields::new(format!("Company {id}"), "a@b.com", "1234567", ""),
    )
}
