//! Behaviour tests for the sign-in and registration forms.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::cell::RefCell;
use std::sync::Arc;

use contact_client::domain::form::account_forms::{LOGIN_FAILED_MESSAGE, LoginForm, RegisterForm};
use contact_client::domain::ports::{Route, SessionStore};
use contact_client::domain::{
    GatewayError, LoginField, RegistrationField, SessionContext, SessionToken, SubmitError,
};
use contact_client::outbound::session::MemorySessionStore;
use contact_client::test_support::{RecordingAccountGateway, RecordingNavigator};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::{Builder, Runtime};

const ISSUED_TOKEN: &str = "session-token-1";

struct AccountFormsWorld {
    runtime: Runtime,
    accounts: RefCell<Arc<RecordingAccountGateway>>,
    sessions: Arc<MemorySessionStore>,
    navigator: Arc<RecordingNavigator>,
    login_failure: RefCell<Option<String>>,
    session: RefCell<Option<Result<SessionContext, SubmitError<LoginField>>>>,
    registration: RefCell<Option<Result<(), SubmitError<RegistrationField>>>>,
}

impl AccountFormsWorld {
    fn new() -> Self {
        Self {
            runtime: Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("create runtime"),
            accounts: RefCell::new(Arc::new(RecordingAccountGateway::new())),
            sessions: Arc::new(MemorySessionStore::new()),
            navigator: Arc::new(RecordingNavigator::new()),
            login_failure: RefCell::new(None),
            session: RefCell::new(None),
            registration: RefCell::new(None),
        }
    }

    fn accounts(&self) -> Arc<RecordingAccountGateway> {
        Arc::clone(&self.accounts.borrow())
    }

    fn with_session<T>(&self, check: impl FnOnce(&SessionContext) -> T) -> T {
        let session = self.session.borrow();
        match session.as_ref().expect("the user tried to sign in") {
            Ok(context) => check(context),
            Err(error) => panic!("expected sign-in to succeed, got {error}"),
        }
    }
}

#[fixture]
fn world() -> AccountFormsWorld {
    AccountFormsWorld::new()
}

#[given("an account service that issues session tokens")]
fn an_account_service_that_issues_session_tokens(world: &AccountFormsWorld) {
    let token = SessionToken::new(ISSUED_TOKEN).expect("valid token");
    *world.accounts.borrow_mut() = Arc::new(RecordingAccountGateway::issuing(token));
}

#[given("an account service that rejects the next request")]
fn an_account_service_that_rejects_the_next_request(world: &AccountFormsWorld) {
    world.accounts().fail_next(GatewayError::status(401, None));
}

#[when("the user signs in as {email}")]
fn the_user_signs_in_as(world: &AccountFormsWorld, email: String) {
    let mut form = LoginForm::new(
        world.accounts(),
        Arc::clone(&world.sessions),
        Arc::clone(&world.navigator),
    );
    form.edit(LoginField::Email, email);
    form.edit(LoginField::Password, "pw");
    let result = world.runtime.block_on(form.submit());
    *world.login_failure.borrow_mut() = form.form().failure_message().map(str::to_owned);
    *world.session.borrow_mut() = Some(result);
}

#[when("the user registers as {name} with password {password}")]
fn the_user_registers_as(world: &AccountFormsWorld, name: String, password: String) {
    let mut form = RegisterForm::new(world.accounts(), Arc::clone(&world.navigator));
    form.edit(RegistrationField::Name, name);
    form.edit(RegistrationField::Email, "ada@example.com");
    form.edit(RegistrationField::Password, password);
    let result = world.runtime.block_on(form.submit());
    *world.registration.borrow_mut() = Some(result);
}

#[then("the session token is stored")]
fn the_session_token_is_stored(world: &AccountFormsWorld) {
    let stored = world.sessions.load_token().expect("memory store is readable");
    assert_eq!(stored.as_ref().map(SessionToken::expose), Some(ISSUED_TOKEN));
    world.with_session(|context| {
        assert_eq!(context.token().map(SessionToken::expose), Some(ISSUED_TOKEN));
    });
}

#[then("no session token is stored")]
fn no_session_token_is_stored(world: &AccountFormsWorld) {
    let stored = world.sessions.load_token().expect("memory store is readable");
    assert!(stored.is_none());
}

#[then("the current user is {email}")]
fn the_current_user_is(world: &AccountFormsWorld, email: String) {
    world.with_session(|context| assert_eq!(context.user().email(), email));
}

#[then("the sign-in form shows the login failure message")]
fn the_sign_in_form_shows_the_login_failure_message(world: &AccountFormsWorld) {
    assert_eq!(
        world.login_failure.borrow().as_deref(),
        Some(LOGIN_FAILED_MESSAGE)
    );
}

#[then("the account service received no requests")]
fn the_account_service_received_no_requests(world: &AccountFormsWorld) {
    assert!(world.accounts().calls().is_empty());
}

#[then("the app navigated to the contact list")]
fn the_app_navigated_to_the_contact_list(world: &AccountFormsWorld) {
    assert_eq!(world.navigator.last(), Some(Route::ContactList));
}

#[then("the app navigated to the sign-in form")]
fn the_app_navigated_to_the_sign_in_form(world: &AccountFormsWorld) {
    assert!(matches!(*world.registration.borrow(), Some(Ok(()))));
    assert_eq!(world.navigator.last(), Some(Route::Login));
}

#[then("the app did not navigate")]
fn the_app_did_not_navigate(world: &AccountFormsWorld) {
    assert!(world.navigator.routes().is_empty());
}

#[scenario(
    path = "tests/features/account_forms.feature",
    name = "Signing in stores the session token"
)]
fn signing_in_stores_the_session_token(world: AccountFormsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/account_forms.feature",
    name = "A rejected sign-in shows the fallback message"
)]
fn a_rejected_sign_in(world: AccountFormsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/account_forms.feature",
    name = "A malformed email is rejected before sign-in"
)]
fn a_malformed_email(world: AccountFormsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/account_forms.feature",
    name = "Registering returns to the sign-in form"
)]
fn registering_returns_to_sign_in(world: AccountFormsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/account_forms.feature",
    name = "A short registration password is rejected locally"
)]
fn a_short_registration_password(world: AccountFormsWorld) {
    let _ = world;
}
