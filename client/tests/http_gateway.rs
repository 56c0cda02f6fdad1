//! HTTP adapter tests against an in-process fake of the contact service.
//!
//! The fake records every request it receives and answers from a script keyed
//! by method and raw path, so the tests observe exactly what goes on the wire.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use contact_client::domain::ports::{AccountGateway, ContactGateway};
use contact_client::domain::{
    ContactFields, ContactId, ContactSchema, FormSchema, GatewayErrorKind, LoginDraft,
    LoginSchema, RegistrationDraft, RegistrationSchema, SessionToken, ValidatedContact,
};
use contact_client::outbound::http::{
    HttpAccountGateway, HttpContactGateway, HttpGatewayConfig, HttpTransport, REQUEST_ID_HEADER,
    RouteStyle,
};
use serde_json::{Value, json};
use url::Url;

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    authorization: Option<String>,
    request_id: Option<String>,
    body: String,
}

impl Recorded {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Default)]
struct FakeService {
    responses: Mutex<HashMap<(String, String), (u16, String)>>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeService {
    fn respond(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .expect("responses lock")
            .insert((method.to_owned(), path.to_owned()), (status, body.into()));
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().expect("one request")
    }
}

async fn answer(req: HttpRequest, body: web::Bytes, fake: web::Data<FakeService>) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    fake.requests.lock().expect("requests lock").push(Recorded {
        method: method.clone(),
        path: path.clone(),
        authorization: header("authorization"),
        request_id: header(REQUEST_ID_HEADER),
        body: String::from_utf8_lossy(&body).into_owned(),
    });
    let scripted = fake
        .responses
        .lock()
        .expect("responses lock")
        .get(&(method, path))
        .cloned();
    let (status, body) =
        scripted.unwrap_or_else(|| (404, r#"{"message":"no such route"}"#.to_owned()));
    HttpResponse::build(StatusCode::from_u16(status).expect("valid status"))
        .content_type("application/json")
        .body(body)
}

struct Running {
    fake: Arc<FakeService>,
    base_url: Url,
    handle: ServerHandle,
}

impl Running {
    fn config(&self) -> HttpGatewayConfig {
        HttpGatewayConfig::new(self.base_url.clone())
    }

    fn contacts(&self, config: HttpGatewayConfig) -> HttpContactGateway {
        HttpContactGateway::new(HttpTransport::new(config).expect("client builds"))
    }

    fn accounts(&self) -> HttpAccountGateway {
        HttpAccountGateway::new(HttpTransport::new(self.config()).expect("client builds"))
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn start() -> Running {
    let fake = Arc::new(FakeService::default());
    let data = web::Data::from(Arc::clone(&fake));
    let bound = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(answer))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind fake service");
    let addr = bound
        .addrs()
        .first()
        .copied()
        .expect("fake service has an address");
    let server = bound.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    Running {
        fake,
        base_url: Url::parse(&format!("http://{addr}")).expect("base url"),
        handle,
    }
}

fn acme() -> ValidatedContact {
    ContactSchema::validate(&ContactFields::new("Acme Inc", "a@b.com", "1234567", ""))
        .expect("valid contact")
}

fn id(raw: &str) -> ContactId {
    ContactId::new(raw).expect("valid id")
}

const ACME_JSON: &str = r#"{"contact_id":"abc123","companyName":"Acme Inc","companyEmail":"a@b.com","companyPhone":"1234567","companyAddress":""}"#;

#[actix_web::test]
async fn list_decodes_contacts_and_tags_requests() {
    let running = start();
    running.fake.respond("GET", "/contacts", 200, format!("[{ACME_JSON}]"));

    let contacts = running
        .contacts(running.config())
        .list()
        .await
        .expect("list succeeds");

    let [contact] = contacts.as_slice() else {
        panic!("expected one contact, got {contacts:?}");
    };
    assert_eq!(contact.id().as_ref(), "abc123");
    assert_eq!(contact.fields().company_name, "Acme Inc");
    let request = running.fake.only_request();
    assert!(request.request_id.is_some(), "x-request-id header missing");
    assert!(request.authorization.is_none());
    running.stop().await;
}

#[actix_web::test]
async fn empty_collection_is_not_an_error() {
    let running = start();
    running.fake.respond("GET", "/contacts", 200, "[]");

    let contacts = running
        .contacts(running.config())
        .list()
        .await
        .expect("list succeeds");

    assert!(contacts.is_empty());
    running.stop().await;
}

#[actix_web::test]
async fn null_address_does_not_sink_the_listing() {
    let running = start();
    running.fake.respond(
        "GET",
        "/contacts",
        200,
        format!(
            r#"[{{"contact_id":"1","companyName":"Null Co","companyEmail":"n@b.com","companyPhone":"1234567","companyAddress":null}},{ACME_JSON}]"#
        ),
    );

    let contacts = running
        .contacts(running.config())
        .list()
        .await
        .expect("list succeeds");

    let summary: Vec<(&str, &str)> = contacts
        .iter()
        .map(|contact| (contact.id().as_ref(), contact.fields().company_address.as_str()))
        .collect();
    assert_eq!(summary, vec![("1", ""), ("abc123", "")]);
    running.stop().await;
}

#[actix_web::test]
async fn create_sends_fields_without_id() {
    let running = start();
    running.fake.respond("POST", "/contacts", 201, ACME_JSON);

    let created = running
        .contacts(running.config())
        .create(&acme())
        .await
        .expect("created");

    assert_eq!(created.id().as_ref(), "abc123");
    let request = running.fake.only_request();
    assert_eq!(
        request.json(),
        json!({
            "companyName": "Acme Inc",
            "companyEmail": "a@b.com",
            "companyPhone": "1234567",
            "companyAddress": ""
        })
    );
    running.stop().await;
}

#[actix_web::test]
async fn create_with_undecodable_body_is_a_decode_error() {
    let running = start();
    running.fake.respond("POST", "/contacts", 201, r#"{"ok":true}"#);

    let err = running
        .contacts(running.config())
        .create(&acme())
        .await
        .expect_err("missing contact_id");

    assert_eq!(err.kind(), GatewayErrorKind::Decode);
    assert_eq!(err.status_code(), Some(201));
    assert_eq!(err.server_message(), None);
    running.stop().await;
}

#[actix_web::test]
async fn root_alias_routes_single_record_operations_at_the_root() {
    let running = start();
    running.fake.respond("POST", "/", 200, ACME_JSON);
    running.fake.respond("GET", "/abc123", 200, ACME_JSON);
    running.fake.respond("DELETE", "/abc123", 204, "");
    let gateway = running.contacts(running.config().with_route_style(RouteStyle::RootAlias));

    gateway.create(&acme()).await.expect("created");
    gateway.fetch_one(&id("abc123")).await.expect("fetched");
    gateway.remove(&id("abc123")).await.expect("removed");

    let paths: Vec<(String, String)> = running
        .fake
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("POST".to_owned(), "/".to_owned()),
            ("GET".to_owned(), "/abc123".to_owned()),
            ("DELETE".to_owned(), "/abc123".to_owned()),
        ]
    );
    running.stop().await;
}

#[actix_web::test]
async fn update_sends_full_record_and_echoes_empty_responses() {
    let running = start();
    running.fake.respond("PUT", "/contacts/7", 200, "");

    let updated = running
        .contacts(running.config())
        .update(&id("7"), &acme())
        .await
        .expect("updated");

    assert_eq!(updated.id().as_ref(), "7");
    assert_eq!(updated.fields(), acme().fields());
    assert_eq!(running.fake.only_request().json()["contact_id"], json!("7"));
    running.stop().await;
}

#[actix_web::test]
async fn update_prefers_the_returned_record() {
    let running = start();
    running.fake.respond(
        "PUT",
        "/contacts/abc123",
        200,
        ACME_JSON.replace("Acme Inc", "Acme Ltd"),
    );

    let updated = running
        .contacts(running.config())
        .update(&id("abc123"), &acme())
        .await
        .expect("updated");

    assert_eq!(updated.fields().company_name, "Acme Ltd");
    running.stop().await;
}

#[actix_web::test]
async fn ids_are_percent_encoded_as_one_segment() {
    let running = start();

    let err = running
        .contacts(running.config())
        .fetch_one(&id("a/b c"))
        .await
        .expect_err("fake has no such route");

    assert_eq!(running.fake.only_request().path, "/contacts/a%2Fb%20c");
    assert_eq!(err.status_code(), Some(404));
    running.stop().await;
}

#[actix_web::test]
async fn error_bodies_surface_the_service_message() {
    let running = start();
    running
        .fake
        .respond("DELETE", "/contacts/1", 409, r#"{"message":"Contact is locked"}"#);
    running.fake.respond("GET", "/contacts", 500, "<html>oops</html>");
    let gateway = running.contacts(running.config());

    let locked = gateway.remove(&id("1")).await.expect_err("conflict");
    let broken = gateway.list().await.expect_err("server error");

    assert_eq!(locked.status_code(), Some(409));
    assert_eq!(locked.message(), "Contact is locked");
    assert_eq!(broken.status_code(), Some(500));
    assert_eq!(broken.message(), "Something went wrong.");
    running.stop().await;
}

#[actix_web::test]
async fn bearer_token_is_sent_when_configured() {
    let running = start();
    running.fake.respond("GET", "/contacts", 200, "[]");
    let token = SessionToken::new("t0k3n").expect("token");

    running
        .contacts(running.config().with_bearer_token(token))
        .list()
        .await
        .expect("list succeeds");

    assert_eq!(
        running.fake.only_request().authorization.as_deref(),
        Some("Bearer t0k3n")
    );
    running.stop().await;
}

#[actix_web::test]
async fn unreachable_service_is_a_transport_error() {
    let running = start();
    let base_url = running.base_url.clone();
    running.stop().await;
    let gateway = HttpContactGateway::new(
        HttpTransport::new(HttpGatewayConfig::new(base_url)).expect("client builds"),
    );

    let err = gateway.list().await.expect_err("connection refused");

    assert_eq!(err.kind(), GatewayErrorKind::Transport);
    assert_eq!(err.status_code(), None);
}

#[actix_web::test]
async fn sign_in_returns_the_issued_token() {
    let running = start();
    running
        .fake
        .respond("POST", "/signin", 200, r#"{"token":"s3ss10n"}"#);
    let credentials = LoginSchema::validate(&LoginDraft {
        email: "ada@example.com".to_owned(),
        password: "pw".to_owned(),
    })
    .expect("valid credentials");

    let outcome = running
        .accounts()
        .sign_in(&credentials)
        .await
        .expect("signed in");

    assert_eq!(outcome.token.as_ref().map(SessionToken::expose), Some("s3ss10n"));
    assert_eq!(
        running.fake.only_request().json(),
        json!({ "email": "ada@example.com", "password": "pw" })
    );
    running.stop().await;
}

#[actix_web::test]
async fn sign_in_without_json_body_has_no_token() {
    let running = start();
    running.fake.respond("POST", "/signin", 200, "Login successful");
    let credentials = LoginSchema::validate(&LoginDraft {
        email: "ada@example.com".to_owned(),
        password: "pw".to_owned(),
    })
    .expect("valid credentials");

    let outcome = running
        .accounts()
        .sign_in(&credentials)
        .await
        .expect("signed in");

    assert!(outcome.token.is_none());
    running.stop().await;
}

#[actix_web::test]
async fn sign_up_posts_the_registration() {
    let running = start();
    running.fake.respond("POST", "/signup", 201, "{}");
    let registration = RegistrationSchema::validate(&RegistrationDraft {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "secret".to_owned(),
    })
    .expect("valid registration");

    running
        .accounts()
        .sign_up(&registration)
        .await
        .expect("registered");

    let request = running.fake.only_request();
    assert_eq!(request.path, "/signup");
    assert_eq!(
        request.json(),
        json!({ "name": "Ada", "email": "ada@example.com", "password": "secret" })
    );
    running.stop().await;
}
