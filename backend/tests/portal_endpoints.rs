//! End-to-end coverage for login and aggregation through the public API.
//!
//! The app is assembled the way the server binary wires it, once against the
//! fixture adapters and once against a wiremock portal, so routing, the trace
//! middleware, the aggregation engine and the reqwest adapters run together.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, test, web};
use portal_backend::Trace;
use portal_backend::domain::ports::{
    FixturePortalDataSource, FixtureSessionAuthenticator, LoginService, PortalDataSource,
    SessionAuthenticator, UserRecordQuery,
};
use portal_backend::domain::{PortalLoginService, TRACE_ID_HEADER, UserRecordService};
use portal_backend::inbound::http::configure_api;
use portal_backend::inbound::http::state::HttpState;
use portal_backend::inbound::http::users::not_found;
use portal_backend::outbound::portal::{
    PORTAL_TOKEN_HEADER, PortalHttpAuthenticator, PortalHttpSource,
};
use reqwest::Url;
use rstest::rstest;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_state(
    authenticator: Arc<dyn SessionAuthenticator>,
    source: Arc<dyn PortalDataSource>,
) -> HttpState {
    let login: Arc<dyn LoginService> = Arc::new(PortalLoginService::new(authenticator));
    let user_records: Arc<dyn UserRecordQuery> = Arc::new(UserRecordService::new(source));
    HttpState::new(login, user_records)
}

fn fixture_state() -> HttpState {
    http_state(
        Arc::new(FixtureSessionAuthenticator),
        Arc::new(FixturePortalDataSource),
    )
}

fn portal_state(server: &MockServer) -> HttpState {
    let base = Url::parse(&format!("{}/api", server.uri())).expect("mock server url");
    let timeout = Duration::from_secs(5);
    http_state(
        Arc::new(PortalHttpAuthenticator::new(base.clone(), timeout).expect("client builds")),
        Arc::new(PortalHttpSource::new(base, timeout).expect("client builds")),
    )
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(Trace)
                .configure(configure_api)
                .default_service(web::route().to(not_found)),
        )
        .await
    };
}

#[actix_web::test]
async fn fixture_login_then_user_returns_the_aggregated_record() {
    let app = init_app!(fixture_state());

    let login = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "account": "student", "password": "password" }))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, login).await;
    let token = session["token"].as_str().expect("token in login response");
    assert_eq!(token, FixtureSessionAuthenticator::TOKEN);

    let request = test::TestRequest::get()
        .uri("/api/user")
        .insert_header(("X-CSRF-Token", token))
        .to_request();
    let record: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(record["regNumber"], json!("RA0000000000001"));
    for key in ["profile", "attendance", "marks", "courses", "timetable"] {
        assert!(record.get(key).is_some(), "record should carry {key}");
    }
}

#[rstest]
#[case::wrong_password(json!({ "account": "student", "password": "nope" }), 401)]
#[case::missing_account(json!({ "password": "password" }), 400)]
#[actix_web::test]
async fn fixture_login_failures_use_the_error_envelope(#[case] body: Value, #[case] status: u16) {
    let app = init_app!(fixture_state());

    let request = test::TestRequest::post()
        .uri("/api/login")
        .set_json(body)
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), status);
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let envelope: Value = test::read_body_json(response).await;
    assert!(envelope["error"].is_string());
    assert_eq!(envelope["traceId"], json!(trace_id));
}

#[actix_web::test]
async fn portal_upstream_flows_through_the_reqwest_adapters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "account": "21CS045", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header(PORTAL_TOKEN_HEADER, "tok-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "name": "A", "regNumber": "21CS045" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    for (category, payload) in [
        ("attendance", json!([{ "courseCode": "MA1001", "absent": 2 }])),
        ("marks", json!([])),
        ("courses", json!([{ "code": "MA1001" }])),
        ("timetable", json!({ "monday": [] })),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/api/{category}")))
            .and(header(PORTAL_TOKEN_HEADER, "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .expect(1)
            .mount(&server)
            .await;
    }
    let app = init_app!(portal_state(&server));

    let login = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "account": "21CS045", "password": "secret" }))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, login).await;
    assert_eq!(session, json!({ "token": "tok-1" }));

    let request = test::TestRequest::get()
        .uri("/api/user")
        .insert_header(("X-CSRF-Token", "tok-1"))
        .to_request();
    let record: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(
        record,
        json!({
            "profile": { "name": "A", "regNumber": "21CS045" },
            "attendance": [{ "courseCode": "MA1001", "absent": 2 }],
            "marks": [],
            "courses": [{ "code": "MA1001" }],
            "timetable": { "monday": [] },
            "regNumber": "21CS045"
        })
    );
}

#[actix_web::test]
async fn one_failing_category_fails_the_whole_request() {
    let server = MockServer::start().await;
    for category in ["profile", "attendance", "courses", "timetable"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/{category}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/marks"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;
    let app = init_app!(portal_state(&server));

    let request = test::TestRequest::get()
        .uri("/api/user")
        .insert_header(("X-CSRF-Token", "tok-1"))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), 500);
    let envelope: Value = test::read_body_json(response).await;
    assert_eq!(envelope["code"], json!("upstream_failure"));
    let message = envelope["error"].as_str().expect("error message");
    assert!(message.contains("marks"), "message should name the category: {message}");
    assert!(message.contains("503"), "message should carry the status: {message}");
    assert!(envelope.get("regNumber").is_none());
}

#[actix_web::test]
async fn rejected_portal_login_is_unauthorised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid password" })),
        )
        .mount(&server)
        .await;
    let app = init_app!(portal_state(&server));

    let request = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "account": "21CS045", "password": "wrong" }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), 401);
    let envelope: Value = test::read_body_json(response).await;
    assert_eq!(envelope["error"], json!("Invalid password"));
    assert_eq!(envelope["code"], json!("unauthorized"));
}
