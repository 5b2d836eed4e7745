// Unit tests for the HTTP backend client, driven through a recording stub
// transport so every request can be inspected without a network.

use crate::api::{BackendClient, BackendKind, HttpRequest, HttpResponse, RealBackendClient, Transport};
use crate::error::ClientError;
use crate::models::{InviteRole, Scope, Visibility};

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use reqwest::Method;
use serde_json::{json, Value};

const BASE_URL: &str = "https://api.test";

/// Records requests and replays queued responses; once the queue is empty
/// every request gets `fallback`.
#[derive(Clone)]
struct StubTransport {
    requests: Rc<RefCell<Vec<HttpRequest>>>,
    responses: Rc<RefCell<VecDeque<HttpResponse>>>,
    fallback: HttpResponse,
}

impl StubTransport {
    fn answering(status: u16, body: Value) -> Self {
        Self {
            requests: Rc::default(),
            responses: Rc::default(),
            fallback: HttpResponse {
                status,
                body: body.to_string(),
            },
        }
    }

    fn ok() -> Self {
        Self::answering(200, json!({"message": "ok"}))
    }

    fn then(self, status: u16, body: Value) -> Self {
        self.responses.borrow_mut().push_back(HttpResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}

struct FailingTransport;

impl Transport for FailingTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        Err(ClientError::Transport {
            url: request.url.clone(),
            message: "connection refused".to_string(),
        })
    }
}

fn client(stub: &StubTransport, api_key: Option<&str>) -> RealBackendClient {
    RealBackendClient::with_parts(
        BASE_URL,
        Box::new(stub.clone()),
        Box::new(api_key.map(str::to_string)),
    )
    .unwrap()
}

fn single_request(stub: &StubTransport) -> HttpRequest {
    let requests = stub.requests();
    assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
    requests.into_iter().next().unwrap()
}

fn assert_post(stub: &StubTransport, path: &str, body: Value) {
    let request = single_request(stub);
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, format!("{BASE_URL}{path}"));
    assert!(request.query.is_empty());
    assert_eq!(request.body, Some(body));
}

fn assert_get(stub: &StubTransport, path: &str, query: &[(&str, &str)]) {
    let request = single_request(stub);
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url, format!("{BASE_URL}{path}"));
    let expected: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(request.query, expected);
    assert_eq!(request.body, None);
}

#[test]
fn given_auth_calls_when_sent_then_post_documented_paths_and_bodies() {
    let stub = StubTransport::ok();
    client(&stub, None).signup("a@b.io", "Acme").unwrap();
    assert_post(
        &stub,
        "/api/v1/auth/signup",
        json!({"email": "a@b.io", "org_name": "Acme"}),
    );

    let stub = StubTransport::ok();
    client(&stub, None).verify_otp("a@b.io", "123456").unwrap();
    assert_post(
        &stub,
        "/api/v1/auth/verify-otp",
        json!({"email": "a@b.io", "otp": "123456"}),
    );

    let stub = StubTransport::ok();
    client(&stub, None).login("a@b.io").unwrap();
    assert_post(&stub, "/api/v1/auth/login", json!({"email": "a@b.io"}));
}

#[test]
fn given_spec_when_register_api_then_spec_is_sent_verbatim() {
    let stub = StubTransport::ok();
    let spec = json!({"info": {"title": "T"}, "paths": {"/a": {"get": {}}}});

    client(&stub, Some("sk_outris_key"))
        .register_api(&spec, "T", Visibility::Private)
        .unwrap();

    assert_post(
        &stub,
        "/api/v1/apis/register",
        json!({"spec": spec, "name": "T", "visibility": "private"}),
    );
}

#[test]
fn given_other_writes_when_sent_then_post_documented_paths_and_bodies() {
    let stub = StubTransport::ok();
    client(&stub, None).query("weather in SF").unwrap();
    assert_post(&stub, "/api/v1/query", json!({"query": "weather in SF"}));

    let stub = StubTransport::ok();
    client(&stub, None)
        .invite_member("bob@acme.com", InviteRole::Admin)
        .unwrap();
    assert_post(
        &stub,
        "/api/v1/team/invite",
        json!({"email": "bob@acme.com", "role": "admin"}),
    );

    let stub = StubTransport::ok();
    client(&stub, None)
        .accept_invitation("tok_1", "c@acme.com", "654321")
        .unwrap();
    assert_post(
        &stub,
        "/api/v1/team/accept",
        json!({"token": "tok_1", "email": "c@acme.com", "otp": "654321"}),
    );

    let stub = StubTransport::ok();
    client(&stub, None).install_from_marketplace("Twilio").unwrap();
    assert_post(
        &stub,
        "/api/v1/marketplace/install",
        json!({"api_name": "Twilio"}),
    );
}

#[test]
fn given_reads_when_sent_then_get_with_documented_query_parameters() {
    let stub = StubTransport::answering(200, json!({"count": 0, "apis": []}));
    client(&stub, None).list_apis(Scope::Public).unwrap();
    assert_get(&stub, "/api/v1/apis", &[("scope", "public")]);

    let stub = StubTransport::answering(200, json!({"count": 0, "queries": []}));
    client(&stub, None).get_history(25).unwrap();
    assert_get(&stub, "/api/v1/history", &[("limit", "25")]);

    let stub = StubTransport::answering(200, json!({"count": 0, "members": []}));
    client(&stub, None).list_team().unwrap();
    assert_get(&stub, "/api/v1/team/members", &[]);

    let stub = StubTransport::answering(200, json!({"count": 0, "apis": []}));
    client(&stub, None).get_marketplace().unwrap();
    assert_get(&stub, "/api/v1/marketplace", &[]);
}

#[test]
fn given_credential_when_request_sent_then_api_key_is_attached() {
    let stub = StubTransport::ok();

    client(&stub, Some("sk_outris_secret_123")).list_team().unwrap();

    assert_eq!(
        single_request(&stub).api_key.as_deref(),
        Some("sk_outris_secret_123")
    );
}

#[test]
fn given_no_credential_when_request_sent_then_request_still_goes_out() {
    let stub = StubTransport::ok();

    client(&stub, None).signup("a@b.io", "Acme").unwrap();

    assert_eq!(single_request(&stub).api_key, None);
}

#[test]
fn given_success_when_response_parsed_then_object_is_returned_as_is() {
    let stub = StubTransport::answering(
        201,
        json!({"result": {"x": 1}, "api_used": "Weather", "execution_time_ms": 5}),
    );

    let result = client(&stub, None).query("q").unwrap();

    assert_eq!(result["api_used"], "Weather");
    assert_eq!(result["result"]["x"], 1);
    assert!(!result.contains_key("cost"));
}

#[test]
fn given_http_500_when_any_operation_called_then_status_error_surfaces() {
    let stub = StubTransport::answering(500, json!({"detail": "boom"}));
    let client = client(&stub, None);
    let spec = json!({"paths": {}});

    let results = vec![
        client.signup("a@b.io", "Acme"),
        client.verify_otp("a@b.io", "123456"),
        client.login("a@b.io"),
        client.register_api(&spec, "T", Visibility::Org),
        client.add_secret("T", "K", "V"),
        client.list_apis(Scope::All),
        client.query("q"),
        client.get_history(10),
        client.invite_member("b@acme.com", InviteRole::Member),
        client.accept_invitation("tok", "a@b.io", "123456"),
        client.list_team(),
        client.get_marketplace(),
        client.install_from_marketplace("Twilio"),
    ];

    assert_eq!(results.len(), 13);
    for result in results {
        match result {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }
}

#[test]
fn given_status_error_when_inspected_then_it_is_a_protocol_failure() {
    let stub = StubTransport::answering(404, json!({}));

    let err = client(&stub, None).list_team().unwrap_err();

    assert!(err.is_protocol());
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("404"));
}

#[test]
fn given_array_body_when_parsed_then_malformed_body_error() {
    let stub = StubTransport::answering(200, json!([1, 2, 3]));

    let err = client(&stub, None).list_team().unwrap_err();

    assert!(matches!(err, ClientError::MalformedBody { .. }), "{err:?}");
    assert!(err.is_protocol());
}

#[test]
fn given_non_json_body_when_parsed_then_malformed_body_error() {
    let stub = StubTransport::ok();
    stub.responses.borrow_mut().push_back(HttpResponse {
        status: 200,
        body: "<html>bad gateway</html>".to_string(),
    });

    let err = client(&stub, None).get_marketplace().unwrap_err();

    assert!(matches!(err, ClientError::MalformedBody { .. }), "{err:?}");
}

#[test]
fn given_transport_failure_when_called_then_error_is_not_protocol() {
    let client = RealBackendClient::with_parts(
        BASE_URL,
        Box::new(FailingTransport),
        Box::new(None::<String>),
    )
    .unwrap();

    let err = client.query("q").unwrap_err();

    assert!(matches!(err, ClientError::Transport { .. }));
    assert!(!err.is_protocol());
}

#[test]
fn given_unknown_api_name_when_add_secret_then_lookup_fails_without_write() {
    // GIVEN: The org listing has no API called "Nonexistent API"
    let stub = StubTransport::answering(
        200,
        json!({"count": 1, "apis": [{"name": "Weather", "api_id": "api_1", "visibility": "org", "endpoints": 3}]}),
    );

    // WHEN: Adding a secret for it
    let err = client(&stub, Some("sk_outris_key"))
        .add_secret("Nonexistent API", "K", "V")
        .unwrap_err();

    // THEN: Local lookup failure, and only the listing request went out
    match err {
        ClientError::ApiNotFound { name } => assert_eq!(name, "Nonexistent API"),
        other => panic!("expected ApiNotFound, got {other:?}"),
    }
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].url, format!("{BASE_URL}/api/v1/apis"));
    assert_eq!(
        requests[0].query,
        vec![("scope".to_string(), "org".to_string())]
    );
}

#[test]
fn given_known_api_name_when_add_secret_then_posts_to_resolved_id() {
    let stub = StubTransport::ok()
        .then(
            200,
            json!({"count": 2, "apis": [
                {"name": "Weather", "api_id": "api_1", "visibility": "org", "endpoints": 3},
                {"name": "Payments", "api_id": "api_2", "visibility": "org", "endpoints": 9}
            ]}),
        )
        .then(200, json!({"message": "Secret K stored"}));

    let result = client(&stub, None)
        .add_secret("Payments", "STRIPE_KEY", "sk_live")
        .unwrap();

    assert_eq!(result["message"], "Secret K stored");
    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].url, format!("{BASE_URL}/api/v1/apis/api_2/secrets"));
    assert_eq!(
        requests[1].body,
        Some(json!({"key_name": "STRIPE_KEY", "value": "sk_live"}))
    );
}

#[test]
fn given_name_differing_in_case_when_add_secret_then_no_match() {
    let stub = StubTransport::answering(
        200,
        json!({"count": 1, "apis": [{"name": "Weather", "api_id": "api_1"}]}),
    );

    let err = client(&stub, None).add_secret("weather", "K", "V").unwrap_err();

    assert!(matches!(err, ClientError::ApiNotFound { .. }));
    assert_eq!(stub.requests().len(), 1);
}

#[test]
fn given_match_without_api_id_when_add_secret_then_lookup_fails() {
    let stub = StubTransport::answering(
        200,
        json!({"count": 1, "apis": [{"name": "Weather", "visibility": "org"}]}),
    );

    let err = client(&stub, None).add_secret("Weather", "K", "V").unwrap_err();

    assert!(matches!(err, ClientError::ApiNotFound { .. }));
    assert_eq!(stub.requests().len(), 1);
}

#[test]
fn given_api_id_with_reserved_characters_when_add_secret_then_id_is_one_segment() {
    let stub = StubTransport::ok().then(
        200,
        json!({"count": 1, "apis": [{"name": "Odd", "api_id": "a/b c"}]}),
    );

    client(&stub, None).add_secret("Odd", "K", "V").unwrap();

    assert_eq!(
        stub.requests()[1].url,
        format!("{BASE_URL}/api/v1/apis/a%2Fb%20c/secrets")
    );
}

#[test]
fn given_base_url_with_prefix_and_trailing_slash_when_request_sent_then_path_is_appended() {
    let stub = StubTransport::ok();
    let client = RealBackendClient::with_parts(
        "https://gateway.test/outris/",
        Box::new(stub.clone()),
        Box::new(None::<String>),
    )
    .unwrap();

    client.login("a@b.io").unwrap();

    assert_eq!(
        single_request(&stub).url,
        "https://gateway.test/outris/api/v1/auth/login"
    );
}

#[test]
fn given_invalid_base_url_when_constructed_then_build_error() {
    let result = RealBackendClient::with_parts(
        "not a url",
        Box::new(StubTransport::ok()),
        Box::new(None::<String>),
    );

    assert!(matches!(result, Err(ClientError::Build { .. })));
}

#[test]
fn given_real_client_when_kind_queried_then_reports_real() {
    let stub = StubTransport::ok();
    assert_eq!(client(&stub, None).kind(), BackendKind::Real);
}
