// End-to-end tests of the HTTP backend client against a wiremock server.
// The client is blocking, so each call runs inside `spawn_blocking`.

use outris_cli::api::{BackendClient, RealBackendClient, ReqwestTransport};
use outris_cli::error::ClientError;
use outris_cli::models::{InviteRole, JsonMap, Scope};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "sk_outris_integration_key";

/// Run `f` against a real client pointed at `server`.
async fn with_client<T, F>(server: &MockServer, api_key: Option<&'static str>, f: F) -> T
where
    F: FnOnce(&RealBackendClient) -> T + Send + 'static,
    T: Send + 'static,
{
    let base_url = server.uri();
    tokio::task::spawn_blocking(move || {
        let client = RealBackendClient::with_parts(
            &base_url,
            Box::new(ReqwestTransport::new().unwrap()),
            Box::new(api_key.map(str::to_string)),
        )
        .unwrap();
        f(&client)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn given_credential_when_query_sent_then_server_sees_key_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/query"))
        .and(header("X-API-Key", API_KEY))
        .and(body_json(json!({"query": "weather in SF"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"temp": 61},
            "api_used": "Weather",
            "execution_time_ms": 42
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result: JsonMap = with_client(&server, Some(API_KEY), |client| {
        client.query("weather in SF")
    })
    .await
    .unwrap();

    assert_eq!(result["api_used"], "Weather");
    assert_eq!(result["result"]["temp"], 61);
}

#[tokio::test(flavor = "multi_thread")]
async fn given_list_apis_when_sent_then_scope_is_a_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/apis"))
        .and(query_param("scope", "public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0, "apis": []})))
        .expect(1)
        .mount(&server)
        .await;

    let result = with_client(&server, None, |client| client.list_apis(Scope::Public))
        .await
        .unwrap();

    assert_eq!(result["count"], 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn given_history_limit_when_sent_then_limit_is_a_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/history"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0, "queries": []})))
        .expect(1)
        .mount(&server)
        .await;

    let result = with_client(&server, None, |client| client.get_history(3)).await;

    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn given_server_error_when_invite_sent_then_status_and_body_surface() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/team/invite"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = with_client(&server, Some(API_KEY), |client| {
        client.invite_member("bob@acme.com", InviteRole::Admin)
    })
    .await
    .unwrap_err();

    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn given_unknown_api_when_add_secret_then_no_secret_request_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/apis"))
        .and(query_param("scope", "org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "apis": [{"name": "Weather", "api_id": "api_1", "visibility": "org", "endpoints": 4}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "stored"})))
        .expect(0)
        .mount(&server)
        .await;

    let err = with_client(&server, Some(API_KEY), |client| {
        client.add_secret("Nonexistent API", "K", "V")
    })
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::ApiNotFound { .. }), "{err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn given_known_api_when_add_secret_then_secret_posted_under_its_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/apis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "apis": [{"name": "Weather", "api_id": "api_1", "visibility": "org", "endpoints": 4}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/apis/api_1/secrets"))
        .and(body_json(json!({"key_name": "WEATHER_KEY", "value": "abc"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Secret WEATHER_KEY stored"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = with_client(&server, Some(API_KEY), |client| {
        client.add_secret("Weather", "WEATHER_KEY", "abc")
    })
    .await
    .unwrap();

    assert_eq!(result["message"], "Secret WEATHER_KEY stored");
}

#[tokio::test(flavor = "multi_thread")]
async fn given_list_body_when_marketplace_fetched_then_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/marketplace"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "X"}])))
        .mount(&server)
        .await;

    let err = with_client(&server, None, |client| client.get_marketplace())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MalformedBody { .. }), "{err:?}");
}

#[test]
fn given_refused_connection_when_called_then_transport_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = RealBackendClient::with_parts(
        &uri,
        Box::new(ReqwestTransport::new().unwrap()),
        Box::new(None::<String>),
    )
    .unwrap();

    let err = client.list_team().unwrap_err();

    assert!(matches!(err, ClientError::Transport { .. }), "{err:?}");
    assert!(!err.is_protocol());
}
