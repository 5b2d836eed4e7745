// Unit tests for decoding backend results into typed views.

use crate::api::{BackendClient, MockBackendClient};
use crate::error::ClientError;
use crate::models::{
    decode, ApiListing, Credentials, History, Installation, Invitation, JsonMap, Marketplace,
    QueryOutcome, RegisteredApi, Role, Scope, SignupResponse, TeamRoster, Visibility,
};

use serde_json::json;

fn object(value: serde_json::Value) -> JsonMap {
    value.as_object().cloned().unwrap()
}

#[test]
fn given_mock_results_when_decoded_then_every_view_fits() {
    let client = MockBackendClient::new();

    let signup: SignupResponse = decode(client.signup("a@b.io", "Acme").unwrap()).unwrap();
    let creds: Credentials = decode(client.verify_otp("a@b.io", "123456").unwrap()).unwrap();
    let registered: RegisteredApi =
        decode(client.register_api(&json!({}), "X", Visibility::Public).unwrap()).unwrap();
    let listing: ApiListing = decode(client.list_apis(Scope::All).unwrap()).unwrap();
    let outcome: QueryOutcome = decode(client.query("q").unwrap()).unwrap();
    let history: History = decode(client.get_history(10).unwrap()).unwrap();
    let invitation: Invitation =
        decode(client.accept_invitation("t", "a@b.io", "123456").unwrap()).unwrap();
    let roster: TeamRoster = decode(client.list_team().unwrap()).unwrap();
    let market: Marketplace = decode(client.get_marketplace().unwrap()).unwrap();
    let installed: Installation = decode(client.install_from_marketplace("X").unwrap()).unwrap();

    assert_eq!(signup.expires_in, 300);
    assert_eq!(creds.org_name.as_deref(), Some("a"));
    assert_eq!(registered.visibility, Visibility::Public);
    assert_eq!(listing.apis[2].visibility, Visibility::Private);
    assert_eq!(outcome.cost, Some(0.001));
    assert_eq!(history.queries[0].api, "Mock Weather");
    assert_eq!(invitation.role, Role::Member);
    assert_eq!(roster.members[0].role, Role::Owner);
    assert_eq!(market.apis.len(), 5);
    assert_eq!(installed.api_id, "api_marketplace_123");
}

#[test]
fn given_query_result_without_optional_keys_when_decoded_then_fields_are_none() {
    let outcome: QueryOutcome = decode(object(json!({"result": {"ok": true}}))).unwrap();

    assert_eq!(outcome.api_used, None);
    assert_eq!(outcome.execution_time_ms, None);
    assert_eq!(outcome.cost, None);
}

#[test]
fn given_verify_reply_without_org_name_when_decoded_then_org_name_is_none() {
    let creds: Credentials = decode(object(json!({
        "api_key": "sk_outris_x", "org_id": "org_1", "email": "a@b.io"
    })))
    .unwrap();

    assert_eq!(creds.org_name, None);
}

#[test]
fn given_missing_required_key_when_decoded_then_unexpected_shape() {
    let result: Result<SignupResponse, _> = decode(object(json!({"message": "sent"})));

    assert!(matches!(result, Err(ClientError::UnexpectedShape { .. })));
}

#[test]
fn given_unknown_visibility_when_decoded_then_unexpected_shape() {
    let result: Result<ApiListing, _> = decode(object(json!({
        "count": 1,
        "apis": [{"name": "X", "visibility": "galaxy", "endpoints": 1}]
    })));

    assert!(matches!(result, Err(ClientError::UnexpectedShape { .. })));
}

#[test]
fn given_category_filter_when_marketplace_filtered_then_match_ignores_case() {
    let market: Marketplace = decode(MockBackendClient::new().get_marketplace().unwrap()).unwrap();

    let weather = market.filtered("weather");
    let all = market.filtered("");
    let none = market.filtered("Games");

    assert_eq!(weather.len(), 1);
    assert_eq!(weather[0].name, "OpenWeatherMap");
    assert_eq!(all.len(), 5);
    assert!(none.is_empty());
}

#[test]
fn given_enums_when_displayed_then_wire_names_are_used() {
    assert_eq!(Visibility::Org.to_string(), "org");
    assert_eq!(Scope::All.to_string(), "all");
    assert_eq!(Role::from(crate::models::InviteRole::Admin).to_string(), "admin");
    assert_eq!(
        serde_json::to_value(crate::models::InviteRole::Member).unwrap(),
        json!("member")
    );
}
