// Canned backend for development and tests. No network, no state, no
// randomness: the same inputs always give the same output.

use serde_json::{json, Value};

use super::{BackendClient, BackendKind};
use crate::error::ClientError;
use crate::models::{InviteRole, JsonMap, Scope, Visibility};

const MOCK_OTP_MESSAGE: &str = "OTP sent to email (MOCKED)";
const MOCK_OTP_EXPIRES_IN: u64 = 300;

#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackendClient;

impl MockBackendClient {
    pub fn new() -> Self {
        Self
    }
}

/// Unwrap a `json!` object literal.
fn object(value: Value) -> JsonMap {
    match value {
        Value::Object(map) => map,
        _ => JsonMap::new(),
    }
}

fn otp_sent() -> JsonMap {
    object(json!({
        "message": MOCK_OTP_MESSAGE,
        "expires_in": MOCK_OTP_EXPIRES_IN,
    }))
}

impl BackendClient for MockBackendClient {
    fn kind(&self) -> BackendKind {
        BackendKind::Mock
    }

    fn signup(&self, _email: &str, _org_name: &str) -> Result<JsonMap, ClientError> {
        Ok(otp_sent())
    }

    fn verify_otp(&self, email: &str, _otp: &str) -> Result<JsonMap, ClientError> {
        let local_part = email.split('@').next().unwrap_or_default();
        Ok(object(json!({
            "api_key": "sk_outris_mock_abc123",
            "org_id": "org_mock_123",
            "org_name": local_part,
            "email": email,
        })))
    }

    fn login(&self, _email: &str) -> Result<JsonMap, ClientError> {
        Ok(otp_sent())
    }

    fn register_api(
        &self,
        spec: &Value,
        name: &str,
        visibility: Visibility,
    ) -> Result<JsonMap, ClientError> {
        let endpoints = spec
            .get("paths")
            .and_then(Value::as_object)
            .map_or(0, |paths| paths.len());
        Ok(object(json!({
            "api_id": "api_mock_456",
            "name": name,
            "endpoints": endpoints,
            "intent_mappings": 10,
            "visibility": visibility,
        })))
    }

    fn add_secret(
        &self,
        _api_name: &str,
        key_name: &str,
        _value: &str,
    ) -> Result<JsonMap, ClientError> {
        Ok(object(json!({
            "message": format!("Secret {key_name} stored (MOCKED)"),
        })))
    }

    // Fixture data: the scope filter is deliberately ignored.
    fn list_apis(&self, _scope: Scope) -> Result<JsonMap, ClientError> {
        Ok(object(json!({
            "count": 3,
            "apis": [
                {"name": "Mock Weather API", "visibility": "public", "endpoints": 5},
                {"name": "Mock Payment API", "visibility": "org", "endpoints": 12},
                {"name": "Mock Analytics API", "visibility": "private", "endpoints": 8},
            ],
        })))
    }

    fn query(&self, query_text: &str) -> Result<JsonMap, ClientError> {
        Ok(object(json!({
            "result": {
                "message": format!("Mock result for: {query_text}"),
                "data": {"temperature": 72, "condition": "sunny"},
            },
            "api_used": "Mock Weather API",
            "execution_time_ms": 123,
            "cost": 0.001,
        })))
    }

    fn get_history(&self, _limit: u32) -> Result<JsonMap, ClientError> {
        Ok(object(json!({
            "count": 2,
            "queries": [
                {"query": "get weather in SF", "api": "Mock Weather", "timestamp": "2025-11-09T10:30:00Z"},
                {"query": "create charge $50", "api": "Mock Payment", "timestamp": "2025-11-09T09:15:00Z"},
            ],
        })))
    }

    fn invite_member(&self, email: &str, _role: InviteRole) -> Result<JsonMap, ClientError> {
        Ok(object(json!({
            "message": format!("Invitation sent to {email} (MOCKED)"),
        })))
    }

    fn accept_invitation(
        &self,
        _token: &str,
        _email: &str,
        _otp: &str,
    ) -> Result<JsonMap, ClientError> {
        Ok(object(json!({
            "api_key": "sk_outris_mock_xyz789",
            "org_id": "org_mock_123",
            "role": "member",
        })))
    }

    fn list_team(&self) -> Result<JsonMap, ClientError> {
        Ok(object(json!({
            "count": 3,
            "members": [
                {"email": "alice@acme.com", "role": "owner"},
                {"email": "bob@acme.com", "role": "admin"},
                {"email": "charlie@acme.com", "role": "member"},
            ],
        })))
    }

    fn get_marketplace(&self) -> Result<JsonMap, ClientError> {
        Ok(object(json!({
            "count": 5,
            "apis": [
                {"name": "OpenWeatherMap", "installs": 1234, "category": "Weather"},
                {"name": "SendGrid", "installs": 890, "category": "Email"},
                {"name": "Twilio", "installs": 756, "category": "SMS"},
                {"name": "Stripe Demo", "installs": 456, "category": "Payments"},
                {"name": "Google Maps", "installs": 2341, "category": "Maps"},
            ],
        })))
    }

    fn install_from_marketplace(&self, api_name: &str) -> Result<JsonMap, ClientError> {
        Ok(object(json!({
            "message": format!("{api_name} added to your org (MOCKED)"),
            "api_id": "api_marketplace_123",
        })))
    }
}
