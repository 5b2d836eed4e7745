// Backend client contract.
//
// `BackendClient` is the full set of calls the CLI makes against the Outris
// backend. Two implementations exist: `MockBackendClient` returns canned data
// for offline work and tests, `RealBackendClient` talks HTTP. Which one a
// process uses is decided once, by `create_client`.

mod mock;
mod real;
pub mod transport;

pub use mock::MockBackendClient;
pub use real::RealBackendClient;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

use log::{info, warn};
use serde_json::Value;

use crate::config::{parse_flag, EnvSettings, USE_MOCK_ENV};
use crate::error::ClientError;
use crate::models::{InviteRole, JsonMap, Scope, Visibility};

pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Mock,
    Real,
}

/// Every call returns a JSON object on success. Input formats (email, OTP)
/// are not re-checked here; see `crate::validators`.
pub trait BackendClient {
    fn kind(&self) -> BackendKind;

    /// Start account creation; the backend emails an OTP.
    fn signup(&self, email: &str, org_name: &str) -> Result<JsonMap, ClientError>;

    /// Exchange an emailed OTP for an API key.
    fn verify_otp(&self, email: &str, otp: &str) -> Result<JsonMap, ClientError>;

    fn login(&self, email: &str) -> Result<JsonMap, ClientError>;

    /// Register an API from a parsed OpenAPI document.
    fn register_api(
        &self,
        spec: &Value,
        name: &str,
        visibility: Visibility,
    ) -> Result<JsonMap, ClientError>;

    /// Store a secret for the API called `api_name`.
    fn add_secret(&self, api_name: &str, key_name: &str, value: &str)
        -> Result<JsonMap, ClientError>;

    fn list_apis(&self, scope: Scope) -> Result<JsonMap, ClientError>;

    /// Run a natural-language query.
    fn query(&self, query_text: &str) -> Result<JsonMap, ClientError>;

    fn get_history(&self, limit: u32) -> Result<JsonMap, ClientError>;

    fn invite_member(&self, email: &str, role: InviteRole) -> Result<JsonMap, ClientError>;

    fn accept_invitation(&self, token: &str, email: &str, otp: &str)
        -> Result<JsonMap, ClientError>;

    fn list_team(&self) -> Result<JsonMap, ClientError>;

    fn get_marketplace(&self) -> Result<JsonMap, ClientError>;

    fn install_from_marketplace(&self, api_name: &str) -> Result<JsonMap, ClientError>;
}

/// Decide between mock and real. An explicit choice wins; otherwise the
/// environment flag is parsed, and anything missing or unrecognised means mock.
pub fn resolve_use_mock(explicit: Option<bool>, env_value: Option<&str>) -> bool {
    if let Some(use_mock) = explicit {
        return use_mock;
    }
    match env_value {
        None => true,
        Some(raw) => parse_flag(raw).unwrap_or_else(|| {
            warn!("Unrecognised {USE_MOCK_ENV} value {raw:?}, using the mock backend");
            true
        }),
    }
}

/// Build the client for this process from the current environment.
pub fn create_client(use_mock: Option<bool>) -> Result<Box<dyn BackendClient>, ClientError> {
    create_client_with(use_mock, None, &EnvSettings::from_env())
}

/// Build the client from explicit settings. `api_url` overrides the
/// environment's base URL for the real backend.
pub fn create_client_with(
    use_mock: Option<bool>,
    api_url: Option<&str>,
    settings: &EnvSettings,
) -> Result<Box<dyn BackendClient>, ClientError> {
    if resolve_use_mock(use_mock, settings.use_mock.as_deref()) {
        info!("Using mock backend");
        return Ok(Box::new(MockBackendClient::new()));
    }

    let client = RealBackendClient::from_settings(api_url, settings)?;
    info!("Using backend at {}", client.base_url());
    Ok(Box::new(client))
}
