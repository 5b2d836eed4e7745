// HTTP client for the deployed backend. Each contract call maps to one
// request (add_secret adds a lookup first); the stored API key is attached
// as `X-API-Key` when present.

use log::{debug, warn};
use reqwest::{Method, Url};
use serde_json::{json, Value};

use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use super::{BackendClient, BackendKind};
use crate::config::{resolve_base_url, ConfigStore, CredentialSource, EnvSettings};
use crate::error::ClientError;
use crate::models::{InviteRole, JsonMap, Scope, Visibility};

pub struct RealBackendClient {
    base_url: Url,
    transport: Box<dyn Transport>,
    credentials: Box<dyn CredentialSource>,
}

impl RealBackendClient {
    /// Client for `base_url`, else `OUTRIS_API_URL`, else the default backend.
    pub fn new(base_url: Option<&str>) -> Result<Self, ClientError> {
        Self::from_settings(base_url, &EnvSettings::from_env())
    }

    pub fn from_settings(
        base_url: Option<&str>,
        settings: &EnvSettings,
    ) -> Result<Self, ClientError> {
        let base_url = resolve_base_url(base_url, settings.api_url.as_deref());
        let credentials: Box<dyn CredentialSource> = match ConfigStore::default_location() {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!("Sending unauthenticated requests: {e}");
                Box::new(None::<String>)
            }
        };
        Self::with_parts(&base_url, Box::new(ReqwestTransport::new()?), credentials)
    }

    /// Assemble a client from explicit collaborators.
    pub fn with_parts(
        base_url: &str,
        transport: Box<dyn Transport>,
        credentials: Box<dyn CredentialSource>,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::Build {
            message: format!("invalid base URL {base_url:?}: {e}"),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Build {
                message: format!("base URL {base_url} cannot carry a path"),
            });
        }
        Ok(Self {
            base_url,
            transport,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Build {
                message: format!("base URL {} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<JsonMap, ClientError> {
        let url = self.endpoint(segments)?;
        debug!("{method} {}", url.path());

        let request = HttpRequest {
            method,
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            api_key: self.credentials.api_key(),
            body,
        };

        let response = self.transport.send(&request)?;
        debug!("{} {} -> {}", request.method, url.path(), response.status);
        into_object(response)
    }

    fn get(&self, segments: &[&str], query: &[(&str, String)]) -> Result<JsonMap, ClientError> {
        self.request(Method::GET, segments, query, None)
    }

    fn post(&self, segments: &[&str], body: Value) -> Result<JsonMap, ClientError> {
        self.request(Method::POST, segments, &[], Some(body))
    }

    /// Resolve an API name to its id among the organisation's APIs. Only
    /// `name` and `api_id` are read from each entry.
    fn resolve_api_id(&self, api_name: &str) -> Result<String, ClientError> {
        let listing = self.list_apis(Scope::Org)?;
        let apis = listing
            .get("apis")
            .and_then(Value::as_array)
            .ok_or_else(|| ClientError::UnexpectedShape {
                message: "API listing has no `apis` array".to_string(),
            })?;

        apis.iter()
            .find(|entry| entry.get("name").and_then(Value::as_str) == Some(api_name))
            .and_then(|entry| entry.get("api_id").and_then(Value::as_str))
            .map(str::to_string)
            .ok_or_else(|| ClientError::ApiNotFound {
                name: api_name.to_string(),
            })
    }
}

fn into_object(response: HttpResponse) -> Result<JsonMap, ClientError> {
    if !response.is_success() {
        return Err(ClientError::Status {
            status: response.status,
            body: response.body,
        });
    }

    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ClientError::MalformedBody {
            message: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
        Err(e) => Err(ClientError::MalformedBody {
            message: e.to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl BackendClient for RealBackendClient {
    fn kind(&self) -> BackendKind {
        BackendKind::Real
    }

    fn signup(&self, email: &str, org_name: &str) -> Result<JsonMap, ClientError> {
        self.post(
            &["api", "v1", "auth", "signup"],
            json!({"email": email, "org_name": org_name}),
        )
    }

    fn verify_otp(&self, email: &str, otp: &str) -> Result<JsonMap, ClientError> {
        self.post(
            &["api", "v1", "auth", "verify-otp"],
            json!({"email": email, "otp": otp}),
        )
    }

    fn login(&self, email: &str) -> Result<JsonMap, ClientError> {
        self.post(&["api", "v1", "auth", "login"], json!({"email": email}))
    }

    fn register_api(
        &self,
        spec: &Value,
        name: &str,
        visibility: Visibility,
    ) -> Result<JsonMap, ClientError> {
        self.post(
            &["api", "v1", "apis", "register"],
            json!({"spec": spec, "name": name, "visibility": visibility}),
        )
    }

    fn add_secret(
        &self,
        api_name: &str,
        key_name: &str,
        value: &str,
    ) -> Result<JsonMap, ClientError> {
        let api_id = self.resolve_api_id(api_name)?;
        debug!("Resolved API {api_name:?} to {api_id}");
        self.post(
            &["api", "v1", "apis", api_id.as_str(), "secrets"],
            json!({"key_name": key_name, "value": value}),
        )
    }

    fn list_apis(&self, scope: Scope) -> Result<JsonMap, ClientError> {
        self.get(
            &["api", "v1", "apis"],
            &[("scope", scope.as_str().to_string())],
        )
    }

    fn query(&self, query_text: &str) -> Result<JsonMap, ClientError> {
        self.post(&["api", "v1", "query"], json!({"query": query_text}))
    }

    fn get_history(&self, limit: u32) -> Result<JsonMap, ClientError> {
        self.get(&["api", "v1", "history"], &[("limit", limit.to_string())])
    }

    fn invite_member(&self, email: &str, role: InviteRole) -> Result<JsonMap, ClientError> {
        self.post(
            &["api", "v1", "team", "invite"],
            json!({"email": email, "role": role}),
        )
    }

    fn accept_invitation(
        &self,
        token: &str,
        email: &str,
        otp: &str,
    ) -> Result<JsonMap, ClientError> {
        self.post(
            &["api", "v1", "team", "accept"],
            json!({"token": token, "email": email, "otp": otp}),
        )
    }

    fn list_team(&self) -> Result<JsonMap, ClientError> {
        self.get(&["api", "v1", "team", "members"], &[])
    }

    fn get_marketplace(&self) -> Result<JsonMap, ClientError> {
        self.get(&["api", "v1", "marketplace"], &[])
    }

    fn install_from_marketplace(&self, api_name: &str) -> Result<JsonMap, ClientError> {
        self.post(
            &["api", "v1", "marketplace", "install"],
            json!({"api_name": api_name}),
        )
    }
}
