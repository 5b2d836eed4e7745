// Typed views over backend responses.
//
// Every backend call returns a JSON object (`JsonMap`). Commands decode the
// object into one of the structs below when they need particular fields;
// optional keys are `Option` so partial responses still decode.

use std::fmt;

use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// A backend result: always a JSON object at the top level.
pub type JsonMap = serde_json::Map<String, Value>;

/// Decode a result object into a typed view.
pub fn decode<T: DeserializeOwned>(map: JsonMap) -> Result<T, ClientError> {
    serde_json::from_value(Value::Object(map)).map_err(|e| ClientError::UnexpectedShape {
        message: e.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Org,
    Public,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Org => "org",
            Visibility::Public => "public",
        }
    }
}

/// Filter for `list_apis`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    All,
    Org,
    Public,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::All => "all",
            Scope::Org => "org",
            Scope::Public => "public",
        }
    }
}

/// Role of an existing team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Member,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

/// Roles that can be granted through an invitation. Ownership is never invited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InviteRole {
    Admin,
    #[default]
    Member,
}

impl InviteRole {
    pub fn as_str(self) -> &'static str {
        match self {
            InviteRole::Admin => "admin",
            InviteRole::Member => "member",
        }
    }
}

impl From<InviteRole> for Role {
    fn from(role: InviteRole) -> Self {
        match role {
            InviteRole::Admin => Role::Admin,
            InviteRole::Member => Role::Member,
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Visibility, Scope, Role, InviteRole);

/// How `query ask` renders its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Table,
}

/// Reply to `signup` and `login`: an OTP has been sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub expires_in: u64,
}

/// Reply to `verify_otp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub org_id: String,
    #[serde(default)]
    pub org_name: Option<String>,
    pub email: String,
}

/// Reply to `accept_invitation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub api_key: String,
    pub org_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredApi {
    pub api_id: String,
    pub name: String,
    pub endpoints: u64,
    pub intent_mappings: u64,
    pub visibility: Visibility,
}

/// Generic `{message}` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEntry {
    pub name: String,
    pub visibility: Visibility,
    pub endpoints: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiListing {
    pub count: u64,
    pub apis: Vec<ApiEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    #[serde(default)]
    pub result: Option<Value>,
    /// Usually the API's name; any JSON value is shown as-is.
    #[serde(default)]
    pub api_used: Option<Value>,
    /// Integer or fractional milliseconds, whichever the backend reports.
    #[serde(default)]
    pub execution_time_ms: Option<serde_json::Number>,
    #[serde(default)]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub api: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    pub count: u64,
    pub queries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRoster {
    pub count: u64,
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceEntry {
    pub name: String,
    pub installs: u64,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marketplace {
    pub count: u64,
    pub apis: Vec<MarketplaceEntry>,
}

impl Marketplace {
    /// Entries whose category matches `category` case-insensitively.
    /// An empty filter keeps everything.
    pub fn filtered(&self, category: &str) -> Vec<&MarketplaceEntry> {
        self.apis
            .iter()
            .filter(|entry| category.is_empty() || entry.category.eq_ignore_ascii_case(category))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installation {
    pub message: String,
    pub api_id: String,
}
