// Error types for the library layer.
//
// `ClientError` covers every way a backend call can fail; `ConfigError`
// covers the local credential file. The binary wraps both in `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// `add_secret` could not resolve an API name among the org's APIs.
    #[error("API '{name}' not found")]
    ApiNotFound { name: String },

    /// The request never produced an HTTP response.
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} - {body}")]
    Status { status: u16, body: String },

    /// The response body is not a JSON object.
    #[error("Malformed response body: {message}")]
    MalformedBody { message: String },

    /// The response is a JSON object but lacks the fields a caller needs.
    #[error("Unexpected response shape: {message}")]
    UnexpectedShape { message: String },

    #[error("Failed to build HTTP client: {message}")]
    Build { message: String },
}

impl ClientError {
    /// True for failures where the server answered but the answer was unusable.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            ClientError::Status { .. }
                | ClientError::MalformedBody { .. }
                | ClientError::UnexpectedShape { .. }
        )
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
