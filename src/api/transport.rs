// HTTP seam for the real backend client. `ReqwestTransport` performs the
// exchange with a blocking reqwest client; tests substitute their own
// `Transport` to observe requests without a network.

use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::Value;

use crate::error::ClientError;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// One fully-described HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub api_key: Option<String>,
    pub body: Option<Value>,
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    /// Send a single request. Exactly one attempt; no retry.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with the timeout disabled; the caller blocks until the
    /// exchange completes or the connection fails.
    pub fn new() -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| ClientError::Build {
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let transport_error = |e: reqwest::Error| ClientError::Transport {
            url: request.url.clone(),
            message: e.to_string(),
        };

        let mut builder = self.client.request(request.method.clone(), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(key) = &request.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let res = builder.send().map_err(transport_error)?;
        let status = res.status().as_u16();
        let body = res.text().map_err(transport_error)?;
        Ok(HttpResponse { status, body })
    }
}
