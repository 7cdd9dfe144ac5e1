//! HTTP transport seam for the Headspace backend.
//!
//! `HttpTransport` is the boundary the retry layer and the agent actions
//! operate against; `ReqwestTransport` is the real implementation. Tests
//! substitute scripted transports instead of a network mock.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;

/// Header carrying the anti-forgery token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// HTTP methods used against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    /// State-changing methods must carry the anti-forgery token.
    pub fn is_state_changing(self) -> bool {
        !matches!(self, Method::Get)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

/// A request against the backend REST API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the backend origin, e.g. `/api/agents/3/respond`.
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// A decoded response: status code plus raw body text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Network-level failure occurring before any response was received.
#[derive(Debug, Error, Clone)]
pub enum TransportError {
    #[error("request failed before a response was received: {0}")]
    Network(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// The seam between the retry layer and the wire.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// Transport implementation over `reqwest`, injecting the anti-forgery
/// token header on state-changing requests.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl ReqwestTransport {
    /// Creates a transport against the given backend origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            csrf_token: None,
        }
    }

    /// Attaches the anti-forgery token sent on state-changing requests.
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let mut transport = Self::new(config.base_url.clone());
        if let Some(token) = &config.csrf_token {
            transport = transport.with_csrf_token(token.clone());
        }
        transport
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
            Method::Patch => self.client.patch(&url),
        };

        if request.method.is_state_changing() {
            if let Some(token) = &self.csrf_token {
                builder = builder.header(CSRF_HEADER, token);
            }
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            TransportError::Network(format!(
                "{} {} failed: {err}",
                request.method.as_str(),
                request.path
            ))
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| {
            TransportError::Network(format!("failed to read response body: {err}"))
        })?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_changing_methods() {
        assert!(!Method::Get.is_state_changing());
        assert!(Method::Post.is_state_changing());
        assert!(Method::Put.is_state_changing());
        assert!(Method::Delete.is_state_changing());
        assert!(Method::Patch.is_state_changing());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let transport = ReqwestTransport::new("http://backend:8080/");
        assert_eq!(
            transport.url_for("/api/agents/3/respond"),
            "http://backend:8080/api/agents/3/respond"
        );
    }

    #[test]
    fn test_response_success_range() {
        let ok = ApiResponse {
            status: 204,
            body: String::new(),
        };
        let bad = ApiResponse {
            status: 503,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn test_response_json_parse() {
        let response = ApiResponse {
            status: 200,
            body: r#"{"success": true}"#.to_string(),
        };
        assert_eq!(response.json().unwrap()["success"], true);
    }
}
