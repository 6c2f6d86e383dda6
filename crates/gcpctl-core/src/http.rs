//! Authenticated JSON transport shared by every API client
//!
//! All failures are translated here into [`RemoteServiceError`]: HTTP errors
//! keep their status and the message from the Google error body, transport
//! errors carry no status.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::{RemoteServiceError, Result};

/// User agent string for gcpctl HTTP requests
pub const GCPCTL_USER_AGENT: &str = concat!("gcpctl/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over a `reqwest::Client` that adds auth and error translation
#[derive(Clone)]
pub struct ApiTransport {
    client: reqwest::Client,
    access_token: Option<String>,
}

impl std::fmt::Debug for ApiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTransport")
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ApiTransport {
    pub fn new(access_token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(GCPCTL_USER_AGENT)
            .build()
            .map_err(|e| {
                RemoteServiceError::transport(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self {
            client,
            access_token,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let request = self.client.get(url);
        self.send(request).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T> {
        debug!("POST {}", url);
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let mut request = request.header(ACCEPT, "application/json");
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RemoteServiceError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteServiceError::transport(e.to_string()))?;
        trace!("Response {}: {}", status, body);

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body).into());
        }

        let payload = if body.trim().is_empty() {
            "{}"
        } else {
            body.as_str()
        };
        serde_json::from_str(payload).map_err(|e| {
            RemoteServiceError::http(
                status.as_u16(),
                None,
                format!("invalid JSON in response: {}", e),
            )
            .into()
        })
    }
}

/// Build a [`RemoteServiceError`] from a Google-style error body
///
/// ```json
/// {"error": {"code": 404, "message": "Spoke not found", "status": "NOT_FOUND"}}
/// ```
///
/// Falls back to the raw body (or the canonical reason) when the body is not
/// in that shape.
pub fn error_from_body(status: u16, body: &str) -> RemoteServiceError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    let reason = error
        .and_then(|e| e.get("status"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        });

    RemoteServiceError {
        status: Some(status),
        reason,
        message,
    }
}
