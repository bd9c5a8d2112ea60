//! Google Gemini implementation of [`ReasoningService`].
//!
//! Calls the Generative Language `generateContent` endpoint over HTTPS.
//! This is the only place that interprets HTTP status codes; the evaluator
//! sees [`ServiceError`] variants only.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use serde_json::json;

use crate::retry::parse_retry_hint;
use crate::{ReasoningService, ServiceError};

/// Production endpoint root.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client.
    ///
    /// # Arguments
    /// - `api_key`: Google API credential
    /// - `model`: model id (e.g. `"gemini-2.5-flash"`)
    /// - `endpoint`: scheme and host, without a trailing path
    /// - `timeout`: per-request timeout
    ///
    /// # Errors
    /// Returns [`ServiceError::Network`] if the HTTP client cannot be built
    /// (e.g. TLS backend initialisation failure).
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Network(format!("build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_owned(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl ReasoningService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let envelope: serde_json::Value = response
                .json()
                .await
                .map_err(|e| ServiceError::InvalidResponse(format!("read response body: {e}")))?;
            return extract_text(&envelope);
        }

        let header_hint = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<f64>().ok())
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
        let message = response.text().await.unwrap_or_else(|_| status.to_string());

        Err(match status {
            StatusCode::TOO_MANY_REQUESTS => ServiceError::RateLimited {
                retry_after: header_hint.or_else(|| parse_retry_hint(&message)),
                message,
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceError::Unauthorized(message),
            other => ServiceError::Http { status: other.as_u16(), message },
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(envelope: &serde_json::Value) -> Result<String, ServiceError> {
    let parts = envelope
        .pointer("/candidates/0/content/parts")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| ServiceError::InvalidResponse("response has no candidate parts".to_owned()))?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(serde_json::Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(ServiceError::InvalidResponse("candidate text is empty".to_owned()));
    }
    Ok(text)
}
