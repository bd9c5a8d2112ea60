//! Auditor configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::{PatternSet, RetryPolicy};

/// Environment variable holding the reasoning-service credential.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Configuration for building an [`crate::Auditor`].
///
/// Only the credential comes from the environment. Its presence is what
/// switches between the evaluator path and the permanently offline
/// heuristic path; everything else has a fixed default and can be
/// overridden programmatically.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct AuditorConfig {
    /// Reasoning-service credential. `None` means offline.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model id passed to the service.
    pub model: String,
    /// Service endpoint root (scheme and host).
    pub endpoint: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Backoff applied on rate limiting.
    pub retry: RetryPolicy,
    /// Gate and classifier vocabulary.
    pub patterns: PatternSet,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            request_timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
            patterns: PatternSet::default(),
        }
    }
}

impl std::fmt::Debug for AuditorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .field("patterns", &self.patterns)
            .finish()
    }
}

impl AuditorConfig {
    /// Build a configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// A blank credential counts as absent.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty());
        Self { api_key, ..Self::default() }
    }

    /// Returns `true` if a credential is present.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Set the credential.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the model id.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the service endpoint root.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the pattern set.
    #[must_use]
    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }
}
