//! Error types for the auditor crate.
//!
//! None of these escape [`crate::Auditor`]: every variant is resolved
//! locally by falling back to the heuristic classifier.

use std::time::Duration;

/// Failures surfaced by a [`crate::ReasoningService`] implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// Quota exhausted (HTTP 429). The only retryable failure.
    #[error("rate limited (retry after {retry_after:?}): {message}")]
    RateLimited {
        /// Delay requested by the service, if it supplied one.
        retry_after: Option<Duration>,
        /// Raw message from the service.
        message: String,
    },

    /// Credential rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection, TLS, or timeout failure.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered but the envelope did not contain any text.
    #[error("invalid service response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Returns `true` for quota exhaustion, the only failure worth retrying.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Failures of the evidence-based evaluator path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum EvaluatorError {
    /// Every attempt in the retry budget was rate limited.
    #[error("max retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded { attempts: u32 },

    /// A non-retryable service failure.
    #[error("reasoning service failed: {0}")]
    Service(#[from] ServiceError),

    /// The service replied, but not with a valid audit verdict.
    #[error("malformed service response: {reason}")]
    MalformedResponse { reason: String },
}
