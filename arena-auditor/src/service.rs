//! Reasoning-service abstraction.
//!
//! Allows swapping the hosted model, or a test double, without changing
//! the evaluation logic.

use async_trait::async_trait;

use crate::ServiceError;

/// A text-completion service used to judge logs.
///
/// Implementations must be `Send + Sync` so one client can be shared by
/// concurrent audits.
///
/// # Cancel Safety
/// Implementations hold no state between calls; dropping the future
/// abandons the request without side effects.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Send a prompt and return the raw response text.
    ///
    /// # Errors
    /// Returns [`ServiceError::RateLimited`] when the quota is exhausted.
    /// Any other variant is treated as non-retryable.
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError>;

    /// Short provider name for logs (e.g. `"gemini"`).
    fn provider_name(&self) -> &'static str;
}
