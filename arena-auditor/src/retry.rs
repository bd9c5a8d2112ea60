//! Quota-aware retry policy for reasoning-service calls.
//!
//! Backoff is linear in the attempt number with no jitter, so many
//! concurrent audits hitting the same quota will retry in lockstep.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches hints such as `"Please retry in 41.2s."`.
static RETRY_HINT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)retry\s+in\s+([0-9]+(?:\.[0-9]+)?)\s*s").ok());

/// Bounded linear backoff applied when the service reports quota exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Delay unit; attempt `n` waits `base_delay × n`.
    pub base_delay: Duration,
    /// Added on top of a service-provided retry hint.
    pub hint_buffer: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            hint_buffer: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt budget and delay unit.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self { max_attempts, base_delay, ..Self::default() }
    }

    /// Attempt budget, never less than one.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after the given failed attempt (1-based).
    ///
    /// A service hint, when present, replaces the linear schedule.
    #[must_use]
    pub fn delay_for(&self, attempt: u32, hint: Option<Duration>) -> Duration {
        let delay = match hint {
            Some(hint) => hint.saturating_add(self.hint_buffer),
            None => self.base_delay.saturating_mul(attempt.max(1)),
        };
        delay.min(self.max_delay)
    }
}

/// Extract a "retry in N s" hint from a free-text service message.
#[must_use]
pub fn parse_retry_hint(message: &str) -> Option<Duration> {
    let re = RETRY_HINT.as_ref()?;
    let secs: f64 = re.captures(message)?.get(1)?.as_str().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}
