use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Confidence that an agent log supports its claims, in the range `[0, 100]`.
///
/// `100` is a flawless, verified execution. `0` is a rejected, hallucinated,
/// or invalid log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StabilityScore(u8);

impl StabilityScore {
    /// Highest possible score.
    pub const MAX: Self = Self(100);

    /// Lowest possible score.
    pub const MIN: Self = Self(0);

    /// Creates a `StabilityScore` from an integer in `[0, 100]`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidStabilityScore`] if `value` exceeds 100.
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if value > Self::MAX.0 {
            return Err(CoreError::InvalidStabilityScore { value: f64::from(value) });
        }
        Ok(Self(value))
    }

    /// Creates a score from a possibly fractional number, rounding to the
    /// nearest integer.
    ///
    /// Reasoning services sometimes emit `87.5` or `90.0` where an integer
    /// was requested.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidStabilityScore`] if `value` is NaN,
    /// infinite, or rounds outside `[0, 100]`.
    pub fn from_f64(value: f64) -> Result<Self, CoreError> {
        let rounded = value.round();
        if !rounded.is_finite() || !(0.0..=100.0).contains(&rounded) {
            return Err(CoreError::InvalidStabilityScore { value });
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "range checked above"
        )]
        let value = rounded as u8;
        Ok(Self(value))
    }

    /// Compile-time constructor for the fixed scores used by rule tables.
    ///
    /// Values above 100 are clamped.
    #[must_use]
    pub const fn saturating(value: u8) -> Self {
        if value > 100 {
            Self(100)
        } else {
            Self(value)
        }
    }

    /// Returns the inner integer value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StabilityScore {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StabilityScore> for u8 {
    fn from(score: StabilityScore) -> Self {
        score.0
    }
}

impl fmt::Display for StabilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
