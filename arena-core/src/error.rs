/// Errors produced by the `arena-core` crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A stability score was outside the valid range `[0, 100]`.
    #[error("invalid stability score {value}: must be an integer in [0, 100]")]
    InvalidStabilityScore { value: f64 },
}
