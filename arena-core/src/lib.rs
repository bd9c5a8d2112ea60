//! Core value types for the Arena agent-log trust auditor.
//!
//! Defines the audit verdict (`AuditResult`), its bounded stability score,
//! the submitted log input, and a digest used to correlate audits in logs.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod audit;
pub mod digest;
pub mod error;
pub mod samples;
pub mod score;

pub use audit::{AuditResult, LogInput};
pub use digest::LogDigest;
pub use error::CoreError;
pub use score::StabilityScore;
