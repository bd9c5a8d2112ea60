//! HTTP API gateway for the Arena agent-log auditor.
//!
//! Exposes log auditing over JSON so test runners in any language can
//! submit agent logs and receive a verdict.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod routes;
