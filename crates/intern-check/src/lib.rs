//! Credibility checks for internship postings.
//!
//! The [`verification`] module holds the scoring engine and its collaborators; the remaining
//! modules carry configuration, telemetry, and the top-level error type shared with the API
//! service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod verification;
