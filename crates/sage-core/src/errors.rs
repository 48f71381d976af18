// ABOUTME: Unified error types for plan generation, assessment, and persistence
// ABOUTME: Distinguishes fatal configuration errors from recoverable pipeline failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Error Handling
//!
//! `PlannerError` is the single error type crossing module boundaries. The
//! variants encode the recovery contract:
//!
//! - `Config` is fatal and must be surfaced before any candidate work begins.
//! - `Generation` and `Assessment` are recoverable at the pipeline layer:
//!   a failed generation call skips that base candidate, a failed assessment
//!   source contributes nothing to the pooled signals.
//! - `Serialization`, `Io`, and `Http` wrap the underlying library errors.

use thiserror::Error;

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Unified error type for the planning pipeline
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Invalid or missing configuration; fatal before any candidate work
    #[error("configuration error: {0}")]
    Config(String),

    /// A base-candidate generation call returned nothing usable
    #[error("generation failure: {0}")]
    Generation(String),

    /// The semantic assessment collaborator failed or returned malformed data
    #[error("assessment source failure: {0}")]
    Assessment(String),

    /// JSON serialization or deserialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure while persisting an artifact
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport failure talking to an external collaborator
    #[error("http error: {0}")]
    Http(String),
}

impl PlannerError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generation failure
    #[must_use]
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create an assessment-source failure
    #[must_use]
    pub fn assessment(message: impl Into<String>) -> Self {
        Self::Assessment(message.into())
    }

    /// Create an HTTP transport error
    #[must_use]
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http(message.into())
    }

    /// Whether the pipeline may recover from this error by skipping work
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Generation(_) | Self::Assessment(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_fatal() {
        assert!(!PlannerError::config("min_scale > max_scale").is_recoverable());
    }

    #[test]
    fn generation_and_assessment_errors_are_recoverable() {
        assert!(PlannerError::generation("empty response").is_recoverable());
        assert!(PlannerError::assessment("malformed payload").is_recoverable());
    }
}
