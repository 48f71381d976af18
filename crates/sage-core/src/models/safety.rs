// ABOUTME: Safety assessment record models shared with the semantic collaborator
// ABOUTME: RiskLevel, AssessmentStatus, RiskFactor, SafetyCheck, SafetyAssessment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Safety Assessment Records
//!
//! The canonical assessment schema. These records are produced by the safety
//! engine and consumed verbatim from the external semantic collaborator, so
//! field names and enum spellings are part of the wire contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::scoring;

/// Severity scale for risk factors and failed checks
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Minor concern
    #[default]
    Low,
    /// Needs attention
    Moderate,
    /// Serious concern
    High,
    /// Dangerous
    VeryHigh,
}

impl RiskLevel {
    /// Score penalty applied per risk factor of this severity
    #[must_use]
    pub const fn penalty(&self) -> u32 {
        match self {
            Self::Low => scoring::PENALTY_LOW,
            Self::Moderate => scoring::PENALTY_MODERATE,
            Self::High => scoring::PENALTY_HIGH,
            Self::VeryHigh => scoring::PENALTY_VERY_HIGH,
        }
    }

    /// Whether this severity blocks an `is_safe` verdict on its own
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }

    /// Parse severity from string, defaulting to low
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "moderate" | "medium" => Self::Moderate,
            "high" => Self::High,
            "very_high" | "very high" | "critical" => Self::VeryHigh,
            _ => Self::Low,
        }
    }
}

/// Overall assessment verdict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// Safe to execute as-is
    Passed,
    /// Usable with caution
    Warning,
    /// Needs human review
    Review,
    /// Not safe to execute
    Failed,
}

/// A named, severity-tagged concern attached to a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Machine-readable factor name (e.g. `hiit_frequency`)
    pub factor: String,
    /// Category: medical, environmental, nutritional, exercise
    pub category: String,
    /// Severity of this factor
    pub severity: RiskLevel,
    /// Human-readable description
    pub description: String,
    /// How to mitigate
    pub recommendation: String,
}

/// A named pass/fail test with an explanatory message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyCheck {
    /// Machine-readable check name (e.g. `daily_duration`)
    pub check_name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Result message
    pub message: String,
    /// Severity when failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<RiskLevel>,
}

impl SafetyCheck {
    /// Build a passing check
    #[must_use]
    pub fn pass(check_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check_name: check_name.into(),
            passed: true,
            message: message.into(),
            severity: None,
        }
    }

    /// Build a failing check with a severity
    #[must_use]
    pub fn fail(
        check_name: impl Into<String>,
        message: impl Into<String>,
        severity: RiskLevel,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            passed: false,
            message: message.into(),
            severity: Some(severity),
        }
    }
}

/// Complete safety assessment for one plan candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyAssessment {
    /// Safety score in [0, 100]
    pub score: u8,
    /// Whether the plan is safe to execute
    pub is_safe: bool,
    /// Overall verdict
    pub status: AssessmentStatus,
    /// Overall risk level
    pub risk_level: RiskLevel,
    /// Identified risk factors
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,
    /// Individual check results
    #[serde(default)]
    pub safety_checks: Vec<SafetyCheck>,
    /// Deduplicated mitigation recommendations
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Descriptions of high and very-high severity risk factors
    #[serde(default)]
    pub warnings: Vec<String>,
    /// When the assessment was performed
    pub assessed_at: DateTime<Utc>,
}

impl SafetyAssessment {
    /// Warnings derived from blocking-severity risk factors.
    ///
    /// Computed the same way under every scoring policy.
    #[must_use]
    pub fn warnings_from(risk_factors: &[RiskFactor]) -> Vec<String> {
        risk_factors
            .iter()
            .filter(|rf| rf.severity.is_blocking())
            .map(|rf| rf.description.clone())
            .collect()
    }
}
