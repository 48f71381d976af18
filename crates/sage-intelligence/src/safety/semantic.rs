// ABOUTME: Semantic assessment boundary for the external plan-review collaborator
// ABOUTME: Findings parse leniently; malformed entries are dropped, never fatal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use async_trait::async_trait;
use sage_core::models::{EnvironmentContext, RiskFactor, RiskLevel, SafetyCheck, UserProfile};
use sage_core::PlannerResult;
use serde_json::Value;
use tracing::debug;

use super::PlanInput;

/// Risk factors and checks contributed by the semantic collaborator
#[derive(Debug, Clone, Default)]
pub struct SemanticFindings {
    /// Risk factors to pool with the deterministic sources
    pub risk_factors: Vec<RiskFactor>,
    /// Checks to pool with the deterministic sources
    pub safety_checks: Vec<SafetyCheck>,
}

impl SemanticFindings {
    /// Parse findings from a collaborator response value
    ///
    /// Entries missing a factor or check name are dropped; every other field
    /// gets a sensible default. Severities parse lossily so novel spellings
    /// degrade to low instead of discarding the entry.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Self {
        let mut findings = Self::default();

        if let Some(entries) = value.get("risk_factors").and_then(Value::as_array) {
            for entry in entries {
                let Some(factor) = non_empty_str(entry, "factor") else {
                    debug!("dropping semantic risk factor without a name");
                    continue;
                };
                findings.risk_factors.push(RiskFactor {
                    factor,
                    category: non_empty_str(entry, "category")
                        .unwrap_or_else(|| "semantic".into()),
                    severity: entry
                        .get("severity")
                        .and_then(Value::as_str)
                        .map_or(RiskLevel::Low, RiskLevel::from_str_lossy),
                    description: string_field(entry, "description"),
                    recommendation: string_field(entry, "recommendation"),
                });
            }
        }

        let checks = value
            .get("safety_checks")
            .or_else(|| value.get("checks"))
            .and_then(Value::as_array);
        if let Some(entries) = checks {
            for entry in entries {
                let Some(check_name) = non_empty_str(entry, "check_name") else {
                    debug!("dropping semantic check without a name");
                    continue;
                };
                let passed = entry
                    .get("passed")
                    .and_then(Value::as_bool)
                    .unwrap_or(true);
                let severity = entry
                    .get("severity")
                    .and_then(Value::as_str)
                    .map(RiskLevel::from_str_lossy);
                findings.safety_checks.push(SafetyCheck {
                    check_name,
                    passed,
                    message: string_field(entry, "message"),
                    severity: if passed { None } else { severity },
                });
            }
        }

        findings
    }

    /// Whether the collaborator contributed nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.risk_factors.is_empty() && self.safety_checks.is_empty()
    }
}

fn non_empty_str(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn string_field(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// External semantic plan review
///
/// Implementations call out to a reasoning service with the plan, profile,
/// environment, and optional retrieval context. The engine treats errors as
/// a degraded-mode signal, not a failure.
#[async_trait]
pub trait SemanticAssessor: Send + Sync {
    /// Review one plan and return pooled findings
    async fn assess(
        &self,
        plan: &PlanInput<'_>,
        profile: &UserProfile,
        environment: &EnvironmentContext,
        context: Option<&str>,
    ) -> PlannerResult<SemanticFindings>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_well_formed_findings() {
        let value = json!({
            "risk_factors": [{
                "factor": "late_night_eating",
                "category": "behavioral",
                "severity": "moderate",
                "description": "Dinner is scheduled very late",
                "recommendation": "Shift dinner earlier"
            }],
            "safety_checks": [{
                "check_name": "meal_timing",
                "passed": false,
                "message": "Meals are unevenly spaced",
                "severity": "low"
            }]
        });
        let findings = SemanticFindings::from_json_value(&value);
        assert_eq!(findings.risk_factors.len(), 1);
        assert_eq!(findings.risk_factors[0].severity, RiskLevel::Moderate);
        assert_eq!(findings.safety_checks.len(), 1);
        assert_eq!(findings.safety_checks[0].severity, Some(RiskLevel::Low));
    }

    #[test]
    fn drops_nameless_entries_and_defaults_the_rest() {
        let value = json!({
            "risk_factors": [
                {"severity": "high"},
                {"factor": "x", "severity": "made_up_level"}
            ],
            "checks": [{"check_name": "y"}]
        });
        let findings = SemanticFindings::from_json_value(&value);
        assert_eq!(findings.risk_factors.len(), 1);
        assert_eq!(findings.risk_factors[0].severity, RiskLevel::Low);
        assert_eq!(findings.risk_factors[0].category, "semantic");
        assert_eq!(findings.safety_checks.len(), 1);
        assert!(findings.safety_checks[0].passed);
    }

    #[test]
    fn non_object_value_yields_empty_findings() {
        assert!(SemanticFindings::from_json_value(&json!("nope")).is_empty());
        assert!(SemanticFindings::from_json_value(&json!(null)).is_empty());
    }
}
