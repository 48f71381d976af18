// ABOUTME: Scoring policies turning pooled risk factors and checks into verdicts
// ABOUTME: Weighted is the default; the two gate policies are binary all-or-nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Scoring Policies
//!
//! A policy maps the pooled signal lists to one [`Verdict`]. The three
//! policies are mutually exclusive: a deployment picks one, and that policy
//! alone decides score, safety, status, and risk level. Warnings are derived
//! outside the policy and are identical under all three.

use sage_core::constants::scoring;
use sage_core::models::{
    AssessmentStatus, PlanKind, RiskFactor, RiskLevel, SafetyCheck, UserProfile,
};
use sage_core::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};

/// Which scoring policy a deployment runs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicyKind {
    /// Graduated score from check pass rate minus severity penalties
    #[default]
    Weighted,
    /// Binary verdict on blocking risk factors alone
    RiskFactorGate,
    /// Binary verdict on failed checks alone
    CheckGate,
}

impl std::str::FromStr for ScoringPolicyKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> PlannerResult<Self> {
        match s.to_lowercase().as_str() {
            "weighted" => Ok(Self::Weighted),
            "risk_factor_gate" => Ok(Self::RiskFactorGate),
            "check_gate" => Ok(Self::CheckGate),
            other => Err(PlannerError::config(format!(
                "unknown scoring policy '{other}' (expected weighted, risk_factor_gate, or check_gate)"
            ))),
        }
    }
}

impl ScoringPolicyKind {
    /// Configuration spelling of this policy
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weighted => "weighted",
            Self::RiskFactorGate => "risk_factor_gate",
            Self::CheckGate => "check_gate",
        }
    }

    /// The policy implementation for this kind
    #[must_use]
    pub const fn policy(&self) -> &'static dyn ScoringPolicy {
        match self {
            Self::Weighted => &WeightedPolicy,
            Self::RiskFactorGate => &RiskFactorGatePolicy,
            Self::CheckGate => &CheckGatePolicy,
        }
    }
}

/// Everything a policy may consult when scoring one plan
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Kind of the plan under assessment
    pub plan_kind: PlanKind,
    /// Pooled risk factors from every signal source
    pub risk_factors: &'a [RiskFactor],
    /// Pooled safety checks from every signal source
    pub safety_checks: &'a [SafetyCheck],
    /// The user the plan was generated for
    pub profile: &'a UserProfile,
}

/// Policy output: the scored verdict for one plan
#[derive(Debug, Clone)]
pub struct Verdict {
    /// Safety score in [0, 100]
    pub score: u8,
    /// Whether the plan is safe to execute
    pub is_safe: bool,
    /// Overall verdict
    pub status: AssessmentStatus,
    /// Overall risk level
    pub risk_level: RiskLevel,
    /// Mitigation recommendations, deduplicated in insertion order
    pub recommendations: Vec<String>,
}

/// One of the three mutually exclusive scoring strategies
pub trait ScoringPolicy: Send + Sync {
    /// Score the pooled signals into a verdict
    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Verdict;
}

/// Default policy: graduated score with severity penalties
///
/// Base score is the check pass rate (100 when no checks ran). Each risk
/// factor subtracts its severity penalty. A plan is safe when the score
/// clears the floor and no blocking-severity risk factor is present.
pub struct WeightedPolicy;

impl ScoringPolicy for WeightedPolicy {
    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Verdict {
        let base = if ctx.safety_checks.is_empty() {
            100.0
        } else {
            let passed = ctx.safety_checks.iter().filter(|c| c.passed).count();
            100.0 * passed as f64 / ctx.safety_checks.len() as f64
        };

        let penalty: u32 = ctx.risk_factors.iter().map(|rf| rf.severity.penalty()).sum();
        let score = (base - f64::from(penalty)).clamp(0.0, 100.0).round() as u8;

        let has_blocking = ctx.risk_factors.iter().any(|rf| rf.severity.is_blocking());
        let is_safe = score >= scoring::SAFE_SCORE_FLOOR && !has_blocking;

        let (status, risk_level) = if score >= scoring::PASSED_BAND {
            (AssessmentStatus::Passed, RiskLevel::Low)
        } else if score >= scoring::WARNING_BAND {
            (AssessmentStatus::Warning, RiskLevel::Moderate)
        } else if score >= scoring::REVIEW_BAND {
            (AssessmentStatus::Review, RiskLevel::High)
        } else {
            (AssessmentStatus::Failed, RiskLevel::VeryHigh)
        };

        Verdict {
            score,
            is_safe,
            status,
            risk_level,
            recommendations: build_recommendations(ctx),
        }
    }
}

/// Gate policy keyed on blocking risk factors
///
/// Any high or very-high risk factor fails the plan outright; otherwise the
/// plan passes with a perfect score. Checks are ignored.
pub struct RiskFactorGatePolicy;

impl ScoringPolicy for RiskFactorGatePolicy {
    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Verdict {
        let blocked = ctx.risk_factors.iter().any(|rf| rf.severity.is_blocking());
        gate_verdict(blocked)
    }
}

/// Gate policy keyed on failed checks
///
/// Any failed check of any severity fails the plan outright; otherwise the
/// plan passes with a perfect score. Risk factors are ignored.
pub struct CheckGatePolicy;

impl ScoringPolicy for CheckGatePolicy {
    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Verdict {
        let blocked = ctx.safety_checks.iter().any(|c| !c.passed);
        gate_verdict(blocked)
    }
}

fn gate_verdict(blocked: bool) -> Verdict {
    if blocked {
        Verdict {
            score: 0,
            is_safe: false,
            status: AssessmentStatus::Failed,
            risk_level: RiskLevel::VeryHigh,
            recommendations: Vec::new(),
        }
    } else {
        Verdict {
            score: 100,
            is_safe: true,
            status: AssessmentStatus::Passed,
            risk_level: RiskLevel::Low,
            recommendations: Vec::new(),
        }
    }
}

/// Risk factor recommendations plus standing advice, deduplicated in order
fn build_recommendations(ctx: &ScoringContext<'_>) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();
    let mut push = |rec: String| {
        if !recommendations.contains(&rec) {
            recommendations.push(rec);
        }
    };

    for rf in ctx.risk_factors {
        push(rf.recommendation.clone());
    }

    if ctx.profile.has_medical_conditions() {
        push("Consult your healthcare provider before starting this plan".into());
    }

    if ctx.plan_kind == PlanKind::Exercise {
        push("Start gradually and listen to your body".into());
        push("Stay hydrated before, during, and after exercise".into());
        push("Stop immediately if you experience pain or discomfort".into());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use sage_core::models::FitnessLevel;

    fn profile() -> UserProfile {
        UserProfile {
            age: Some(30),
            fitness_level: FitnessLevel::Intermediate,
            ..UserProfile::default()
        }
    }

    fn risk(severity: RiskLevel) -> RiskFactor {
        RiskFactor {
            factor: "f".into(),
            category: "exercise".into(),
            severity,
            description: "d".into(),
            recommendation: "r".into(),
        }
    }

    #[test]
    fn weighted_no_signals_is_perfect_score() {
        let profile = profile();
        let ctx = ScoringContext {
            plan_kind: PlanKind::Diet,
            risk_factors: &[],
            safety_checks: &[],
            profile: &profile,
        };
        let verdict = WeightedPolicy.evaluate(&ctx);
        assert_eq!(verdict.score, 100);
        assert!(verdict.is_safe);
        assert_eq!(verdict.status, AssessmentStatus::Passed);
    }

    #[test]
    fn weighted_blocking_factor_is_never_safe() {
        let profile = profile();
        let checks = vec![SafetyCheck::pass("a", "ok"), SafetyCheck::pass("b", "ok")];
        let risks = vec![risk(RiskLevel::High)];
        let ctx = ScoringContext {
            plan_kind: PlanKind::Exercise,
            risk_factors: &risks,
            safety_checks: &checks,
            profile: &profile,
        };
        let verdict = WeightedPolicy.evaluate(&ctx);
        assert_eq!(verdict.score, 70);
        assert!(!verdict.is_safe);
        assert_eq!(verdict.status, AssessmentStatus::Warning);
    }

    #[test]
    fn weighted_score_clamps_at_zero() {
        let profile = profile();
        let risks = vec![risk(RiskLevel::VeryHigh), risk(RiskLevel::VeryHigh), risk(RiskLevel::VeryHigh)];
        let ctx = ScoringContext {
            plan_kind: PlanKind::Diet,
            risk_factors: &risks,
            safety_checks: &[],
            profile: &profile,
        };
        let verdict = WeightedPolicy.evaluate(&ctx);
        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.status, AssessmentStatus::Failed);
        assert_eq!(verdict.risk_level, RiskLevel::VeryHigh);
    }

    #[test]
    fn risk_factor_gate_ignores_moderate_factors() {
        let profile = profile();
        let risks = vec![risk(RiskLevel::Moderate), risk(RiskLevel::Low)];
        let ctx = ScoringContext {
            plan_kind: PlanKind::Exercise,
            risk_factors: &risks,
            safety_checks: &[SafetyCheck::fail("x", "failed", RiskLevel::Low)],
            profile: &profile,
        };
        let verdict = RiskFactorGatePolicy.evaluate(&ctx);
        assert_eq!(verdict.score, 100);
        assert!(verdict.is_safe);
    }

    #[test]
    fn risk_factor_gate_blocks_on_high() {
        let profile = profile();
        let risks = vec![risk(RiskLevel::Moderate), risk(RiskLevel::High)];
        let ctx = ScoringContext {
            plan_kind: PlanKind::Exercise,
            risk_factors: &risks,
            safety_checks: &[],
            profile: &profile,
        };
        let verdict = RiskFactorGatePolicy.evaluate(&ctx);
        assert_eq!(verdict.score, 0);
        assert!(!verdict.is_safe);
        assert_eq!(verdict.status, AssessmentStatus::Failed);
    }

    #[test]
    fn check_gate_blocks_on_any_failed_check() {
        let profile = profile();
        let checks = vec![
            SafetyCheck::pass("a", "ok"),
            SafetyCheck::fail("b", "bad", RiskLevel::Low),
        ];
        let ctx = ScoringContext {
            plan_kind: PlanKind::Diet,
            risk_factors: &[],
            safety_checks: &checks,
            profile: &profile,
        };
        let verdict = CheckGatePolicy.evaluate(&ctx);
        assert!(!verdict.is_safe);
        assert_eq!(verdict.score, 0);
    }

    #[test]
    fn recommendations_dedupe_preserving_order() {
        let mut profile = profile();
        profile.medical_conditions.push("diabetes".into());
        let risks = vec![risk(RiskLevel::Low), risk(RiskLevel::Low)];
        let ctx = ScoringContext {
            plan_kind: PlanKind::Diet,
            risk_factors: &risks,
            safety_checks: &[],
            profile: &profile,
        };
        let verdict = WeightedPolicy.evaluate(&ctx);
        assert_eq!(
            verdict.recommendations,
            vec![
                "r".to_owned(),
                "Consult your healthcare provider before starting this plan".to_owned(),
            ]
        );
    }

    #[test]
    fn policy_kind_parses_config_spellings() {
        assert_eq!(
            "weighted".parse::<ScoringPolicyKind>().ok(),
            Some(ScoringPolicyKind::Weighted)
        );
        assert_eq!(
            "RISK_FACTOR_GATE".parse::<ScoringPolicyKind>().ok(),
            Some(ScoringPolicyKind::RiskFactorGate)
        );
        assert!("strict".parse::<ScoringPolicyKind>().is_err());
    }
}
