// ABOUTME: Safety assessment engine pooling rule, condition, environment, and semantic signals
// ABOUTME: Exactly one scoring policy is active per deployment; policies are never blended
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Safety Assessment
//!
//! Given a plan, user profile, and environment, the assessor pools four
//! independently optional signal sources into single risk-factor and check
//! lists, then applies the configured scoring policy:
//!
//! 1. Rule checks (numeric thresholds keyed by plan type)
//! 2. Condition-restriction checks (keyword matching against plan content)
//! 3. Environment checks (weather and temperature)
//! 4. Semantic assessment from the external collaborator
//!
//! The semantic collaborator is best-effort: malformed, empty, or failed
//! calls contribute nothing and never abort an assessment.

use chrono::Utc;
use sage_core::models::{
    DietCandidate, EnvironmentContext, ExerciseCandidate, Intensity, MacroRatios, PlanKind,
    RiskFactor, SafetyAssessment, SafetyCheck, UserProfile,
};
use serde_json::Value;
use tracing::{debug, warn};

/// Condition-restriction matching with a pluggable text matcher
pub mod conditions;
/// Weather and temperature checks
pub mod environment;
/// The three mutually exclusive scoring policies
pub mod policy;
/// Rule-based numeric threshold checks
pub mod rules;
/// External semantic assessment boundary
pub mod semantic;

pub use conditions::{ContentMatcher, SubstringMatcher};
pub use policy::{ScoringContext, ScoringPolicy, ScoringPolicyKind, Verdict};
pub use semantic::{SemanticAssessor, SemanticFindings};

/// Borrowed view over either plan kind, giving the assessor a uniform surface
#[derive(Debug, Clone, Copy)]
pub enum PlanInput<'a> {
    /// A diet plan candidate
    Diet(&'a DietCandidate),
    /// An exercise plan candidate
    Exercise(&'a ExerciseCandidate),
}

impl PlanInput<'_> {
    /// Which kind of plan this is
    #[must_use]
    pub const fn kind(&self) -> PlanKind {
        match self {
            Self::Diet(_) => PlanKind::Diet,
            Self::Exercise(_) => PlanKind::Exercise,
        }
    }

    /// Total calories consumed (diet) or zero for exercise plans
    #[must_use]
    pub const fn total_calories(&self) -> f64 {
        match self {
            Self::Diet(plan) => plan.total_calories,
            Self::Exercise(_) => 0.0,
        }
    }

    /// Macro ratios when the diet plan carries them
    #[must_use]
    pub const fn macros(&self) -> Option<MacroRatios> {
        match self {
            Self::Diet(plan) => plan.macros,
            Self::Exercise(_) => None,
        }
    }

    /// Total exercise duration in minutes, zero for diet plans
    #[must_use]
    pub const fn total_duration_minutes(&self) -> u32 {
        match self {
            Self::Diet(_) => 0,
            Self::Exercise(candidate) => candidate.plan.total_duration_minutes,
        }
    }

    /// Planned weekly session frequency, zero for diet plans
    #[must_use]
    pub const fn weekly_frequency(&self) -> u32 {
        match self {
            Self::Diet(_) => 0,
            Self::Exercise(candidate) => candidate.plan.weekly_frequency,
        }
    }

    /// Whether any session contains a HIIT entry
    #[must_use]
    pub fn contains_hiit(&self) -> bool {
        match self {
            Self::Diet(_) => false,
            Self::Exercise(candidate) => candidate.plan.contains_hiit(),
        }
    }

    /// Highest intensity present across the plan, `Low` for diet plans
    #[must_use]
    pub fn peak_intensity(&self) -> Intensity {
        match self {
            Self::Diet(_) => Intensity::Low,
            Self::Exercise(candidate) => candidate.plan.peak_intensity(),
        }
    }

    /// Plan content flattened to lowercase text for keyword scanning
    ///
    /// Food names for diet plans; exercise names and types for exercise
    /// plans.
    #[must_use]
    pub fn flattened_content(&self) -> String {
        let text = match self {
            Self::Diet(plan) => plan
                .items
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            Self::Exercise(candidate) => candidate
                .plan
                .sessions
                .values()
                .flat_map(|s| &s.exercises)
                .flat_map(|e| [e.name.as_str(), e.exercise_type.as_str()])
                .collect::<Vec<_>>()
                .join(" "),
        };
        text.to_lowercase()
    }

    /// The plan serialized for the semantic collaborator
    #[must_use]
    pub fn to_json(&self) -> Value {
        let value = match self {
            Self::Diet(plan) => serde_json::to_value(plan),
            Self::Exercise(candidate) => serde_json::to_value(candidate),
        };
        value.unwrap_or(Value::Null)
    }
}

/// Safety assessment engine
///
/// Holds the configured scoring policy, the content matcher used for
/// condition restrictions, and an optional semantic collaborator.
pub struct SafetyAssessor {
    policy_kind: ScoringPolicyKind,
    matcher: Box<dyn ContentMatcher>,
    semantic: Option<Box<dyn SemanticAssessor>>,
}

impl SafetyAssessor {
    /// Create an assessor with the given policy and the default matcher
    #[must_use]
    pub fn new(policy_kind: ScoringPolicyKind) -> Self {
        Self {
            policy_kind,
            matcher: Box::new(SubstringMatcher),
            semantic: None,
        }
    }

    /// Replace the content matcher used for condition restrictions
    #[must_use]
    pub fn with_matcher(mut self, matcher: Box<dyn ContentMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Attach a semantic assessment collaborator
    #[must_use]
    pub fn with_semantic(mut self, semantic: Box<dyn SemanticAssessor>) -> Self {
        self.semantic = Some(semantic);
        self
    }

    /// The active scoring policy kind
    #[must_use]
    pub const fn policy_kind(&self) -> ScoringPolicyKind {
        self.policy_kind
    }

    /// Assess one plan candidate
    ///
    /// Never fails: every signal source is optional and the scoring policy is
    /// total over its inputs.
    pub async fn assess(
        &self,
        plan: &PlanInput<'_>,
        profile: &UserProfile,
        environment: &EnvironmentContext,
        context: Option<&str>,
    ) -> SafetyAssessment {
        let mut checks: Vec<SafetyCheck> = Vec::new();
        let mut risk_factors: Vec<RiskFactor> = Vec::new();

        let (rule_checks, rule_risks) = rules::run_rule_checks(plan, profile);
        checks.extend(rule_checks);
        risk_factors.extend(rule_risks);

        risk_factors.extend(conditions::run_condition_checks(
            plan,
            profile,
            self.matcher.as_ref(),
        ));

        let (env_checks, env_risks) = environment::run_environment_checks(plan, environment);
        checks.extend(env_checks);
        risk_factors.extend(env_risks);

        if let Some(semantic) = &self.semantic {
            match semantic.assess(plan, profile, environment, context).await {
                Ok(findings) => {
                    debug!(
                        risk_factors = findings.risk_factors.len(),
                        checks = findings.safety_checks.len(),
                        "merged semantic findings"
                    );
                    risk_factors.extend(findings.risk_factors);
                    checks.extend(findings.safety_checks);
                }
                Err(err) => {
                    // Degraded mode: the deterministic sources still score.
                    warn!(error = %err, "semantic assessment failed, continuing without it");
                }
            }
        }

        let ctx = ScoringContext {
            plan_kind: plan.kind(),
            risk_factors: &risk_factors,
            safety_checks: &checks,
            profile,
        };
        let verdict = self.policy_kind.policy().evaluate(&ctx);
        let warnings = SafetyAssessment::warnings_from(&risk_factors);

        SafetyAssessment {
            score: verdict.score,
            is_safe: verdict.is_safe,
            status: verdict.status,
            risk_level: verdict.risk_level,
            risk_factors,
            safety_checks: checks,
            recommendations: verdict.recommendations,
            warnings,
            assessed_at: Utc::now(),
        }
    }
}
