// ABOUTME: Integration tests for the three mutually exclusive scoring policies
// ABOUTME: Verifies gate policies are strictly binary and weighted scores stay in range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use sage_core::models::{
    AssessmentStatus, FitnessLevel, PlanKind, RiskFactor, RiskLevel, SafetyCheck, UserProfile,
};
use sage_intelligence::safety::{ScoringContext, ScoringPolicyKind};

fn profile() -> UserProfile {
    UserProfile {
        age: Some(42),
        fitness_level: FitnessLevel::Intermediate,
        ..UserProfile::default()
    }
}

fn risk(factor: &str, severity: RiskLevel) -> RiskFactor {
    RiskFactor {
        factor: factor.into(),
        category: "exercise".into(),
        severity,
        description: format!("{factor} detected"),
        recommendation: format!("mitigate {factor}"),
    }
}

#[test]
fn gate_policies_only_ever_score_zero_or_one_hundred() {
    let profile = profile();
    let signal_mixes: Vec<(Vec<RiskFactor>, Vec<SafetyCheck>)> = vec![
        (vec![], vec![]),
        (vec![risk("a", RiskLevel::Low)], vec![SafetyCheck::pass("ok", "fine")]),
        (
            vec![risk("b", RiskLevel::VeryHigh)],
            vec![SafetyCheck::fail("bad", "failed", RiskLevel::Moderate)],
        ),
        (
            vec![risk("c", RiskLevel::Moderate), risk("d", RiskLevel::High)],
            vec![SafetyCheck::pass("ok", "fine")],
        ),
    ];

    for kind in [ScoringPolicyKind::RiskFactorGate, ScoringPolicyKind::CheckGate] {
        for (risks, checks) in &signal_mixes {
            let ctx = ScoringContext {
                plan_kind: PlanKind::Exercise,
                risk_factors: risks,
                safety_checks: checks,
                profile: &profile,
            };
            let verdict = kind.policy().evaluate(&ctx);
            assert!(
                verdict.score == 0 || verdict.score == 100,
                "{} produced intermediate score {}",
                kind.as_str(),
                verdict.score
            );
            assert_eq!(verdict.is_safe, verdict.score == 100);
        }
    }
}

#[test]
fn risk_factor_gate_passes_moderate_factors_and_blocks_on_high() {
    let profile = profile();
    let moderate_only = vec![risk("fatigue", RiskLevel::Moderate)];
    let ctx = ScoringContext {
        plan_kind: PlanKind::Exercise,
        risk_factors: &moderate_only,
        safety_checks: &[],
        profile: &profile,
    };
    let verdict = ScoringPolicyKind::RiskFactorGate.policy().evaluate(&ctx);
    assert_eq!(verdict.score, 100);
    assert!(verdict.is_safe);
    assert_eq!(verdict.status, AssessmentStatus::Passed);

    let with_high = vec![
        risk("fatigue", RiskLevel::Moderate),
        risk("overexertion", RiskLevel::High),
    ];
    let ctx = ScoringContext {
        plan_kind: PlanKind::Exercise,
        risk_factors: &with_high,
        safety_checks: &[],
        profile: &profile,
    };
    let verdict = ScoringPolicyKind::RiskFactorGate.policy().evaluate(&ctx);
    assert_eq!(verdict.score, 0);
    assert!(!verdict.is_safe);
    assert_eq!(verdict.status, AssessmentStatus::Failed);
    assert_eq!(verdict.risk_level, RiskLevel::VeryHigh);
}

#[test]
fn check_gate_ignores_risk_factors_entirely() {
    let profile = profile();
    let risks = vec![risk("anything", RiskLevel::VeryHigh)];
    let checks = vec![SafetyCheck::pass("calories_range", "within range")];
    let ctx = ScoringContext {
        plan_kind: PlanKind::Diet,
        risk_factors: &risks,
        safety_checks: &checks,
        profile: &profile,
    };
    let verdict = ScoringPolicyKind::CheckGate.policy().evaluate(&ctx);
    assert_eq!(verdict.score, 100);
    assert!(verdict.is_safe);
}

#[test]
fn weighted_score_stays_within_bounds_under_heavy_penalties() {
    let profile = profile();
    let risks: Vec<RiskFactor> = (0..6).map(|i| risk(&format!("r{i}"), RiskLevel::VeryHigh)).collect();
    let checks = vec![SafetyCheck::fail("x", "failed", RiskLevel::High)];
    let ctx = ScoringContext {
        plan_kind: PlanKind::Exercise,
        risk_factors: &risks,
        safety_checks: &checks,
        profile: &profile,
    };
    let verdict = ScoringPolicyKind::Weighted.policy().evaluate(&ctx);
    assert_eq!(verdict.score, 0);
    assert_eq!(verdict.status, AssessmentStatus::Failed);
    assert!(!verdict.is_safe);
}

#[test]
fn weighted_blocking_factor_forces_unsafe_even_above_the_floor() {
    let profile = profile();
    // Pass rate 100 minus one high penalty lands at 70, above the floor,
    // but the blocking factor still vetoes safety.
    let risks = vec![risk("joint_strain", RiskLevel::High)];
    let checks = vec![
        SafetyCheck::pass("daily_duration", "ok"),
        SafetyCheck::pass("rest_days", "ok"),
    ];
    let ctx = ScoringContext {
        plan_kind: PlanKind::Exercise,
        risk_factors: &risks,
        safety_checks: &checks,
        profile: &profile,
    };
    let verdict = ScoringPolicyKind::Weighted.policy().evaluate(&ctx);
    assert_eq!(verdict.score, 70);
    assert!(!verdict.is_safe);
    assert_eq!(verdict.status, AssessmentStatus::Warning);
}

#[test]
fn policies_disagree_on_the_same_signal_pool() {
    let profile = profile();
    let risks = vec![risk("minor_note", RiskLevel::Low)];
    let checks = vec![
        SafetyCheck::pass("a", "ok"),
        SafetyCheck::pass("b", "ok"),
        SafetyCheck::fail("c", "slightly off", RiskLevel::Low),
    ];
    let ctx = ScoringContext {
        plan_kind: PlanKind::Exercise,
        risk_factors: &risks,
        safety_checks: &checks,
        profile: &profile,
    };

    let weighted = ScoringPolicyKind::Weighted.policy().evaluate(&ctx);
    let rf_gate = ScoringPolicyKind::RiskFactorGate.policy().evaluate(&ctx);
    let check_gate = ScoringPolicyKind::CheckGate.policy().evaluate(&ctx);

    // Pass rate 2/3 rounds to 67 before the low penalty.
    assert_eq!(weighted.score, 62);
    assert!(weighted.is_safe);
    assert_eq!(rf_gate.score, 100);
    assert!(rf_gate.is_safe);
    assert_eq!(check_gate.score, 0);
    assert!(!check_gate.is_safe);
}

#[test]
fn weighted_attaches_exercise_reminders_while_gates_stay_silent() {
    let profile = profile();
    let risks = vec![risk("minor_note", RiskLevel::Low)];
    let ctx = ScoringContext {
        plan_kind: PlanKind::Exercise,
        risk_factors: &risks,
        safety_checks: &[],
        profile: &profile,
    };

    let weighted = ScoringPolicyKind::Weighted.policy().evaluate(&ctx);
    assert!(weighted
        .recommendations
        .contains(&"Start gradually and listen to your body".to_owned()));

    let gate = ScoringPolicyKind::RiskFactorGate.policy().evaluate(&ctx);
    assert!(gate.recommendations.is_empty());
}
