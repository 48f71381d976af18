// ABOUTME: Integration tests for the pooled safety assessment engine
// ABOUTME: Covers rule, condition, environment, and semantic signal pooling end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::BTreeMap;

use async_trait::async_trait;
use sage_core::models::{
    AssessmentStatus, BaseExercisePlan, DietCandidate, EnvironmentContext, ExerciseCandidate,
    ExerciseItem, ExerciseSession, FitnessLevel, FoodUnit, Intensity, MealType, RiskFactor,
    RiskLevel, ScaledFoodItem, UserProfile, WeatherContext,
};
use sage_core::{PlannerError, PlannerResult};
use sage_intelligence::{
    PlanInput, SafetyAssessor, ScoringPolicyKind, SemanticAssessor, SemanticFindings,
};

fn diet_candidate(names: &[&str], total_calories: f64) -> DietCandidate {
    let per_item = total_calories / names.len() as f64;
    let items: Vec<ScaledFoodItem> = names
        .iter()
        .map(|name| ScaledFoodItem {
            name: (*name).to_owned(),
            quantity: 100.0,
            unit: FoodUnit::Gram,
            calories_per_unit: per_item / 100.0,
            total_calories: per_item,
            variant: "Variant_1".into(),
        })
        .collect();
    DietCandidate {
        id: 1,
        meal_type: MealType::Lunch,
        variant: "Variant_1".into(),
        base_id: 1,
        items,
        total_calories,
        target_calories: total_calories,
        calories_deviation: 0.0,
        macros: None,
        assessment: None,
    }
}

fn exercise_candidate(duration: u32, intensity: Intensity, weekly_frequency: u32) -> ExerciseCandidate {
    let item = ExerciseItem {
        name: "brisk walking".into(),
        exercise_type: "cardio".into(),
        duration_minutes: duration,
        intensity,
        calories_burned: f64::from(duration) * 5.0,
        equipment: None,
        target_muscles: vec!["legs".into()],
        instructions: None,
    };
    let session = ExerciseSession {
        time_of_day: "morning".into(),
        total_duration_minutes: item.duration_minutes,
        total_calories_burned: item.calories_burned,
        overall_intensity: item.intensity,
        exercises: vec![item],
    };
    ExerciseCandidate {
        id: 1,
        variant: "Variant_1".into(),
        base_id: 1,
        plan: BaseExercisePlan {
            id: 1,
            title: "Morning Walk".into(),
            total_duration_minutes: session.total_duration_minutes,
            total_calories_burned: session.total_calories_burned,
            sessions: BTreeMap::from([("morning".to_owned(), session)]),
            weekly_frequency,
        },
        assessment: None,
    }
}

fn mild_environment() -> EnvironmentContext {
    EnvironmentContext::default()
}

fn environment_at(temperature_c: f64) -> EnvironmentContext {
    EnvironmentContext {
        weather: WeatherContext {
            condition: "clear".into(),
            temperature_c,
        },
        season: None,
    }
}

struct FailingSemantic;

#[async_trait]
impl SemanticAssessor for FailingSemantic {
    async fn assess(
        &self,
        _plan: &PlanInput<'_>,
        _profile: &UserProfile,
        _environment: &EnvironmentContext,
        _context: Option<&str>,
    ) -> PlannerResult<SemanticFindings> {
        Err(PlannerError::assessment("collaborator unreachable"))
    }
}

struct StubSemantic {
    severity: RiskLevel,
}

#[async_trait]
impl SemanticAssessor for StubSemantic {
    async fn assess(
        &self,
        _plan: &PlanInput<'_>,
        _profile: &UserProfile,
        _environment: &EnvironmentContext,
        _context: Option<&str>,
    ) -> PlannerResult<SemanticFindings> {
        Ok(SemanticFindings {
            risk_factors: vec![RiskFactor {
                factor: "late_night_meal".into(),
                category: "behavioral".into(),
                severity: self.severity,
                description: "Heavy meal scheduled close to bedtime".into(),
                recommendation: "Move the heaviest meal earlier in the day".into(),
            }],
            safety_checks: vec![],
        })
    }
}

#[tokio::test]
async fn benign_diet_plan_passes_with_a_perfect_score() {
    let assessor = SafetyAssessor::new(ScoringPolicyKind::Weighted);
    let candidate = diet_candidate(&["grilled chicken", "steamed rice", "salad"], 1400.0);

    let assessment = assessor
        .assess(
            &PlanInput::Diet(&candidate),
            &UserProfile::default(),
            &mild_environment(),
            None,
        )
        .await;

    assert_eq!(assessment.score, 100);
    assert!(assessment.is_safe);
    assert_eq!(assessment.status, AssessmentStatus::Passed);
    assert!(assessment.risk_factors.is_empty());
    assert!(assessment.warnings.is_empty());
    assert!(assessment.safety_checks.iter().all(|c| c.passed));
}

#[tokio::test]
async fn dangerously_low_calories_fail_the_plan() {
    let assessor = SafetyAssessor::new(ScoringPolicyKind::Weighted);
    let candidate = diet_candidate(&["celery sticks"], 300.0);

    let assessment = assessor
        .assess(
            &PlanInput::Diet(&candidate),
            &UserProfile::default(),
            &mild_environment(),
            None,
        )
        .await;

    assert!(!assessment.is_safe);
    assert!(assessment
        .risk_factors
        .iter()
        .any(|rf| rf.factor == "extremely_low_calories" && rf.severity == RiskLevel::High));
    assert!(assessment
        .safety_checks
        .iter()
        .any(|c| c.check_name == "min_calories" && !c.passed));
    assert!(!assessment.warnings.is_empty());
}

#[tokio::test]
async fn diabetic_profile_flags_sugary_foods_as_medical_risk() {
    let assessor = SafetyAssessor::new(ScoringPolicyKind::Weighted);
    let candidate = diet_candidate(&["chocolate cake", "green salad"], 1400.0);
    let profile = UserProfile {
        medical_conditions: vec!["diabetes".into()],
        ..UserProfile::default()
    };

    let assessment = assessor
        .assess(&PlanInput::Diet(&candidate), &profile, &mild_environment(), None)
        .await;

    let medical = assessment
        .risk_factors
        .iter()
        .find(|rf| rf.factor == "diabetes_avoid_high_sugar")
        .expect("medical risk factor");
    assert_eq!(medical.severity, RiskLevel::High);
    assert_eq!(medical.category, "medical");
    assert!(medical.description.contains("diabetes"));

    assert!(!assessment.is_safe);
    assert!(assessment
        .recommendations
        .contains(&"Consult your healthcare provider before starting this plan".to_owned()));
    assert!(assessment.warnings.iter().any(|w| w.contains("diabetes")));
}

#[tokio::test]
async fn unknown_conditions_are_skipped_without_risk_factors() {
    let assessor = SafetyAssessor::new(ScoringPolicyKind::Weighted);
    let candidate = diet_candidate(&["chocolate cake"], 1400.0);
    let profile = UserProfile {
        medical_conditions: vec!["gout".into()],
        ..UserProfile::default()
    };

    let assessment = assessor
        .assess(&PlanInput::Diet(&candidate), &profile, &mild_environment(), None)
        .await;

    assert!(assessment
        .risk_factors
        .iter()
        .all(|rf| rf.category != "medical"));
}

#[tokio::test]
async fn hot_weather_raises_heat_stress_for_exercise_plans() {
    let assessor = SafetyAssessor::new(ScoringPolicyKind::Weighted);
    let candidate = exercise_candidate(30, Intensity::Moderate, 3);
    let profile = UserProfile {
        fitness_level: FitnessLevel::Intermediate,
        ..UserProfile::default()
    };

    let assessment = assessor
        .assess(
            &PlanInput::Exercise(&candidate),
            &profile,
            &environment_at(38.0),
            None,
        )
        .await;

    assert!(!assessment.is_safe);
    assert!(assessment
        .risk_factors
        .iter()
        .any(|rf| rf.factor == "high_temperature_exercise" && rf.severity == RiskLevel::High));
    assert!(assessment
        .safety_checks
        .iter()
        .any(|c| c.check_name == "heat_stress" && !c.passed));
    assert!(assessment.warnings.iter().any(|w| w.contains("heat")));
}

#[tokio::test]
async fn cold_weather_is_a_moderate_concern_only() {
    let assessor = SafetyAssessor::new(ScoringPolicyKind::Weighted);
    let candidate = exercise_candidate(30, Intensity::Moderate, 3);
    let profile = UserProfile {
        fitness_level: FitnessLevel::Intermediate,
        ..UserProfile::default()
    };

    let assessment = assessor
        .assess(
            &PlanInput::Exercise(&candidate),
            &profile,
            &environment_at(2.0),
            None,
        )
        .await;

    assert!(assessment
        .risk_factors
        .iter()
        .any(|rf| rf.factor == "low_temperature_exercise" && rf.severity == RiskLevel::Moderate));
    assert!(assessment.warnings.is_empty());
}

#[tokio::test]
async fn very_high_intensity_is_blocked_for_beginners() {
    let assessor = SafetyAssessor::new(ScoringPolicyKind::Weighted);
    let candidate = exercise_candidate(20, Intensity::VeryHigh, 3);
    let profile = UserProfile {
        fitness_level: FitnessLevel::Beginner,
        ..UserProfile::default()
    };

    let assessment = assessor
        .assess(
            &PlanInput::Exercise(&candidate),
            &profile,
            &mild_environment(),
            None,
        )
        .await;

    assert!(!assessment.is_safe);
    assert!(assessment
        .risk_factors
        .iter()
        .any(|rf| rf.factor == "excessive_intensity" && rf.severity == RiskLevel::High));
    assert!(assessment
        .recommendations
        .contains(&"Start gradually and listen to your body".to_owned()));
}

#[tokio::test]
async fn semantic_failure_degrades_to_deterministic_signals() {
    let assessor =
        SafetyAssessor::new(ScoringPolicyKind::Weighted).with_semantic(Box::new(FailingSemantic));
    let candidate = diet_candidate(&["grilled chicken", "steamed rice"], 1400.0);

    let assessment = assessor
        .assess(
            &PlanInput::Diet(&candidate),
            &UserProfile::default(),
            &mild_environment(),
            None,
        )
        .await;

    assert_eq!(assessment.score, 100);
    assert!(assessment.is_safe);
    assert!(assessment.risk_factors.is_empty());
}

#[tokio::test]
async fn semantic_findings_are_pooled_with_deterministic_signals() {
    let assessor = SafetyAssessor::new(ScoringPolicyKind::Weighted).with_semantic(Box::new(
        StubSemantic {
            severity: RiskLevel::High,
        },
    ));
    let candidate = diet_candidate(&["grilled chicken", "steamed rice"], 1400.0);

    let assessment = assessor
        .assess(
            &PlanInput::Diet(&candidate),
            &UserProfile::default(),
            &mild_environment(),
            None,
        )
        .await;

    assert!(!assessment.is_safe);
    assert_eq!(assessment.score, 70);
    assert!(assessment
        .risk_factors
        .iter()
        .any(|rf| rf.factor == "late_night_meal"));
    assert!(assessment
        .warnings
        .iter()
        .any(|w| w.contains("bedtime")));
    assert!(assessment
        .recommendations
        .contains(&"Move the heaviest meal earlier in the day".to_owned()));
}

#[tokio::test]
async fn gate_policy_passes_plans_with_only_moderate_semantic_findings() {
    let assessor = SafetyAssessor::new(ScoringPolicyKind::RiskFactorGate).with_semantic(Box::new(
        StubSemantic {
            severity: RiskLevel::Moderate,
        },
    ));
    let candidate = diet_candidate(&["grilled chicken"], 1400.0);

    let assessment = assessor
        .assess(
            &PlanInput::Diet(&candidate),
            &UserProfile::default(),
            &mild_environment(),
            None,
        )
        .await;

    assert_eq!(assessment.score, 100);
    assert!(assessment.is_safe);
    assert_eq!(assessment.status, AssessmentStatus::Passed);
}
