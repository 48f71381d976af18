// ABOUTME: End-to-end pipeline tests with scripted candidate sources
// ABOUTME: Covers failure skipping, ranking, artifact shape, and context threading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sage_core::models::{
    BaseExercisePlan, BaseFoodItem, EnvironmentContext, ExerciseItem, ExerciseSession, FoodUnit,
    Intensity, MealType, UserProfile, UserRequirement,
};
use sage_core::PlannerResult;
use sage_intelligence::{SafetyAssessor, ScoringPolicyKind, VariantConfig};
use sage_planner::config::GenerationConfig;
use sage_planner::generation::{
    DietCandidateSource, DietGeneration, FixtureDietSource, FixtureExerciseSource,
};
use sage_planner::pipeline::{DietPipeline, ExercisePipeline};
use serde_json::Value;
use tempfile::TempDir;

fn meal_items(total_calories: f64) -> Vec<BaseFoodItem> {
    vec![BaseFoodItem {
        name: "chicken and rice bowl".into(),
        quantity: 100.0,
        unit: FoodUnit::Gram,
        total_calories: Some(total_calories),
        calories_per_unit: None,
    }]
}

fn workout_plan() -> BaseExercisePlan {
    let item = ExerciseItem {
        name: "bodyweight circuit".into(),
        exercise_type: "strength".into(),
        duration_minutes: 30,
        intensity: Intensity::Moderate,
        calories_burned: 180.0,
        equipment: None,
        target_muscles: vec!["full_body".into()],
        instructions: None,
    };
    let session = ExerciseSession {
        time_of_day: "morning".into(),
        total_duration_minutes: item.duration_minutes,
        total_calories_burned: item.calories_burned,
        overall_intensity: item.intensity,
        exercises: vec![item],
    };
    BaseExercisePlan {
        id: 0,
        title: "Full Body Strength".into(),
        total_duration_minutes: session.total_duration_minutes,
        total_calories_burned: session.total_calories_burned,
        sessions: BTreeMap::from([("morning".to_owned(), session)]),
        weekly_frequency: 3,
    }
}

fn test_config(dir: &TempDir, base_plans: usize, variants: VariantConfig, top_k: usize) -> GenerationConfig {
    GenerationConfig {
        base_plans,
        variants,
        top_k,
        output_path: dir.path().join("plans_output.json"),
    }
}

fn weighted_assessor() -> SafetyAssessor {
    SafetyAssessor::new(ScoringPolicyKind::Weighted)
}

/// Records the context argument of every generation call.
struct RecordingDietSource {
    contexts: Arc<Mutex<Vec<Option<String>>>>,
}

#[async_trait]
impl DietCandidateSource for RecordingDietSource {
    async fn generate(
        &self,
        _profile: &UserProfile,
        _requirement: &UserRequirement,
        _environment: &EnvironmentContext,
        _meal_type: MealType,
        context: Option<&str>,
    ) -> PlannerResult<DietGeneration> {
        self.contexts
            .lock()
            .expect("lock")
            .push(context.map(str::to_owned));
        Ok(DietGeneration {
            items: meal_items(1350.0),
            macros: None,
            retrieval_context: Some("knowledge block one".into()),
        })
    }
}

#[tokio::test]
async fn failed_base_generation_is_skipped_not_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let source = FixtureDietSource::new(vec![Some(meal_items(1350.0)), None]);
    let config = test_config(&dir, 2, VariantConfig::new(3, 0.9, 1.1).expect("valid"), 3);
    let pipeline =
        DietPipeline::new(Arc::new(source), weighted_assessor(), config).expect("pipeline");

    let outcome = pipeline
        .run(
            &UserProfile::default(),
            &UserRequirement::default(),
            &EnvironmentContext::default(),
            MealType::Lunch,
        )
        .await
        .expect("run");

    // Only the first base call succeeded, so exactly one variant set remains.
    assert_eq!(outcome.all_plans.len(), 3);
    assert!(outcome.all_plans.iter().all(|c| c.base_id == 1));
    let mut ids: Vec<u64> = outcome.all_plans.iter().map(|c| c.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(outcome.all_plans.iter().all(|c| c.assessment.is_some()));
}

#[tokio::test]
async fn equal_scores_break_ties_by_ascending_id() {
    let dir = TempDir::new().expect("tempdir");
    // Two identical bases; every variant stays inside all calorie thresholds,
    // so all six candidates score 100 and ranking falls back to id order.
    let source = FixtureDietSource::new(vec![
        Some(meal_items(1350.0)),
        Some(meal_items(1350.0)),
    ]);
    let config = test_config(&dir, 2, VariantConfig::new(3, 0.9, 1.1).expect("valid"), 2);
    let pipeline =
        DietPipeline::new(Arc::new(source), weighted_assessor(), config).expect("pipeline");

    let outcome = pipeline
        .run(
            &UserProfile::default(),
            &UserRequirement::default(),
            &EnvironmentContext::default(),
            MealType::Dinner,
        )
        .await
        .expect("run");

    assert_eq!(outcome.all_plans.len(), 6);
    let ids: Vec<u64> = outcome.all_plans.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    let top_ids: Vec<u64> = outcome.top_plans.iter().map(|c| c.id).collect();
    assert_eq!(top_ids, vec![1, 2]);
    assert!(outcome.summary.all_safe);
}

#[tokio::test]
async fn ranking_orders_by_score_before_id() {
    let dir = TempDir::new().expect("tempdir");
    // Default 0.7..1.3 scaling pushes the low variant under the calorie floor
    // and the high variant over the single-meal ceiling.
    let source = FixtureDietSource::new(vec![Some(meal_items(1400.0))]);
    let config = test_config(&dir, 1, VariantConfig::new(3, 0.7, 1.3).expect("valid"), 2);
    let pipeline =
        DietPipeline::new(Arc::new(source), weighted_assessor(), config).expect("pipeline");

    let outcome = pipeline
        .run(
            &UserProfile::default(),
            &UserRequirement::default(),
            &EnvironmentContext::default(),
            MealType::Lunch,
        )
        .await
        .expect("run");

    let ranked: Vec<(u64, u8)> = outcome
        .all_plans
        .iter()
        .map(|c| (c.id, c.assessment.as_ref().expect("assessment").score))
        .collect();
    assert_eq!(ranked.len(), 3);
    // The identity variant wins, then the oversized one, then the undersized.
    assert_eq!(ranked[0].0, 2);
    assert!(ranked[0].1 > ranked[1].1);
    assert!(ranked[1].1 > ranked[2].1);
    let top_ids: Vec<u64> = outcome.top_plans.iter().map(|c| c.id).collect();
    assert_eq!(top_ids, vec![2, ranked[1].0]);
}

#[tokio::test]
async fn all_failed_run_returns_empty_sets_without_error() {
    let dir = TempDir::new().expect("tempdir");
    let source = FixtureDietSource::new(vec![None, None]);
    let config = test_config(&dir, 2, VariantConfig::default(), 3);
    let output_path = config.output_path.clone();
    let pipeline =
        DietPipeline::new(Arc::new(source), weighted_assessor(), config).expect("pipeline");

    let outcome = pipeline
        .run(
            &UserProfile::default(),
            &UserRequirement::default(),
            &EnvironmentContext::default(),
            MealType::Breakfast,
        )
        .await
        .expect("run");

    assert!(outcome.all_plans.is_empty());
    assert!(outcome.top_plans.is_empty());
    assert_eq!(outcome.summary.candidate_count, 0);
    assert!(!outcome.summary.all_safe);

    // The artifact is still written, with empty collections.
    let raw = std::fs::read_to_string(output_path).expect("artifact");
    let value: Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["all_plans"].as_array().expect("array").len(), 0);
    assert_eq!(value["top_plans"].as_array().expect("array").len(), 0);
}

#[tokio::test]
async fn artifact_embeds_assessments_and_run_timestamp() {
    let dir = TempDir::new().expect("tempdir");
    let source = FixtureDietSource::new(vec![Some(meal_items(1350.0))]);
    let config = test_config(&dir, 1, VariantConfig::new(2, 0.9, 1.1).expect("valid"), 1);
    let output_path: PathBuf = config.output_path.clone();
    let pipeline =
        DietPipeline::new(Arc::new(source), weighted_assessor(), config).expect("pipeline");

    pipeline
        .run(
            &UserProfile::default(),
            &UserRequirement::default(),
            &EnvironmentContext::default(),
            MealType::Lunch,
        )
        .await
        .expect("run");

    let raw = std::fs::read_to_string(output_path).expect("artifact");
    let value: Value = serde_json::from_str(&raw).expect("json");

    assert!(value.get("generated_at").is_some());
    let all_plans = value["all_plans"].as_array().expect("all_plans");
    assert_eq!(all_plans.len(), 2);
    for plan in all_plans {
        let assessment = plan.get("_assessment").expect("embedded assessment");
        assert!(assessment.get("score").is_some());
        assert!(assessment.get("is_safe").is_some());
    }
    assert_eq!(value["top_plans"].as_array().expect("top_plans").len(), 1);

    let assessments = value["assessments"].as_object().expect("assessments");
    assert_eq!(assessments.len(), 2);
    assert!(assessments.contains_key("1"));
    assert!(assessments.contains_key("2"));
}

#[tokio::test]
async fn retrieval_context_from_first_call_is_threaded_into_the_rest() {
    let dir = TempDir::new().expect("tempdir");
    let contexts = Arc::new(Mutex::new(Vec::new()));
    let source = RecordingDietSource {
        contexts: contexts.clone(),
    };
    let config = test_config(&dir, 3, VariantConfig::new(1, 1.0, 1.0).expect("valid"), 1);
    let pipeline =
        DietPipeline::new(Arc::new(source), weighted_assessor(), config).expect("pipeline");

    pipeline
        .run(
            &UserProfile::default(),
            &UserRequirement::default(),
            &EnvironmentContext::default(),
            MealType::Lunch,
        )
        .await
        .expect("run");

    let recorded = contexts.lock().expect("lock").clone();
    assert_eq!(
        recorded,
        vec![
            None,
            Some("knowledge block one".to_owned()),
            Some("knowledge block one".to_owned()),
        ]
    );
}

#[tokio::test]
async fn exercise_pipeline_expands_and_assesses_every_variant() {
    let dir = TempDir::new().expect("tempdir");
    let source = FixtureExerciseSource::new(vec![Some(workout_plan())]);
    let config = test_config(&dir, 1, VariantConfig::new(3, 0.7, 1.3).expect("valid"), 3);
    let pipeline =
        ExercisePipeline::new(Arc::new(source), weighted_assessor(), config).expect("pipeline");

    let outcome = pipeline
        .run(
            &UserProfile::default(),
            &UserRequirement::default(),
            &EnvironmentContext::default(),
        )
        .await
        .expect("run");

    assert_eq!(outcome.all_plans.len(), 3);
    for candidate in &outcome.all_plans {
        assert_eq!(candidate.base_id, 1);
        assert!(candidate.plan.title.contains(&candidate.variant));
        assert!(candidate.assessment.is_some());
    }
    let mut by_id: Vec<_> = outcome.all_plans.iter().collect();
    by_id.sort_by_key(|c| c.id);
    let variants: Vec<&str> = by_id.iter().map(|c| c.variant.as_str()).collect();
    assert_eq!(variants, vec!["Variant_1", "Variant_2", "Variant_3"]);
}
