// ABOUTME: Candidate-source boundary between the pipelines and the external generator
// ABOUTME: Async traits for diet and exercise base-candidate generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Candidate Generation Boundary
//!
//! The pipelines call out through these traits with the user profile,
//! environment, target aggregates, and an optional retrieval-context text
//! block. Sources return typed base candidates plus the retrieval context
//! they used, so the first call's context can be threaded into subsequent
//! calls. Empty or schema-invalid results are a generation failure for that
//! call, which the pipeline skips and logs.

/// Deterministic in-process sources for tests and offline runs
pub mod fixture;
/// Retrieval-context boundary
pub mod knowledge;
/// LLM-backed candidate sources
pub mod llm_source;
/// LLM-backed semantic safety assessor
pub mod semantic;

pub use fixture::{FixtureDietSource, FixtureExerciseSource};
pub use knowledge::{KnowledgeSource, StaticKnowledge};
pub use llm_source::{LlmDietSource, LlmExerciseSource};
pub use semantic::LlmSemanticAssessor;

use async_trait::async_trait;
use sage_core::models::{
    BaseExercisePlan, BaseFoodItem, EnvironmentContext, MacroRatios, MealType, UserProfile,
    UserRequirement,
};
use sage_core::PlannerResult;

/// One successful diet generation call
#[derive(Debug, Clone)]
pub struct DietGeneration {
    /// Base food items for one meal
    pub items: Vec<BaseFoodItem>,
    /// Macro ratios, when the source supplies them
    pub macros: Option<MacroRatios>,
    /// Retrieval context used for this call, for threading into the next
    pub retrieval_context: Option<String>,
}

/// One successful exercise generation call
#[derive(Debug, Clone)]
pub struct ExerciseGeneration {
    /// The base exercise plan
    pub plan: BaseExercisePlan,
    /// Retrieval context used for this call, for threading into the next
    pub retrieval_context: Option<String>,
}

/// External source of base diet candidates
#[async_trait]
pub trait DietCandidateSource: Send + Sync {
    /// Generate one base meal candidate
    async fn generate(
        &self,
        profile: &UserProfile,
        requirement: &UserRequirement,
        environment: &EnvironmentContext,
        meal_type: MealType,
        context: Option<&str>,
    ) -> PlannerResult<DietGeneration>;
}

/// External source of base exercise plan candidates
#[async_trait]
pub trait ExerciseCandidateSource: Send + Sync {
    /// Generate one base exercise plan candidate
    async fn generate(
        &self,
        profile: &UserProfile,
        requirement: &UserRequirement,
        environment: &EnvironmentContext,
        context: Option<&str>,
    ) -> PlannerResult<ExerciseGeneration>;
}
