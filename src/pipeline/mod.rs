// ABOUTME: Pipeline orchestrators driving generation, expansion, assessment, ranking
// ABOUTME: Generation failures are skipped and logged; only config errors are fatal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Pipeline Orchestration
//!
//! A pipeline drives one generation cycle end to end: request B base
//! candidates from the external source (threading the retrieval context
//! returned by the first call into subsequent calls), expand each into V
//! named variants, assess every flattened candidate independently, rank by
//! score with ascending-id tie break, select the top K, and persist one
//! artifact.
//!
//! Failed generation calls are logged and skipped; an all-failed run
//! returns empty sets without raising. Only configuration errors abort
//! before candidate work begins.

/// Artifact persistence
pub mod artifact;

pub use artifact::PipelineArtifact;

use std::collections::BTreeMap;
use std::sync::Arc;

use sage_core::models::{
    DietCandidate, EnvironmentContext, ExerciseCandidate, MealType, SafetyAssessment,
    UserProfile, UserRequirement,
};
use sage_core::PlannerResult;
use sage_intelligence::{
    DietVariantExpander, ExerciseVariantExpander, PlanInput, SafetyAssessor,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::{GenerationConfig, PlannerConfig};
use crate::generation::{
    DietCandidateSource, ExerciseCandidateSource, LlmDietSource, LlmExerciseSource,
    LlmSemanticAssessor,
};
use crate::llm::OpenAiCompatibleProvider;

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutcome<T> {
    /// Every surviving candidate, ranked by score
    pub all_plans: Vec<T>,
    /// The top-K candidates
    pub top_plans: Vec<T>,
    /// Aggregated view over all assessments
    pub summary: PipelineSummary,
}

/// Aggregated verdicts across one run's candidates
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineSummary {
    /// Number of candidates assessed
    pub candidate_count: usize,
    /// Mean safety score, zero for an empty run
    pub mean_score: f64,
    /// Whether every candidate was judged safe
    pub all_safe: bool,
    /// Deduplicated recommendations across all assessments, in rank order
    pub recommendations: Vec<String>,
}

impl PipelineSummary {
    /// Aggregate assessments in ranked candidate order
    #[must_use]
    pub fn from_assessments<'a, I>(assessments: I) -> Self
    where
        I: IntoIterator<Item = &'a SafetyAssessment>,
    {
        let mut count = 0usize;
        let mut score_sum = 0u32;
        let mut all_safe = true;
        let mut recommendations: Vec<String> = Vec::new();

        for assessment in assessments {
            count += 1;
            score_sum += u32::from(assessment.score);
            all_safe &= assessment.is_safe;
            for rec in &assessment.recommendations {
                if !recommendations.contains(rec) {
                    recommendations.push(rec.clone());
                }
            }
        }

        Self {
            candidate_count: count,
            mean_score: if count == 0 {
                0.0
            } else {
                f64::from(score_sum) / count as f64
            },
            all_safe: count > 0 && all_safe,
            recommendations,
        }
    }
}

/// Sort candidates by score descending, id ascending, then split off top-K
fn rank_and_select<T>(
    mut candidates: Vec<T>,
    top_k: usize,
    score_of: impl Fn(&T) -> u8,
    id_of: impl Fn(&T) -> u64,
) -> (Vec<T>, Vec<T>)
where
    T: Clone,
{
    candidates.sort_by(|a, b| {
        score_of(b)
            .cmp(&score_of(a))
            .then_with(|| id_of(a).cmp(&id_of(b)))
    });
    let top = candidates.iter().take(top_k).cloned().collect();
    (candidates, top)
}

/// Diet plan generation pipeline
pub struct DietPipeline {
    source: Arc<dyn DietCandidateSource>,
    expander: DietVariantExpander,
    assessor: SafetyAssessor,
    config: GenerationConfig,
}

impl DietPipeline {
    /// Create a pipeline from its collaborators
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Config` when the variant configuration is
    /// invalid.
    pub fn new(
        source: Arc<dyn DietCandidateSource>,
        assessor: SafetyAssessor,
        config: GenerationConfig,
    ) -> PlannerResult<Self> {
        let expander = DietVariantExpander::new(config.variants.clone())?;
        Ok(Self {
            source,
            expander,
            assessor,
            config,
        })
    }

    /// Build a fully LLM-backed pipeline from configuration
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Config` for invalid configuration or an
    /// unreachable HTTP client setup.
    pub fn from_config(config: &PlannerConfig) -> PlannerResult<Self> {
        config.validate()?;
        let provider: Arc<OpenAiCompatibleProvider> =
            Arc::new(OpenAiCompatibleProvider::from_llm_config(&config.llm)?);
        let source = LlmDietSource::new(provider.clone())
            .with_temperature(config.llm.temperature);
        let assessor = SafetyAssessor::new(config.scoring_policy)
            .with_semantic(Box::new(LlmSemanticAssessor::new(provider)));
        Self::new(Arc::new(source), assessor, config.generation.clone())
    }

    /// Run one diet generation cycle for a meal type
    ///
    /// # Errors
    ///
    /// Returns an error only when the end-of-run artifact cannot be
    /// written; candidate-level failures degrade to partial results.
    #[instrument(skip_all, fields(meal_type = meal_type.as_str()))]
    pub async fn run(
        &self,
        profile: &UserProfile,
        requirement: &UserRequirement,
        environment: &EnvironmentContext,
        meal_type: MealType,
    ) -> PlannerResult<PipelineOutcome<DietCandidate>> {
        let target_calories = requirement.target_calories.unwrap_or(0.0);
        let mut retrieval_context: Option<String> = None;
        let mut candidates: Vec<DietCandidate> = Vec::new();
        let mut next_id: u64 = 1;

        for base_index in 1..=self.config.base_plans {
            let generated = self
                .source
                .generate(
                    profile,
                    requirement,
                    environment,
                    meal_type,
                    retrieval_context.as_deref(),
                )
                .await;

            let generation = match generated {
                Ok(generation) => generation,
                Err(err) => {
                    warn!(base_index, error = %err, "base candidate generation failed, skipping");
                    continue;
                }
            };
            // Fetched once by the first successful call, reused afterwards
            if retrieval_context.is_none() {
                retrieval_context = generation.retrieval_context.clone();
            }

            for (variant, items) in self.expander.expand(&generation.items) {
                let total_calories = DietCandidate::summed_calories(&items);
                candidates.push(DietCandidate {
                    id: next_id,
                    meal_type,
                    variant,
                    base_id: base_index as u64,
                    items,
                    total_calories,
                    target_calories,
                    calories_deviation: DietCandidate::deviation_percent(
                        total_calories,
                        target_calories,
                    ),
                    macros: generation.macros,
                    assessment: None,
                });
                next_id += 1;
            }
        }

        for candidate in &mut candidates {
            let assessment = self
                .assessor
                .assess(
                    &PlanInput::Diet(candidate),
                    profile,
                    environment,
                    retrieval_context.as_deref(),
                )
                .await;
            candidate.assessment = Some(assessment);
        }

        let (all_plans, top_plans) = rank_and_select(
            candidates,
            self.config.top_k,
            |c| c.assessment.as_ref().map_or(0, |a| a.score),
            |c| c.id,
        );

        let assessments: BTreeMap<u64, SafetyAssessment> = all_plans
            .iter()
            .filter_map(|c| c.assessment.clone().map(|a| (c.id, a)))
            .collect();
        let summary =
            PipelineSummary::from_assessments(all_plans.iter().filter_map(|c| c.assessment.as_ref()));

        info!(
            candidates = all_plans.len(),
            top = top_plans.len(),
            mean_score = summary.mean_score,
            "diet pipeline run complete"
        );

        PipelineArtifact::new(all_plans.clone(), top_plans.clone(), assessments)
            .write(&self.config.output_path)
            .await?;

        Ok(PipelineOutcome {
            all_plans,
            top_plans,
            summary,
        })
    }
}

/// Exercise plan generation pipeline
pub struct ExercisePipeline {
    source: Arc<dyn ExerciseCandidateSource>,
    expander: ExerciseVariantExpander,
    assessor: SafetyAssessor,
    config: GenerationConfig,
}

impl ExercisePipeline {
    /// Create a pipeline from its collaborators
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Config` when the variant configuration is
    /// invalid.
    pub fn new(
        source: Arc<dyn ExerciseCandidateSource>,
        assessor: SafetyAssessor,
        config: GenerationConfig,
    ) -> PlannerResult<Self> {
        let expander = ExerciseVariantExpander::new(config.variants.clone())?;
        Ok(Self {
            source,
            expander,
            assessor,
            config,
        })
    }

    /// Build a fully LLM-backed pipeline from configuration
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Config` for invalid configuration or an
    /// unreachable HTTP client setup.
    pub fn from_config(config: &PlannerConfig) -> PlannerResult<Self> {
        config.validate()?;
        let provider: Arc<OpenAiCompatibleProvider> =
            Arc::new(OpenAiCompatibleProvider::from_llm_config(&config.llm)?);
        let source = LlmExerciseSource::new(provider.clone())
            .with_temperature(config.llm.temperature);
        let assessor = SafetyAssessor::new(config.scoring_policy)
            .with_semantic(Box::new(LlmSemanticAssessor::new(provider)));
        Self::new(Arc::new(source), assessor, config.generation.clone())
    }

    /// Run one exercise generation cycle
    ///
    /// # Errors
    ///
    /// Returns an error only when the end-of-run artifact cannot be
    /// written; candidate-level failures degrade to partial results.
    #[instrument(skip_all)]
    pub async fn run(
        &self,
        profile: &UserProfile,
        requirement: &UserRequirement,
        environment: &EnvironmentContext,
    ) -> PlannerResult<PipelineOutcome<ExerciseCandidate>> {
        let mut retrieval_context: Option<String> = None;
        let mut candidates: Vec<ExerciseCandidate> = Vec::new();
        let mut next_id: u64 = 1;

        for base_index in 1..=self.config.base_plans {
            let generated = self
                .source
                .generate(
                    profile,
                    requirement,
                    environment,
                    retrieval_context.as_deref(),
                )
                .await;

            let generation = match generated {
                Ok(generation) => generation,
                Err(err) => {
                    warn!(base_index, error = %err, "base plan generation failed, skipping");
                    continue;
                }
            };
            if retrieval_context.is_none() {
                retrieval_context = generation.retrieval_context.clone();
            }

            for (variant, plan) in self.expander.expand(&generation.plan) {
                candidates.push(ExerciseCandidate {
                    id: next_id,
                    variant,
                    base_id: base_index as u64,
                    plan,
                    assessment: None,
                });
                next_id += 1;
            }
        }

        for candidate in &mut candidates {
            let assessment = self
                .assessor
                .assess(
                    &PlanInput::Exercise(candidate),
                    profile,
                    environment,
                    retrieval_context.as_deref(),
                )
                .await;
            candidate.assessment = Some(assessment);
        }

        let (all_plans, top_plans) = rank_and_select(
            candidates,
            self.config.top_k,
            |c| c.assessment.as_ref().map_or(0, |a| a.score),
            |c| c.id,
        );

        let assessments: BTreeMap<u64, SafetyAssessment> = all_plans
            .iter()
            .filter_map(|c| c.assessment.clone().map(|a| (c.id, a)))
            .collect();
        let summary =
            PipelineSummary::from_assessments(all_plans.iter().filter_map(|c| c.assessment.as_ref()));

        info!(
            candidates = all_plans.len(),
            top = top_plans.len(),
            mean_score = summary.mean_score,
            "exercise pipeline run complete"
        );

        PipelineArtifact::new(all_plans.clone(), top_plans.clone(), assessments)
            .write(&self.config.output_path)
            .await?;

        Ok(PipelineOutcome {
            all_plans,
            top_plans,
            summary,
        })
    }
}
