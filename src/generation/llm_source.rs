// ABOUTME: LLM-backed candidate sources parsing model output into typed candidates
// ABOUTME: Empty or schema-invalid output is a generation failure, never a panic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # LLM Candidate Sources
//!
//! Implements the candidate-source boundary over an [`LlmProvider`]. Each
//! generation call builds a prompt from profile, requirement, environment,
//! and retrieval context, then parses the completion into typed candidates.
//! When no retrieval context is threaded in, the source fetches one from its
//! [`KnowledgeSource`] and returns it so the pipeline can reuse it.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use sage_core::models::{
    BaseExercisePlan, BaseFoodItem, EnvironmentContext, ExerciseItem, ExerciseSession,
    MacroRatios, MealType, PlanKind, UserProfile, UserRequirement,
};
use sage_core::{PlannerError, PlannerResult};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    DietCandidateSource, DietGeneration, ExerciseCandidateSource, ExerciseGeneration,
    KnowledgeSource, StaticKnowledge,
};
use crate::llm::{extract_json_block, prompts, ChatMessage, ChatRequest, LlmProvider};

/// Diet payload shapes the collaborator is allowed to return
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DietPayload {
    /// Bare array of items
    Items(Vec<BaseFoodItem>),
    /// Object wrapping items with optional macro ratios
    Wrapped {
        items: Vec<BaseFoodItem>,
        #[serde(default, alias = "macro_nutrients")]
        macros: Option<MacroRatios>,
    },
}

/// Exercise plan payload as the collaborator returns it, before totals
#[derive(Debug, Deserialize)]
struct ExercisePayload {
    title: String,
    #[serde(default = "default_weekly_frequency")]
    weekly_frequency: u32,
    sessions: BTreeMap<String, SessionPayload>,
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    exercises: Vec<ExerciseItem>,
}

const fn default_weekly_frequency() -> u32 {
    3
}

/// LLM-backed diet candidate source
pub struct LlmDietSource {
    provider: Arc<dyn LlmProvider>,
    knowledge: Arc<dyn KnowledgeSource>,
    temperature: f32,
}

impl LlmDietSource {
    /// Create a source over a provider with no retrieval context
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            knowledge: Arc::new(StaticKnowledge::empty()),
            temperature: 0.7,
        }
    }

    /// Attach a knowledge source for retrieval context
    #[must_use]
    pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeSource>) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Set the sampling temperature for generation calls
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn parse_items(content: &str) -> PlannerResult<(Vec<BaseFoodItem>, Option<MacroRatios>)> {
        let block = extract_json_block(content)
            .ok_or_else(|| PlannerError::generation("no JSON payload in diet response"))?;
        let payload: DietPayload = serde_json::from_str(block)
            .map_err(|e| PlannerError::generation(format!("invalid diet payload: {e}")))?;
        let (items, macros) = match payload {
            DietPayload::Items(items) => (items, None),
            DietPayload::Wrapped { items, macros } => (items, macros),
        };
        if items.is_empty() {
            return Err(PlannerError::generation("diet response contained no items"));
        }
        Ok((items, macros))
    }
}

#[async_trait]
impl DietCandidateSource for LlmDietSource {
    async fn generate(
        &self,
        profile: &UserProfile,
        requirement: &UserRequirement,
        environment: &EnvironmentContext,
        meal_type: MealType,
        context: Option<&str>,
    ) -> PlannerResult<DietGeneration> {
        let retrieval_context = match context {
            Some(text) => Some(text.to_owned()),
            None => self.knowledge.retrieve(PlanKind::Diet, profile).await?,
        };

        let prompt = prompts::diet_generation_prompt(
            profile,
            requirement,
            environment,
            meal_type,
            retrieval_context.as_deref(),
        );
        let request = ChatRequest::new(vec![
            ChatMessage::system(prompts::DIET_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_temperature(self.temperature);

        let response = self.provider.complete(&request).await?;
        debug!(
            provider = self.provider.name(),
            content_len = response.content.len(),
            "received diet generation response"
        );

        let (items, macros) = Self::parse_items(&response.content)?;
        Ok(DietGeneration {
            items,
            macros,
            retrieval_context,
        })
    }
}

/// LLM-backed exercise candidate source
pub struct LlmExerciseSource {
    provider: Arc<dyn LlmProvider>,
    knowledge: Arc<dyn KnowledgeSource>,
    temperature: f32,
}

impl LlmExerciseSource {
    /// Create a source over a provider with no retrieval context
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            knowledge: Arc::new(StaticKnowledge::empty()),
            temperature: 0.7,
        }
    }

    /// Attach a knowledge source for retrieval context
    #[must_use]
    pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeSource>) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Set the sampling temperature for generation calls
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build a full plan from the payload, recomputing all totals
    fn build_plan(payload: ExercisePayload) -> PlannerResult<BaseExercisePlan> {
        if payload.sessions.is_empty() {
            return Err(PlannerError::generation(
                "exercise response contained no sessions",
            ));
        }

        let sessions: BTreeMap<String, ExerciseSession> = payload
            .sessions
            .into_iter()
            .map(|(time_of_day, session)| {
                let total_duration_minutes =
                    session.exercises.iter().map(|e| e.duration_minutes).sum();
                let total_calories_burned =
                    session.exercises.iter().map(|e| e.calories_burned).sum();
                let overall_intensity = ExerciseSession::aggregate_intensity(&session.exercises);
                let built = ExerciseSession {
                    time_of_day: time_of_day.clone(),
                    exercises: session.exercises,
                    total_duration_minutes,
                    total_calories_burned,
                    overall_intensity,
                };
                (time_of_day, built)
            })
            .collect();

        let total_duration_minutes = sessions.values().map(|s| s.total_duration_minutes).sum();
        let total_calories_burned = sessions.values().map(|s| s.total_calories_burned).sum();

        Ok(BaseExercisePlan {
            id: 0,
            title: payload.title,
            sessions,
            total_duration_minutes,
            total_calories_burned,
            weekly_frequency: payload.weekly_frequency,
        })
    }

    fn parse_plan(content: &str) -> PlannerResult<BaseExercisePlan> {
        let block = extract_json_block(content)
            .ok_or_else(|| PlannerError::generation("no JSON payload in exercise response"))?;
        let payload: ExercisePayload = serde_json::from_str(block)
            .map_err(|e| PlannerError::generation(format!("invalid exercise payload: {e}")))?;
        Self::build_plan(payload)
    }
}

#[async_trait]
impl ExerciseCandidateSource for LlmExerciseSource {
    async fn generate(
        &self,
        profile: &UserProfile,
        requirement: &UserRequirement,
        environment: &EnvironmentContext,
        context: Option<&str>,
    ) -> PlannerResult<ExerciseGeneration> {
        let retrieval_context = match context {
            Some(text) => Some(text.to_owned()),
            None => self.knowledge.retrieve(PlanKind::Exercise, profile).await?,
        };

        let prompt = prompts::exercise_generation_prompt(
            profile,
            requirement,
            environment,
            retrieval_context.as_deref(),
        );
        let request = ChatRequest::new(vec![
            ChatMessage::system(prompts::EXERCISE_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_temperature(self.temperature);

        let response = self.provider.complete(&request).await?;
        let plan = Self::parse_plan(&response.content).map_err(|e| {
            warn!(provider = self.provider.name(), error = %e, "exercise parse failed");
            e
        })?;

        Ok(ExerciseGeneration {
            plan,
            retrieval_context,
        })
    }
}
