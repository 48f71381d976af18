// ABOUTME: Deterministic in-process candidate sources for tests and offline runs
// ABOUTME: Scripted per-call outcomes, including injected generation failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use std::sync::Mutex;

use async_trait::async_trait;
use sage_core::models::{
    BaseExercisePlan, BaseFoodItem, EnvironmentContext, MealType, UserProfile, UserRequirement,
};
use sage_core::{PlannerError, PlannerResult};

use super::{DietCandidateSource, DietGeneration, ExerciseCandidateSource, ExerciseGeneration};

/// Diet source replaying a scripted sequence of outcomes
///
/// Each call pops the next outcome; `None` entries simulate a generation
/// failure. Calls past the end of the script also fail. The retrieval
/// context echoes what was threaded in, or a fixed marker on the first call.
pub struct FixtureDietSource {
    script: Mutex<Vec<Option<Vec<BaseFoodItem>>>>,
    context: String,
}

impl FixtureDietSource {
    /// Create a source from scripted outcomes, consumed in order
    #[must_use]
    pub fn new(outcomes: Vec<Option<Vec<BaseFoodItem>>>) -> Self {
        let mut script = outcomes;
        script.reverse();
        Self {
            script: Mutex::new(script),
            context: "fixture diet knowledge".into(),
        }
    }
}

#[async_trait]
impl DietCandidateSource for FixtureDietSource {
    async fn generate(
        &self,
        _profile: &UserProfile,
        _requirement: &UserRequirement,
        _environment: &EnvironmentContext,
        _meal_type: MealType,
        context: Option<&str>,
    ) -> PlannerResult<DietGeneration> {
        let next = self
            .script
            .lock()
            .map_err(|_| PlannerError::generation("fixture script poisoned"))?
            .pop();
        match next.flatten() {
            Some(items) => Ok(DietGeneration {
                items,
                macros: None,
                retrieval_context: Some(
                    context.map_or_else(|| self.context.clone(), str::to_owned),
                ),
            }),
            None => Err(PlannerError::generation("scripted fixture failure")),
        }
    }
}

/// Exercise source replaying a scripted sequence of outcomes
pub struct FixtureExerciseSource {
    script: Mutex<Vec<Option<BaseExercisePlan>>>,
    context: String,
}

impl FixtureExerciseSource {
    /// Create a source from scripted outcomes, consumed in order
    #[must_use]
    pub fn new(outcomes: Vec<Option<BaseExercisePlan>>) -> Self {
        let mut script = outcomes;
        script.reverse();
        Self {
            script: Mutex::new(script),
            context: "fixture exercise knowledge".into(),
        }
    }
}

#[async_trait]
impl ExerciseCandidateSource for FixtureExerciseSource {
    async fn generate(
        &self,
        _profile: &UserProfile,
        _requirement: &UserRequirement,
        _environment: &EnvironmentContext,
        context: Option<&str>,
    ) -> PlannerResult<ExerciseGeneration> {
        let next = self
            .script
            .lock()
            .map_err(|_| PlannerError::generation("fixture script poisoned"))?
            .pop();
        match next.flatten() {
            Some(plan) => Ok(ExerciseGeneration {
                plan,
                retrieval_context: Some(
                    context.map_or_else(|| self.context.clone(), str::to_owned),
                ),
            }),
            None => Err(PlannerError::generation("scripted fixture failure")),
        }
    }
}
