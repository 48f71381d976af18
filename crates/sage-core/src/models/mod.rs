// ABOUTME: Core data models for diet plans, exercise plans, and safety records
// ABOUTME: PlanKind, diet, exercise, profile, and safety assessment definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use serde::{Deserialize, Serialize};

/// Diet plan models (food items, candidates)
pub mod diet;
/// Exercise plan models (items, sessions, candidates)
pub mod exercise;
/// User profile and environment context models
pub mod profile;
/// Safety assessment record models
pub mod safety;

pub use diet::{BaseFoodItem, DietCandidate, FoodUnit, MacroRatios, MealType, ScaledFoodItem};
pub use exercise::{
    BaseExercisePlan, ExerciseCandidate, ExerciseItem, ExerciseSession, Intensity,
};
pub use profile::{
    EnvironmentContext, FitnessLevel, UserProfile, UserRequirement, WeatherContext,
};
pub use safety::{AssessmentStatus, RiskFactor, RiskLevel, SafetyAssessment, SafetyCheck};

/// Kind of plan flowing through the pipeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// Meal / food intake plan
    Diet,
    /// Exercise session plan
    Exercise,
}

impl PlanKind {
    /// String representation used in prompts and log lines
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Diet => "diet",
            Self::Exercise => "exercise",
        }
    }
}
