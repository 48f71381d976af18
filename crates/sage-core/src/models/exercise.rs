// ABOUTME: Exercise plan models for base plans and expanded intensity variants
// ABOUTME: Intensity, ExerciseItem, ExerciseSession, BaseExercisePlan, ExerciseCandidate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::safety::SafetyAssessment;

/// Exercise intensity as an ordered scale
///
/// The derived ordering (`Low < Moderate < High < VeryHigh`) is relied on by
/// session-level aggregation and the high-intensity rule checks.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Light effort
    #[default]
    Low,
    /// Moderate effort
    Moderate,
    /// Vigorous effort
    High,
    /// Maximal effort
    VeryHigh,
}

impl Intensity {
    /// Parse intensity from string, defaulting to moderate
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "low" | "light" => Self::Low,
            "high" | "vigorous" => Self::High,
            "very_high" | "very high" | "maximal" => Self::VeryHigh,
            _ => Self::Moderate,
        }
    }

    /// String representation used in prompts and log lines
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

/// A single exercise entry within a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseItem {
    /// Exercise name (e.g. "brisk walking")
    pub name: String,
    /// Exercise category (e.g. "cardio", "strength", "hiit")
    pub exercise_type: String,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Planned intensity
    pub intensity: Intensity,
    /// Estimated calories burned over the duration
    pub calories_burned: f64,
    /// Required equipment, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    /// Primary muscle groups targeted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_muscles: Vec<String>,
    /// Execution instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl ExerciseItem {
    /// Whether this entry is a high-intensity interval exercise
    #[must_use]
    pub fn is_hiit(&self) -> bool {
        self.exercise_type.eq_ignore_ascii_case("hiit")
    }
}

/// A block of exercises scheduled at one time of day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSession {
    /// Time of day this session runs (e.g. "morning")
    pub time_of_day: String,
    /// Ordered exercise entries
    pub exercises: Vec<ExerciseItem>,
    /// Sum of entry durations in minutes
    pub total_duration_minutes: u32,
    /// Sum of entry calorie estimates
    pub total_calories_burned: f64,
    /// Highest intensity present across entries (`low` when empty)
    pub overall_intensity: Intensity,
}

impl ExerciseSession {
    /// Highest intensity among `exercises`, or `Low` for an empty session
    #[must_use]
    pub fn aggregate_intensity(exercises: &[ExerciseItem]) -> Intensity {
        exercises
            .iter()
            .map(|e| e.intensity)
            .max()
            .unwrap_or(Intensity::Low)
    }
}

/// Base exercise plan produced by the generation collaborator
///
/// Sessions are keyed by a time-of-day label; `BTreeMap` keeps the key order
/// deterministic across serialization round trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseExercisePlan {
    /// Plan identifier from the generation call
    pub id: u64,
    /// Human-readable plan title
    pub title: String,
    /// Sessions keyed by time-of-day label
    pub sessions: BTreeMap<String, ExerciseSession>,
    /// Sum of session durations in minutes
    pub total_duration_minutes: u32,
    /// Sum of session calorie estimates
    pub total_calories_burned: f64,
    /// Planned sessions per week
    #[serde(default = "default_weekly_frequency")]
    pub weekly_frequency: u32,
}

const fn default_weekly_frequency() -> u32 {
    3
}

impl BaseExercisePlan {
    /// Whether any session contains a HIIT entry
    #[must_use]
    pub fn contains_hiit(&self) -> bool {
        self.sessions
            .values()
            .flat_map(|s| &s.exercises)
            .any(ExerciseItem::is_hiit)
    }

    /// Highest intensity present across all sessions
    #[must_use]
    pub fn peak_intensity(&self) -> Intensity {
        self.sessions
            .values()
            .map(|s| s.overall_intensity)
            .max()
            .unwrap_or(Intensity::Low)
    }
}

/// One fully expanded exercise plan candidate flowing through the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseCandidate {
    /// Stable ascending id assigned in generation order
    pub id: u64,
    /// Variant label (e.g. `Variant_3`)
    pub variant: String,
    /// Index of the base plan this candidate was expanded from
    pub base_id: u64,
    /// The scaled plan
    pub plan: BaseExercisePlan,
    /// Safety assessment, attached during orchestration
    #[serde(rename = "_assessment", skip_serializing_if = "Option::is_none")]
    pub assessment: Option<SafetyAssessment>,
}
