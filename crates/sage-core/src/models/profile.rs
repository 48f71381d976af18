// ABOUTME: User profile and environment context models for plan personalization
// ABOUTME: FitnessLevel, UserProfile, WeatherContext, EnvironmentContext, UserRequirement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use serde::{Deserialize, Serialize};

/// User fitness level driving exercise duration and intensity limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    /// New to structured exercise
    #[default]
    Beginner,
    /// Regular but non-competitive training background
    Intermediate,
    /// Experienced, high training tolerance
    Advanced,
}

impl FitnessLevel {
    /// Parse fitness level from string, defaulting to beginner
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" | "elite" => Self::Advanced,
            _ => Self::Beginner,
        }
    }

    /// String representation used in prompts and log lines
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// User physiological and medical profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Self-reported gender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Declared medical conditions (lowercase keys, e.g. "diabetes")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medical_conditions: Vec<String>,
    /// Declared dietary restrictions (e.g. "low_sodium")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_restrictions: Vec<String>,
    /// Fitness level
    #[serde(default)]
    pub fitness_level: FitnessLevel,
}

impl UserProfile {
    /// Whether the user declared any medical condition
    #[must_use]
    pub fn has_medical_conditions(&self) -> bool {
        !self.medical_conditions.is_empty()
    }
}

/// Current weather snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherContext {
    /// Condition keyword (e.g. "clear", "rainy", "icy")
    pub condition: String,
    /// Outdoor temperature in Celsius
    pub temperature_c: f64,
}

impl Default for WeatherContext {
    fn default() -> Self {
        Self {
            condition: "clear".into(),
            temperature_c: 20.0,
        }
    }
}

/// Environmental context threaded through generation and assessment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentContext {
    /// Weather snapshot
    #[serde(default)]
    pub weather: WeatherContext,
    /// Season label (e.g. "summer")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

/// User goals and target aggregates for one generation cycle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRequirement {
    /// Goal keyword (e.g. "weight_loss")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Requested intensity keyword
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    /// Target calories for a diet cycle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_calories: Option<f64>,
    /// Target total duration in minutes for an exercise cycle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Free-form preference text (e.g. "focus on upper body")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<String>,
}
