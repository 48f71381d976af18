// ABOUTME: Exercise variant expander scaling session durations and remapping intensities
// ABOUTME: Duration floors at five minutes; intensity shifts by a fixed table per factor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Exercise Variant Expansion
//!
//! Expands one base exercise plan into N named intensity variants. Durations
//! scale with the factor (floored at five minutes), calorie estimates scale
//! with the realized duration ratio, and intensities shift one step down for
//! factors below 1.0 and one step up for factors above it.

use std::collections::BTreeMap;

use sage_core::constants::units;
use sage_core::models::{BaseExercisePlan, ExerciseItem, ExerciseSession, Intensity};
use sage_core::PlannerResult;
use tracing::debug;

use super::VariantConfig;

/// Expands a base exercise plan into named intensity variants
#[derive(Debug, Clone)]
pub struct ExerciseVariantExpander {
    config: VariantConfig,
}

impl ExerciseVariantExpander {
    /// Create an expander with a validated configuration
    pub fn new(config: VariantConfig) -> PlannerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active variant configuration
    #[must_use]
    pub const fn config(&self) -> &VariantConfig {
        &self.config
    }

    /// Expand the base plan into every configured variant
    ///
    /// Returns variant name / plan pairs in ascending factor order. Each
    /// plan's title carries the variant name as a suffix and its totals are
    /// recomputed from the scaled sessions.
    #[must_use]
    pub fn expand(&self, base_plan: &BaseExercisePlan) -> Vec<(String, BaseExercisePlan)> {
        self.config
            .labeled_factors()
            .into_iter()
            .map(|(variant_name, factor)| {
                let plan = Self::scale_plan(base_plan, factor, &variant_name);
                debug!(
                    variant = %variant_name,
                    factor,
                    total_minutes = plan.total_duration_minutes,
                    "expanded exercise variant"
                );
                (variant_name, plan)
            })
            .collect()
    }

    /// Intensity remap for one scale factor
    ///
    /// Factors above 1.0 push every level one step up (high becomes
    /// very_high); factors below 1.0 pull every level one step down with low
    /// saturating at low. A factor of exactly 1.0 is the identity.
    #[must_use]
    pub fn remap_intensity(intensity: Intensity, factor: f64) -> Intensity {
        if factor < 1.0 {
            match intensity {
                Intensity::VeryHigh => Intensity::High,
                Intensity::High => Intensity::Moderate,
                Intensity::Moderate | Intensity::Low => Intensity::Low,
            }
        } else if factor > 1.0 {
            match intensity {
                Intensity::VeryHigh | Intensity::High => Intensity::VeryHigh,
                Intensity::Moderate => Intensity::High,
                Intensity::Low => Intensity::Moderate,
            }
        } else {
            intensity
        }
    }

    /// Scale a complete plan by one factor
    #[must_use]
    pub fn scale_plan(
        base_plan: &BaseExercisePlan,
        factor: f64,
        variant_name: &str,
    ) -> BaseExercisePlan {
        let sessions: BTreeMap<String, ExerciseSession> = base_plan
            .sessions
            .iter()
            .map(|(key, session)| (key.clone(), Self::scale_session(session, factor)))
            .collect();

        let total_duration_minutes = sessions.values().map(|s| s.total_duration_minutes).sum();
        let total_calories_burned = sessions.values().map(|s| s.total_calories_burned).sum();

        BaseExercisePlan {
            id: base_plan.id,
            title: format!("{} ({variant_name})", base_plan.title),
            sessions,
            total_duration_minutes,
            total_calories_burned,
            weekly_frequency: base_plan.weekly_frequency,
        }
    }

    fn scale_session(session: &ExerciseSession, factor: f64) -> ExerciseSession {
        let exercises: Vec<ExerciseItem> = session
            .exercises
            .iter()
            .map(|exercise| Self::scale_exercise(exercise, factor))
            .collect();

        let total_duration_minutes = exercises.iter().map(|e| e.duration_minutes).sum();
        let total_calories_burned = exercises.iter().map(|e| e.calories_burned).sum();
        let overall_intensity = ExerciseSession::aggregate_intensity(&exercises);

        ExerciseSession {
            time_of_day: session.time_of_day.clone(),
            exercises,
            total_duration_minutes,
            total_calories_burned,
            overall_intensity,
        }
    }

    fn scale_exercise(exercise: &ExerciseItem, factor: f64) -> ExerciseItem {
        let scaled = (f64::from(exercise.duration_minutes) * factor).round();
        let duration_minutes = (scaled as u32).max(units::MIN_EXERCISE_MINUTES);

        // Calories track the realized duration, not the raw factor: the
        // five-minute floor can make them diverge.
        let calories_burned = if exercise.duration_minutes > 0 {
            (exercise.calories_burned * f64::from(duration_minutes)
                / f64::from(exercise.duration_minutes))
            .round()
        } else {
            exercise.calories_burned
        };

        ExerciseItem {
            name: exercise.name.clone(),
            exercise_type: exercise.exercise_type.clone(),
            duration_minutes,
            intensity: Self::remap_intensity(exercise.intensity, factor),
            calories_burned,
            equipment: exercise.equipment.clone(),
            target_muscles: exercise.target_muscles.clone(),
            instructions: exercise.instructions.clone(),
        }
    }
}

impl Default for ExerciseVariantExpander {
    fn default() -> Self {
        Self {
            config: VariantConfig::default(),
        }
    }
}
