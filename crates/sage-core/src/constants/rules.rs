// ABOUTME: Rule-based safety thresholds for diet and exercise plan checks
// ABOUTME: Numeric limits keyed by plan type, with per-fitness-level duration ceilings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use crate::models::profile::FitnessLevel;

/// Daily calorie floor below which a diet plan is dangerously restrictive
pub const MIN_DAILY_CALORIES: f64 = 1200.0;

/// Daily calorie ceiling above which a diet plan is excessive
pub const MAX_DAILY_CALORIES: f64 = 4000.0;

/// Minimum acceptable protein calorie ratio
pub const MIN_PROTEIN_RATIO: f64 = 0.10;

/// Maximum acceptable fat calorie ratio
pub const MAX_FAT_RATIO: f64 = 0.40;

/// Calorie ceiling for a single meal
pub const MAX_SINGLE_MEAL_CALORIES: f64 = 1500.0;

/// Daily exercise duration ceiling (minutes) for beginners
pub const MAX_DAILY_MINUTES_BEGINNER: u32 = 30;

/// Daily exercise duration ceiling (minutes) for intermediate users
pub const MAX_DAILY_MINUTES_INTERMEDIATE: u32 = 60;

/// Daily exercise duration ceiling (minutes) for advanced users
pub const MAX_DAILY_MINUTES_ADVANCED: u32 = 120;

/// Weekly session count above which rest days are missing
pub const MAX_WEEKLY_SESSIONS: u32 = 7;

/// Weekly frequency above which HIIT entries need a recovery caution
pub const MAX_HIIT_WEEKLY_FREQUENCY: u32 = 3;

/// Heat-stress temperature threshold (Celsius) for outdoor exercise
pub const HEAT_RISK_TEMP_C: f64 = 35.0;

/// Cold-strain temperature threshold (Celsius) for outdoor exercise
pub const COLD_RISK_TEMP_C: f64 = 5.0;

/// Temperature (Celsius) above which a diet plan gets a hydration reminder
pub const HYDRATION_REMINDER_TEMP_C: f64 = 30.0;

/// Daily exercise duration ceiling in minutes for a fitness level
#[must_use]
pub const fn max_daily_minutes(level: FitnessLevel) -> u32 {
    match level {
        FitnessLevel::Beginner => MAX_DAILY_MINUTES_BEGINNER,
        FitnessLevel::Intermediate => MAX_DAILY_MINUTES_INTERMEDIATE,
        FitnessLevel::Advanced => MAX_DAILY_MINUTES_ADVANCED,
    }
}
