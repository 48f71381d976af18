// ABOUTME: Deterministic prompt assembly for generation and assessment calls
// ABOUTME: Carries profile, environment, targets, and optional retrieval context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Prompt Builders
//!
//! Assembles the system and user prompts sent to the LLM collaborator for
//! diet generation, exercise generation, and semantic safety assessment.
//! The exact wording is advisory; the response schemas the prompts request
//! are what the parsers in `crate::generation` rely on.

use std::fmt::Write as _;

use sage_core::models::{EnvironmentContext, MealType, UserProfile, UserRequirement};
use serde_json::Value;

/// System prompt for diet plan generation
pub const DIET_SYSTEM_PROMPT: &str = "You are a registered dietitian. \
Respond only with a JSON array of food items, each with fields: \
name (string), quantity (number), unit (one of gram, ml, piece, slice, cup, bowl, spoon), \
total_calories (number). No prose, no markdown.";

/// System prompt for exercise plan generation
pub const EXERCISE_SYSTEM_PROMPT: &str = "You are a certified fitness coach. \
Respond only with a JSON object: {title, weekly_frequency, sessions: {time_of_day: \
{time_of_day, exercises: [{name, exercise_type, duration_minutes, intensity, \
calories_burned, equipment?, target_muscles?, instructions?}]}}}. No prose, no markdown.";

/// System prompt for semantic safety assessment
pub const ASSESSMENT_SYSTEM_PROMPT: &str = "You are a cautious health and safety reviewer. \
Respond only with a JSON object: {risk_factors: [{factor, category, severity, description, \
recommendation}], safety_checks: [{check_name, passed, message, severity?}]}. \
Severity is one of low, moderate, high, very_high. No prose, no markdown.";

/// Render the shared profile/environment block used by every prompt
fn profile_block(profile: &UserProfile, environment: &EnvironmentContext) -> String {
    let mut block = String::from("User profile:\n");
    if let Some(age) = profile.age {
        let _ = writeln!(block, "- age: {age}");
    }
    if let Some(gender) = &profile.gender {
        let _ = writeln!(block, "- gender: {gender}");
    }
    if let Some(height) = profile.height_cm {
        let _ = writeln!(block, "- height: {height} cm");
    }
    if let Some(weight) = profile.weight_kg {
        let _ = writeln!(block, "- weight: {weight} kg");
    }
    let _ = writeln!(block, "- fitness level: {}", profile.fitness_level.as_str());
    if !profile.medical_conditions.is_empty() {
        let _ = writeln!(
            block,
            "- medical conditions: {}",
            profile.medical_conditions.join(", ")
        );
    }
    if !profile.dietary_restrictions.is_empty() {
        let _ = writeln!(
            block,
            "- dietary restrictions: {}",
            profile.dietary_restrictions.join(", ")
        );
    }

    let _ = writeln!(
        block,
        "Environment: {} at {}C",
        environment.weather.condition, environment.weather.temperature_c
    );
    if let Some(season) = &environment.season {
        let _ = writeln!(block, "Season: {season}");
    }
    block
}

fn context_block(context: Option<&str>) -> String {
    context.map_or_else(String::new, |text| {
        format!("\nRelevant domain knowledge:\n{text}\n")
    })
}

/// User prompt for one diet generation call
#[must_use]
pub fn diet_generation_prompt(
    profile: &UserProfile,
    requirement: &UserRequirement,
    environment: &EnvironmentContext,
    meal_type: MealType,
    context: Option<&str>,
) -> String {
    let mut prompt = profile_block(profile, environment);
    let _ = writeln!(prompt, "\nPlan one {} meal.", meal_type.as_str());
    if let Some(target) = requirement.target_calories {
        let _ = writeln!(prompt, "Target calories: {target}");
    }
    if let Some(goal) = &requirement.goal {
        let _ = writeln!(prompt, "Goal: {goal}");
    }
    if let Some(preference) = &requirement.preference {
        let _ = writeln!(prompt, "Preference: {preference}");
    }
    prompt.push_str(&context_block(context));
    prompt.push_str("\nReturn the JSON array of food items now.");
    prompt
}

/// User prompt for one exercise generation call
#[must_use]
pub fn exercise_generation_prompt(
    profile: &UserProfile,
    requirement: &UserRequirement,
    environment: &EnvironmentContext,
    context: Option<&str>,
) -> String {
    let mut prompt = profile_block(profile, environment);
    prompt.push_str("\nPlan one day of exercise sessions.\n");
    if let Some(duration) = requirement.duration_minutes {
        let _ = writeln!(prompt, "Target total duration: {duration} minutes");
    }
    if let Some(intensity) = &requirement.intensity {
        let _ = writeln!(prompt, "Requested intensity: {intensity}");
    }
    if let Some(goal) = &requirement.goal {
        let _ = writeln!(prompt, "Goal: {goal}");
    }
    if let Some(preference) = &requirement.preference {
        let _ = writeln!(prompt, "Preference: {preference}");
    }
    prompt.push_str(&context_block(context));
    prompt.push_str("\nReturn the JSON plan object now.");
    prompt
}

/// User prompt for one semantic assessment call
#[must_use]
pub fn assessment_prompt(
    plan: &Value,
    profile: &UserProfile,
    environment: &EnvironmentContext,
    context: Option<&str>,
) -> String {
    let mut prompt = profile_block(profile, environment);
    prompt.push_str("\nReview this plan for safety concerns:\n");
    let _ = writeln!(
        prompt,
        "{}",
        serde_json::to_string_pretty(plan).unwrap_or_else(|_| plan.to_string())
    );
    prompt.push_str(&context_block(context));
    prompt.push_str("\nReturn the JSON findings object now.");
    prompt
}
