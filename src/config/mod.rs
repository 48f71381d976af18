// ABOUTME: Environment-driven configuration for the planner pipelines
// ABOUTME: PlannerConfig aggregates generation knobs, scoring policy, and LLM endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Planner Configuration
//!
//! All configuration is environment-driven with sensible defaults. Fatal
//! validation (inverted scale bounds, zero variants, unknown policy) happens
//! in `from_env` before any pipeline work begins.

use std::env;
use std::path::PathBuf;

use sage_core::{PlannerError, PlannerResult};
use sage_intelligence::{ScoringPolicyKind, VariantConfig};

/// Environment variable selecting the scoring policy
pub const SCORING_POLICY_ENV: &str = "SAGE_SCORING_POLICY";

/// Default number of base plans requested per pipeline run
pub const DEFAULT_BASE_PLANS: usize = 2;

/// Default top-K selection size
pub const DEFAULT_TOP_K: usize = 3;

/// Default artifact output path
pub const DEFAULT_OUTPUT_PATH: &str = "plans_output.json";

/// Generation-loop knobs shared by both pipelines
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// How many base candidates to request from the external source
    pub base_plans: usize,
    /// Variant expansion settings (count and scale bounds)
    pub variants: VariantConfig,
    /// How many ranked candidates count as "top"
    pub top_k: usize,
    /// Where the end-of-run artifact is written
    pub output_path: PathBuf,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_plans: DEFAULT_BASE_PLANS,
            variants: VariantConfig::default(),
            top_k: DEFAULT_TOP_K,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

/// LLM endpoint settings for the generation and assessment collaborators
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// API key; optional for local servers
    pub api_key: Option<String>,
    /// Sampling temperature for generation calls
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/v1".into(),
            model: "qwen2.5:14b-instruct".into(),
            api_key: None,
            temperature: 0.7,
        }
    }
}

impl LlmConfig {
    /// Read LLM settings from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("SAGE_LLM_BASE_URL").unwrap_or(defaults.base_url),
            model: env::var("SAGE_LLM_MODEL").unwrap_or(defaults.model),
            api_key: env::var("SAGE_LLM_API_KEY").ok().filter(|k| !k.is_empty()),
            temperature: parse_env("SAGE_LLM_TEMPERATURE", defaults.temperature),
        }
    }
}

/// Top-level planner configuration
#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    /// Generation-loop knobs
    pub generation: GenerationConfig,
    /// Active scoring policy
    pub scoring_policy: ScoringPolicyKind,
    /// LLM endpoint settings
    pub llm: LlmConfig,
}

impl PlannerConfig {
    /// Build configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Config` for an unknown scoring policy, zero
    /// variants, non-finite scale bounds, or `min_scale > max_scale`.
    pub fn from_env() -> PlannerResult<Self> {
        let variants = VariantConfig::new(
            parse_env("SAGE_NUM_VARIANTS", 3),
            parse_env("SAGE_MIN_SCALE", 0.7),
            parse_env("SAGE_MAX_SCALE", 1.3),
        )?;

        let scoring_policy = match env::var(SCORING_POLICY_ENV) {
            Ok(raw) => raw.parse::<ScoringPolicyKind>()?,
            Err(_) => ScoringPolicyKind::default(),
        };

        let config = Self {
            generation: GenerationConfig {
                base_plans: parse_env("SAGE_BASE_PLANS", DEFAULT_BASE_PLANS),
                variants,
                top_k: parse_env("SAGE_TOP_K", DEFAULT_TOP_K),
                output_path: env::var("SAGE_OUTPUT_PATH")
                    .map_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_PATH), PathBuf::from),
            },
            scoring_policy,
            llm: LlmConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the assembled configuration
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Config` when any knob is out of range.
    pub fn validate(&self) -> PlannerResult<()> {
        self.generation.variants.validate()?;
        if self.generation.base_plans == 0 {
            return Err(PlannerError::config("base plan count must be at least 1"));
        }
        Ok(())
    }
}

/// Parse an environment variable, falling back to a default on absence or
/// parse failure
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
