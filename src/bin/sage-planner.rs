// ABOUTME: CLI entry point running one diet or exercise generation cycle
// ABOUTME: Command-line flags override environment-driven pipeline configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sage_core::models::{
    EnvironmentContext, MealType, UserProfile, UserRequirement, WeatherContext,
};
use sage_core::{PlannerError, PlannerResult};
use sage_planner::config::PlannerConfig;
use sage_planner::logging;
use sage_planner::pipeline::{DietPipeline, ExercisePipeline};
use tracing::info;

#[derive(Parser)]
#[command(name = "sage-planner", version, about = "Personalized plan generation with safety assessment")]
struct Cli {
    /// How many base plans to request from the generator
    #[arg(long)]
    base_plans: Option<usize>,

    /// How many variants to expand each base plan into
    #[arg(long)]
    variants: Option<usize>,

    /// Lower scale bound for variant expansion
    #[arg(long)]
    min_scale: Option<f64>,

    /// Upper scale bound for variant expansion
    #[arg(long)]
    max_scale: Option<f64>,

    /// How many ranked candidates to select as top
    #[arg(long)]
    top_k: Option<usize>,

    /// Artifact output path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Path to a user profile JSON file
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Current weather condition keyword
    #[arg(long, default_value = "clear")]
    weather: String,

    /// Current outdoor temperature in Celsius
    #[arg(long, default_value_t = 20.0)]
    temperature: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate diet plan candidates for one meal
    Diet {
        /// Which meal to plan
        #[arg(long, default_value = "lunch")]
        meal_type: String,

        /// Target calories for the meal
        #[arg(long)]
        target_calories: Option<f64>,

        /// Goal keyword (e.g. weight_loss)
        #[arg(long)]
        goal: Option<String>,
    },
    /// Generate exercise plan candidates for one day
    Exercise {
        /// Target total duration in minutes
        #[arg(long)]
        duration_minutes: Option<u32>,

        /// Requested intensity keyword
        #[arg(long)]
        intensity: Option<String>,

        /// Goal keyword (e.g. endurance)
        #[arg(long)]
        goal: Option<String>,
    },
}

fn load_profile(path: Option<&PathBuf>) -> PlannerResult<UserProfile> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw)
                .map_err(|e| PlannerError::config(format!("invalid profile file: {e}")))
        }
        None => Ok(UserProfile::default()),
    }
}

fn apply_overrides(config: &mut PlannerConfig, cli: &Cli) -> PlannerResult<()> {
    if let Some(base_plans) = cli.base_plans {
        config.generation.base_plans = base_plans;
    }
    if let Some(variants) = cli.variants {
        config.generation.variants.num_variants = variants;
    }
    if let Some(min_scale) = cli.min_scale {
        config.generation.variants.min_scale = min_scale;
    }
    if let Some(max_scale) = cli.max_scale {
        config.generation.variants.max_scale = max_scale;
    }
    if let Some(top_k) = cli.top_k {
        config.generation.top_k = top_k;
    }
    if let Some(output) = &cli.output {
        config.generation.output_path.clone_from(output);
    }
    config.validate()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_from_env()?;

    let cli = Cli::parse();
    let mut config = PlannerConfig::from_env()?;
    apply_overrides(&mut config, &cli)?;

    let profile = load_profile(cli.profile.as_ref())?;
    let environment = EnvironmentContext {
        weather: WeatherContext {
            condition: cli.weather.clone(),
            temperature_c: cli.temperature,
        },
        season: None,
    };

    match &cli.command {
        Command::Diet {
            meal_type,
            target_calories,
            goal,
        } => {
            let requirement = UserRequirement {
                goal: goal.clone(),
                target_calories: *target_calories,
                ..UserRequirement::default()
            };
            let pipeline = DietPipeline::from_config(&config)?;
            let outcome = pipeline
                .run(
                    &profile,
                    &requirement,
                    &environment,
                    MealType::from_str_lossy(meal_type),
                )
                .await?;
            info!(
                candidates = outcome.all_plans.len(),
                top = outcome.top_plans.len(),
                mean_score = outcome.summary.mean_score,
                all_safe = outcome.summary.all_safe,
                "diet cycle finished"
            );
        }
        Command::Exercise {
            duration_minutes,
            intensity,
            goal,
        } => {
            let requirement = UserRequirement {
                goal: goal.clone(),
                intensity: intensity.clone(),
                duration_minutes: *duration_minutes,
                ..UserRequirement::default()
            };
            let pipeline = ExercisePipeline::from_config(&config)?;
            let outcome = pipeline.run(&profile, &requirement, &environment).await?;
            info!(
                candidates = outcome.all_plans.len(),
                top = outcome.top_plans.len(),
                mean_score = outcome.summary.mean_score,
                all_safe = outcome.summary.all_safe,
                "exercise cycle finished"
            );
        }
    }

    Ok(())
}
