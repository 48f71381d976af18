// ABOUTME: Main library entry point for the Sage health plan generation platform
// ABOUTME: Wires config, logging, LLM providers, candidate generation, and pipelines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

#![deny(unsafe_code)]

//! # Sage Health Planner
//!
//! Generates personalized diet and exercise plans, expands each into scaled
//! variants, and assesses every candidate for safety before ranking.
//!
//! ## Architecture
//!
//! The system follows a modular architecture:
//! - **`sage-core`**: Data models, errors, and threshold constants
//! - **`sage-intelligence`**: Variant expansion and the safety engine
//! - **LLM**: Provider abstraction for the external generation collaborator
//! - **Generation**: Candidate-source boundary parsing model output
//! - **Pipeline**: End-to-end orchestration with ranking and persistence
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sage_planner::config::PlannerConfig;
//! use sage_planner::pipeline::DietPipeline;
//! use sage_core::PlannerResult;
//!
//! #[tokio::main]
//! async fn main() -> PlannerResult<()> {
//!     let config = PlannerConfig::from_env()?;
//!     let pipeline = DietPipeline::from_config(&config)?;
//!     # let _ = pipeline;
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;
/// Candidate-source boundary over the LLM collaborator
pub mod generation;
/// LLM provider abstraction and prompt builders
pub mod llm;
/// Structured logging setup
pub mod logging;
/// Pipeline orchestration, ranking, and artifact persistence
pub mod pipeline;

pub use sage_core::{PlannerError, PlannerResult};
