// ABOUTME: Variant expansion and safety assessment engines for the Sage platform
// ABOUTME: Pure, deterministic scaling plus pooled multi-source safety scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

#![deny(unsafe_code)]

//! # Sage Intelligence
//!
//! The two reproducible engines of the planning platform:
//!
//! - **variants**: deterministic expansion of a base candidate into named
//!   portion/intensity variants under unit-aware rounding rules
//! - **safety**: pooled rule, condition, environment, and semantic signals
//!   scored under exactly one configured policy

/// Safety assessment engine (rule checks, condition matching, scoring policies)
pub mod safety;
/// Variant expansion engines for diet and exercise plans
pub mod variants;

pub use safety::{
    PlanInput, SafetyAssessor, ScoringPolicy, ScoringPolicyKind, SemanticAssessor,
    SemanticFindings,
};
pub use variants::{DietVariantExpander, ExerciseVariantExpander, VariantConfig};
