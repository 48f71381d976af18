// ABOUTME: Core types and constants for the Sage health planning platform
// ABOUTME: Foundation crate with models, error types, and safety rule tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

#![deny(unsafe_code)]

//! # Sage Core
//!
//! Foundation crate providing shared types and constants for the Sage health
//! planning platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `PlannerError` and `PlannerResult`
//! - **constants**: Safety rule thresholds and unit tables organized by domain
//! - **models**: Core data models (food items, exercise plans, safety records)

/// Unified error handling for planner operations
pub mod errors;

/// Safety rule thresholds, condition restrictions, and unit tables
pub mod constants;

/// Core data models (diet, exercise, profile, safety assessment)
pub mod models;

pub use errors::{PlannerError, PlannerResult};
