// ABOUTME: Application constants organized by domain (units, scoring, rules, conditions)
// ABOUTME: Single source of truth for thresholds used by the safety and variant engines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

/// Condition-specific restriction tables with forbidden-keyword sets
pub mod conditions;
/// Rule-based safety thresholds for diet and exercise plans
pub mod rules;
/// Scoring bands and severity penalties
pub mod scoring;
/// Portion unit increments for discrete food units
pub mod units;
