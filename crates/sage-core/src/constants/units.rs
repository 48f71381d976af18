// ABOUTME: Portion unit increments and rounding precision for variant expansion
// ABOUTME: Discrete units snap to these serving increments and never go below one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

/// Serving increment for countable pieces
pub const PIECE_INCREMENT: f64 = 0.5;

/// Serving increment for slices
pub const SLICE_INCREMENT: f64 = 1.0;

/// Serving increment for cups
pub const CUP_INCREMENT: f64 = 0.5;

/// Serving increment for bowls
pub const BOWL_INCREMENT: f64 = 0.5;

/// Decimal places kept for continuous quantities and calorie totals
pub const QUANTITY_DECIMALS: u32 = 1;

/// Decimal places kept for recomputed per-unit calorie rates
pub const RATE_DECIMALS: u32 = 2;

/// Minimum duration in minutes for any scaled exercise entry
pub const MIN_EXERCISE_MINUTES: u32 = 5;
