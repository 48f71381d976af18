// ABOUTME: Scoring bands, severity penalties, and safety thresholds
// ABOUTME: Shared by every scoring policy so bands stay consistent across deployments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

/// Penalty for a low-severity risk factor
pub const PENALTY_LOW: u32 = 5;

/// Penalty for a moderate-severity risk factor
pub const PENALTY_MODERATE: u32 = 15;

/// Penalty for a high-severity risk factor
pub const PENALTY_HIGH: u32 = 30;

/// Penalty for a very-high-severity risk factor
pub const PENALTY_VERY_HIGH: u32 = 50;

/// Score at or above which a plan passes outright
pub const PASSED_BAND: u8 = 80;

/// Score at or above which a plan passes with a warning
pub const WARNING_BAND: u8 = 60;

/// Score at or above which a plan needs review rather than outright failure
pub const REVIEW_BAND: u8 = 40;

/// Minimum weighted score for an `is_safe` verdict
pub const SAFE_SCORE_FLOOR: u8 = 60;
