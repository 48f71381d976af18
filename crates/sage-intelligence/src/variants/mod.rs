// ABOUTME: Shared variant configuration and deterministic scale-factor generation
// ABOUTME: N=1 yields the midpoint, N=2 the endpoints, N>=3 a linear interpolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use sage_core::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};

/// Diet variant expansion (portion scaling under unit-aware rounding)
pub mod diet;
/// Exercise variant expansion (duration scaling and intensity remapping)
pub mod exercise;

pub use diet::DietVariantExpander;
pub use exercise::ExerciseVariantExpander;

/// Configuration for one variant set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Number of variants to generate per base candidate
    pub num_variants: usize,
    /// Smallest scale factor
    pub min_scale: f64,
    /// Largest scale factor
    pub max_scale: f64,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            num_variants: 3,
            min_scale: 0.7,
            max_scale: 1.3,
        }
    }
}

impl VariantConfig {
    /// Create a variant configuration, validating it up front
    pub fn new(num_variants: usize, min_scale: f64, max_scale: f64) -> PlannerResult<Self> {
        let config = Self {
            num_variants,
            min_scale,
            max_scale,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration; invalid settings are fatal
    pub fn validate(&self) -> PlannerResult<()> {
        if self.num_variants == 0 {
            return Err(PlannerError::config("num_variants must be at least 1"));
        }
        if !self.min_scale.is_finite() || !self.max_scale.is_finite() {
            return Err(PlannerError::config("scale bounds must be finite"));
        }
        if self.min_scale <= 0.0 {
            return Err(PlannerError::config("min_scale must be positive"));
        }
        if self.min_scale > self.max_scale {
            return Err(PlannerError::config(format!(
                "min_scale {} exceeds max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }

    /// Deterministic scale factors for this configuration
    ///
    /// One variant gets the midpoint, two get the endpoints, three or more
    /// interpolate linearly with both endpoints included exactly.
    #[must_use]
    pub fn scale_factors(&self) -> Vec<f64> {
        match self.num_variants {
            0 => Vec::new(),
            1 => vec![(self.min_scale + self.max_scale) / 2.0],
            2 => vec![self.min_scale, self.max_scale],
            n => {
                let step = (self.max_scale - self.min_scale) / (n - 1) as f64;
                let mut factors: Vec<f64> = (0..n)
                    .map(|i| self.min_scale + i as f64 * step)
                    .collect();
                // Endpoints are exact regardless of accumulated float error.
                factors[0] = self.min_scale;
                factors[n - 1] = self.max_scale;
                factors
            }
        }
    }

    /// Positional variant name (`Variant_1` .. `Variant_N`)
    #[must_use]
    pub fn variant_name(index: usize) -> String {
        format!("Variant_{}", index + 1)
    }

    /// Scale factors paired with their positional names
    #[must_use]
    pub fn labeled_factors(&self) -> Vec<(String, f64)> {
        self.scale_factors()
            .into_iter()
            .enumerate()
            .map(|(i, factor)| (Self::variant_name(i), factor))
            .collect()
    }
}

/// Round to a fixed number of decimal places
#[must_use]
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
