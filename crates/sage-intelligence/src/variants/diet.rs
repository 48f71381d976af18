// ABOUTME: Diet variant expander scaling food portions under unit-aware rounding
// ABOUTME: Continuous units round to one decimal, discrete units snap to serving increments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Diet Variant Expansion
//!
//! Expands an ordered list of base food items into N named portion variants.
//! The per-unit calorie rate of each item is preserved across scaling within
//! rounding tolerance, so a variant's calorie total tracks its portion size.

use sage_core::constants::units;
use sage_core::models::{BaseFoodItem, ScaledFoodItem};
use sage_core::PlannerResult;
use tracing::debug;

use super::{round_to, VariantConfig};

/// Expands base food items into named portion variants
#[derive(Debug, Clone)]
pub struct DietVariantExpander {
    config: VariantConfig,
}

impl DietVariantExpander {
    /// Create an expander with a validated configuration
    pub fn new(config: VariantConfig) -> PlannerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active variant configuration
    #[must_use]
    pub const fn config(&self) -> &VariantConfig {
        &self.config
    }

    /// Expand base items into every configured variant
    ///
    /// Returns variant name / scaled item list pairs in ascending factor
    /// order, with each item tagged with its variant name. Item order within
    /// each variant matches the base item order.
    #[must_use]
    pub fn expand(&self, base_items: &[BaseFoodItem]) -> Vec<(String, Vec<ScaledFoodItem>)> {
        self.config
            .labeled_factors()
            .into_iter()
            .map(|(variant_name, factor)| {
                let items: Vec<ScaledFoodItem> = base_items
                    .iter()
                    .map(|item| Self::scale_item(item, factor, &variant_name))
                    .collect();
                debug!(
                    variant = %variant_name,
                    factor,
                    items = items.len(),
                    "expanded diet variant"
                );
                (variant_name, items)
            })
            .collect()
    }

    /// Scale a single item by one factor
    ///
    /// A non-positive base quantity yields a zero calorie rate, so every
    /// scaled total is zero; scaling never fails.
    #[must_use]
    pub fn scale_item(item: &BaseFoodItem, factor: f64, variant: &str) -> ScaledFoodItem {
        let rate = item.calorie_rate();
        let new_quantity = Self::scale_quantity(item, factor);
        let total_calories = round_to(rate * new_quantity, units::QUANTITY_DECIMALS);
        ScaledFoodItem {
            name: item.name.clone(),
            quantity: new_quantity,
            unit: item.unit,
            calories_per_unit: round_to(rate, units::RATE_DECIMALS),
            total_calories,
            variant: variant.to_owned(),
        }
    }

    /// Apply the unit-aware scaling rule to a quantity
    fn scale_quantity(item: &BaseFoodItem, factor: f64) -> f64 {
        if item.unit.is_fixed() {
            // Spoons are too fine-grained to scale safely.
            return item.quantity;
        }
        match item.unit.increment() {
            Some(increment) => {
                let target = item.quantity * factor;
                let snapped = (target / increment).round() * increment;
                // Never below one serving increment.
                round_to(snapped.max(increment), units::QUANTITY_DECIMALS)
            }
            None => round_to(item.quantity * factor, units::QUANTITY_DECIMALS),
        }
    }
}

impl Default for DietVariantExpander {
    fn default() -> Self {
        Self {
            config: VariantConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sage_core::models::FoodUnit;

    fn item(quantity: f64, unit: FoodUnit, total_calories: f64) -> BaseFoodItem {
        BaseFoodItem {
            name: "test food".into(),
            quantity,
            unit,
            total_calories: Some(total_calories),
            calories_per_unit: None,
        }
    }

    #[test]
    fn continuous_unit_scales_directly() {
        let scaled = DietVariantExpander::scale_item(
            &item(100.0, FoodUnit::Gram, 200.0),
            1.5,
            "Variant_3",
        );
        assert!((scaled.quantity - 150.0).abs() < 1e-9);
        assert!((scaled.total_calories - 300.0).abs() < 1e-9);
    }

    #[test]
    fn discrete_unit_snaps_to_increment() {
        let scaled =
            DietVariantExpander::scale_item(&item(2.0, FoodUnit::Piece, 100.0), 0.5, "Variant_1");
        assert!((scaled.quantity - 1.0).abs() < 1e-9);
        assert!((scaled.total_calories - 50.0).abs() < 1e-9);
    }

    #[test]
    fn discrete_unit_never_drops_below_one_increment() {
        let scaled =
            DietVariantExpander::scale_item(&item(0.5, FoodUnit::Cup, 60.0), 0.1, "Variant_1");
        assert!((scaled.quantity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn spoon_quantity_is_never_scaled() {
        let scaled =
            DietVariantExpander::scale_item(&item(2.0, FoodUnit::Spoon, 40.0), 1.3, "Variant_3");
        assert!((scaled.quantity - 2.0).abs() < 1e-9);
        assert!((scaled.total_calories - 40.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_unit_falls_back_to_continuous() {
        let scaled =
            DietVariantExpander::scale_item(&item(3.0, FoodUnit::Other, 90.0), 1.2, "Variant_3");
        assert!((scaled.quantity - 3.6).abs() < 1e-9);
    }

    #[test]
    fn zero_quantity_yields_zero_calories_without_error() {
        let scaled =
            DietVariantExpander::scale_item(&item(0.0, FoodUnit::Gram, 250.0), 1.5, "Variant_2");
        assert!(scaled.total_calories.abs() < f64::EPSILON);
    }

    #[test]
    fn expand_tags_every_item_with_its_variant() {
        let expander = DietVariantExpander::default();
        let variants = expander.expand(&[item(100.0, FoodUnit::Gram, 150.0)]);
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].0, "Variant_1");
        assert_eq!(variants[2].0, "Variant_3");
        for (name, items) in &variants {
            assert_eq!(items.len(), 1);
            assert_eq!(&items[0].variant, name);
        }
    }
}
