// ABOUTME: Diet plan models for base food items and expanded portion variants
// ABOUTME: FoodUnit, BaseFoodItem, ScaledFoodItem, and DietCandidate definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::units;
use crate::models::safety::SafetyAssessment;

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snacks,
}

impl MealType {
    /// Parse meal type from string, defaulting to lunch
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "dinner" => Self::Dinner,
            "snack" | "snacks" => Self::Snacks,
            _ => Self::Lunch,
        }
    }

    /// String representation used in prompts and log lines
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snacks => "snacks",
        }
    }
}

/// Portion unit for a food item
///
/// Units fall into two scaling classes: continuous units scale freely and
/// round to one decimal, discrete units snap to a fixed serving increment.
/// Spoons are too fine-grained to scale safely and are left untouched.
/// Unrecognized units deserialize to `Other` and scale as continuous.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FoodUnit {
    /// Weight in grams (continuous)
    Gram,
    /// Volume in milliliters (continuous)
    Ml,
    /// Countable piece (discrete, half-unit steps)
    Piece,
    /// Slice (discrete, whole-unit steps)
    Slice,
    /// Cup (discrete, half-unit steps)
    Cup,
    /// Bowl (discrete, half-unit steps)
    Bowl,
    /// Spoon (never scaled)
    Spoon,
    /// Unknown unit from the generation collaborator
    #[serde(other)]
    Other,
}

impl FoodUnit {
    /// Serving increment for discrete units; `None` for continuous units,
    /// spoons, and unknown units
    #[must_use]
    pub const fn increment(&self) -> Option<f64> {
        match self {
            Self::Piece => Some(units::PIECE_INCREMENT),
            Self::Slice => Some(units::SLICE_INCREMENT),
            Self::Cup => Some(units::CUP_INCREMENT),
            Self::Bowl => Some(units::BOWL_INCREMENT),
            Self::Gram | Self::Ml | Self::Spoon | Self::Other => None,
        }
    }

    /// Whether the unit is exempt from scaling entirely
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        matches!(self, Self::Spoon)
    }
}

/// Base food item produced by the generation collaborator
///
/// Exactly one of `total_calories` / `calories_per_unit` is authoritative;
/// when both are absent the item contributes zero calories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseFoodItem {
    /// Name of the food dish
    pub name: String,
    /// Numeric portion quantity (e.g. 100.0, 1.5)
    pub quantity: f64,
    /// Portion unit
    pub unit: FoodUnit,
    /// Total calories for this portion size (preferred)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<f64>,
    /// Calories per unit (fallback when `total_calories` is absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_per_unit: Option<f64>,
}

impl BaseFoodItem {
    /// Per-unit calorie rate for this item
    ///
    /// `total_calories / quantity` when the total is known, otherwise the
    /// declared per-unit rate. A non-positive quantity yields a zero rate so
    /// malformed items scale to zero calories instead of failing.
    #[must_use]
    pub fn calorie_rate(&self) -> f64 {
        if self.quantity <= 0.0 {
            return 0.0;
        }
        match (self.total_calories, self.calories_per_unit) {
            (Some(total), _) => total / self.quantity,
            (None, Some(rate)) => rate,
            (None, None) => 0.0,
        }
    }
}

/// A food item after variant expansion, tagged with its variant name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledFoodItem {
    /// Name of the food dish
    pub name: String,
    /// Scaled portion quantity
    pub quantity: f64,
    /// Portion unit (unchanged by scaling)
    pub unit: FoodUnit,
    /// Recomputed per-unit calorie rate
    pub calories_per_unit: f64,
    /// Scaled total calories
    pub total_calories: f64,
    /// Variant that produced this item (e.g. `Variant_2`)
    pub variant: String,
}

/// Macro nutrient calorie ratios for a meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroRatios {
    /// Protein calorie share (0.15-0.25 ideal)
    pub protein_ratio: f64,
    /// Carbohydrate calorie share (0.45-0.65 ideal)
    pub carbs_ratio: f64,
    /// Fat calorie share (0.20-0.35 ideal)
    pub fat_ratio: f64,
}

/// One fully expanded diet plan candidate flowing through the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietCandidate {
    /// Stable ascending id assigned in generation order
    pub id: u64,
    /// Which meal this plan is for
    pub meal_type: MealType,
    /// Variant label (e.g. `Variant_1`)
    pub variant: String,
    /// Index of the base plan this candidate was expanded from
    pub base_id: u64,
    /// Scaled food items
    pub items: Vec<ScaledFoodItem>,
    /// Total calories across all items
    pub total_calories: f64,
    /// Calorie target this plan was generated against
    pub target_calories: f64,
    /// Deviation from the target in percent
    pub calories_deviation: f64,
    /// Macro nutrient ratios, when the generation collaborator supplied them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macros: Option<MacroRatios>,
    /// Safety assessment, attached during orchestration
    #[serde(rename = "_assessment", skip_serializing_if = "Option::is_none")]
    pub assessment: Option<SafetyAssessment>,
}

impl DietCandidate {
    /// Sum of item calories rounded to one decimal
    #[must_use]
    pub fn summed_calories(items: &[ScaledFoodItem]) -> f64 {
        let total: f64 = items.iter().map(|i| i.total_calories).sum();
        (total * 10.0).round() / 10.0
    }

    /// Percentage deviation of `total` from `target`, zero when no target
    #[must_use]
    pub fn deviation_percent(total: f64, target: f64) -> f64 {
        if target <= 0.0 {
            return 0.0;
        }
        ((total - target) / target * 1000.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calorie_rate_prefers_total_calories() {
        let item = BaseFoodItem {
            name: "rice".into(),
            quantity: 100.0,
            unit: FoodUnit::Gram,
            total_calories: Some(130.0),
            calories_per_unit: Some(99.0),
        };
        assert!((item.calorie_rate() - 1.3).abs() < 1e-9);
    }

    #[test]
    fn calorie_rate_is_zero_for_non_positive_quantity() {
        let item = BaseFoodItem {
            name: "ghost".into(),
            quantity: 0.0,
            unit: FoodUnit::Gram,
            total_calories: Some(130.0),
            calories_per_unit: None,
        };
        assert!(item.calorie_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_unit_deserializes_to_other() {
        let item: BaseFoodItem =
            serde_json::from_str(r#"{"name":"x","quantity":1.0,"unit":"serve"}"#)
                .expect("deserialize");
        assert_eq!(item.unit, FoodUnit::Other);
    }
}
