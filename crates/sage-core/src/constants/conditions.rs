// ABOUTME: Condition-specific restriction tables for medical safety matching
// ABOUTME: Maps declared conditions to forbidden-keyword sets scanned against plan content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

//! # Condition Restrictions
//!
//! Each entry maps one declared medical condition to restriction sets for
//! diet and exercise plans. A restriction lists the keywords that, when found
//! in the flattened plan content, raise a high-severity medical risk factor.
//! Keyword-substring matching is inherently fuzzy; the matcher itself is a
//! pluggable capability in `sage-intelligence`.

/// One restriction within a condition's table
#[derive(Debug, Clone, Copy)]
pub struct ConditionRestriction {
    /// Machine-readable restriction key (e.g. `avoid_high_sugar`)
    pub restriction: &'static str,
    /// What the restriction forbids, in human terms
    pub description: &'static str,
    /// Keywords scanned against flattened plan content
    pub keywords: &'static [&'static str],
    /// How to mitigate a match
    pub recommendation: &'static str,
}

/// Restriction sets for one medical condition
#[derive(Debug, Clone, Copy)]
pub struct ConditionRule {
    /// Condition key matched case-insensitively against the user profile
    pub condition: &'static str,
    /// Restrictions applied to diet plans
    pub diet: &'static [ConditionRestriction],
    /// Restrictions applied to exercise plans
    pub exercise: &'static [ConditionRestriction],
}

/// The condition-restriction table
pub const CONDITION_RESTRICTIONS: &[ConditionRule] = &[
    ConditionRule {
        condition: "diabetes",
        diet: &[ConditionRestriction {
            restriction: "avoid_high_sugar",
            description: "High sugar foods",
            keywords: &[
                "sugar", "candy", "soda", "dessert", "cake", "chocolate", "honey", "syrup",
            ],
            recommendation: "Replace sugary items with low-glycemic alternatives",
        }],
        exercise: &[ConditionRestriction {
            restriction: "avoid_vigorous_unmonitored",
            description: "Vigorous exercise without blood sugar monitoring",
            keywords: &["sprint", "hiit", "high intensity"],
            recommendation: "Check blood sugar before vigorous sessions and carry fast carbs",
        }],
    },
    ConditionRule {
        condition: "hypertension",
        diet: &[ConditionRestriction {
            restriction: "avoid_high_sodium",
            description: "High sodium foods",
            keywords: &[
                "salt", "sodium", "pickle", "pickled", "soy sauce", "cured", "bacon", "ham",
            ],
            recommendation: "Keep sodium under 2300mg per day",
        }],
        exercise: &[ConditionRestriction {
            restriction: "avoid_isometric",
            description: "Isometric exercises with heavy static holds",
            keywords: &["plank", "isometric", "wall sit", "static hold"],
            recommendation: "Prefer dynamic movements and keep breathing continuous",
        }],
    },
    ConditionRule {
        condition: "heart_disease",
        diet: &[],
        exercise: &[ConditionRestriction {
            restriction: "avoid_high_intensity",
            description: "High intensity exercise without medical clearance",
            keywords: &["hiit", "sprint", "high intensity", "interval"],
            recommendation: "Obtain medical clearance before any vigorous training",
        }],
    },
    ConditionRule {
        condition: "obesity",
        diet: &[],
        exercise: &[ConditionRestriction {
            restriction: "avoid_high_impact",
            description: "High impact exercises",
            keywords: &["jumping", "jump", "burpee", "plyometric", "running"],
            recommendation: "Start with low impact work and progress gradually",
        }],
    },
    ConditionRule {
        condition: "arthritis",
        diet: &[],
        exercise: &[ConditionRestriction {
            restriction: "avoid_high_impact",
            description: "Running and jumping movements",
            keywords: &["running", "jogging", "jumping", "jump rope"],
            recommendation: "Prefer swimming or cycling over impact-loading movements",
        }],
    },
];

/// Look up the restriction rule for a condition, case-insensitively
#[must_use]
pub fn rule_for(condition: &str) -> Option<&'static ConditionRule> {
    CONDITION_RESTRICTIONS
        .iter()
        .find(|r| r.condition.eq_ignore_ascii_case(condition.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(rule_for("Diabetes").is_some());
        assert!(rule_for(" HYPERTENSION ").is_some());
        assert!(rule_for("gout").is_none());
    }

    #[test]
    fn every_condition_has_some_restriction() {
        for rule in CONDITION_RESTRICTIONS {
            assert!(!rule.diet.is_empty() || !rule.exercise.is_empty());
        }
    }
}
