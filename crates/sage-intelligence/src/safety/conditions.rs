// ABOUTME: Condition-restriction matching against flattened plan content
// ABOUTME: ContentMatcher is the pluggable seam; SubstringMatcher is the default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use sage_core::constants::conditions;
use sage_core::models::{PlanKind, RiskFactor, RiskLevel, UserProfile};
use tracing::debug;

use super::PlanInput;

/// Matches restriction keywords against plan content
///
/// The default implementation does lowercase substring matching. Deployments
/// can swap in a smarter matcher (stemming, embeddings) without touching the
/// restriction tables.
pub trait ContentMatcher: Send + Sync {
    /// Return the subset of `keywords` found in `content`
    fn matches(&self, content: &str, keywords: &[&str]) -> Vec<String>;
}

/// Case-insensitive substring matcher
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl ContentMatcher for SubstringMatcher {
    fn matches(&self, content: &str, keywords: &[&str]) -> Vec<String> {
        let content = content.to_lowercase();
        keywords
            .iter()
            .filter(|kw| content.contains(&kw.to_lowercase()))
            .map(|kw| (*kw).to_owned())
            .collect()
    }
}

/// Scan plan content against every restriction for the user's conditions
///
/// Unknown conditions are skipped silently; each matched restriction yields
/// one high-severity medical risk factor.
#[must_use]
pub fn run_condition_checks(
    plan: &PlanInput<'_>,
    profile: &UserProfile,
    matcher: &dyn ContentMatcher,
) -> Vec<RiskFactor> {
    let content = plan.flattened_content();
    let mut risks = Vec::new();

    for condition in &profile.medical_conditions {
        let Some(rule) = conditions::rule_for(condition) else {
            debug!(condition = %condition, "no restriction table for condition");
            continue;
        };

        let restrictions = match plan.kind() {
            PlanKind::Diet => rule.diet,
            PlanKind::Exercise => rule.exercise,
        };

        for restriction in restrictions {
            let matched = matcher.matches(&content, restriction.keywords);
            if matched.is_empty() {
                continue;
            }
            risks.push(RiskFactor {
                factor: format!("{}_{}", rule.condition, restriction.restriction),
                category: "medical".into(),
                severity: RiskLevel::High,
                description: format!(
                    "{} conflict with {}: found {}",
                    restriction.description,
                    rule.condition,
                    matched.join(", ")
                ),
                recommendation: restriction.recommendation.to_owned(),
            });
        }
    }

    risks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_matcher_is_case_insensitive() {
        let matcher = SubstringMatcher;
        let found = matcher.matches("Chocolate CAKE with honey", &["cake", "honey", "soda"]);
        assert_eq!(found, vec!["cake".to_owned(), "honey".to_owned()]);
    }

    #[test]
    fn no_keywords_match_empty_content() {
        let matcher = SubstringMatcher;
        assert!(matcher.matches("", &["sugar"]).is_empty());
    }
}
