// ABOUTME: Rule-based numeric threshold checks for diet and exercise plans
// ABOUTME: Each rule produces a SafetyCheck; hard failures also raise a RiskFactor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use sage_core::constants::rules;
use sage_core::models::{
    FitnessLevel, Intensity, PlanKind, RiskFactor, RiskLevel, SafetyCheck, UserProfile,
};

use super::PlanInput;

/// Run the rule table for the plan's type
#[must_use]
pub fn run_rule_checks(
    plan: &PlanInput<'_>,
    profile: &UserProfile,
) -> (Vec<SafetyCheck>, Vec<RiskFactor>) {
    match plan.kind() {
        PlanKind::Diet => diet_rules(plan),
        PlanKind::Exercise => exercise_rules(plan, profile),
    }
}

fn diet_rules(plan: &PlanInput<'_>) -> (Vec<SafetyCheck>, Vec<RiskFactor>) {
    let mut checks = Vec::new();
    let mut risks = Vec::new();

    let total_calories = plan.total_calories();

    if total_calories < rules::MIN_DAILY_CALORIES {
        checks.push(SafetyCheck::fail(
            "min_calories",
            "Daily calories too low",
            RiskLevel::High,
        ));
        risks.push(RiskFactor {
            factor: "extremely_low_calories".into(),
            category: "nutritional".into(),
            severity: RiskLevel::High,
            description: format!("Total calories {total_calories:.0} is dangerously low"),
            recommendation: "Consult a dietitian for safe calorie targets".into(),
        });
    } else if total_calories > rules::MAX_DAILY_CALORIES {
        checks.push(SafetyCheck::fail(
            "max_calories",
            "Daily calories too high",
            RiskLevel::Moderate,
        ));
    } else {
        checks.push(SafetyCheck::pass(
            "calories_range",
            "Calorie intake within acceptable range",
        ));
    }

    if let Some(macros) = plan.macros() {
        if macros.protein_ratio < rules::MIN_PROTEIN_RATIO {
            checks.push(SafetyCheck::fail(
                "min_protein_ratio",
                "Protein ratio too low (need adequate protein)",
                RiskLevel::Moderate,
            ));
            risks.push(RiskFactor {
                factor: "low_protein".into(),
                category: "nutritional".into(),
                severity: RiskLevel::Moderate,
                description: format!(
                    "Protein ratio {:.1}% is below recommended minimum",
                    macros.protein_ratio * 100.0
                ),
                recommendation: "Include more protein-rich foods".into(),
            });
        } else {
            checks.push(SafetyCheck::pass(
                "min_protein_ratio",
                "Protein ratio adequate",
            ));
        }

        if macros.fat_ratio > rules::MAX_FAT_RATIO {
            checks.push(SafetyCheck::fail(
                "max_fat_ratio",
                "Fat ratio too high",
                RiskLevel::Moderate,
            ));
            risks.push(RiskFactor {
                factor: "high_fat".into(),
                category: "nutritional".into(),
                severity: RiskLevel::Moderate,
                description: format!(
                    "Fat ratio {:.1}% exceeds recommended maximum",
                    macros.fat_ratio * 100.0
                ),
                recommendation: "Reduce high-fat foods".into(),
            });
        } else {
            checks.push(SafetyCheck::pass(
                "max_fat_ratio",
                "Fat ratio within acceptable range",
            ));
        }
    }

    if total_calories > rules::MAX_SINGLE_MEAL_CALORIES {
        checks.push(SafetyCheck::fail(
            "single_meal_calories",
            "Single meal calorie too high",
            RiskLevel::Low,
        ));
    } else {
        checks.push(SafetyCheck::pass(
            "single_meal_calories",
            "Single meal calories reasonable",
        ));
    }

    (checks, risks)
}

fn exercise_rules(
    plan: &PlanInput<'_>,
    profile: &UserProfile,
) -> (Vec<SafetyCheck>, Vec<RiskFactor>) {
    let mut checks = Vec::new();
    let mut risks = Vec::new();

    let level = profile.fitness_level;
    let total_duration = plan.total_duration_minutes();
    let weekly_frequency = plan.weekly_frequency();
    let max_duration = rules::max_daily_minutes(level);

    if total_duration > max_duration {
        let severity = match level {
            FitnessLevel::Beginner => RiskLevel::High,
            FitnessLevel::Intermediate => RiskLevel::Moderate,
            FitnessLevel::Advanced => RiskLevel::Low,
        };
        checks.push(SafetyCheck::fail(
            "daily_duration",
            format!(
                "Duration {total_duration}min exceeds {} limit ({max_duration}min)",
                level.as_str()
            ),
            severity,
        ));
        risks.push(RiskFactor {
            factor: "excessive_duration".into(),
            category: "exercise".into(),
            severity,
            description: format!(
                "Total exercise time {total_duration}min is excessive for {}",
                level.as_str()
            ),
            recommendation: format!("Reduce daily duration to {max_duration}min or less"),
        });
    } else {
        checks.push(SafetyCheck::pass(
            "daily_duration",
            format!("Duration {total_duration}min is appropriate"),
        ));
    }

    if weekly_frequency > rules::MAX_WEEKLY_SESSIONS {
        checks.push(SafetyCheck::fail(
            "rest_days",
            "Exercise every day without rest",
            RiskLevel::Moderate,
        ));
        risks.push(RiskFactor {
            factor: "no_rest_days".into(),
            category: "exercise".into(),
            severity: RiskLevel::Moderate,
            description: "No rest days scheduled in weekly plan".into(),
            recommendation: "Include at least 1-2 rest days per week".into(),
        });
    } else {
        checks.push(SafetyCheck::pass(
            "rest_days",
            "Weekly frequency leaves room for rest",
        ));
    }

    if plan.contains_hiit() {
        if weekly_frequency > rules::MAX_HIIT_WEEKLY_FREQUENCY {
            checks.push(SafetyCheck::fail(
                "hiit_frequency",
                "HIIT sessions too frequent (need rest days)",
                RiskLevel::High,
            ));
            risks.push(RiskFactor {
                factor: "hiit_frequency".into(),
                category: "exercise".into(),
                severity: RiskLevel::High,
                description: "HIIT sessions too frequent without adequate recovery".into(),
                recommendation: "Limit HIIT to 2-3 times per week with 48h rest".into(),
            });
        } else {
            checks.push(SafetyCheck::pass(
                "hiit_frequency",
                "HIIT frequency allows recovery",
            ));
        }
    }

    let peak = plan.peak_intensity();
    let intensity_concern = match (level, peak) {
        (FitnessLevel::Beginner, Intensity::High | Intensity::VeryHigh) => Some(RiskLevel::High),
        (FitnessLevel::Intermediate, Intensity::VeryHigh) => Some(RiskLevel::Moderate),
        _ => None,
    };
    if let Some(severity) = intensity_concern {
        checks.push(SafetyCheck::fail(
            "intensity_level",
            format!(
                "Peak intensity {} too aggressive for {} users",
                peak.as_str(),
                level.as_str()
            ),
            severity,
        ));
        risks.push(RiskFactor {
            factor: "excessive_intensity".into(),
            category: "exercise".into(),
            severity,
            description: format!(
                "Plan peaks at {} intensity for a {} user",
                peak.as_str(),
                level.as_str()
            ),
            recommendation: "Build up intensity gradually over several weeks".into(),
        });
    } else {
        checks.push(SafetyCheck::pass(
            "intensity_level",
            format!("Peak intensity {} matches fitness level", peak.as_str()),
        ));
    }

    (checks, risks)
}
