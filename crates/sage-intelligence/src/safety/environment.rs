// ABOUTME: Environment checks from weather condition and temperature
// ABOUTME: Heat and cold thresholds for exercise, hydration reminder for diet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sage Health Intelligence

use sage_core::constants::rules;
use sage_core::models::{EnvironmentContext, PlanKind, RiskFactor, RiskLevel, SafetyCheck};

use super::PlanInput;

/// Weather-driven checks for the plan's type
#[must_use]
pub fn run_environment_checks(
    plan: &PlanInput<'_>,
    environment: &EnvironmentContext,
) -> (Vec<SafetyCheck>, Vec<RiskFactor>) {
    let mut checks = Vec::new();
    let mut risks = Vec::new();

    let weather = &environment.weather;
    let temperature = weather.temperature_c;

    match plan.kind() {
        PlanKind::Exercise => {
            if temperature > rules::HEAT_RISK_TEMP_C {
                checks.push(SafetyCheck::fail(
                    "heat_stress",
                    format!("Temperature {temperature:.0}C poses heat stress risk"),
                    RiskLevel::High,
                ));
                risks.push(RiskFactor {
                    factor: "high_temperature_exercise".into(),
                    category: "environmental".into(),
                    severity: RiskLevel::High,
                    description: format!(
                        "Exercising at {temperature:.0}C risks heat exhaustion"
                    ),
                    recommendation: "Move sessions indoors or to early morning hours".into(),
                });
            } else if temperature < rules::COLD_RISK_TEMP_C {
                checks.push(SafetyCheck::fail(
                    "cold_strain",
                    format!("Temperature {temperature:.0}C poses cold strain risk"),
                    RiskLevel::Moderate,
                ));
                risks.push(RiskFactor {
                    factor: "low_temperature_exercise".into(),
                    category: "environmental".into(),
                    severity: RiskLevel::Moderate,
                    description: format!(
                        "Exercising at {temperature:.0}C increases muscle strain risk"
                    ),
                    recommendation: "Extend warm-up time and dress in layers".into(),
                });
            } else {
                checks.push(SafetyCheck::pass(
                    "temperature",
                    format!("Temperature {temperature:.0}C suits outdoor exercise"),
                ));
            }

            let condition = weather.condition.to_lowercase();
            if condition.contains("rain") || condition.contains("icy") || condition.contains("snow")
            {
                risks.push(RiskFactor {
                    factor: "inclement_weather".into(),
                    category: "environmental".into(),
                    severity: RiskLevel::Moderate,
                    description: format!("Weather condition '{}' raises slip risk", weather.condition),
                    recommendation: "Prefer indoor alternatives until conditions improve".into(),
                });
            }
        }
        PlanKind::Diet => {
            if temperature > rules::HYDRATION_REMINDER_TEMP_C {
                checks.push(SafetyCheck::pass(
                    "hot_weather_hydration",
                    format!("Temperature {temperature:.0}C: increase fluid intake"),
                ));
            }
        }
    }

    (checks, risks)
}
