use super::super::domain::{
    CanonicalCoverage, CanonicalCustomer, CanonicalDriver, CanonicalGuidewire, CanonicalVehicle,
};
use super::super::resolver::{as_flag, as_number};
use super::config::UnderwritingConfig;
use super::{RiskFactor, ScoreComponent};
use serde_json::Value;

const MAX_COUNT: u32 = 1_000;

pub(crate) fn score_quote(
    customer: &CanonicalCustomer,
    drivers: &[CanonicalDriver],
    vehicles: &[CanonicalVehicle],
    coverage: &CanonicalCoverage,
    guidewire: &CanonicalGuidewire,
    config: &UnderwritingConfig,
) -> (Vec<ScoreComponent>, u8) {
    let mut components = vec![ScoreComponent {
        factor: RiskFactor::Base,
        points: config.base_score,
        notes: "base rate".to_string(),
    }];

    let accidents: u32 = drivers
        .iter()
        .map(|driver| count(&driver.normalized.accidents))
        .sum();
    if accidents > 0 {
        components.push(ScoreComponent {
            factor: RiskFactor::Accidents,
            points: weighted(accidents, config.accident_points),
            notes: format!("{accidents} reported accident(s)"),
        });
    }

    let violations: u32 = drivers
        .iter()
        .map(|driver| count(&driver.normalized.violations))
        .sum();
    if violations > 0 {
        components.push(ScoreComponent {
            factor: RiskFactor::Violations,
            points: weighted(violations, config.violation_points),
            notes: format!("{violations} moving violation(s)"),
        });
    }

    let major = drivers
        .iter()
        .filter(|driver| as_flag(&driver.normalized.major_violation))
        .count();
    if major > 0 {
        components.push(ScoreComponent {
            factor: RiskFactor::MajorViolation,
            points: weighted(major as u32, config.major_violation_points),
            notes: format!("{major} driver(s) with a major violation"),
        });
    }

    // The insured is treated as the operator when no driver list was sent.
    let ages: Vec<f64> = if drivers.is_empty() {
        as_number(&customer.normalized.age).into_iter().collect()
    } else {
        drivers
            .iter()
            .filter_map(|driver| as_number(&driver.normalized.age))
            .collect()
    };
    for age in ages {
        if age < config.youthful_driver_age as f64 {
            components.push(ScoreComponent {
                factor: RiskFactor::DriverAge,
                points: config.youthful_driver_points,
                notes: format!("driver aged {age:.0} under {}", config.youthful_driver_age),
            });
        } else if age >= config.senior_driver_age as f64 {
            components.push(ScoreComponent {
                factor: RiskFactor::DriverAge,
                points: config.senior_driver_points,
                notes: format!("driver aged {age:.0} at or over {}", config.senior_driver_age),
            });
        }
    }

    for vehicle in vehicles {
        let Some(mileage) = as_number(&vehicle.normalized.annual_mileage) else {
            continue;
        };
        let points = if mileage > config.high_mileage {
            config.high_mileage_points
        } else if mileage > config.elevated_mileage {
            config.elevated_mileage_points
        } else {
            continue;
        };
        components.push(ScoreComponent {
            factor: RiskFactor::Mileage,
            points,
            notes: format!("{mileage:.0} annual miles"),
        });
    }

    if let Some(deductible) = as_number(&coverage.normalized.deductible) {
        if deductible < config.low_deductible {
            components.push(ScoreComponent {
                factor: RiskFactor::Deductible,
                points: config.low_deductible_points,
                notes: format!("deductible {deductible:.0} below {:.0}", config.low_deductible),
            });
        } else if deductible >= config.high_deductible {
            components.push(ScoreComponent {
                factor: RiskFactor::Deductible,
                points: -config.high_deductible_credit,
                notes: format!("deductible {deductible:.0} earns a credit"),
            });
        }
    }

    if let Some(state) = guidewire.normalized.state.as_str() {
        let state = state.trim().to_ascii_uppercase();
        if config
            .surcharge_states
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(&state))
        {
            components.push(ScoreComponent {
                factor: RiskFactor::StateSurcharge,
                points: config.state_surcharge_points,
                notes: format!("{state} territory surcharge"),
            });
        }
    }

    let total = components
        .iter()
        .fold(0i32, |total, component| total.saturating_add(component.points));
    (components, total.clamp(0, 100) as u8)
}

/// Non-negative whole count from a loosely typed field. Lists count their entries so an
/// accident history array scores like an accident count.
pub(crate) fn count(value: &Value) -> u32 {
    match value {
        Value::Array(items) => (items.len() as u32).min(MAX_COUNT),
        other => as_number(other)
            .map(|n| n.clamp(0.0, MAX_COUNT as f64).floor() as u32)
            .unwrap_or(0),
    }
}

fn weighted(count: u32, points: i32) -> i32 {
    i32::try_from(count)
        .unwrap_or(i32::MAX)
        .saturating_mul(points)
}
