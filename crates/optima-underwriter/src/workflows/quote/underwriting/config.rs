use serde::{Deserialize, Serialize};

/// Weights and thresholds behind the risk score and eligibility classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingConfig {
    pub base_score: i32,
    pub accident_points: i32,
    pub violation_points: i32,
    pub major_violation_points: i32,
    pub youthful_driver_age: u32,
    pub youthful_driver_points: i32,
    pub senior_driver_age: u32,
    pub senior_driver_points: i32,
    pub elevated_mileage: f64,
    pub elevated_mileage_points: i32,
    pub high_mileage: f64,
    pub high_mileage_points: i32,
    pub low_deductible: f64,
    pub low_deductible_points: i32,
    pub high_deductible: f64,
    pub high_deductible_credit: i32,
    pub surcharge_states: Vec<String>,
    pub state_surcharge_points: i32,
    pub minimum_driver_age: u32,
    pub max_accidents: u32,
    pub referral_incidents: u32,
}

impl UnderwritingConfig {
    pub fn standard() -> Self {
        Self {
            base_score: 20,
            accident_points: 12,
            violation_points: 6,
            major_violation_points: 20,
            youthful_driver_age: 25,
            youthful_driver_points: 10,
            senior_driver_age: 75,
            senior_driver_points: 5,
            elevated_mileage: 15_000.0,
            elevated_mileage_points: 4,
            high_mileage: 25_000.0,
            high_mileage_points: 8,
            low_deductible: 500.0,
            low_deductible_points: 4,
            high_deductible: 1_000.0,
            high_deductible_credit: 3,
            surcharge_states: ["FL", "LA", "MI", "NY", "NV"]
                .iter()
                .map(|state| state.to_string())
                .collect(),
            state_surcharge_points: 5,
            minimum_driver_age: 16,
            max_accidents: 3,
            referral_incidents: 3,
        }
    }
}

impl Default for UnderwritingConfig {
    fn default() -> Self {
        Self::standard()
    }
}
