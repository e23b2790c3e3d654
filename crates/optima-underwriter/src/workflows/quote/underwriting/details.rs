use super::super::domain::{CanonicalDriver, CanonicalVehicle, DriverFields, VehicleFields};
use super::policy::Eligibility;
use super::summary::raw_field;
use super::ScoreComponent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Eligibility stamped on every detail record. This is a fixed value and is not wired to the
/// eligibility classifier.
pub const DETAIL_ELIGIBILITY: Eligibility = Eligibility::Eligible;

pub const RULES_PLACEHOLDER_STATUS: &str = "rules evaluated (placeholder)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingDetails {
    pub vehicles: Vec<VehicleDetail>,
    pub drivers: Vec<DriverDetail>,
    pub risk_score: u8,
    pub eligibility: Eligibility,
    #[serde(default)]
    pub risk_factors: Vec<ScoreComponent>,
}

impl UnderwritingDetails {
    pub fn with_risk_factors(mut self, risk_factors: Vec<ScoreComponent>) -> Self {
        self.risk_factors = risk_factors;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetail {
    pub raw: Value,
    pub normalized: VehicleFields,
    pub rules_result: RulesResult,
    pub risk_score: u8,
    pub premium: Value,
    pub eligibility: Eligibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesResult {
    pub rules_fired: Vec<String>,
    pub status: String,
}

impl RulesResult {
    fn placeholder() -> Self {
        Self {
            rules_fired: Vec::new(),
            status: RULES_PLACEHOLDER_STATUS.to_string(),
        }
    }
}

/// Driver detail with selected raw fields flattened for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDetail {
    pub raw: Value,
    pub normalized: DriverFields,
    pub first_name: Value,
    pub last_name: Value,
    pub age: Value,
    pub license_number: Value,
    pub years_licensed: Value,
    pub accidents: Value,
    pub violations: Value,
    pub claims: Value,
    pub is_primary_driver: Value,
}

pub fn build_underwriting_details(
    drivers: &[CanonicalDriver],
    vehicles: &[CanonicalVehicle],
    risk_score: u8,
    base_premium: &Value,
) -> UnderwritingDetails {
    let vehicles = vehicles
        .iter()
        .map(|vehicle| VehicleDetail {
            raw: vehicle.raw.clone(),
            normalized: vehicle.normalized.clone(),
            rules_result: RulesResult::placeholder(),
            risk_score,
            premium: base_premium.clone(),
            eligibility: DETAIL_ELIGIBILITY,
        })
        .collect();

    let drivers = drivers
        .iter()
        .map(|driver| {
            let raw = &driver.raw;
            DriverDetail {
                raw: raw.clone(),
                normalized: driver.normalized.clone(),
                first_name: raw_field(raw, "firstName"),
                last_name: raw_field(raw, "lastName"),
                age: raw_field(raw, "age"),
                license_number: raw_field(raw, "licenseNumber"),
                years_licensed: raw_field(raw, "yearsLicensed"),
                accidents: raw_field(raw, "accidents"),
                violations: raw_field(raw, "violations"),
                claims: raw_field(raw, "claims"),
                is_primary_driver: raw_field(raw, "isPrimaryDriver"),
            }
        })
        .collect();

    UnderwritingDetails {
        vehicles,
        drivers,
        risk_score,
        eligibility: DETAIL_ELIGIBILITY,
        risk_factors: Vec::new(),
    }
}
