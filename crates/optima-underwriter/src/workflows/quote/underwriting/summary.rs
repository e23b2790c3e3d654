use super::super::domain::{CanonicalCustomer, CanonicalDriver, CanonicalVehicle};
use super::super::resolver::resolve_value;
use super::policy::Eligibility;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable reporting projection of the quote. Any sub-field missing from the source projects to
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBlock {
    pub customer: SummaryCustomer,
    pub drivers: Vec<SummaryDriver>,
    pub vehicles: Vec<SummaryVehicle>,
    pub risk_score: u8,
    pub base_premium: Value,
    pub eligibility: Eligibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCustomer {
    pub first_name: Value,
    pub last_name: Value,
    pub age: Value,
    pub zip: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDriver {
    pub first_name: Value,
    pub last_name: Value,
    pub age: Value,
    pub accidents: Value,
    pub violations: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryVehicle {
    pub model: Value,
    pub year: Value,
    pub annual_mileage: Value,
}

pub fn build_summary_block(
    customer: &CanonicalCustomer,
    drivers: &[CanonicalDriver],
    vehicles: &[CanonicalVehicle],
    risk_score: u8,
    base_premium: &Value,
    eligibility: Eligibility,
) -> SummaryBlock {
    SummaryBlock {
        customer: SummaryCustomer {
            first_name: customer.normalized.first_name.clone(),
            last_name: customer.normalized.last_name.clone(),
            age: customer.normalized.age.clone(),
            zip: resolve_value(&customer.raw, &["address.zip"])
                .value()
                .cloned()
                .unwrap_or(Value::Null),
        },
        drivers: drivers
            .iter()
            .map(|driver| SummaryDriver {
                first_name: raw_field(&driver.raw, "firstName"),
                last_name: raw_field(&driver.raw, "lastName"),
                age: raw_field(&driver.raw, "age"),
                accidents: raw_field(&driver.raw, "accidents"),
                violations: raw_field(&driver.raw, "violations"),
            })
            .collect(),
        vehicles: vehicles
            .iter()
            .map(|vehicle| SummaryVehicle {
                model: raw_field(&vehicle.raw, "model"),
                year: raw_field(&vehicle.raw, "year"),
                annual_mileage: raw_field(&vehicle.raw, "annualMileage"),
            })
            .collect(),
        risk_score,
        base_premium: base_premium.clone(),
        eligibility,
    }
}

/// Direct member of a raw entity, `null` when the entity is not an object or lacks the key.
pub(crate) fn raw_field(raw: &Value, key: &str) -> Value {
    raw.get(key).cloned().unwrap_or(Value::Null)
}
