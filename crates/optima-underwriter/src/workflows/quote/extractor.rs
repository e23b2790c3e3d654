//! Per-entity extraction over the fixed payload keys.
//!
//! Extracted records keep the entity's own members and add a few derived fields for audit and
//! decision assembly. They are built independently of the normalizer; a missing or non-object
//! entity extracts to an empty record.

use super::domain::QuotePayload;
use super::resolver::{as_flag, as_number, direct_key, is_blank};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ExtractedRecord = Map<String, Value>;

const HIGH_MILEAGE_THRESHOLD: f64 = 15_000.0;

/// Everything the decision builder reads from the extraction stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedQuote {
    pub customer: ExtractedRecord,
    pub vehicles: Vec<ExtractedRecord>,
    pub drivers: Vec<ExtractedRecord>,
    pub coverage: ExtractedRecord,
    pub guidewire: ExtractedRecord,
    pub state: Value,
    pub documents: Vec<Value>,
    pub had_prior_insurance: Value,
    pub previous_premium: Value,
    pub current_premium: Value,
    pub accidents: Vec<Value>,
}

impl ExtractedQuote {
    pub fn base_premium(&self) -> Value {
        self.coverage
            .get("basePremium")
            .cloned()
            .unwrap_or(Value::Null)
    }
}

pub fn extract(payload: &QuotePayload) -> ExtractedQuote {
    let guidewire = extract_guidewire(payload.get("guidewire"));
    let state = guidewire.get("state").cloned().unwrap_or(Value::Null);

    ExtractedQuote {
        customer: extract_customer(payload.get("customer")),
        vehicles: list(payload.get("vehicles"))
            .iter()
            .map(|vehicle| extract_vehicle(Some(vehicle)))
            .collect(),
        drivers: list(payload.get("drivers"))
            .iter()
            .map(|driver| extract_driver(Some(driver)))
            .collect(),
        coverage: extract_coverage(payload.get("coverage")),
        guidewire,
        state,
        documents: list(payload.get("documents")).to_vec(),
        had_prior_insurance: copied(payload.get("hadPriorInsurance")),
        previous_premium: copied(payload.get("previousPremium")),
        current_premium: copied(payload.get("currentPremium")),
        accidents: list(payload.get("accidents")).to_vec(),
    }
}

pub fn extract_customer(entity: Option<&Value>) -> ExtractedRecord {
    let Some(mut record) = members(entity) else {
        return ExtractedRecord::new();
    };

    if let Some(full_name) = full_name(&record) {
        record.insert("fullName".to_string(), Value::String(full_name));
    }

    let address = record.get("address").cloned().unwrap_or(Value::Null);
    for key in ["state", "zip"] {
        if !record.contains_key(key) {
            if let Some(value) = direct_key(&address, &[key]) {
                record.insert(key.to_string(), value.clone());
            }
        }
    }

    record
}

pub fn extract_vehicle(entity: Option<&Value>) -> ExtractedRecord {
    let Some(mut record) = members(entity) else {
        return ExtractedRecord::new();
    };

    let description = ["year", "make", "model"]
        .iter()
        .filter_map(|key| record.get(*key))
        .filter(|value| !is_blank(value))
        .map(display)
        .collect::<Vec<_>>()
        .join(" ");
    if !description.is_empty() {
        record.insert("description".to_string(), Value::String(description));
    }

    if let Some(mileage) = record.get("annualMileage").and_then(as_number) {
        record.insert(
            "highMileage".to_string(),
            Value::Bool(mileage > HIGH_MILEAGE_THRESHOLD),
        );
    }

    record
}

pub fn extract_driver(entity: Option<&Value>) -> ExtractedRecord {
    let Some(mut record) = members(entity) else {
        return ExtractedRecord::new();
    };

    if let Some(full_name) = full_name(&record) {
        record.insert("fullName".to_string(), Value::String(full_name));
    }

    let incidents = ["accidents", "violations"]
        .iter()
        .filter_map(|key| record.get(*key).and_then(as_number))
        .sum::<f64>();
    record.insert("incidentCount".to_string(), Value::from(incidents.max(0.0) as u64));

    let major = record
        .get("majorViolation")
        .map(as_flag)
        .unwrap_or(false);
    record.insert("hasMajorViolation".to_string(), Value::Bool(major));

    record
}

pub fn extract_coverage(entity: Option<&Value>) -> ExtractedRecord {
    let Some(mut record) = members(entity) else {
        return ExtractedRecord::new();
    };

    let base = entity
        .and_then(|value| direct_key(value, &["basePremium", "premium", "base"]))
        .cloned()
        .unwrap_or(Value::Null);
    record.insert("basePremium".to_string(), base);

    record
}

pub fn extract_guidewire(entity: Option<&Value>) -> ExtractedRecord {
    let Some(mut record) = members(entity) else {
        return ExtractedRecord::new();
    };

    let state = entity
        .and_then(|value| direct_key(value, &["state", "policyState", "jurisdiction"]))
        .cloned()
        .unwrap_or(Value::Null);
    record.insert("state".to_string(), state);

    record
}

fn members(entity: Option<&Value>) -> Option<ExtractedRecord> {
    entity.and_then(Value::as_object).cloned()
}

fn list(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn copied(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or(Value::Null)
}

fn full_name(record: &ExtractedRecord) -> Option<String> {
    let parts: Vec<String> = ["firstName", "lastName"]
        .iter()
        .filter_map(|key| record.get(*key))
        .filter(|value| !is_blank(value))
        .map(display)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_entities_extract_to_empty_records() {
        assert!(extract_customer(None).is_empty());
        assert!(extract_coverage(Some(&json!("n/a"))).is_empty());
        assert!(extract_guidewire(Some(&json!([1, 2]))).is_empty());
    }

    #[test]
    fn driver_derives_name_and_incidents() {
        let record = extract_driver(Some(&json!({
            "firstName": "Ana",
            "lastName": "Lima",
            "accidents": 1,
            "violations": "2",
            "majorViolation": "yes"
        })));
        assert_eq!(record["fullName"], json!("Ana Lima"));
        assert_eq!(record["incidentCount"], json!(3));
        assert_eq!(record["hasMajorViolation"], json!(true));
        assert_eq!(record["violations"], json!("2"));
    }

    #[test]
    fn vehicle_describes_itself_and_flags_mileage() {
        let record = extract_vehicle(Some(&json!({
            "year": 2019,
            "make": "Honda",
            "model": "Civic",
            "annualMileage": "18,000"
        })));
        assert_eq!(record["description"], json!("2019 Honda Civic"));
        assert_eq!(record["highMileage"], json!(true));
    }

    #[test]
    fn coverage_picks_first_premium_key() {
        let record = extract_coverage(Some(&json!({ "premium": 980, "base": 700 })));
        assert_eq!(record["basePremium"], json!(980));

        let record = extract_coverage(Some(&json!({ "coverageType": "Full" })));
        assert_eq!(record["basePremium"], Value::Null);
    }

    #[test]
    fn customer_lifts_state_and_zip_from_address() {
        let record = extract_customer(Some(&json!({
            "firstName": "Ana",
            "address": { "state": "TX", "zip": "73301" }
        })));
        assert_eq!(record["state"], json!("TX"));
        assert_eq!(record["zip"], json!("73301"));
        assert_eq!(record["fullName"], json!("Ana"));
    }

    #[test]
    fn bundle_carries_top_level_context() {
        let payload = QuotePayload::from_value(json!({
            "guidewire": { "jurisdiction": "OH" },
            "drivers": [ { "firstName": "Bo" }, "not-an-object" ],
            "documents": [ "license.pdf" ],
            "hadPriorInsurance": true
        }))
        .expect("object payload");

        let extracted = extract(&payload);
        assert_eq!(extracted.state, json!("OH"));
        assert_eq!(extracted.drivers.len(), 2);
        assert!(extracted.drivers[1].is_empty());
        assert_eq!(extracted.documents, vec![json!("license.pdf")]);
        assert_eq!(extracted.had_prior_insurance, json!(true));
        assert!(extracted.vehicles.is_empty());
        assert_eq!(extracted.base_premium(), Value::Null);
    }
}
