use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound quote submission. The only structural requirement is that the top level is a JSON
/// object; everything below it is insurer specific.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotePayload {
    tree: Value,
}

impl QuotePayload {
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        if value.is_object() {
            Ok(Self { tree: value })
        } else {
            Err(PayloadError::NotAnObject {
                found: json_kind(&value),
            })
        }
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            tree: Value::Object(map),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.tree
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.tree.get(key)
    }
}

impl TryFrom<Value> for QuotePayload {
    type Error = PayloadError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// The single fatal input condition of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("quote payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An entity as received (`raw`) next to its canonical projection (`normalized`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEntity<T> {
    pub raw: Value,
    pub normalized: T,
}

pub type CanonicalCustomer = CanonicalEntity<CustomerFields>;
pub type CanonicalApplicant = CanonicalEntity<ApplicantFields>;
pub type CanonicalDriver = CanonicalEntity<DriverFields>;
pub type CanonicalVehicle = CanonicalEntity<VehicleFields>;
pub type CanonicalCoverage = CanonicalEntity<CoverageFields>;
pub type CanonicalPolicy = CanonicalEntity<PolicyFields>;
pub type CanonicalGuidewire = CanonicalEntity<GuidewireFields>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFields {
    pub first_name: Value,
    pub last_name: Value,
    pub age: Value,
    pub license_number: Value,
    pub address: AddressFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressFields {
    pub street: Value,
    pub city: Value,
    pub state: Value,
    pub zip: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantFields {
    pub name: Value,
    pub state: Value,
    pub zip: Value,
    pub address: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverFields {
    pub first_name: Value,
    pub last_name: Value,
    pub age: Value,
    pub license_number: Value,
    pub accidents: Value,
    pub violations: Value,
    pub major_violation: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFields {
    pub vin: Value,
    pub year: Value,
    pub make: Value,
    pub model: Value,
    pub annual_mileage: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageFields {
    pub liability_limit: Value,
    pub collision_deductible: Value,
    pub comprehensive_deductible: Value,
    pub deductible: Value,
    pub coverage_type: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyFields {
    pub state: Value,
    pub effective_date: Value,
    pub expiration_date: Value,
    pub transaction_id: Value,
    pub source_system: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidewireFields {
    pub state: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSection {
    pub final_premium: Value,
    pub base: Value,
    pub driver_impact: Value,
    pub vehicle_impact: Value,
    pub zip_impact: Value,
    pub coverage_impact: Value,
    pub discounts: Value,
    pub narrative: Value,
    pub top_pricing_factors: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSection {
    pub score: Value,
    pub eligibility: Value,
    pub top_drivers: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySection {
    pub narrative: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSection {
    pub state: Value,
    pub overall_status: Value,
    pub notes: Value,
    pub rules_checked: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsightsSection {
    pub driver_risk: Value,
    pub pricing_rationale: Value,
    pub underwriting_explanation: Value,
    pub improvement_suggestions: Value,
    pub narrative: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageSection {
    pub fields: Vec<Value>,
    pub missing: Vec<Value>,
}

/// The fixed shape every insurer payload is mapped into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalQuote {
    pub customer: CanonicalCustomer,
    pub applicant: CanonicalApplicant,
    pub drivers: Vec<CanonicalDriver>,
    pub vehicles: Vec<CanonicalVehicle>,
    pub coverage: CanonicalCoverage,
    pub policy: CanonicalPolicy,
    pub guidewire: CanonicalGuidewire,
    pub pricing: PricingSection,
    pub risk: RiskSection,
    pub summary: SummarySection,
    pub compliance: ComplianceSection,
    pub ai_insights: AiInsightsSection,
    pub lineage: LineageSection,
}
