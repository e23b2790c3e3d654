//! Structural re-mapping of insurer payloads into [`CanonicalQuote`].
//!
//! Field tables live in `mapping`; this module only decides which sub-tree each table runs
//! against and which `raw` sub-tree is retained. No type coercion happens here: an age sent as
//! `"34"` stays a string.

pub(crate) mod mapping;

use super::domain::{
    AddressFields, AiInsightsSection, ApplicantFields, CanonicalApplicant, CanonicalCoverage,
    CanonicalCustomer, CanonicalDriver, CanonicalEntity, CanonicalGuidewire, CanonicalPolicy,
    CanonicalQuote, CanonicalVehicle, ComplianceSection, CoverageFields, CustomerFields,
    DriverFields, GuidewireFields, LineageSection, PolicyFields, PricingSection, QuotePayload,
    RiskSection, SummarySection, VehicleFields,
};
use super::resolver::{direct_key, is_blank, FieldRule};
use mapping::*;
use serde_json::{Map, Value};
use tracing::debug;

/// Map `payload` into the canonical schema.
pub fn normalize(payload: &QuotePayload) -> CanonicalQuote {
    let tree = payload.as_value();

    let customer = normalize_customer(tree);
    let policy = normalize_policy(tree);
    let guidewire = normalize_guidewire(tree, &policy);
    let drivers: Vec<CanonicalDriver> = DRIVER_LISTS
        .resolve_list(tree)
        .into_iter()
        .map(normalize_driver)
        .collect();
    let vehicles: Vec<CanonicalVehicle> = VEHICLE_LISTS
        .resolve_list(tree)
        .into_iter()
        .map(normalize_vehicle)
        .collect();

    debug!(
        drivers = drivers.len(),
        vehicles = vehicles.len(),
        customer_root = customer_root(tree).unwrap_or("none"),
        "payload normalized"
    );

    CanonicalQuote {
        customer,
        applicant: normalize_applicant(tree),
        drivers,
        vehicles,
        coverage: normalize_coverage(tree),
        policy,
        guidewire,
        pricing: pricing_section(tree),
        risk: risk_section(tree),
        summary: SummarySection {
            narrative: SUMMARY_NARRATIVE.resolve(tree),
        },
        compliance: compliance_section(tree),
        ai_insights: ai_insights_section(tree),
        lineage: LineageSection {
            fields: LINEAGE_FIELDS.resolve_list(tree),
            missing: LINEAGE_MISSING.resolve_list(tree),
        },
    }
}

fn customer_root(tree: &Value) -> Option<&'static str> {
    CUSTOMER_ROOTS
        .iter()
        .copied()
        .find(|key| tree.get(*key).map(Value::is_object).unwrap_or(false))
}

/// Verbatim copy of an object-valued top-level member, `{}` otherwise.
fn sub_tree(tree: &Value, key: &str) -> Value {
    match tree.get(key) {
        Some(value @ Value::Object(_)) => value.clone(),
        _ => Value::Object(Map::new()),
    }
}

pub(crate) fn normalize_customer(tree: &Value) -> CanonicalCustomer {
    let raw = customer_root(tree)
        .map(|key| sub_tree(tree, key))
        .unwrap_or_else(|| Value::Object(Map::new()));

    CanonicalEntity {
        raw,
        normalized: CustomerFields {
            first_name: CUSTOMER_FIRST_NAME.resolve(tree),
            last_name: CUSTOMER_LAST_NAME.resolve(tree),
            age: CUSTOMER_AGE.resolve(tree),
            license_number: CUSTOMER_LICENSE.resolve(tree),
            address: AddressFields {
                street: ADDRESS_STREET.resolve(tree),
                city: ADDRESS_CITY.resolve(tree),
                state: ADDRESS_STATE.resolve(tree),
                zip: ADDRESS_ZIP.resolve(tree),
            },
        },
    }
}

fn normalize_applicant(tree: &Value) -> CanonicalApplicant {
    let raw = sub_tree(tree, "applicant");
    let normalized = ApplicantFields {
        name: APPLICANT_NAME.resolve(&raw),
        state: APPLICANT_STATE.resolve(&raw),
        zip: APPLICANT_ZIP.resolve(&raw),
        address: APPLICANT_ADDRESS.resolve(&raw),
    };
    CanonicalEntity { raw, normalized }
}

pub(crate) fn normalize_driver(raw: Value) -> CanonicalDriver {
    let normalized = DriverFields {
        first_name: DRIVER_FIRST_NAME.resolve(&raw),
        last_name: DRIVER_LAST_NAME.resolve(&raw),
        age: DRIVER_AGE.resolve(&raw),
        license_number: DRIVER_LICENSE.resolve(&raw),
        accidents: DRIVER_ACCIDENTS.resolve(&raw),
        violations: DRIVER_VIOLATIONS.resolve(&raw),
        major_violation: DRIVER_MAJOR_VIOLATION.resolve(&raw),
    };
    CanonicalEntity { raw, normalized }
}

pub(crate) fn normalize_vehicle(raw: Value) -> CanonicalVehicle {
    let normalized = VehicleFields {
        vin: VEHICLE_VIN.resolve(&raw),
        year: VEHICLE_YEAR.resolve(&raw),
        make: VEHICLE_MAKE.resolve(&raw),
        model: VEHICLE_MODEL.resolve(&raw),
        annual_mileage: VEHICLE_MILEAGE.resolve(&raw),
    };
    CanonicalEntity { raw, normalized }
}

fn normalize_policy(tree: &Value) -> CanonicalPolicy {
    CanonicalEntity {
        raw: sub_tree(tree, "policy"),
        normalized: PolicyFields {
            state: POLICY_STATE.resolve(tree),
            effective_date: POLICY_EFFECTIVE_DATE.resolve(tree),
            expiration_date: POLICY_EXPIRATION_DATE.resolve(tree),
            transaction_id: POLICY_TRANSACTION_ID.resolve(tree),
            source_system: POLICY_SOURCE_SYSTEM.resolve(tree),
        },
    }
}

fn normalize_guidewire(tree: &Value, policy: &CanonicalPolicy) -> CanonicalGuidewire {
    let raw = sub_tree(tree, "guidewire");
    let state = direct_key(&raw, &["state"])
        .cloned()
        .unwrap_or_else(|| policy.normalized.state.clone());

    CanonicalEntity {
        raw,
        normalized: GuidewireFields { state },
    }
}

/// Coverage layers three sources: a non-blank direct key on `coverage` itself, then the
/// cross-tree candidates, then the field default (`"Standard Auto"` for the coverage type).
pub(crate) fn normalize_coverage(tree: &Value) -> CanonicalCoverage {
    let raw = sub_tree(tree, "coverage");

    let layered = |keys: &[&str], rule: &FieldRule| -> Value {
        match direct_key(&raw, keys) {
            Some(value) => value.clone(),
            None => {
                let resolved = rule.resolve(tree);
                if is_blank(&resolved) {
                    rule.default.to_value()
                } else {
                    resolved
                }
            }
        }
    };

    let normalized = CoverageFields {
        liability_limit: layered(&["liabilityLimit"], &COVERAGE_LIABILITY),
        collision_deductible: layered(&["collisionDeductible"], &COVERAGE_COLLISION),
        comprehensive_deductible: layered(&["comprehensiveDeductible"], &COVERAGE_COMPREHENSIVE),
        deductible: layered(&["deductible", "collisionDeductible"], &COVERAGE_DEDUCTIBLE),
        coverage_type: layered(&["coverageType"], &COVERAGE_TYPE),
    };

    CanonicalEntity { raw, normalized }
}

fn pricing_section(tree: &Value) -> PricingSection {
    PricingSection {
        final_premium: PRICING_FINAL.resolve(tree),
        base: PRICING_BASE.resolve(tree),
        driver_impact: PRICING_DRIVER_IMPACT.resolve(tree),
        vehicle_impact: PRICING_VEHICLE_IMPACT.resolve(tree),
        zip_impact: PRICING_ZIP_IMPACT.resolve(tree),
        coverage_impact: PRICING_COVERAGE_IMPACT.resolve(tree),
        discounts: PRICING_DISCOUNTS.resolve(tree),
        narrative: PRICING_NARRATIVE.resolve(tree),
        top_pricing_factors: PRICING_TOP_FACTORS.resolve_list(tree),
    }
}

fn risk_section(tree: &Value) -> RiskSection {
    RiskSection {
        score: RISK_SCORE.resolve(tree),
        eligibility: RISK_ELIGIBILITY.resolve(tree),
        top_drivers: RISK_TOP_DRIVERS.resolve_list(tree),
    }
}

fn compliance_section(tree: &Value) -> ComplianceSection {
    ComplianceSection {
        state: COMPLIANCE_STATE.resolve(tree),
        overall_status: COMPLIANCE_STATUS.resolve(tree),
        notes: COMPLIANCE_NOTES.resolve(tree),
        rules_checked: COMPLIANCE_RULES.resolve_list(tree),
    }
}

fn ai_insights_section(tree: &Value) -> AiInsightsSection {
    AiInsightsSection {
        driver_risk: INSIGHT_DRIVER_RISK.resolve(tree),
        pricing_rationale: INSIGHT_PRICING_RATIONALE.resolve(tree),
        underwriting_explanation: INSIGHT_EXPLANATION.resolve(tree),
        improvement_suggestions: INSIGHT_SUGGESTIONS.resolve(tree),
        narrative: INSIGHT_NARRATIVE.resolve(tree),
    }
}
