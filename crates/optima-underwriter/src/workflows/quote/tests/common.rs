use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::quote::decision::DecisionDocument;
use crate::workflows::quote::domain::{CanonicalQuote, QuotePayload};
use crate::workflows::quote::extractor::{extract, ExtractedQuote};
use crate::workflows::quote::insights::{InsightsProvider, StaticInsights};
use crate::workflows::quote::normalizer::normalize;
use crate::workflows::quote::service::QuoteDecisionService;
use crate::workflows::quote::underwriting::{UnderwritingEngine, UnderwritingResult};

/// A clean two-driver Texas quote. Scores 52 under the standard configuration: base 20, one
/// accident 12, one violation 6, a 19-year-old driver 10, 18k annual miles 4.
pub(super) fn texas_payload() -> Value {
    json!({
        "customer": {
            "firstName": "Maria",
            "lastName": "Lopez",
            "age": 34,
            "licenseNumber": "D1234567",
            "address": {
                "street": "100 Congress Ave",
                "city": "Austin",
                "state": "TX",
                "zip": "78701"
            }
        },
        "drivers": [
            {
                "firstName": "Maria",
                "lastName": "Lopez",
                "age": 34,
                "licenseNumber": "D1234567",
                "yearsLicensed": 16,
                "accidents": 1,
                "violations": 0,
                "claims": 0,
                "isPrimaryDriver": true
            },
            {
                "firstName": "Leo",
                "lastName": "Lopez",
                "age": 19,
                "licenseNumber": "D7654321",
                "accidents": 0,
                "violations": 1
            }
        ],
        "vehicles": [
            {
                "vin": "1HGCM82633A004352",
                "year": 2020,
                "make": "Honda",
                "model": "Accord",
                "annualMileage": 18000
            }
        ],
        "coverage": {
            "liabilityLimit": "50/100/50",
            "collisionDeductible": 500,
            "comprehensiveDeductible": 250,
            "deductible": 500,
            "coverageType": "Full Coverage",
            "basePremium": 1450
        },
        "guidewire": { "state": "TX" },
        "policy": {
            "state": "TX",
            "effectiveDate": "2025-01-01",
            "expirationDate": "2025-07-01",
            "transactionId": "TX-1001"
        },
        "documents": ["license.pdf", "registration.pdf"],
        "hadPriorInsurance": true,
        "previousPremium": 1300,
        "currentPremium": 1450
    })
}

/// Legacy policy-admin shape: `insured` instead of `customer`, operator and auto lists.
pub(super) fn legacy_payload() -> Value {
    json!({
        "insured": {
            "givenName": "Ana",
            "familyName": "Silva",
            "age": "41",
            "license": "S998877",
            "location": {
                "street": "9 Harbor Rd",
                "city": "Miami",
                "stateCd": "FL",
                "postalCode": "33101"
            }
        },
        "applicant": {
            "firstName": "Ignored",
            "name": "Ana Silva",
            "state": "FL"
        },
        "operatorList": [
            { "fname": "Ana", "lname": "Silva", "age": 41, "license": "S998877", "accHist": 2 }
        ],
        "autos": [
            {
                "VIN": "2T1BURHE0JC123456",
                "modelYear": 2018,
                "manufacturer": "Toyota",
                "vehicleModel": "Corolla",
                "mileage": 30000
            }
        ],
        "limits": { "liability": "10/20/10" },
        "deductibles": { "collision": 250 },
        "transaction": {
            "effectiveDate": "2025-03-01",
            "expirationDate": "2026-03-01",
            "id": "GW-77"
        },
        "sourceSystem": "guidewire"
    })
}

pub(super) const INSIGHTS_JSON: &str = r#"{
    "driverRisk": "Youthful operator with one violation",
    "pricingRationale": "Base premium reflects mileage and a recent accident",
    "underwritingExplanation": "Within guidelines for a standard auto risk",
    "improvementSuggestions": "Consider telematics for the youthful driver",
    "narrative": "Acceptable risk at quoted terms."
}"#;

pub(super) fn payload(value: Value) -> QuotePayload {
    QuotePayload::from_value(value).expect("object payload")
}

pub(super) fn canonical(value: Value) -> CanonicalQuote {
    normalize(&payload(value))
}

pub(super) fn extracted(value: Value) -> ExtractedQuote {
    extract(&payload(value))
}

pub(super) fn underwritten(value: Value) -> (ExtractedQuote, UnderwritingResult) {
    let payload = payload(value);
    let extracted = extract(&payload);
    let result =
        UnderwritingEngine::default().underwrite(&normalize(&payload), &extracted.base_premium());
    (extracted, result)
}

pub(super) fn service_with<P>(provider: P) -> Arc<QuoteDecisionService<P>>
where
    P: InsightsProvider + 'static,
{
    Arc::new(QuoteDecisionService::new(Arc::new(provider)))
}

pub(super) fn insightful_service() -> Arc<QuoteDecisionService<StaticInsights>> {
    service_with(StaticInsights::new(INSIGHTS_JSON))
}

pub(super) fn offline_service() -> Arc<QuoteDecisionService<StaticInsights>> {
    service_with(StaticInsights::failing("connection refused"))
}

pub(super) fn decide(value: Value) -> DecisionDocument {
    insightful_service().decide(value).expect("decision")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
