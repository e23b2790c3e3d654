use super::common::*;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::workflows::quote::decision::{
    generate_ai_insights, generate_underwriting_summary, DecisionBuilder, OverallStatus,
    RiskLevel, RuleStatus,
};
use crate::workflows::quote::insights::{DisabledInsights, StaticInsights};
use crate::workflows::quote::underwriting::Eligibility;

const TOP_LEVEL_MEMBERS: [&str; 15] = [
    "customer",
    "drivers",
    "vehicles",
    "coverage",
    "policy",
    "guidewire",
    "riskScore",
    "underwriting",
    "aiInsights",
    "summary",
    "executiveSummary",
    "compliance",
    "stateCompliance",
    "underwritingSummary",
    "aiInsightsSummary",
];

fn status_of(document: &crate::workflows::quote::DecisionDocument, rule: &str) -> RuleStatus {
    document
        .compliance
        .rules_checked
        .iter()
        .find(|check| check.rule == rule)
        .map(|check| check.status)
        .unwrap_or_else(|| panic!("rule {rule} not checked"))
}

#[test]
fn every_top_level_member_is_present() {
    for payload in [texas_payload(), legacy_payload(), json!({})] {
        let document = offline_service().decide(payload).expect("decision");
        let value = serde_json::to_value(&document).unwrap();
        let object = value.as_object().expect("document object");

        for member in TOP_LEVEL_MEMBERS {
            assert!(object.contains_key(member), "missing {member}");
        }
        for member in ["vehicles", "drivers", "riskScore", "eligibility", "details", "summary"] {
            assert!(value["underwriting"].get(member).is_some(), "missing underwriting.{member}");
        }
        for member in [
            "driverRisk",
            "pricingRationale",
            "underwritingExplanation",
            "improvementSuggestions",
            "narrative",
        ] {
            assert!(value["aiInsights"].get(member).is_some(), "missing aiInsights.{member}");
        }
    }
}

#[test]
fn risk_score_agrees_at_both_locations() {
    let document = decide(texas_payload());

    assert_eq!(document.risk_score, 52);
    assert_eq!(document.underwriting.risk_score, document.risk_score);
    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(value["riskScore"], value["underwriting"]["riskScore"]);
}

#[test]
fn base_members_come_from_extraction_and_underwriting() {
    let document = decide(texas_payload());

    assert_eq!(document.customer["fullName"], json!("Maria Lopez"));
    assert_eq!(document.vehicles[0]["description"], json!("2020 Honda Accord"));
    assert_eq!(document.guidewire["state"], json!("TX"));
    assert_eq!(document.policy.normalized.transaction_id, json!("TX-1001"));
    assert_eq!(document.underwriting.drivers.len(), 2);
    assert_eq!(document.underwriting.eligibility, Eligibility::Eligible);
    assert_eq!(document.underwriting.summary.base_premium, json!(1450));
}

#[test]
fn clean_quote_with_insights_is_compliant() {
    let document = decide(texas_payload());

    assert_eq!(document.compliance.state, json!("TX"));
    assert_eq!(document.compliance.rules_checked.len(), 10);
    assert_eq!(document.compliance.overall_status, OverallStatus::Compliant);
    assert_eq!(document.compliance.notes, "all 10 checks passed");
    assert!(document.state_compliance.known);
    assert_eq!(
        document.state_compliance.minimum_liability.as_deref(),
        Some("30/60/25")
    );
    assert_eq!(
        document.ai_insights.narrative.as_deref(),
        Some("Acceptable risk at quoted terms.")
    );
    assert_eq!(document.underwriting_summary.passed, 10);
    assert_eq!(
        document.ai_insights_summary.headline,
        "No compliance concerns identified"
    );
}

#[test]
fn insights_failure_degrades_to_null_fields() {
    let document = offline_service()
        .decide(texas_payload())
        .expect("decision");

    assert!(document.ai_insights.is_empty());
    assert_eq!(document.ai_insights.narrative, None);
    assert_eq!(document.risk_score, 52);
    assert_eq!(document.summary.customer_name, json!("Maria Lopez"));
    assert_eq!(status_of(&document, "ai_review_available"), RuleStatus::Warn);
    assert_eq!(document.compliance.overall_status, OverallStatus::ReviewRequired);

    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(value["aiInsights"]["narrative"], Value::Null);
}

#[test]
fn garbage_insights_leave_narrative_null() {
    let document = service_with(StaticInsights::new("%%% ??? %%%"))
        .decide(texas_payload())
        .expect("decision");

    assert_eq!(document.ai_insights.narrative, None);
    assert_eq!(document.ai_insights.driver_risk, None);
    assert_eq!(document.underwriting.risk_score, 52);
    assert_eq!(document.state_compliance.state, json!("TX"));
}

#[test]
fn disabled_insights_behave_like_failures() {
    let document = service_with(DisabledInsights)
        .decide(texas_payload())
        .expect("decision");

    assert!(document.ai_insights.is_empty());
    assert_eq!(status_of(&document, "ai_review_available"), RuleStatus::Warn);
}

#[test]
fn legacy_quote_raises_review_items() {
    let document = decide(legacy_payload());

    // No guidewire block: compliance falls back to the normalized policy state.
    assert_eq!(document.compliance.state, json!("FL"));
    assert_eq!(status_of(&document, "minimum_liability_limits"), RuleStatus::Pass);
    assert_eq!(status_of(&document, "prior_insurance"), RuleStatus::Warn);
    assert_eq!(status_of(&document, "documents_provided"), RuleStatus::Warn);
    assert_eq!(status_of(&document, "policy_term"), RuleStatus::Pass);
    assert_eq!(document.compliance.overall_status, OverallStatus::ReviewRequired);
    assert_eq!(document.compliance.notes, "2 of 10 checks need attention");

    // The extraction stage has no customer block or guidewire state for this shape.
    assert!(!document.state_compliance.known);
    assert_eq!(document.customer.len(), 0);
}

#[test]
fn ineligible_quote_fails_compliance() {
    let mut payload = texas_payload();
    payload["drivers"][0]["majorViolation"] = json!(true);
    payload["coverage"]["liabilityLimit"] = json!("15/30/10");
    let document = decide(payload);

    assert_eq!(document.underwriting.eligibility, Eligibility::Ineligible);
    assert_eq!(status_of(&document, "underwriting_eligibility"), RuleStatus::Fail);
    assert_eq!(status_of(&document, "minimum_liability_limits"), RuleStatus::Fail);
    assert_eq!(document.compliance.overall_status, OverallStatus::NonCompliant);
    assert_eq!(document.underwriting_summary.failed, 2);
    assert_eq!(document.ai_insights_summary.risk_flags.len(), 2);
    assert_eq!(
        document.executive_summary.recommendation,
        "Decline under current guidelines"
    );
}

#[test]
fn executive_summary_derives_from_summary() {
    let document = decide(texas_payload());

    assert_eq!(document.summary.risk_level, RiskLevel::Moderate);
    assert_eq!(document.summary.driver_count, 2);
    assert_eq!(
        document.executive_summary.headline,
        "Maria Lopez: Moderate risk (52/100), eligible"
    );
    assert_eq!(
        crate::workflows::quote::decision::build_executive_summary(&document.summary),
        document.executive_summary
    );
    assert!(document
        .executive_summary
        .key_points
        .contains(&"Coverage: Full Coverage".to_string()));
}

#[test]
fn rule_summaries_depend_only_on_rules_checked() {
    let first = decide(texas_payload());
    let mut renamed = texas_payload();
    renamed["customer"]["firstName"] = json!("Someone");
    renamed["customer"]["lastName"] = json!("Else");
    renamed["coverage"]["basePremium"] = json!(999);
    let second = decide(renamed);

    assert_ne!(first.customer, second.customer);
    assert_eq!(first.compliance.rules_checked, second.compliance.rules_checked);
    assert_eq!(first.underwriting_summary, second.underwriting_summary);
    assert_eq!(first.ai_insights_summary, second.ai_insights_summary);

    assert_eq!(
        generate_underwriting_summary(&first.compliance.rules_checked),
        first.underwriting_summary
    );
    assert_eq!(
        generate_ai_insights(&first.compliance.rules_checked),
        first.ai_insights_summary
    );
}

#[test]
fn pipeline_is_deterministic() {
    let first = decide(legacy_payload());
    let second = decide(legacy_payload());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn builder_accepts_shared_trait_objects() {
    let provider: Arc<dyn crate::workflows::quote::InsightsProvider> =
        Arc::new(StaticInsights::new(INSIGHTS_JSON));
    let builder = DecisionBuilder::new(provider);
    let (extracted, result) = underwritten(texas_payload());

    let document = builder.build_decision(&extracted, &result);
    assert_eq!(
        document.ai_insights.driver_risk.as_deref(),
        Some("Youthful operator with one violation")
    );
}

#[test]
fn receipt_projects_existing_document() {
    let document = decide(texas_payload());
    let receipt = document.receipt();

    assert_eq!(receipt.status, "received");
    assert_eq!(receipt.risk_score, document.risk_score);
    assert_eq!(
        serde_json::to_value(&receipt).unwrap(),
        json!({ "status": "received", "riskScore": 52 })
    );
}
