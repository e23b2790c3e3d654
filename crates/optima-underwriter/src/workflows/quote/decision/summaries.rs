//! Reporting projections layered over the decision.
//!
//! `summary` reads the underwriting result, `executiveSummary` reads only `summary`, and the two
//! rule summaries read only `compliance.rulesChecked`.

use super::super::resolver::is_blank;
use super::super::underwriting::{Eligibility, UnderwritingResult};
use super::compliance::{OverallStatus, RuleCheck, RuleStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const LOW_RISK_CEILING: u8 = 40;
const MODERATE_RISK_CEILING: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const fn from_score(score: u8) -> Self {
        if score < LOW_RISK_CEILING {
            RiskLevel::Low
        } else if score < MODERATE_RISK_CEILING {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionSummary {
    pub customer_name: Value,
    pub state: Value,
    pub driver_count: usize,
    pub vehicle_count: usize,
    pub coverage_type: Value,
    pub base_premium: Value,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub eligibility: Eligibility,
    pub eligibility_reasons: Vec<String>,
}

pub fn build_summary(underwriting: &UnderwritingResult) -> DecisionSummary {
    let customer = &underwriting.customer.normalized;
    let name: Vec<&str> = [&customer.first_name, &customer.last_name]
        .into_iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    let state = [
        &underwriting.guidewire.normalized.state,
        &underwriting.policy.normalized.state,
        &customer.address.state,
    ]
    .into_iter()
    .find(|value| !is_blank(value))
    .cloned()
    .unwrap_or(Value::Null);

    DecisionSummary {
        customer_name: if name.is_empty() {
            Value::Null
        } else {
            Value::String(name.join(" "))
        },
        state,
        driver_count: underwriting.drivers.len(),
        vehicle_count: underwriting.vehicles.len(),
        coverage_type: underwriting.coverage.normalized.coverage_type.clone(),
        base_premium: underwriting.summary.base_premium.clone(),
        risk_score: underwriting.risk_score,
        risk_level: RiskLevel::from_score(underwriting.risk_score),
        eligibility: underwriting.eligibility,
        eligibility_reasons: underwriting.eligibility_reasons.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub headline: String,
    pub risk_level: RiskLevel,
    pub recommendation: String,
    pub key_points: Vec<String>,
}

pub fn build_executive_summary(summary: &DecisionSummary) -> ExecutiveSummary {
    let applicant = summary
        .customer_name
        .as_str()
        .unwrap_or("Unnamed applicant");
    let headline = format!(
        "{applicant}: {} risk ({}/100), {}",
        summary.risk_level.label(),
        summary.risk_score,
        summary.eligibility.label().to_ascii_lowercase()
    );

    let recommendation = match summary.eligibility {
        Eligibility::Eligible => "Proceed to bind at quoted terms",
        Eligibility::Referred => "Refer to an underwriter before binding",
        Eligibility::Ineligible => "Decline under current guidelines",
    }
    .to_string();

    let mut key_points = vec![
        format!(
            "{} driver(s), {} vehicle(s)",
            summary.driver_count, summary.vehicle_count
        ),
    ];
    if let Some(coverage) = summary.coverage_type.as_str() {
        key_points.push(format!("Coverage: {coverage}"));
    }
    if let Some(state) = summary.state.as_str() {
        key_points.push(format!("Rating state: {state}"));
    }
    if !is_blank(&summary.base_premium) {
        key_points.push(format!("Base premium: {}", display(&summary.base_premium)));
    }
    key_points.extend(summary.eligibility_reasons.iter().cloned());

    ExecutiveSummary {
        headline,
        risk_level: summary.risk_level,
        recommendation,
        key_points,
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingSummary {
    pub total_checks: usize,
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
    pub overall_status: OverallStatus,
    pub findings: Vec<String>,
}

pub fn generate_underwriting_summary(rules_checked: &[RuleCheck]) -> UnderwritingSummary {
    let tally = |status: RuleStatus| {
        rules_checked
            .iter()
            .filter(|check| check.status == status)
            .count()
    };

    UnderwritingSummary {
        total_checks: rules_checked.len(),
        passed: tally(RuleStatus::Pass),
        warnings: tally(RuleStatus::Warn),
        failed: tally(RuleStatus::Fail),
        overall_status: OverallStatus::from_checks(rules_checked),
        findings: rules_checked
            .iter()
            .filter(|check| check.status != RuleStatus::Pass)
            .map(|check| format!("{} ({}): {}", check.description, check.status, check.detail))
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsightsSummary {
    pub headline: String,
    pub risk_flags: Vec<String>,
    pub review_items: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn generate_ai_insights(rules_checked: &[RuleCheck]) -> AiInsightsSummary {
    let describe = |status: RuleStatus| -> Vec<String> {
        rules_checked
            .iter()
            .filter(|check| check.status == status)
            .map(|check| check.description.clone())
            .collect()
    };
    let risk_flags = describe(RuleStatus::Fail);
    let review_items = describe(RuleStatus::Warn);

    let mut recommendations: Vec<String> = Vec::new();
    for recommendation in rules_checked
        .iter()
        .filter_map(|check| check.recommendation.as_ref())
    {
        if !recommendations.contains(recommendation) {
            recommendations.push(recommendation.clone());
        }
    }

    let headline = match OverallStatus::from_checks(rules_checked) {
        OverallStatus::NonCompliant => format!(
            "{} compliance failure(s) must be resolved before binding",
            risk_flags.len()
        ),
        OverallStatus::ReviewRequired => format!(
            "Manual review recommended for {} item(s)",
            review_items.len()
        ),
        OverallStatus::Compliant => "No compliance concerns identified".to_string(),
    };

    AiInsightsSummary {
        headline,
        risk_flags,
        review_items,
        recommendations,
    }
}
