//! Compliance and audit checks over the assembled quote.
//!
//! Every check is recorded in `rulesChecked`, passing or not, so the reporting summaries can be
//! recomputed from that list alone.

use super::super::extractor::ExtractedQuote;
use super::super::insights::AiInsights;
use super::super::resolver::{as_flag, as_number, is_blank};
use super::super::underwriting::{Eligibility, UnderwritingResult};
use super::state_compliance::{requirements_for, state_code, StateRequirements};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Longest policy term accepted without review, in days.
const MAX_TERM_DAYS: i64 = 366;
/// Premium increase over the prior term that triggers review, in percent.
const PREMIUM_INCREASE_REVIEW_PCT: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleStatus {
    Pass,
    Warn,
    Fail,
}

impl RuleStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RuleStatus::Pass => "Pass",
            RuleStatus::Warn => "Warn",
            RuleStatus::Fail => "Fail",
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a single compliance rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCheck {
    pub rule: String,
    pub description: String,
    pub status: RuleStatus,
    pub detail: String,
    pub recommendation: Option<String>,
}

impl RuleCheck {
    fn new(rule: &str, description: &str, status: RuleStatus, detail: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            description: description.to_string(),
            status,
            detail: detail.into(),
            recommendation: None,
        }
    }

    fn recommend(mut self, recommendation: &str) -> Self {
        if self.status != RuleStatus::Pass {
            self.recommendation = Some(recommendation.to_string());
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallStatus {
    #[serde(rename = "Compliant")]
    Compliant,
    #[serde(rename = "Review Required")]
    ReviewRequired,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

impl OverallStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OverallStatus::Compliant => "Compliant",
            OverallStatus::ReviewRequired => "Review Required",
            OverallStatus::NonCompliant => "Non-Compliant",
        }
    }

    /// Worst status across a set of checks.
    pub fn from_checks(checks: &[RuleCheck]) -> Self {
        if checks.iter().any(|check| check.status == RuleStatus::Fail) {
            OverallStatus::NonCompliant
        } else if checks.iter().any(|check| check.status == RuleStatus::Warn) {
            OverallStatus::ReviewRequired
        } else {
            OverallStatus::Compliant
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceBlock {
    pub state: Value,
    pub overall_status: OverallStatus,
    pub notes: String,
    pub rules_checked: Vec<RuleCheck>,
}

pub fn build_compliance_block(
    extracted: &ExtractedQuote,
    underwriting: &UnderwritingResult,
    insights: &AiInsights,
) -> ComplianceBlock {
    let state = state_code(&extracted.state)
        .or_else(|| state_code(&underwriting.guidewire.normalized.state))
        .or_else(|| state_code(&underwriting.policy.normalized.state));
    let requirements = state.as_deref().and_then(requirements_for);

    let rules_checked = vec![
        state_identified(state.as_deref()),
        driver_license_on_file(underwriting),
        vin_on_file(underwriting),
        minimum_liability_limits(
            &underwriting.coverage.normalized.liability_limit,
            state.as_deref(),
            requirements,
        ),
        prior_insurance(&extracted.had_prior_insurance),
        documents_provided(&extracted.documents),
        policy_term(
            &underwriting.policy.normalized.effective_date,
            &underwriting.policy.normalized.expiration_date,
        ),
        premium_change(&extracted.previous_premium, &extracted.current_premium),
        underwriting_eligibility(underwriting),
        ai_review_available(insights),
    ];

    let overall_status = OverallStatus::from_checks(&rules_checked);
    let attention = rules_checked
        .iter()
        .filter(|check| check.status != RuleStatus::Pass)
        .count();
    let notes = match attention {
        0 => format!("all {} checks passed", rules_checked.len()),
        n => format!("{n} of {} checks need attention", rules_checked.len()),
    };

    ComplianceBlock {
        state: state.map(Value::String).unwrap_or(Value::Null),
        overall_status,
        notes,
        rules_checked,
    }
}

fn state_identified(state: Option<&str>) -> RuleCheck {
    const RULE: &str = "state_identified";
    const DESCRIPTION: &str = "Rating state identified";
    match state {
        Some(code) => RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Pass,
            format!("rating state {code}"),
        ),
        None => RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Fail,
            "rating state could not be determined",
        )
        .recommend("Confirm the garaging state before rating"),
    }
}

fn driver_license_on_file(underwriting: &UnderwritingResult) -> RuleCheck {
    const RULE: &str = "driver_license_on_file";
    const DESCRIPTION: &str = "Every driver has a license number";
    let drivers = &underwriting.drivers;
    let missing = drivers
        .iter()
        .filter(|driver| is_blank(&driver.normalized.license_number))
        .count();

    let check = if drivers.is_empty() {
        RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Warn, "no drivers listed")
    } else if missing > 0 {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Fail,
            format!("{missing} of {} drivers missing a license number", drivers.len()),
        )
    } else {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Pass,
            format!("{} drivers licensed", drivers.len()),
        )
    };
    check.recommend("Collect license numbers for every listed driver")
}

fn vin_on_file(underwriting: &UnderwritingResult) -> RuleCheck {
    const RULE: &str = "vin_on_file";
    const DESCRIPTION: &str = "Every vehicle has a VIN";
    let vehicles = &underwriting.vehicles;
    let missing = vehicles
        .iter()
        .filter(|vehicle| is_blank(&vehicle.normalized.vin))
        .count();

    let check = if vehicles.is_empty() {
        RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Warn, "no vehicles listed")
    } else if missing > 0 {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Fail,
            format!("{missing} of {} vehicles missing a VIN", vehicles.len()),
        )
    } else {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Pass,
            format!("{} vehicles identified", vehicles.len()),
        )
    };
    check.recommend("Obtain the VIN for each vehicle on the policy")
}

fn minimum_liability_limits(
    limit: &Value,
    state: Option<&str>,
    requirements: Option<&StateRequirements>,
) -> RuleCheck {
    const RULE: &str = "minimum_liability_limits";
    const DESCRIPTION: &str = "Liability limits meet state minimums";
    const ADVICE: &str = "Raise liability limits to at least the state minimum";

    let Some(requirements) = requirements else {
        let detail = match state {
            Some(code) => format!("no statutory minimum on file for {code}"),
            None => "state unknown, minimums not verified".to_string(),
        };
        return RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Warn, detail)
            .recommend("Verify liability limits manually");
    };

    let Some(quoted) = parse_limits(limit) else {
        return RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Warn,
            "liability limit missing or unreadable",
        )
        .recommend(ADVICE);
    };

    let minimum = [
        requirements.bodily_injury_per_person,
        requirements.bodily_injury_per_accident,
        requirements.property_damage,
    ];
    let meets = quoted
        .iter()
        .zip(minimum)
        .all(|(quoted, minimum)| *quoted >= f64::from(minimum));

    if meets {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Pass,
            format!("quoted limits meet {}", requirements.minimum_liability()),
        )
    } else {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Fail,
            format!(
                "quoted limits below state minimum {}",
                requirements.minimum_liability()
            ),
        )
        .recommend(ADVICE)
    }
}

/// Split-limit (`25/50/25`, thousands or dollars) or combined single limit, in thousands.
pub(crate) fn parse_limits(limit: &Value) -> Option<[f64; 3]> {
    let thousands = |amount: f64| if amount >= 1_000.0 { amount / 1_000.0 } else { amount };

    match limit {
        Value::String(text) if text.contains('/') => {
            let parts: Vec<f64> = text
                .split('/')
                .map(|part| {
                    let digits = part.trim().to_ascii_lowercase().replace('k', "");
                    as_number(&Value::String(digits))
                })
                .collect::<Option<Vec<_>>>()?;
            match parts.as_slice() {
                [per_person, per_accident, property] => Some([
                    thousands(*per_person),
                    thousands(*per_accident),
                    thousands(*property),
                ]),
                _ => None,
            }
        }
        other => as_number(other)
            .filter(|amount| *amount > 0.0)
            .map(|amount| [thousands(amount); 3]),
    }
}

fn prior_insurance(had_prior: &Value) -> RuleCheck {
    const RULE: &str = "prior_insurance";
    const DESCRIPTION: &str = "Continuous prior insurance";
    let check = match had_prior {
        Value::Null => RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Warn,
            "prior insurance not reported",
        ),
        value if as_flag(value) => {
            RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Pass, "prior insurance reported")
        }
        _ => RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Warn, "no prior insurance on record"),
    };
    check.recommend("Request proof of prior coverage")
}

fn documents_provided(documents: &[Value]) -> RuleCheck {
    const RULE: &str = "documents_provided";
    const DESCRIPTION: &str = "Supporting documents attached";
    if documents.is_empty() {
        RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Warn, "no supporting documents attached")
            .recommend("Attach license and registration copies")
    } else {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Pass,
            format!("{} documents attached", documents.len()),
        )
    }
}

fn policy_term(effective: &Value, expiration: &Value) -> RuleCheck {
    const RULE: &str = "policy_term";
    const DESCRIPTION: &str = "Policy term dates are valid";
    const ADVICE: &str = "Correct the policy effective and expiration dates";

    let (Some(start), Some(end)) = (parse_date(effective), parse_date(expiration)) else {
        return RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Warn,
            "policy dates missing or unreadable",
        )
        .recommend(ADVICE);
    };

    let days = (end - start).num_days();
    let check = if days <= 0 {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Fail,
            format!("expiration {end} is not after effective {start}"),
        )
    } else if days > MAX_TERM_DAYS {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Warn,
            format!("term of {days} days exceeds twelve months"),
        )
    } else {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Pass,
            format!("{start} to {end} ({days} days)"),
        )
    };
    check.recommend(ADVICE)
}

pub(crate) fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(text, "%m/%d/%Y").ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

fn premium_change(previous: &Value, current: &Value) -> RuleCheck {
    const RULE: &str = "premium_change";
    const DESCRIPTION: &str = "Premium change within tolerance";

    let (Some(previous), Some(current)) = (as_number(previous), as_number(current)) else {
        return RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Pass,
            "no prior premium to compare",
        );
    };
    if previous <= 0.0 {
        return RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Warn,
            "prior premium is not a positive amount",
        )
        .recommend("Verify the prior term premium");
    }

    let change = (current - previous) / previous * 100.0;
    if change > PREMIUM_INCREASE_REVIEW_PCT {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Warn,
            format!("premium increases {change:.1}% over the prior term"),
        )
        .recommend("Document the rating factors behind the increase")
    } else {
        RuleCheck::new(
            RULE,
            DESCRIPTION,
            RuleStatus::Pass,
            format!("premium change {change:+.1}%"),
        )
    }
}

fn underwriting_eligibility(underwriting: &UnderwritingResult) -> RuleCheck {
    const RULE: &str = "underwriting_eligibility";
    const DESCRIPTION: &str = "Quote meets underwriting guidelines";
    let reasons = if underwriting.eligibility_reasons.is_empty() {
        "no guideline exceptions".to_string()
    } else {
        underwriting.eligibility_reasons.join("; ")
    };

    match underwriting.eligibility {
        Eligibility::Eligible => RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Pass, reasons),
        Eligibility::Referred => RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Warn, reasons)
            .recommend("Route to an underwriter for referral review"),
        Eligibility::Ineligible => RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Fail, reasons)
            .recommend("Decline or restructure the quote"),
    }
}

fn ai_review_available(insights: &AiInsights) -> RuleCheck {
    const RULE: &str = "ai_review_available";
    const DESCRIPTION: &str = "AI underwriting review completed";
    if insights.is_empty() {
        RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Warn, "AI insights unavailable")
            .recommend("Complete a manual underwriting review")
    } else {
        RuleCheck::new(RULE, DESCRIPTION, RuleStatus::Pass, "AI insights attached")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_split_and_single_limits() {
        assert_eq!(parse_limits(&json!("25/50/25")), Some([25.0, 50.0, 25.0]));
        assert_eq!(
            parse_limits(&json!("100000/300000/50000")),
            Some([100.0, 300.0, 50.0])
        );
        assert_eq!(parse_limits(&json!("50k/100k/25k")), Some([50.0, 100.0, 25.0]));
        assert_eq!(parse_limits(&json!(300000)), Some([300.0, 300.0, 300.0]));
        assert_eq!(parse_limits(&json!("25/50")), None);
        assert_eq!(parse_limits(&Value::Null), None);
    }

    #[test]
    fn liability_below_minimum_fails() {
        let ca = requirements_for("CA");
        let check = minimum_liability_limits(&json!("15/30/5"), Some("CA"), ca);
        assert_eq!(check.status, RuleStatus::Fail);
        assert!(check.recommendation.is_some());

        let check = minimum_liability_limits(&json!("100/300/100"), Some("CA"), ca);
        assert_eq!(check.status, RuleStatus::Pass);
        assert_eq!(check.recommendation, None);
    }

    #[test]
    fn policy_term_checks_ordering_and_length() {
        let check = policy_term(&json!("2025-01-01"), &json!("2025-07-01"));
        assert_eq!(check.status, RuleStatus::Pass);

        let check = policy_term(&json!("2025-07-01"), &json!("2025-01-01"));
        assert_eq!(check.status, RuleStatus::Fail);

        let check = policy_term(&json!("01/01/2025"), &json!("2026-06-01T00:00:00Z"));
        assert_eq!(check.status, RuleStatus::Warn);

        let check = policy_term(&Value::Null, &json!("2025-01-01"));
        assert_eq!(check.status, RuleStatus::Warn);
    }

    #[test]
    fn premium_increase_over_threshold_warns() {
        assert_eq!(
            premium_change(&json!(1000), &json!(1300)).status,
            RuleStatus::Warn
        );
        assert_eq!(
            premium_change(&json!("1,000"), &json!(1100)).status,
            RuleStatus::Pass
        );
        assert_eq!(premium_change(&Value::Null, &json!(1100)).status, RuleStatus::Pass);
        assert_eq!(premium_change(&json!(0), &json!(1100)).status, RuleStatus::Warn);
    }

    #[test]
    fn overall_status_takes_worst_check() {
        let pass = RuleCheck::new("a", "a", RuleStatus::Pass, "");
        let warn = RuleCheck::new("b", "b", RuleStatus::Warn, "");
        let fail = RuleCheck::new("c", "c", RuleStatus::Fail, "");

        assert_eq!(OverallStatus::from_checks(&[pass.clone()]), OverallStatus::Compliant);
        assert_eq!(
            OverallStatus::from_checks(&[pass.clone(), warn.clone()]),
            OverallStatus::ReviewRequired
        );
        assert_eq!(
            OverallStatus::from_checks(&[pass, warn, fail]),
            OverallStatus::NonCompliant
        );
    }
}
