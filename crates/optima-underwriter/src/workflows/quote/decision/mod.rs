//! Assembly of the final decision document from the extraction and underwriting stages.

mod compliance;
mod state_compliance;
mod summaries;

pub use compliance::{build_compliance_block, ComplianceBlock, OverallStatus, RuleCheck, RuleStatus};
pub use state_compliance::{
    build_state_compliance, requirements_for, StateComplianceBlock, StateRequirements,
};
pub use summaries::{
    build_executive_summary, build_summary, generate_ai_insights, generate_underwriting_summary,
    AiInsightsSummary, DecisionSummary, ExecutiveSummary, RiskLevel, UnderwritingSummary,
};

use super::domain::{CanonicalDriver, CanonicalPolicy, CanonicalVehicle};
use super::extractor::{ExtractedQuote, ExtractedRecord};
use super::insights::{parse_ai_output, AiInsights, InsightsProvider, UnderwritingContext};
use super::underwriting::{Eligibility, SummaryBlock, UnderwritingDetails, UnderwritingResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Terminal artifact of the pipeline. Every member is always serialized; consumers check for
/// empty or null values, never for missing members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDocument {
    pub customer: ExtractedRecord,
    pub drivers: Vec<ExtractedRecord>,
    pub vehicles: Vec<ExtractedRecord>,
    pub coverage: ExtractedRecord,
    pub policy: CanonicalPolicy,
    pub guidewire: ExtractedRecord,
    pub risk_score: u8,
    pub underwriting: UnderwritingBlock,
    pub ai_insights: AiInsights,
    pub summary: DecisionSummary,
    pub executive_summary: ExecutiveSummary,
    pub compliance: ComplianceBlock,
    pub state_compliance: StateComplianceBlock,
    pub underwriting_summary: UnderwritingSummary,
    pub ai_insights_summary: AiInsightsSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingBlock {
    pub vehicles: Vec<CanonicalVehicle>,
    pub drivers: Vec<CanonicalDriver>,
    pub risk_score: u8,
    pub eligibility: Eligibility,
    pub details: UnderwritingDetails,
    pub summary: SummaryBlock,
}

/// Reduced projection returned to callers that only need the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionReceipt {
    pub status: String,
    pub risk_score: u8,
}

impl DecisionDocument {
    pub fn receipt(&self) -> DecisionReceipt {
        DecisionReceipt {
            status: "received".to_string(),
            risk_score: self.risk_score,
        }
    }
}

/// Builds decision documents, consulting the insights provider once per decision.
pub struct DecisionBuilder<P: ?Sized> {
    insights: Arc<P>,
}

impl<P> DecisionBuilder<P>
where
    P: InsightsProvider + ?Sized,
{
    pub fn new(insights: Arc<P>) -> Self {
        Self { insights }
    }

    pub fn build_decision(
        &self,
        extracted: &ExtractedQuote,
        underwriting: &UnderwritingResult,
    ) -> DecisionDocument {
        let context = UnderwritingContext {
            customer: &underwriting.customer,
            coverage: &underwriting.coverage,
            vehicles: &underwriting.vehicles,
            drivers: &underwriting.drivers,
        };
        let ai_output = match self.insights.generate_insights(&context) {
            Ok(output) => Some(output),
            Err(err) => {
                warn!(error = %err, "ai insights unavailable, continuing without them");
                None
            }
        };
        let ai_insights = parse_ai_output(ai_output.as_deref());

        let risk_score = underwriting.risk_score;
        let summary = build_summary(underwriting);
        let executive_summary = build_executive_summary(&summary);
        let compliance = build_compliance_block(extracted, underwriting, &ai_insights);
        let state_compliance = build_state_compliance(extracted);
        let underwriting_summary = generate_underwriting_summary(&compliance.rules_checked);
        let ai_insights_summary = generate_ai_insights(&compliance.rules_checked);

        debug!(
            risk_score,
            overall_status = %compliance.overall_status,
            ai_insights = !ai_insights.is_empty(),
            "decision assembled"
        );

        DecisionDocument {
            customer: extracted.customer.clone(),
            drivers: extracted.drivers.clone(),
            vehicles: extracted.vehicles.clone(),
            coverage: extracted.coverage.clone(),
            policy: underwriting.policy.clone(),
            guidewire: extracted.guidewire.clone(),
            risk_score,
            underwriting: UnderwritingBlock {
                vehicles: underwriting.vehicles.clone(),
                drivers: underwriting.drivers.clone(),
                risk_score,
                eligibility: underwriting.eligibility,
                details: underwriting.details.clone(),
                summary: underwriting.summary.clone(),
            },
            ai_insights,
            summary,
            executive_summary,
            compliance,
            state_compliance,
            underwriting_summary,
            ai_insights_summary,
        }
    }
}
