//! Risk scoring, eligibility and the underwriting projections built on normalized entities.
//! Everything here is a pure function of its inputs and the [`UnderwritingConfig`].

mod config;
mod details;
mod policy;
mod rules;
mod summary;

pub use config::UnderwritingConfig;
pub use details::{
    build_underwriting_details, DriverDetail, RulesResult, UnderwritingDetails, VehicleDetail,
    DETAIL_ELIGIBILITY, RULES_PLACEHOLDER_STATUS,
};
pub use policy::{Eligibility, EligibilityDecision};
pub use summary::{
    build_summary_block, SummaryBlock, SummaryCustomer, SummaryDriver, SummaryVehicle,
};

use super::domain::{
    CanonicalCoverage, CanonicalCustomer, CanonicalDriver, CanonicalGuidewire, CanonicalPolicy,
    CanonicalQuote, CanonicalVehicle,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Factor contributing to the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Base,
    Accidents,
    Violations,
    MajorViolation,
    DriverAge,
    Mileage,
    Deductible,
    StateSurcharge,
}

/// Discrete contribution to a risk score, kept for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: RiskFactor,
    pub points: i32,
    pub notes: String,
}

/// Risk score (0 to 100, higher is riskier) with its contributing components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}

/// Everything the decision builder consumes from underwriting, including the normalized
/// entities it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingResult {
    pub customer: CanonicalCustomer,
    pub drivers: Vec<CanonicalDriver>,
    pub vehicles: Vec<CanonicalVehicle>,
    pub coverage: CanonicalCoverage,
    pub policy: CanonicalPolicy,
    pub guidewire: CanonicalGuidewire,
    pub risk_score: u8,
    pub eligibility: Eligibility,
    pub eligibility_reasons: Vec<String>,
    pub summary: SummaryBlock,
    pub details: UnderwritingDetails,
}

/// Stateless engine applying one configuration to normalized quotes.
#[derive(Debug, Clone, Default)]
pub struct UnderwritingEngine {
    config: UnderwritingConfig,
}

impl UnderwritingEngine {
    pub fn new(config: UnderwritingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UnderwritingConfig {
        &self.config
    }

    pub fn assess_risk(
        &self,
        customer: &CanonicalCustomer,
        drivers: &[CanonicalDriver],
        vehicles: &[CanonicalVehicle],
        coverage: &CanonicalCoverage,
        guidewire: &CanonicalGuidewire,
    ) -> RiskAssessment {
        let (components, score) = rules::score_quote(
            customer,
            drivers,
            vehicles,
            coverage,
            guidewire,
            &self.config,
        );
        RiskAssessment { score, components }
    }

    pub fn calculate_risk_score(
        &self,
        customer: &CanonicalCustomer,
        drivers: &[CanonicalDriver],
        vehicles: &[CanonicalVehicle],
        coverage: &CanonicalCoverage,
        guidewire: &CanonicalGuidewire,
    ) -> u8 {
        self.assess_risk(customer, drivers, vehicles, coverage, guidewire)
            .score
    }

    pub fn classify(
        &self,
        drivers: &[CanonicalDriver],
        vehicles: &[CanonicalVehicle],
    ) -> EligibilityDecision {
        policy::decide_eligibility(drivers, vehicles, &self.config)
    }

    pub fn determine_eligibility(
        &self,
        drivers: &[CanonicalDriver],
        vehicles: &[CanonicalVehicle],
    ) -> Eligibility {
        self.classify(drivers, vehicles).eligibility
    }

    /// Run every underwriting step over a normalized quote.
    pub fn underwrite(&self, quote: &CanonicalQuote, base_premium: &Value) -> UnderwritingResult {
        let assessment = self.assess_risk(
            &quote.customer,
            &quote.drivers,
            &quote.vehicles,
            &quote.coverage,
            &quote.guidewire,
        );
        let decision = self.classify(&quote.drivers, &quote.vehicles);

        let summary = build_summary_block(
            &quote.customer,
            &quote.drivers,
            &quote.vehicles,
            assessment.score,
            base_premium,
            decision.eligibility,
        );
        let details = build_underwriting_details(
            &quote.drivers,
            &quote.vehicles,
            assessment.score,
            base_premium,
        )
        .with_risk_factors(assessment.components);

        debug!(
            risk_score = assessment.score,
            eligibility = %decision.eligibility,
            reasons = decision.reasons.len(),
            "quote underwritten"
        );

        UnderwritingResult {
            customer: quote.customer.clone(),
            drivers: quote.drivers.clone(),
            vehicles: quote.vehicles.clone(),
            coverage: quote.coverage.clone(),
            policy: quote.policy.clone(),
            guidewire: quote.guidewire.clone(),
            risk_score: assessment.score,
            eligibility: decision.eligibility,
            eligibility_reasons: decision.reasons,
            summary,
            details,
        }
    }
}

/// [`UnderwritingEngine::calculate_risk_score`] under the standard configuration.
pub fn calculate_risk_score(
    customer: &CanonicalCustomer,
    drivers: &[CanonicalDriver],
    vehicles: &[CanonicalVehicle],
    coverage: &CanonicalCoverage,
    guidewire: &CanonicalGuidewire,
) -> u8 {
    UnderwritingEngine::default().calculate_risk_score(
        customer, drivers, vehicles, coverage, guidewire,
    )
}

/// [`UnderwritingEngine::determine_eligibility`] under the standard configuration.
pub fn determine_eligibility(
    drivers: &[CanonicalDriver],
    vehicles: &[CanonicalVehicle],
) -> Eligibility {
    UnderwritingEngine::default().determine_eligibility(drivers, vehicles)
}
