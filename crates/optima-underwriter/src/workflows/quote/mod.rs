//! Quote intake: schema normalization of insurer payloads, underwriting, and assembly of the
//! decision document handed to report renderers and API callers.
//!
//! Stages run in a fixed order on one thread per request: [`extractor`] and [`normalizer`]
//! read the raw payload, [`underwriting`] scores the normalized quote, and [`decision`]
//! consults the insights provider and assembles the final document.

pub mod decision;
pub mod domain;
pub mod extractor;
pub mod insights;
pub mod normalizer;
pub mod resolver;
pub mod router;
pub mod service;
pub mod underwriting;

#[cfg(test)]
mod tests;

pub use decision::{
    DecisionBuilder, DecisionDocument, DecisionReceipt, OverallStatus, RuleCheck, RuleStatus,
    UnderwritingBlock,
};
pub use domain::{
    CanonicalCoverage, CanonicalCustomer, CanonicalDriver, CanonicalEntity, CanonicalPolicy,
    CanonicalQuote, CanonicalVehicle, PayloadError, QuotePayload,
};
pub use extractor::{extract, ExtractedQuote, ExtractedRecord};
pub use insights::{
    parse_ai_output, provider_from_config, AiInsights, ChatCompletionsInsights, DisabledInsights,
    InsightsError, InsightsProvider, StaticInsights, UnderwritingContext,
};
pub use normalizer::normalize;
pub use resolver::{resolve_list, resolve_value, FieldDefault, FieldRule, Lookup};
pub use router::quote_router;
pub use service::QuoteDecisionService;
pub use underwriting::{
    calculate_risk_score, determine_eligibility, Eligibility, RiskAssessment, UnderwritingConfig,
    UnderwritingEngine, UnderwritingResult,
};
