use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::decision::{DecisionBuilder, DecisionDocument};
use super::domain::{CanonicalQuote, PayloadError, QuotePayload};
use super::extractor::extract;
use super::insights::InsightsProvider;
use super::normalizer::normalize;
use super::underwriting::{UnderwritingConfig, UnderwritingEngine};

/// Service running the full quote pipeline: extract, normalize, underwrite, then assemble the
/// decision. Holds no per-request state, so one instance serves concurrent requests.
pub struct QuoteDecisionService<P: ?Sized> {
    engine: Arc<UnderwritingEngine>,
    builder: DecisionBuilder<P>,
}

impl<P> QuoteDecisionService<P>
where
    P: InsightsProvider + ?Sized + 'static,
{
    pub fn new(insights: Arc<P>) -> Self {
        Self::with_config(insights, UnderwritingConfig::default())
    }

    pub fn with_config(insights: Arc<P>, config: UnderwritingConfig) -> Self {
        Self {
            engine: Arc::new(UnderwritingEngine::new(config)),
            builder: DecisionBuilder::new(insights),
        }
    }

    pub fn engine(&self) -> &UnderwritingEngine {
        &self.engine
    }

    /// Run the pipeline over an arbitrary JSON document. Only a non-object top level fails.
    pub fn decide(&self, payload: Value) -> Result<DecisionDocument, PayloadError> {
        let payload = QuotePayload::from_value(payload)?;
        Ok(self.decide_payload(&payload))
    }

    pub fn decide_payload(&self, payload: &QuotePayload) -> DecisionDocument {
        let extracted = extract(payload);
        let canonical = normalize(payload);
        let underwriting = self
            .engine
            .underwrite(&canonical, &extracted.base_premium());
        let document = self.builder.build_decision(&extracted, &underwriting);

        info!(
            risk_score = document.risk_score,
            eligibility = %document.underwriting.eligibility,
            compliance = %document.compliance.overall_status,
            "quote decision produced"
        );
        document
    }

    /// Map a payload into the canonical schema without underwriting it.
    pub fn normalize(&self, payload: Value) -> Result<CanonicalQuote, PayloadError> {
        let payload = QuotePayload::from_value(payload)?;
        Ok(normalize(&payload))
    }
}
