//! The AI-insights collaborator and the parser that turns its free-form output into the fixed
//! insight fields.

mod client;
mod parser;

pub use client::ChatCompletionsInsights;
pub use parser::parse_ai_output;

use super::domain::{CanonicalCoverage, CanonicalCustomer, CanonicalDriver, CanonicalVehicle};
use crate::config::InsightsConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Minimal underwriting view submitted to the insights service.
#[derive(Debug, Clone, Serialize)]
pub struct UnderwritingContext<'a> {
    pub customer: &'a CanonicalCustomer,
    pub coverage: &'a CanonicalCoverage,
    pub vehicles: &'a [CanonicalVehicle],
    pub drivers: &'a [CanonicalDriver],
}

/// Anything that can turn an underwriting context into narrative text. Called once per
/// decision, synchronously; failures are absorbed by the decision builder.
pub trait InsightsProvider: Send + Sync {
    fn generate_insights(
        &self,
        context: &UnderwritingContext<'_>,
    ) -> Result<String, InsightsError>;
}

impl<T: InsightsProvider + ?Sized> InsightsProvider for Arc<T> {
    fn generate_insights(
        &self,
        context: &UnderwritingContext<'_>,
    ) -> Result<String, InsightsError> {
        (**self).generate_insights(context)
    }
}

impl<T: InsightsProvider + ?Sized> InsightsProvider for Box<T> {
    fn generate_insights(
        &self,
        context: &UnderwritingContext<'_>,
    ) -> Result<String, InsightsError> {
        (**self).generate_insights(context)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InsightsError {
    #[error("insights service is not configured")]
    Disabled,
    #[error("insights request failed: {0}")]
    Transport(String),
    #[error("insights service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("insights response could not be read: {0}")]
    Response(String),
    #[error("underwriting context could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Provider used when no API key is configured. Every call reports [`InsightsError::Disabled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledInsights;

impl InsightsProvider for DisabledInsights {
    fn generate_insights(
        &self,
        _context: &UnderwritingContext<'_>,
    ) -> Result<String, InsightsError> {
        Err(InsightsError::Disabled)
    }
}

/// Fixed-response provider for demos and tests.
#[derive(Debug, Clone)]
pub struct StaticInsights {
    response: Result<String, String>,
}

impl StaticInsights {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            response: Err(reason.into()),
        }
    }
}

impl InsightsProvider for StaticInsights {
    fn generate_insights(
        &self,
        _context: &UnderwritingContext<'_>,
    ) -> Result<String, InsightsError> {
        self.response.clone().map_err(InsightsError::Transport)
    }
}

/// Pick the provider for a configuration. Must run outside an async context because the HTTP
/// client is blocking.
pub fn provider_from_config(config: &InsightsConfig) -> Arc<dyn InsightsProvider> {
    if !config.enabled() {
        return Arc::new(DisabledInsights);
    }

    match ChatCompletionsInsights::new(config) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            warn!(error = %err, "insights client unavailable, continuing without insights");
            Arc::new(DisabledInsights)
        }
    }
}

/// The four fixed insight fields plus a narrative. Any field the service did not supply, or
/// that could not be parsed, is `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsights {
    pub driver_risk: Option<String>,
    pub pricing_rationale: Option<String>,
    pub underwriting_explanation: Option<String>,
    pub improvement_suggestions: Option<String>,
    pub narrative: Option<String>,
}

impl AiInsights {
    pub fn is_empty(&self) -> bool {
        self.driver_risk.is_none()
            && self.pricing_rationale.is_none()
            && self.underwriting_explanation.is_none()
            && self.improvement_suggestions.is_none()
            && self.narrative.is_none()
    }
}
