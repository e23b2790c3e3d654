//! OpenAI-compatible chat-completions client used for underwriting narratives.

use super::{InsightsError, InsightsProvider, UnderwritingContext};
use crate::config::InsightsConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You are an auto insurance underwriting assistant. \
Given the quote context, reply with a JSON object containing the string fields \
driverRisk, pricingRationale, underwritingExplanation, improvementSuggestions and narrative. \
Be concise and factual.";

const TEMPERATURE: f32 = 0.2;

/// Blocking client; build and call it off the async runtime.
pub struct ChatCompletionsInsights {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl ChatCompletionsInsights {
    pub fn new(config: &InsightsConfig) -> Result<Self, InsightsError> {
        let api_key = config.api_key.clone().ok_or(InsightsError::Disabled)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| InsightsError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            timeout: config.timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl InsightsProvider for ChatCompletionsInsights {
    fn generate_insights(
        &self,
        context: &UnderwritingContext<'_>,
    ) -> Result<String, InsightsError> {
        let prompt = serde_json::to_string(context)?;
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, "requesting underwriting insights");
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|err| {
                if err.is_timeout() {
                    InsightsError::Transport(format!(
                        "request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    InsightsError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "insights service rejected request");
            return Err(InsightsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|err| InsightsError::Response(err.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| InsightsError::Response("response carried no message content".into()))
    }
}
