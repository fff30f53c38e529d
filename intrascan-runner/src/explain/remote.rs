//! Anthropic Messages API explainer (blocking).

use super::{ExplainError, ExplanationRequest, Explainer};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 400;
const TEMPERATURE: f64 = 0.2;

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const MODEL_ENV: &str = "INTRASCAN_EXPLAIN_MODEL";

pub struct RemoteExplainer {
    client: Client,
    base_url: String,
    model: String,
}

impl RemoteExplainer {
    pub fn new(api_key: &str) -> Result<Self, ExplainError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: impl Into<String>) -> Result<Self, ExplainError> {
        if api_key.trim().is_empty() {
            return Err(ExplainError::MissingCredentials);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|_| ExplainError::MissingCredentials)?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ExplainError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Build from `ANTHROPIC_API_KEY`, honoring `INTRASCAN_EXPLAIN_MODEL` if set.
    pub fn from_env() -> Result<Self, ExplainError> {
        let key = std::env::var(API_KEY_ENV).map_err(|_| ExplainError::MissingCredentials)?;
        let explainer = Self::new(&key)?;
        Ok(match std::env::var(MODEL_ENV) {
            Ok(model) if !model.trim().is_empty() => explainer.with_model(model),
            _ => explainer,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Conservative-coach instructions followed by the trade as JSON.
pub fn build_prompt(request: &ExplanationRequest) -> Result<String, ExplainError> {
    let trade_json =
        serde_json::to_string_pretty(request).map_err(|e| ExplainError::Parse(e.to_string()))?;
    Ok(format!(
        "You are a conservative intraday trading coach. Explain this JSON in simple language for \
         a beginner. Follow strict rules: never guarantee profit, remind them to verify the live \
         price with their broker, mention the {delay}-minute data delay, validate the risk-reward, \
         explain VWAP and volume, state the invalidation level, put capital preservation first, \
         and give a confidence between 60 and 75. If risk-reward is below 2, explicitly say to \
         avoid the trade.\n\nTRADE_JSON:\n{trade_json}",
        delay = request.data_delay_minutes,
    ))
}

impl Explainer for RemoteExplainer {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplainError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![Message {
                role: "user",
                content: build_prompt(request)?,
            }],
        };

        let url = format!("{}/v1/messages", self.base_url);
        debug!(symbol = %request.symbol, model = %self.model, "requesting explanation");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| ExplainError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExplainError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .map_err(|e| ExplainError::Parse(e.to_string()))?;
        extract_text(&parsed)
    }
}

fn extract_text(response: &MessagesResponse) -> Result<String, ExplainError> {
    let text = response
        .content
        .iter()
        .filter(|c| c.content_type == "text")
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("");
    if text.trim().is_empty() {
        Err(ExplainError::EmptyResponse)
    } else {
        Ok(text)
    }
}

// ── Messages API types ──

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}
