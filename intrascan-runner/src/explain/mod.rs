//! Explanation strategies: plain-language text for a finished setup.
//!
//! Two implementations of [`Explainer`]:
//! - [`TemplateExplainer`]: deterministic text from the setup fields, no I/O
//! - [`RemoteExplainer`]: Anthropic Messages API
//!
//! [`FallbackExplainer`] is what callers hold. It tries the remote strategy
//! when one is configured and substitutes the template on any failure, so
//! `explain` always returns text.

pub mod remote;
pub mod template;

pub use remote::RemoteExplainer;
pub use template::TemplateExplainer;

use intrascan_core::domain::{Bias, MarketTrend, StructureLabel};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::result::Setup;

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("no API key configured")]
    MissingCredentials,

    #[error("request failed: {0}")]
    Network(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response contained no text")]
    EmptyResponse,

    #[error("could not parse response: {0}")]
    Parse(String),
}

/// Flat record handed to an explainer. Carries no bar history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationRequest {
    pub symbol: String,
    pub bias: Bias,
    pub current_price: f64,
    pub vwap: f64,
    pub volume_ratio: Option<f64>,
    pub structure: StructureLabel,
    pub atr: f64,
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
    pub risk_reward: f64,
    pub position_size: u64,
    pub max_risk_rupees: f64,
    pub market_trend: MarketTrend,
    pub data_delay_minutes: u32,
}

impl ExplanationRequest {
    pub fn from_setup(setup: &Setup) -> Self {
        Self {
            symbol: setup.name.clone(),
            bias: setup.bias,
            current_price: setup.current_price,
            vwap: setup.vwap,
            volume_ratio: setup.volume_ratio,
            structure: setup.structure,
            atr: setup.atr,
            entry: setup.levels.entry,
            stop_loss: setup.levels.stop_loss,
            target: setup.levels.target,
            risk_reward: setup.levels.risk_reward,
            position_size: setup.levels.position_size,
            max_risk_rupees: setup.max_risk_rupees,
            market_trend: setup.market_trend,
            data_delay_minutes: setup.data_delay_minutes,
        }
    }
}

/// Turns a setup summary into readable text.
pub trait Explainer: Send + Sync {
    fn name(&self) -> &str;

    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplainError>;
}

/// Optional remote primary with a template fallback.
pub struct FallbackExplainer {
    primary: Option<Box<dyn Explainer>>,
    fallback: TemplateExplainer,
}

impl FallbackExplainer {
    /// Template only.
    pub fn template_only() -> Self {
        Self {
            primary: None,
            fallback: TemplateExplainer,
        }
    }

    pub fn with_primary(primary: Box<dyn Explainer>) -> Self {
        Self {
            primary: Some(primary),
            fallback: TemplateExplainer,
        }
    }

    /// Remote primary when `ANTHROPIC_API_KEY` is set, template only otherwise.
    pub fn from_env() -> Self {
        match RemoteExplainer::from_env() {
            Ok(remote) => Self::with_primary(Box::new(remote)),
            Err(e) => {
                tracing::debug!(error = %e, "remote explanations disabled");
                Self::template_only()
            }
        }
    }

    /// Name of the strategy tried first.
    pub fn primary_name(&self) -> &str {
        self.primary
            .as_ref()
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    pub fn explain(&self, request: &ExplanationRequest) -> String {
        if let Some(primary) = &self.primary {
            match primary.explain(request) {
                Ok(text) => return text,
                Err(e) => warn!(
                    explainer = primary.name(),
                    symbol = %request.symbol,
                    error = %e,
                    "explanation failed, using template"
                ),
            }
        }
        self.fallback.render(request)
    }
}

#[cfg(test)]
pub(crate) fn sample_request() -> ExplanationRequest {
    ExplanationRequest {
        symbol: "RELIANCE".into(),
        bias: Bias::Long,
        current_price: 2500.0,
        vwap: 2480.5,
        volume_ratio: Some(2.1),
        structure: StructureLabel::Bullish,
        atr: 10.0,
        entry: 2500.0,
        stop_loss: 2485.0,
        target: 2530.0,
        risk_reward: 2.0,
        position_size: 3,
        max_risk_rupees: 50.0,
        market_trend: StructureLabel::Bullish,
        data_delay_minutes: 15,
    }
}
