//! Deterministic explanation built only from the request fields.

use super::{ExplainError, ExplanationRequest, Explainer};
use intrascan_core::domain::Bias;

/// Minimum reward multiple worth taking.
const MIN_WORTHWHILE_RR: f64 = 2.0;

/// Fixed confidence disclosed with template text.
const TEMPLATE_CONFIDENCE: u8 = 65;

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExplainer;

impl TemplateExplainer {
    pub fn render(&self, req: &ExplanationRequest) -> String {
        let side = match req.bias {
            Bias::Long => "above",
            Bias::Short => "below",
            Bias::None => "near",
        };
        let volume = match req.volume_ratio {
            Some(ratio) => format!("volume is {ratio:.2}x its recent average, which suggests participation"),
            None => "recent volume has no usable average".to_string(),
        };

        let mut text = format!(
            "{} shows a {} setup with RR {:.2} and position size {}. \
             Price {:.2} is trading {} VWAP {:.2}, and {}. \
             Setup is invalid if price breaks the stop-loss ({:.2}). \
             Target is {:.2}; the most you risk is about Rs {:.0}. \
             Confidence: {}/100. ",
            req.symbol,
            req.bias,
            req.risk_reward,
            req.position_size,
            req.current_price,
            side,
            req.vwap,
            volume,
            req.stop_loss,
            req.target,
            req.max_risk_rupees,
            TEMPLATE_CONFIDENCE,
        );
        if req.risk_reward < MIN_WORTHWHILE_RR {
            text.push_str("Risk-reward is below 2, so avoid this trade. ");
        }
        text.push_str(&format!(
            "Data is delayed by about {} minutes. Verify the live price with your broker before placing this trade.",
            req.data_delay_minutes
        ));
        text
    }
}

impl Explainer for TemplateExplainer {
    fn name(&self) -> &str {
        "template"
    }

    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplainError> {
        Ok(self.render(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explain::sample_request;

    #[test]
    fn mentions_every_required_fact() {
        let text = TemplateExplainer.render(&sample_request());
        assert!(text.starts_with("RELIANCE shows a LONG setup with RR 2.00 and position size 3."));
        assert!(text.contains("stop-loss (2485.00)"));
        assert!(text.contains("above VWAP 2480.50"));
        assert!(text.contains("2.10x"));
        assert!(text.contains("delayed by about 15 minutes"));
        assert!(text.contains("Verify the live price"));
        assert!(!text.contains("avoid"));
    }

    #[test]
    fn low_reward_says_avoid() {
        let mut req = sample_request();
        req.risk_reward = 1.5;
        assert!(TemplateExplainer.render(&req).contains("avoid this trade"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let req = sample_request();
        assert_eq!(TemplateExplainer.render(&req), TemplateExplainer.render(&req));
        assert_eq!(TemplateExplainer.explain(&req).unwrap(), TemplateExplainer.render(&req));
    }
}
