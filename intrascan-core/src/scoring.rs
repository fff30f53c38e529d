//! Scoring Engine: additive quality score over independent alignment signals.
//!
//! | signal                                   | points |
//! |------------------------------------------|--------|
//! | price on the bias side of VWAP           | 25     |
//! | volume spike                             | 25     |
//! | structure agrees with bias               | 25     |
//! | risk-reward >= 2.5                       | 15     |
//! | market trend does not oppose bias        | 10     |

use crate::domain::{Bias, MarketTrend, StructureLabel};

pub const VWAP_POINTS: u8 = 25;
pub const VOLUME_POINTS: u8 = 25;
pub const STRUCTURE_POINTS: u8 = 25;
pub const RISK_REWARD_POINTS: u8 = 15;
pub const TREND_POINTS: u8 = 10;

/// Risk-reward at or above this earns the RR bonus.
pub const BONUS_RISK_REWARD: f64 = 2.5;

pub const MAX_SCORE: u8 =
    VWAP_POINTS + VOLUME_POINTS + STRUCTURE_POINTS + RISK_REWARD_POINTS + TREND_POINTS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub bias: Bias,
    pub price: f64,
    pub vwap: f64,
    pub volume_spike: bool,
    pub structure: StructureLabel,
    pub risk_reward: f64,
    pub market_trend: MarketTrend,
}

/// Score a candidate in `0..=100`. `Bias::None` never earns the directional points.
pub fn score_setup(inputs: &ScoreInputs) -> u8 {
    let mut score = 0;

    let vwap_side = match inputs.bias {
        Bias::Long => inputs.price > inputs.vwap,
        Bias::Short => inputs.price < inputs.vwap,
        Bias::None => false,
    };
    if vwap_side {
        score += VWAP_POINTS;
    }

    if inputs.volume_spike {
        score += VOLUME_POINTS;
    }

    if inputs.bias.aligned_label() == Some(inputs.structure) {
        score += STRUCTURE_POINTS;
    }

    if inputs.risk_reward >= BONUS_RISK_REWARD {
        score += RISK_REWARD_POINTS;
    }

    if let Some(opposing) = inputs.bias.opposing_label() {
        if inputs.market_trend != opposing {
            score += TREND_POINTS;
        }
    }

    score
}
