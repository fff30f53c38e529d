//! Risk Engine: ATR-based stop/target and fixed-rupee position sizing.
//!
//! Stop sits 1.5 × ATR against the bias, target 3 × ATR with it, so the
//! reward multiple is fixed at 2.0 whenever the trade is sizeable.
//!
//! ```text
//! risk_per_share = |entry - stop|
//! position_size  = floor(max_risk / risk_per_share)
//! ```
//!
//! Example: entry 100, ATR 10, LONG → stop 85, target 130, RR 2.0;
//! with a ₹50 budget, floor(50 / 15) = 3 shares.

use crate::domain::Bias;
use crate::round2;
use serde::{Deserialize, Serialize};

pub const STOP_ATR_MULTIPLE: f64 = 1.5;
pub const TARGET_ATR_MULTIPLE: f64 = 3.0;

/// Entry, exits and sizing for one candidate. Prices are rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeLevels {
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
    pub risk_reward: f64,
    pub position_size: u64,
    pub risk_per_share: f64,
}

impl TradeLevels {
    /// Not tradeable: every level collapses onto the entry.
    fn flat(entry: f64) -> Self {
        Self {
            entry,
            stop_loss: entry,
            target: entry,
            risk_reward: 0.0,
            position_size: 0,
            risk_per_share: 0.0,
        }
    }

    /// A zero size means the budget cannot cover one share at this volatility.
    pub fn is_tradeable(&self) -> bool {
        self.position_size > 0 && self.risk_reward > 0.0
    }
}

/// Compute levels for `entry` under `bias`, using `atr` as the volatility unit.
///
/// ATR <= 0 (or NaN) and `Bias::None` yield the flat, untradeable result.
pub fn calculate_levels(entry: f64, bias: Bias, atr: f64, max_risk_rupees: f64) -> TradeLevels {
    let display_entry = round2(entry);

    if atr.is_nan() || atr <= 0.0 {
        return TradeLevels::flat(display_entry);
    }

    let (stop_loss, target) = match bias {
        Bias::Long => (
            entry - STOP_ATR_MULTIPLE * atr,
            entry + TARGET_ATR_MULTIPLE * atr,
        ),
        Bias::Short => (
            entry + STOP_ATR_MULTIPLE * atr,
            entry - TARGET_ATR_MULTIPLE * atr,
        ),
        Bias::None => return TradeLevels::flat(display_entry),
    };

    let risk_per_share = (entry - stop_loss).abs();
    if risk_per_share <= 0.0 {
        return TradeLevels {
            entry: display_entry,
            stop_loss: round2(stop_loss),
            target: round2(target),
            risk_reward: 0.0,
            position_size: 0,
            risk_per_share: round2(risk_per_share),
        };
    }

    let risk_reward = round2((target - entry).abs() / risk_per_share);
    let position_size = if max_risk_rupees > 0.0 {
        (max_risk_rupees / risk_per_share).floor() as u64
    } else {
        0
    };

    TradeLevels {
        entry: display_entry,
        stop_loss: round2(stop_loss),
        target: round2(target),
        risk_reward,
        position_size,
        risk_per_share: round2(risk_per_share),
    }
}
