//! Scan result records: per-symbol setups, skip reasons, and the aggregate.

use intrascan_core::domain::{Bias, MarketTrend, StructureLabel};
use intrascan_core::indicators::EnrichedSeries;
use intrascan_core::risk::TradeLevels;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current schema version for exported scan results.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// A qualifying candidate. Built once per symbol per scan, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setup {
    pub symbol: String,
    /// Symbol without the exchange suffix.
    pub name: String,
    pub sector: Option<String>,
    pub bias: Bias,
    pub current_price: f64,
    pub vwap: f64,
    /// Last volume over its rolling average; `None` when the average is zero.
    pub volume_ratio: Option<f64>,
    pub structure: StructureLabel,
    pub atr: f64,
    #[serde(flatten)]
    pub levels: TradeLevels,
    pub market_trend: MarketTrend,
    pub score: u8,
    pub max_risk_rupees: f64,
    pub data_delay_minutes: u32,
    /// Bars with indicators attached, for charting.
    pub history: EnrichedSeries,
}

/// Why a symbol produced no setup.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("provider returned no bars")]
    DataUnavailable,

    #[error("only {bars} bars, need {required}")]
    InsufficientHistory { bars: usize, required: usize },

    #[error("last price {price:.2} below floor {floor:.2}")]
    BelowPriceFloor { price: f64, floor: f64 },

    #[error("{0} not defined on the last bar")]
    IndicatorUndefined(String),

    #[error("no long or short alignment")]
    NoBias,

    #[error("risk budget cannot cover one share")]
    UntradeableRisk,

    #[error("risk-reward {risk_reward:.2} below minimum {minimum:.2}")]
    RiskRewardBelowMinimum { risk_reward: f64, minimum: f64 },

    #[error("score {score} below minimum {minimum}")]
    ScoreBelowMinimum { score: u8, minimum: u8 },

    #[error("fetch failed: {0}")]
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Everything one scan produced.
///
/// Contains no wall-clock time: two scans over identical bars serialize to
/// identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Set when the configuration was rejected; nothing was fetched or scanned.
    #[serde(default)]
    pub config_error: Option<String>,

    // ── Market ──
    pub benchmark_symbol: String,
    pub market_trend: MarketTrend,
    pub benchmark_change_pct: f64,
    pub benchmark_atr: f64,
    /// Set when the benchmark could not be fetched and the trend fell back to neutral.
    pub benchmark_error: Option<String>,

    // ── Setups ──
    pub symbols_scanned: usize,
    pub total_setup_count: usize,
    /// First `top_n` of `all_setups`.
    pub top_setups: Vec<Setup>,
    /// Every qualifying setup, score descending then symbol ascending.
    pub all_setups: Vec<Setup>,
    /// Non-qualifying symbols in universe order.
    pub skipped: Vec<SkippedSymbol>,

    /// BLAKE3 over the benchmark and every fetched series, in scan order.
    pub dataset_hash: String,
}

impl ScanResult {
    /// Look up a qualifying setup by full symbol or display name.
    pub fn find_setup(&self, symbol: &str) -> Option<&Setup> {
        self.all_setups
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol) || s.name.eq_ignore_ascii_case(symbol))
    }

    /// Skip reason recorded for `symbol`, if it did not qualify.
    pub fn skip_reason(&self, symbol: &str) -> Option<&SkipReason> {
        self.skipped
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
            .map(|s| &s.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reason_serializes_with_tag() {
        let skipped = SkippedSymbol {
            symbol: "ABC.NS".into(),
            reason: SkipReason::InsufficientHistory {
                bars: 5,
                required: 17,
            },
        };
        let json = serde_json::to_value(&skipped).unwrap();
        assert_eq!(json["symbol"], "ABC.NS");
        assert_eq!(json["reason"], "insufficient_history");
        assert_eq!(json["detail"]["required"], 17);

        let back: SkippedSymbol = serde_json::from_value(json).unwrap();
        assert_eq!(back, skipped);
    }

    #[test]
    fn unit_skip_reason_roundtrips() {
        let json = serde_json::to_string(&SkipReason::NoBias).unwrap();
        let back: SkipReason = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SkipReason::NoBias);
    }

    #[test]
    fn skip_reason_messages() {
        let r = SkipReason::BelowPriceFloor {
            price: 12.5,
            floor: 20.0,
        };
        assert_eq!(r.to_string(), "last price 12.50 below floor 20.00");
        assert_eq!(
            SkipReason::IndicatorUndefined("atr".into()).to_string(),
            "atr not defined on the last bar"
        );
    }
}
