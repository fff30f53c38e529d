//! Market regime from a benchmark index: percent change confirmed by structure.

use crate::domain::{BarSeries, MarketTrend, StructureLabel};
use crate::indicators::{Atr, Indicator};
use crate::round2;
use crate::structure::detect_structure;
use serde::{Deserialize, Serialize};

/// Minimum absolute percent move before a trend can be declared.
pub const TREND_THRESHOLD_PCT: f64 = 0.3;

/// Benchmark trend triple reported with every scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketRegime {
    pub trend: MarketTrend,
    /// First-to-last close change in percent, rounded to 2 decimals.
    pub change_pct: f64,
    /// Latest ATR of the benchmark, rounded to 2 decimals; 0.0 when undefined.
    pub atr: f64,
}

impl MarketRegime {
    /// Fallback used when the benchmark is missing or too short.
    pub fn neutral() -> Self {
        Self {
            trend: StructureLabel::Neutral,
            change_pct: 0.0,
            atr: 0.0,
        }
    }
}

/// Classify the benchmark series.
///
/// BULLISH needs change > +0.3% *and* bullish structure; BEARISH needs
/// change < -0.3% *and* bearish structure. Anything else is NEUTRAL.
pub fn classify_regime(benchmark: &BarSeries, atr_period: usize) -> MarketRegime {
    let bars = benchmark.bars();
    if bars.len() < 3 {
        return MarketRegime::neutral();
    }

    let first_close = benchmark.first().close;
    let last_close = benchmark.last().close;
    let change_pct = if first_close != 0.0 {
        (last_close - first_close) / first_close * 100.0
    } else {
        0.0
    };

    let atr = Atr::new(atr_period)
        .compute(bars)
        .last()
        .copied()
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0);

    let trend = match detect_structure(bars) {
        StructureLabel::Bullish if change_pct > TREND_THRESHOLD_PCT => StructureLabel::Bullish,
        StructureLabel::Bearish if change_pct < -TREND_THRESHOLD_PCT => StructureLabel::Bearish,
        _ => StructureLabel::Neutral,
    };

    MarketRegime {
        trend,
        change_pct: round2(change_pct),
        atr: round2(atr),
    }
}
