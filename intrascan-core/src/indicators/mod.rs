//! Indicator Engine.
//!
//! Indicators are pure functions: bar history in, numeric series out, one value
//! per bar. Warmup positions hold `f64::NAN`; [`engine::enrich`] turns those into
//! `None` on the enriched series so downstream code sees "not available" rather
//! than a number.
//!
//! No indicator value at bar t depends on bars after t.

pub mod atr;
pub mod engine;
pub mod sma;
pub mod volume;
pub mod vwap;

pub use atr::{true_range, Atr};
pub use engine::{enrich, EnrichedBar, EnrichedSeries, IndicatorParams, IndicatorSet};
pub use sma::rolling_mean;
pub use volume::{spike_flags, VolumeAverage, VolumeRatio};
pub use vwap::Vwap;

use crate::domain::Bar;

/// Trait for single-series indicators.
///
/// `compute` returns a vector the same length as `bars`; the first `lookback()`
/// values are `f64::NAN`.
pub trait Indicator: Send + Sync {
    fn name(&self) -> &str;

    /// Number of leading bars with no defined value.
    fn lookback(&self) -> usize;

    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Map the NaN sentinel to `None`.
pub(crate) fn defined(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Create synthetic 5-minute bars from close prices for testing.
///
/// open = prev_close (or close for the first bar), high = max(open,close) + 1.0,
/// low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: bar_time(i),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close, volume) tuples.
#[cfg(test)]
pub fn make_ohlcv_bars(data: &[(f64, f64, f64, f64, u64)]) -> Vec<Bar> {
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close, volume))| Bar {
            timestamp: bar_time(i),
            open,
            high,
            low,
            close,
            volume,
        })
        .collect()
}

#[cfg(test)]
fn bar_time(i: usize) -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap()
        + chrono::Duration::minutes(5 * i as i64)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
