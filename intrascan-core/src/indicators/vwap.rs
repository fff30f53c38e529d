//! Volume-Weighted Average Price (VWAP), cumulative from the first bar.
//!
//! VWAP[t] = Σ(typical_price × volume) / Σ(volume) over bars 0..=t.
//! Undefined (NaN) while cumulative volume is zero.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Default)]
pub struct Vwap;

impl Vwap {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for Vwap {
    fn name(&self) -> &str {
        "vwap"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mut result = Vec::with_capacity(bars.len());
        let mut cum_pv = 0.0;
        let mut cum_volume = 0.0;

        for bar in bars {
            let volume = bar.volume as f64;
            cum_pv += bar.typical_price() * volume;
            cum_volume += volume;
            if cum_volume > 0.0 {
                result.push(cum_pv / cum_volume);
            } else {
                result.push(f64::NAN);
            }
        }

        result
    }
}
