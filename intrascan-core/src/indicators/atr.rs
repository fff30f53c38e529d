//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR is the simple rolling mean of TR over `period` bars.
//!
//! The first bar has no previous close, so it has no true range. From index
//! `period` on, ATR is the plain rolling mean of `period` true ranges. At index
//! `period - 1` the window reaches back to bar 0, so it averages the
//! `period - 1` true ranges that exist. ATR is therefore defined from index
//! `period - 1`, one bar earlier than a rolling mean that treats TR[0] as
//! missing. With TR `[-, 10, 2, 2]` and period 3 this gives
//! `[-, -, 6.0, 4.67]`. ATR is never defined at index 0.

use super::sma::rolling_mean;
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

/// Compute the True Range series from bars.
/// TR[0] = NaN (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            continue;
        }
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }

    tr
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        (self.period - 1).max(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let tr = true_range(bars);
        let mut result = rolling_mean(&tr, self.period);

        // First window: bar 0 never contributes.
        let first = self.period - 1;
        if first >= 1 && first < tr.len() {
            let window = &tr[1..=first];
            if window.iter().all(|v| !v.is_nan()) {
                result[first] = window.iter().sum::<f64>() / window.len() as f64;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlcv_bars, DEFAULT_EPSILON};

    fn ohlc(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        let with_volume: Vec<_> = data.iter().map(|&(o, h, l, c)| (o, h, l, c, 1000)).collect();
        make_ohlcv_bars(&with_volume)
    }

    #[test]
    fn true_range_basic() {
        let bars = ohlc(&[
            (100.0, 105.0, 95.0, 102.0),  // no previous close
            (102.0, 108.0, 100.0, 106.0), // TR = max(8, |108-102|, |100-102|) = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = max(9, |107-106|, |98-106|) = 9
        ]);
        let tr = true_range(&bars);
        assert!(tr[0].is_nan());
        assert_approx(tr[1], 8.0, DEFAULT_EPSILON);
        assert_approx(tr[2], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        let bars = ohlc(&[
            (98.0, 102.0, 97.0, 100.0),
            (110.0, 115.0, 108.0, 112.0), // TR = max(7, |115-100|, |108-100|) = 15
        ]);
        let tr = true_range(&bars);
        assert_approx(tr[1], 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_period_3_rolling_mean() {
        let bars = ohlc(&[
            (100.0, 105.0, 95.0, 102.0),  // TR undefined
            (102.0, 108.0, 100.0, 106.0), // TR = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = 9
            (99.0, 103.0, 97.0, 101.0),   // TR = 6
            (101.0, 106.0, 100.0, 105.0), // TR = 6
        ]);
        let result = Atr::new(3).compute(&bars);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        // Window [0..=2] has TR[1], TR[2] only
        assert_approx(result[2], 17.0 / 2.0, DEFAULT_EPSILON);
        assert_approx(result[3], 23.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(result[4], 21.0 / 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn first_window_averages_only_defined_true_ranges() {
        let bars = ohlc(&[
            (100.0, 101.0, 99.0, 100.0),
            (100.0, 105.0, 95.0, 100.0), // TR = 10
            (100.0, 101.0, 99.0, 100.0), // TR = 2
            (100.0, 101.0, 99.0, 100.0), // TR = 2
        ]);
        let result = Atr::new(3).compute(&bars);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 6.0, DEFAULT_EPSILON);
        assert_approx(result[3], 14.0 / 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_constant_range_equals_range() {
        // Flat closes with a constant 2.0 range: TR is 2.0 on every bar after the first.
        let bars = ohlc(&[(100.0, 101.0, 99.0, 100.0); 20]);
        let result = Atr::new(14).compute(&bars);
        for (i, v) in result.iter().enumerate() {
            if i < 13 {
                assert!(v.is_nan(), "expected NaN at index {i}");
            } else {
                assert_approx(*v, 2.0, DEFAULT_EPSILON);
            }
        }
    }

    #[test]
    fn atr_nan_propagation() {
        let mut bars = ohlc(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
            (99.0, 103.0, 97.0, 101.0),
        ]);
        bars[2].high = f64::NAN;
        let result = Atr::new(2).compute(&bars);
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
    }

    #[test]
    fn atr_lookback() {
        assert_eq!(Atr::new(14).lookback(), 13);
        assert_eq!(Atr::new(1).lookback(), 1);
    }
}
