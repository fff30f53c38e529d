//! Enrichment: one pass over a series producing every indicator the scan reads.

use super::atr::{true_range, Atr};
use super::volume::{spike_flags, VolumeAverage, VolumeRatio};
use super::vwap::Vwap;
use super::{defined, Indicator};
use crate::domain::{Bar, BarSeries};
use serde::{Deserialize, Serialize};

/// Lookback windows and thresholds for enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub atr_period: usize,
    pub volume_window: usize,
    /// Multiplier on the rolling volume average; must be >= 1.
    pub spike_threshold: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            atr_period: 14,
            volume_window: 10,
            spike_threshold: 1.5,
        }
    }
}

impl IndicatorParams {
    /// Minimum series length a scan requires: longest lookback plus three bars
    /// for structure detection.
    pub fn required_bars(&self) -> usize {
        self.atr_period.max(self.volume_window) + 3
    }
}

/// Indicator values attached to one bar. `None` means "not available yet".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub vwap: Option<f64>,
    pub true_range: Option<f64>,
    pub atr: Option<f64>,
    pub volume_avg: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub volume_spike: Option<bool>,
}

impl IndicatorSet {
    /// True only when the spike flag is defined and set.
    pub fn is_spike(&self) -> bool {
        self.volume_spike.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBar {
    #[serde(flatten)]
    pub bar: Bar,
    #[serde(flatten)]
    pub indicators: IndicatorSet,
}

/// A copy of a series with indicators attached to every bar.
///
/// The source [`BarSeries`] is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSeries {
    pub symbol: String,
    pub bars: Vec<EnrichedBar>,
}

impl EnrichedSeries {
    pub fn last(&self) -> Option<&EnrichedBar> {
        self.bars.last()
    }

    pub fn raw_bars(&self) -> Vec<Bar> {
        self.bars.iter().map(|b| b.bar.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Compute VWAP, true range, ATR, volume average/ratio and spike flag for every bar.
pub fn enrich(series: &BarSeries, params: &IndicatorParams) -> EnrichedSeries {
    let bars = series.bars();

    let vwap = Vwap::new().compute(bars);
    let tr = true_range(bars);
    let atr = Atr::new(params.atr_period).compute(bars);
    let volume_avg = VolumeAverage::new(params.volume_window).compute(bars);
    let volume_ratio = VolumeRatio::new(params.volume_window).compute(bars);
    let spikes = spike_flags(bars, &volume_avg, params.spike_threshold);

    let enriched = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| EnrichedBar {
            bar: bar.clone(),
            indicators: IndicatorSet {
                vwap: defined(vwap[i]),
                true_range: defined(tr[i]),
                atr: defined(atr[i]),
                volume_avg: defined(volume_avg[i]),
                volume_ratio: defined(volume_ratio[i]),
                volume_spike: spikes[i],
            },
        })
        .collect();

    EnrichedSeries {
        symbol: series.symbol().to_string(),
        bars: enriched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, make_ohlcv_bars, DEFAULT_EPSILON};

    fn series(bars: Vec<Bar>) -> BarSeries {
        BarSeries::new("TEST.NS", bars).unwrap()
    }

    #[test]
    fn enrich_preserves_length_and_source() {
        let s = series(make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0]));
        let before = s.clone();
        let enriched = enrich(&s, &IndicatorParams::default());
        assert_eq!(enriched.len(), 5);
        assert_eq!(enriched.symbol, "TEST.NS");
        assert_eq!(s, before);
        assert_eq!(enriched.raw_bars(), s.bars());
    }

    #[test]
    fn cold_start_values_are_none() {
        let s = series(make_bars(&[100.0, 101.0, 102.0]));
        let params = IndicatorParams {
            atr_period: 5,
            volume_window: 5,
            spike_threshold: 1.5,
        };
        let enriched = enrich(&s, &params);
        let last = enriched.last().unwrap().indicators;
        assert!(last.vwap.is_some());
        assert_eq!(last.atr, None);
        assert_eq!(last.volume_avg, None);
        assert_eq!(last.volume_ratio, None);
        assert_eq!(last.volume_spike, None);
        assert!(!last.is_spike());
        assert_eq!(enriched.bars[0].indicators.true_range, None);
    }

    #[test]
    fn spike_on_last_bar() {
        let mut data = vec![(100.0, 101.0, 99.0, 100.0, 1000); 5];
        data.push((100.0, 102.0, 99.5, 101.5, 5000));
        let s = series(make_ohlcv_bars(&data));
        let params = IndicatorParams {
            atr_period: 3,
            volume_window: 3,
            spike_threshold: 1.5,
        };
        let last = enrich(&s, &params).last().unwrap().indicators;
        // avg = (1000 + 1000 + 5000) / 3
        let avg = 7000.0 / 3.0;
        assert_approx(last.volume_avg.unwrap(), avg, DEFAULT_EPSILON);
        assert_approx(last.volume_ratio.unwrap(), 5000.0 / avg, DEFAULT_EPSILON);
        assert!(last.is_spike());
    }

    #[test]
    fn required_bars_uses_longest_lookback() {
        let params = IndicatorParams::default();
        assert_eq!(params.required_bars(), 17);
        let params = IndicatorParams {
            atr_period: 5,
            volume_window: 20,
            spike_threshold: 2.0,
        };
        assert_eq!(params.required_bars(), 23);
    }

    #[test]
    fn enriched_bar_serializes_flat() {
        let s = series(make_bars(&[100.0, 101.0]));
        let enriched = enrich(&s, &IndicatorParams::default());
        let json = serde_json::to_value(&enriched.bars[1]).unwrap();
        assert!(json.get("close").is_some());
        assert!(json.get("vwap").is_some());
        assert!(json.get("atr").unwrap().is_null());
    }
}
