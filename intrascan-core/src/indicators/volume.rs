//! Volume participation: rolling average, ratio and spike flag.
//!
//! All three are undefined until `window` bars have accumulated. The ratio is
//! additionally undefined when the rolling average is zero.

use super::sma::rolling_mean;
use super::Indicator;
use crate::domain::Bar;

fn volumes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume as f64).collect()
}

/// Rolling mean of volume over `window` bars.
#[derive(Debug, Clone)]
pub struct VolumeAverage {
    window: usize,
    name: String,
}

impl VolumeAverage {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "volume window must be >= 1");
        Self {
            window,
            name: format!("volume_avg_{window}"),
        }
    }
}

impl Indicator for VolumeAverage {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        rolling_mean(&volumes(bars), self.window)
    }
}

/// Current volume divided by its rolling mean.
#[derive(Debug, Clone)]
pub struct VolumeRatio {
    average: VolumeAverage,
    name: String,
}

impl VolumeRatio {
    pub fn new(window: usize) -> Self {
        Self {
            average: VolumeAverage::new(window),
            name: format!("volume_ratio_{window}"),
        }
    }
}

impl Indicator for VolumeRatio {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.average.lookback()
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let avg = self.average.compute(bars);
        bars.iter()
            .zip(avg)
            .map(|(bar, avg)| {
                if avg > 0.0 {
                    bar.volume as f64 / avg
                } else {
                    f64::NAN
                }
            })
            .collect()
    }
}

/// Spike flag per bar: `volume > threshold × average`, `None` where the average is undefined.
pub fn spike_flags(bars: &[Bar], average: &[f64], threshold: f64) -> Vec<Option<bool>> {
    bars.iter()
        .zip(average)
        .map(|(bar, &avg)| {
            if avg.is_nan() {
                None
            } else {
                Some(bar.volume as f64 > threshold * avg)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlcv_bars, DEFAULT_EPSILON};

    fn bars_with_volumes(vols: &[u64]) -> Vec<Bar> {
        let data: Vec<_> = vols.iter().map(|&v| (100.0, 101.0, 99.0, 100.0, v)).collect();
        make_ohlcv_bars(&data)
    }

    #[test]
    fn average_undefined_before_window() {
        let bars = bars_with_volumes(&[100, 100, 100, 400]);
        let avg = VolumeAverage::new(3).compute(&bars);
        assert!(avg[0].is_nan());
        assert!(avg[1].is_nan());
        assert_approx(avg[2], 100.0, DEFAULT_EPSILON);
        assert_approx(avg[3], 200.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ratio_against_rolling_average() {
        let bars = bars_with_volumes(&[100, 100, 100, 400]);
        let ratio = VolumeRatio::new(3).compute(&bars);
        assert!(ratio[1].is_nan());
        assert_approx(ratio[2], 1.0, DEFAULT_EPSILON);
        assert_approx(ratio[3], 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ratio_undefined_for_zero_average() {
        let bars = bars_with_volumes(&[0, 0, 0]);
        let ratio = VolumeRatio::new(2).compute(&bars);
        assert!(ratio.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn spike_uses_strict_threshold() {
        let bars = bars_with_volumes(&[100, 100, 100, 400]);
        let avg = VolumeAverage::new(3).compute(&bars);
        let flags = spike_flags(&bars, &avg, 1.5);
        assert_eq!(flags[1], None);
        assert_eq!(flags[2], Some(false));
        // 400 > 1.5 * 200
        assert_eq!(flags[3], Some(true));

        let flags = spike_flags(&bars, &avg, 2.0);
        // 400 is not strictly greater than 2.0 * 200
        assert_eq!(flags[3], Some(false));
    }
}
