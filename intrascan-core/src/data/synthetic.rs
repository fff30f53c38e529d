//! Synthetic intraday sessions for offline runs.
//!
//! Each symbol gets a deterministic random walk (seed = BLAKE3 of the symbol),
//! so repeated scans over synthetic data are identical. Sessions run
//! 09:15–15:30 on consecutive weekdays starting from a fixed anchor date.

use super::provider::{DataError, DataProvider};
use super::timeframe::{Interval, LookbackPeriod};
use crate::domain::{Bar, BarSeries};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Minutes in one NSE cash session (09:15–15:30).
const SESSION_MINUTES: u32 = 375;

/// Deterministic random-walk provider. Prices carry no meaning.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    anchor: NaiveDate,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self {
            anchor: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        }
    }
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// First session date; weekends are skipped.
    pub fn with_anchor(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    fn session_dates(&self, sessions: u32) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(sessions as usize);
        let mut current = self.anchor;
        while dates.len() < sessions as usize {
            if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                dates.push(current);
            }
            current += Duration::days(1);
        }
        dates
    }

    fn timestamps(&self, period: LookbackPeriod, interval: Interval) -> Vec<NaiveDateTime> {
        let open = NaiveTime::from_hms_opt(9, 15, 0).unwrap_or_default();
        let per_session = (SESSION_MINUTES / interval.minutes()).max(1);
        self.session_dates(period.sessions())
            .into_iter()
            .flat_map(|date| {
                (0..per_session).map(move |k| {
                    date.and_time(open) + Duration::minutes((k * interval.minutes()) as i64)
                })
            })
            .collect()
    }
}

/// Generate a random walk of bars at the given timestamps.
pub fn generate_bars(symbol: &str, timestamps: &[NaiveDateTime]) -> Vec<Bar> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut price: f64 = rng.gen_range(10.0..3000.0);
    let drift: f64 = rng.gen_range(-0.0015..0.0015);
    let base_volume: u64 = rng.gen_range(20_000..2_000_000);

    timestamps
        .iter()
        .map(|&timestamp| {
            let ret: f64 = drift + rng.gen_range(-0.003..0.003);
            let open = price;
            let close = (price * (1.0 + ret)).max(0.05);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.002));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.002));
            let mut volume = base_volume as f64 * rng.gen_range(0.5..1.5);
            if rng.gen_bool(0.1) {
                volume *= 3.0;
            }
            price = close;
            Bar {
                timestamp,
                open,
                high,
                low,
                close,
                volume: volume as u64,
            }
        })
        .collect()
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<BarSeries, DataError> {
        let period: LookbackPeriod = period
            .parse()
            .map_err(|e| DataError::Other(format!("{e}")))?;
        let interval: Interval = interval
            .parse()
            .map_err(|e| DataError::Other(format!("{e}")))?;

        let timestamps = self.timestamps(period, interval);
        let bars = generate_bars(symbol, &timestamps);
        if bars.is_empty() {
            return Err(DataError::DataUnavailable {
                symbol: symbol.to_string(),
            });
        }
        Ok(BarSeries::new(symbol, bars)?)
    }
}
