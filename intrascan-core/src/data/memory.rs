//! In-memory provider backed by pre-built bars.

use super::provider::{DataError, DataProvider};
use crate::domain::{Bar, BarSeries};
use std::collections::HashMap;

/// Serves fixed bars per symbol, ignoring period and interval.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    series: HashMap<String, Vec<Bar>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the bars for `symbol`.
    pub fn with_bars(mut self, symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        self.insert(symbol, bars);
        self
    }

    pub fn insert(&mut self, symbol: impl Into<String>, bars: Vec<Bar>) {
        self.series.insert(symbol.into(), bars);
    }
}

impl DataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, symbol: &str, _period: &str, _interval: &str) -> Result<BarSeries, DataError> {
        match self.series.get(symbol) {
            Some(bars) if !bars.is_empty() => Ok(BarSeries::new(symbol, bars.clone())?),
            _ => Err(DataError::DataUnavailable {
                symbol: symbol.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn serves_known_symbol() {
        let provider = StaticProvider::new().with_bars("TCS.NS", make_bars(&[10.0, 11.0, 12.0]));
        let series = provider.fetch("TCS.NS", "1d", "5m").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.symbol(), "TCS.NS");
    }

    #[test]
    fn unknown_or_empty_symbol_is_unavailable() {
        let provider = StaticProvider::new().with_bars("EMPTY.NS", vec![]);
        assert!(provider.fetch("EMPTY.NS", "1d", "5m").unwrap_err().is_unavailable());
        assert!(provider.fetch("INFY.NS", "1d", "5m").unwrap_err().is_unavailable());
    }

    #[test]
    fn invalid_bars_are_validation_errors() {
        let mut bars = make_bars(&[10.0, 11.0]);
        bars[1].timestamp = bars[0].timestamp;
        let provider = StaticProvider::new().with_bars("BAD.NS", bars);
        assert!(matches!(
            provider.fetch("BAD.NS", "1d", "5m"),
            Err(DataError::Validation(_))
        ));
    }
}
