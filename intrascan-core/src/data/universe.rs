//! Universe configuration: sector-organized ticker lists.
//!
//! Stored as TOML with sector names mapping to Yahoo-style tickers
//! (`RELIANCE.NS`). The scan visits sectors in key order and tickers in list
//! order; a ticker listed under two sectors is scanned once.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Exchange suffix stripped for display.
const NSE_SUFFIX: &str = ".NS";

/// The complete universe configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub sectors: BTreeMap<String, Vec<String>>,
}

impl Universe {
    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read universe file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse universe TOML: {e}"))
    }

    /// Serialize the universe to TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("serialize universe: {e}"))
    }

    /// A single unnamed sector holding `symbols`.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sectors = BTreeMap::new();
        sectors.insert(
            "All".to_string(),
            symbols.into_iter().map(Into::into).collect(),
        );
        Self { sectors }
    }

    /// All tickers, deduplicated, in scan order.
    pub fn all_tickers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sectors
            .values()
            .flat_map(|tickers| tickers.iter().map(|t| t.as_str()))
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Get tickers for a specific sector.
    pub fn sector_tickers(&self, sector: &str) -> Option<&[String]> {
        self.sectors.get(sector).map(|v| v.as_slice())
    }

    /// Sector a ticker is listed under (first match in key order).
    pub fn sector_of(&self, ticker: &str) -> Option<&str> {
        self.sectors
            .iter()
            .find(|(_, tickers)| tickers.iter().any(|t| t == ticker))
            .map(|(name, _)| name.as_str())
    }

    /// Get the list of sector names.
    pub fn sector_names(&self) -> Vec<&str> {
        self.sectors.keys().map(|s| s.as_str()).collect()
    }

    /// Number of distinct tickers.
    pub fn ticker_count(&self) -> usize {
        self.all_tickers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticker_count() == 0
    }

    /// Fifty liquid NSE large caps grouped by sector.
    pub fn nse_large_caps() -> Self {
        let groups: [(&str, &[&str]); 9] = [
            (
                "Auto",
                &["MARUTI", "TATAMOTORS", "HEROMOTOCO", "M&M", "EICHERMOT"],
            ),
            (
                "Banking & Finance",
                &[
                    "HDFCBANK", "ICICIBANK", "SBIN", "AXISBANK", "KOTAKBANK", "BAJFINANCE",
                    "BAJAJFINSV", "INDUSINDBK", "BANKBARODA", "PNB", "CANBK",
                ],
            ),
            (
                "Consumer",
                &["HINDUNILVR", "TITAN", "NESTLEIND", "BRITANNIA", "TATACONSUM", "ASIANPAINT"],
            ),
            (
                "Energy",
                &[
                    "RELIANCE", "ADANIENT", "NTPC", "POWERGRID", "ONGC", "COALINDIA", "BPCL",
                    "IOC",
                ],
            ),
            ("IT", &["TCS", "INFY", "WIPRO", "TECHM", "HCLTECH"]),
            (
                "Infrastructure & Materials",
                &["LT", "ULTRACEMCO", "GRASIM", "SHREECEM"],
            ),
            (
                "Metals & Mining",
                &["TATASTEEL", "JSWSTEEL", "HINDALCO", "VEDL", "SAIL", "NMDC"],
            ),
            ("Pharma", &["SUNPHARMA", "DRREDDY", "CIPLA", "DIVISLAB"]),
            ("Telecom", &["IDEA"]),
        ];

        let sectors = groups
            .iter()
            .map(|(name, tickers)| {
                (
                    name.to_string(),
                    tickers.iter().map(|t| format!("{t}{NSE_SUFFIX}")).collect(),
                )
            })
            .collect();

        Self { sectors }
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::nse_large_caps()
    }
}

/// Ticker without its exchange suffix: `RELIANCE.NS` → `RELIANCE`.
pub fn display_name(ticker: &str) -> &str {
    ticker.strip_suffix(NSE_SUFFIX).unwrap_or(ticker)
}
