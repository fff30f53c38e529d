//! Serializable scan configuration.

use intrascan_core::data::Universe;
use intrascan_core::indicators::IndicatorParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Every knob a scan reads.
///
/// Missing TOML keys take the defaults below, so an empty file is a valid
/// configuration for the NSE large-cap universe on 5-minute bars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Index used for the market regime.
    pub benchmark: String,

    /// Minimum last close for a symbol to be considered.
    pub min_price: f64,

    /// Lookback window passed to the provider (`1d`, `5d`, `1mo`).
    pub period: String,

    /// Bar resolution passed to the provider (`5m`, `15m`, `1h`).
    pub interval: String,

    /// Provider delay disclosed with every setup.
    pub data_delay_minutes: u32,

    /// Rupee budget per trade for position sizing.
    pub max_risk_per_trade: f64,

    pub min_risk_reward: f64,

    /// Setups below this score are dropped.
    pub min_score: u8,

    /// Size of the ranked highlight list.
    pub top_n: usize,

    pub volume_window: usize,
    pub volume_spike_threshold: f64,
    pub atr_period: usize,

    /// Worker threads for per-symbol evaluation.
    pub workers: usize,

    /// Symbols scanned, grouped by sector.
    pub universe: Universe,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            benchmark: "^NSEI".into(),
            min_price: 20.0,
            period: "1d".into(),
            interval: "5m".into(),
            data_delay_minutes: 15,
            max_risk_per_trade: 50.0,
            min_risk_reward: 2.0,
            min_score: 70,
            top_n: 3,
            volume_window: 10,
            volume_spike_threshold: 1.5,
            atr_period: 14,
            workers: 8,
            universe: Universe::nse_large_caps(),
        }
    }
}

impl ScanConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.universe.is_empty() {
            return Err(invalid("universe", "must list at least one symbol"));
        }
        if self.benchmark.trim().is_empty() {
            return Err(invalid("benchmark", "must not be empty"));
        }
        if self.atr_period == 0 {
            return Err(invalid("atr_period", "must be > 0"));
        }
        if self.volume_window == 0 {
            return Err(invalid("volume_window", "must be > 0"));
        }
        if self.volume_spike_threshold.is_nan() || self.volume_spike_threshold < 1.0 {
            return Err(invalid(
                "volume_spike_threshold",
                format!("must be >= 1, got {}", self.volume_spike_threshold),
            ));
        }
        if self.max_risk_per_trade.is_nan() || self.max_risk_per_trade <= 0.0 {
            return Err(invalid(
                "max_risk_per_trade",
                format!("must be > 0, got {}", self.max_risk_per_trade),
            ));
        }
        if self.min_risk_reward.is_nan() || self.min_risk_reward < 0.0 {
            return Err(invalid("min_risk_reward", "must be >= 0"));
        }
        if self.min_price.is_nan() || self.min_price < 0.0 {
            return Err(invalid("min_price", "must be >= 0"));
        }
        if self.min_score > 100 {
            return Err(invalid(
                "min_score",
                format!("must be <= 100, got {}", self.min_score),
            ));
        }
        if self.top_n == 0 {
            return Err(invalid("top_n", "must be >= 1"));
        }
        if self.workers == 0 {
            return Err(invalid("workers", "must be >= 1"));
        }
        Ok(())
    }

    pub fn indicator_params(&self) -> IndicatorParams {
        IndicatorParams {
            atr_period: self.atr_period,
            volume_window: self.volume_window,
            spike_threshold: self.volume_spike_threshold,
        }
    }

    /// Shortest series a symbol may have and still be evaluated.
    pub fn required_bars(&self) -> usize {
        self.indicator_params().required_bars()
    }
}
