//! Data provider trait and structured error types.
//!
//! The `DataProvider` trait abstracts over data sources (Yahoo Finance,
//! synthetic sessions, in-memory fixtures) so the scanner can be driven by any
//! of them and mocked in tests.

use crate::domain::{BarSeries, SeriesError};
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no bars returned for '{symbol}'")]
    DataUnavailable { symbol: String },

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("validation error: {0}")]
    Validation(#[from] SeriesError),

    #[error("data error: {0}")]
    Other(String),
}

impl DataError {
    /// True when the provider answered but had nothing for the symbol.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DataError::DataUnavailable { .. })
    }
}

/// Source of intraday bars.
///
/// `fetch` is a single blocking call; implementations do not retry. An empty
/// result is reported as [`DataError::DataUnavailable`], never as an empty series.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch bars for `symbol` covering `period` at `interval` resolution.
    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<BarSeries, DataError>;
}
