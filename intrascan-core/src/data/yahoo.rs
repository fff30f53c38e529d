//! Yahoo Finance intraday provider.
//!
//! Fetches OHLCV bars from Yahoo's v8 chart API using its `range`/`interval`
//! parameters. Free-tier intraday data is delayed (about 15 minutes for NSE).
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; shape mismatches surface as `ResponseFormatChanged`.

use super::provider::{DataError, DataProvider};
use crate::domain::{Bar, BarSeries};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds.
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Result<Self, DataError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build the chart API URL. The symbol is percent-encoded (`^NSEI`, `M&M.NS`).
    fn chart_url(&self, symbol: &str, period: &str, interval: &str) -> Result<reqwest::Url, DataError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| DataError::Other(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| DataError::Other("base URL cannot take a path".into()))?
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("range", period)
            .append_pair("interval", interval)
            .append_pair("includePrePost", "false");
        Ok(url)
    }

    /// Parse the chart API response into bars in exchange-local time.
    ///
    /// Rows with any missing or non-positive price are dropped; a repeated
    /// timestamp keeps the later row.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<Bar>, DataError> {
        let result = match resp.chart.result {
            Some(result) => result,
            None => {
                return Err(match resp.chart.error {
                    Some(err) if err.code == "Not Found" => DataError::DataUnavailable {
                        symbol: symbol.to_string(),
                    },
                    Some(err) => DataError::ResponseFormatChanged(format!(
                        "{}: {}",
                        err.code, err.description
                    )),
                    None => DataError::ResponseFormatChanged("empty result with no error".into()),
                })
            }
        };

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);

        // No timestamps: the symbol exists but nothing traded in the range.
        let timestamps = match data.timestamp {
            Some(ts) => ts,
            None => {
                return Err(DataError::DataUnavailable {
                    symbol: symbol.to_string(),
                })
            }
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars: Vec<Bar> = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let timestamp = chrono::DateTime::from_timestamp(ts + offset, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let field = |v: &Vec<Option<f64>>| v.get(i).copied().flatten().filter(|p| *p > 0.0);
            let (Some(open), Some(high), Some(low), Some(close)) = (
                field(&quote.open),
                field(&quote.high),
                field(&quote.low),
                field(&quote.close),
            ) else {
                continue;
            };
            let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);

            let bar = Bar {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
            };
            match bars.last_mut() {
                Some(prev) if prev.timestamp == bar.timestamp => *prev = bar,
                Some(prev) if prev.timestamp > bar.timestamp => continue,
                _ => bars.push(bar),
            }
        }

        if bars.is_empty() {
            return Err(DataError::DataUnavailable {
                symbol: symbol.to_string(),
            });
        }

        Ok(bars)
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<BarSeries, DataError> {
        let url = self.chart_url(symbol, period, interval)?;
        debug!(%symbol, %period, %interval, "fetching chart");

        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DataError::NetworkUnreachable(e.to_string())
            } else {
                DataError::Other(format!("request for {symbol} failed: {e}"))
            }
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after,
            });
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::DataUnavailable {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        let bars = Self::parse_response(symbol, chart)?;
        debug!(%symbol, bars = bars.len(), "chart parsed");
        Ok(BarSeries::new(symbol, bars)?)
    }
}
