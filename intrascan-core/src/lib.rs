//! Intrascan Core: market data, indicators, classification, risk, scoring.
//!
//! This crate holds everything needed to turn one symbol's intraday bars into
//! a scored trade setup:
//! - Domain types (bars, validated series, bias and structure labels)
//! - Data providers (Yahoo chart API, synthetic, in-memory) and the universe
//! - Indicator engine (VWAP, true range, ATR, volume average and spike)
//! - Price-structure and market-regime classifiers
//! - ATR-based risk engine and the 0–100 setup scorer
//!
//! Orchestration across a universe lives in `intrascan-runner`.

pub mod data;
pub mod domain;
pub mod fingerprint;
pub mod indicators;
pub mod regime;
pub mod risk;
pub mod scoring;
pub mod structure;

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
