//! Intrascan Runner: scan orchestration, configuration, explanations, export.
//!
//! This crate builds on `intrascan-core` to provide:
//! - `ScanConfig` loaded from TOML with validation
//! - The scan orchestrator: benchmark regime, parallel per-symbol evaluation,
//!   ranking, and explicit skip reasons
//! - Template and remote explanation strategies with automatic fallback
//! - JSON, CSV, and Markdown export, plus a caller-owned last-scan holder

pub mod config;
pub mod explain;
pub mod export;
pub mod last_scan;
pub mod result;
pub mod scanner;

pub use config::{ConfigError, ScanConfig};
pub use explain::{
    ExplainError, ExplanationRequest, Explainer, FallbackExplainer, RemoteExplainer,
    TemplateExplainer,
};
pub use export::{export_json, export_setups_csv, generate_report, import_json, load_scan, save_scan};
pub use last_scan::LastScan;
pub use result::{ScanResult, Setup, SkipReason, SkippedSymbol, SCHEMA_VERSION};
pub use scanner::{determine_bias, evaluate_series, rank_setups, run_scan};
