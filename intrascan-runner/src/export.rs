//! Export: JSON, CSV, and Markdown artifacts for a scan.
//!
//! - **JSON**: the full `ScanResult` with schema versioning
//! - **CSV**: one row per setup, no bar history
//! - **Markdown**: human-readable summary of the market and ranked setups
//!
//! JSON artifacts carry `schema_version`; newer versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::result::{ScanResult, Setup, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `ScanResult` to pretty JSON.
pub fn export_json(result: &ScanResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize ScanResult to JSON")
}

/// Deserialize a `ScanResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ScanResult> {
    let result: ScanResult =
        serde_json::from_str(json).context("failed to deserialize ScanResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export setups as CSV, one row each, in the order given.
///
/// Columns: rank, symbol, name, sector, bias, score, current_price, vwap,
/// volume_ratio, structure, atr, entry, stop_loss, target, risk_reward,
/// position_size, risk_per_share, market_trend, data_delay_minutes
pub fn export_setups_csv(setups: &[Setup]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "rank",
        "symbol",
        "name",
        "sector",
        "bias",
        "score",
        "current_price",
        "vwap",
        "volume_ratio",
        "structure",
        "atr",
        "entry",
        "stop_loss",
        "target",
        "risk_reward",
        "position_size",
        "risk_per_share",
        "market_trend",
        "data_delay_minutes",
    ])?;

    for (i, s) in setups.iter().enumerate() {
        let row = [
            (i + 1).to_string(),
            s.symbol.clone(),
            s.name.clone(),
            s.sector.clone().unwrap_or_default(),
            s.bias.to_string(),
            s.score.to_string(),
            format!("{:.2}", s.current_price),
            format!("{:.2}", s.vwap),
            s.volume_ratio.map(|r| format!("{r:.2}")).unwrap_or_default(),
            s.structure.to_string(),
            format!("{:.2}", s.atr),
            format!("{:.2}", s.levels.entry),
            format!("{:.2}", s.levels.stop_loss),
            format!("{:.2}", s.levels.target),
            format!("{:.2}", s.levels.risk_reward),
            s.levels.position_size.to_string(),
            format!("{:.2}", s.levels.risk_per_share),
            s.market_trend.to_string(),
            s.data_delay_minutes.to_string(),
        ];
        wtr.write_record(&row)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the artifact set for one scan into `output_dir`.
///
/// Writes `scan.json` (full result), `setups.csv` (all setups, ranked) and
/// `report.md`. Existing files are overwritten. Returns the directory.
pub fn save_scan(result: &ScanResult, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    std::fs::write(output_dir.join("scan.json"), export_json(result)?)?;
    std::fs::write(
        output_dir.join("setups.csv"),
        export_setups_csv(&result.all_setups)?,
    )?;
    std::fs::write(output_dir.join("report.md"), generate_report(result))?;

    Ok(output_dir.to_path_buf())
}

/// Load a `ScanResult` from a directory written by [`save_scan`].
pub fn load_scan(dir: &Path) -> Result<ScanResult> {
    let path = dir.join("scan.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Markdown summary: market regime, ranked setups, skip counts.
pub fn generate_report(result: &ScanResult) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Intraday Scan Report\n\n");

    if let Some(err) = &result.config_error {
        md.push_str(&format!("**Configuration rejected:** {err}\n\n"));
    }

    md.push_str("## Market\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Benchmark | {} |\n", result.benchmark_symbol));
    md.push_str(&format!("| Trend | {} |\n", result.market_trend));
    md.push_str(&format!("| Change | {:+.2}% |\n", result.benchmark_change_pct));
    md.push_str(&format!("| ATR | {:.2} |\n", result.benchmark_atr));
    if let Some(err) = &result.benchmark_error {
        md.push_str(&format!("| Benchmark Error | {err} |\n"));
    }
    md.push_str(&format!("| Symbols Scanned | {} |\n", result.symbols_scanned));
    md.push_str(&format!("| Dataset Hash | {} |\n", result.dataset_hash));
    md.push('\n');

    md.push_str("## Setups\n\n");
    if result.all_setups.is_empty() {
        md.push_str("No setups met the filters.\n\n");
    } else {
        md.push_str("| # | Symbol | Bias | Score | Entry | Stop | Target | RR | Qty |\n");
        md.push_str("| --- | --- | --- | ---: | ---: | ---: | ---: | ---: | ---: |\n");
        for (i, s) in result.all_setups.iter().enumerate() {
            let marker = if i < result.top_setups.len() { "**" } else { "" };
            md.push_str(&format!(
                "| {} | {marker}{}{marker} | {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {} |\n",
                i + 1,
                s.name,
                s.bias,
                s.score,
                s.levels.entry,
                s.levels.stop_loss,
                s.levels.target,
                s.levels.risk_reward,
                s.levels.position_size,
            ));
        }
        md.push('\n');
    }

    if !result.skipped.is_empty() {
        md.push_str(&format!("## Skipped ({})\n\n", result.skipped.len()));
        for s in &result.skipped {
            md.push_str(&format!("- {}: {}\n", s.symbol, s.reason));
        }
        md.push('\n');
    }

    md
}
