//! Intrascan CLI: scan, universe, and explain commands.
//!
//! Commands:
//! - `scan`: run one scan over the configured universe and print the ranking
//! - `universe`: list the configured symbols by sector
//! - `explain`: run a scan and explain the named symbols if they qualified

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use intrascan_core::data::{
    display_name, DataProvider, SyntheticProvider, Universe, YahooProvider,
};
use intrascan_runner::{
    export_json, export_setups_csv, run_scan, save_scan, ExplanationRequest, FallbackExplainer,
    ScanConfig, ScanResult, Setup,
};

#[derive(Parser)]
#[command(
    name = "intrascan",
    version,
    about = "Intrascan: intraday setup scanner for NSE equities"
)]
struct Cli {
    /// Debug-level logging (RUST_LOG still takes precedence).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that runs a scan.
#[derive(Args)]
struct ScanArgs {
    /// Path to a TOML config file. Defaults to the built-in NSE universe.
    #[arg(long, env = "INTRASCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Sector TOML file replacing the configured universe.
    #[arg(long)]
    universe: Option<PathBuf>,

    /// Use deterministic synthetic bars instead of Yahoo Finance.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Number of setups in the highlight list.
    #[arg(long)]
    top: Option<usize>,

    /// Minimum score for a setup to be listed.
    #[arg(long)]
    min_score: Option<u8>,

    /// Worker threads for per-symbol evaluation.
    #[arg(long)]
    workers: Option<usize>,

    /// Lookback period (e.g. 1d, 5d).
    #[arg(long)]
    period: Option<String>,

    /// Bar interval (e.g. 5m, 15m).
    #[arg(long)]
    interval: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scan and print the ranked setups.
    Scan {
        #[command(flatten)]
        scan: ScanArgs,

        /// Write the full result as JSON to this file.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write all setups as CSV to this file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write scan.json, setups.csv and report.md into this directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print an explanation for each top setup.
        #[arg(long, default_value_t = false)]
        explain: bool,
    },
    /// List the configured universe.
    Universe {
        /// Path to a TOML config file.
        #[arg(long, env = "INTRASCAN_CONFIG")]
        config: Option<PathBuf>,

        /// Sector TOML file replacing the configured universe.
        #[arg(long)]
        universe: Option<PathBuf>,
    },
    /// Run a scan and explain the named symbols.
    Explain {
        /// Symbols, with or without the exchange suffix (e.g. RELIANCE or RELIANCE.NS).
        #[arg(required = true)]
        symbols: Vec<String>,

        #[command(flatten)]
        scan: ScanArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Scan {
            scan,
            json,
            csv,
            out_dir,
            explain,
        } => run_scan_cmd(&scan, json.as_deref(), csv.as_deref(), out_dir.as_deref(), explain),
        Commands::Universe { config, universe } => {
            run_universe_cmd(config.as_deref(), universe.as_deref())
        }
        Commands::Explain { symbols, scan } => run_explain_cmd(&symbols, &scan),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "intrascan=debug" } else { "intrascan=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, universe: Option<&Path>) -> Result<ScanConfig> {
    let mut config = match path {
        Some(p) => ScanConfig::from_file(p)
            .with_context(|| format!("failed to load config {}", p.display()))?,
        None => ScanConfig::default(),
    };
    if let Some(u) = universe {
        config.universe = Universe::from_file(u).map_err(anyhow::Error::msg)?;
    }
    Ok(config)
}

/// Config file plus command-line overrides, validated.
fn build_config(args: &ScanArgs) -> Result<ScanConfig> {
    let mut config = load_config(args.config.as_deref(), args.universe.as_deref())?;
    if let Some(top) = args.top {
        config.top_n = top;
    }
    if let Some(min_score) = args.min_score {
        config.min_score = min_score;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(period) = &args.period {
        config.period = period.clone();
    }
    if let Some(interval) = &args.interval {
        config.interval = interval.clone();
    }
    config.validate()?;
    Ok(config)
}

fn build_provider(synthetic: bool) -> Result<Box<dyn DataProvider>> {
    if synthetic {
        Ok(Box::new(SyntheticProvider::new()))
    } else {
        let provider = YahooProvider::new().context("failed to create Yahoo Finance client")?;
        Ok(Box::new(provider))
    }
}

fn scan_with(args: &ScanArgs) -> Result<(ScanConfig, ScanResult)> {
    let config = build_config(args)?;
    let provider = build_provider(args.synthetic)?;
    let result = run_scan(&config, provider.as_ref());
    Ok((config, result))
}

fn run_scan_cmd(
    args: &ScanArgs,
    json: Option<&Path>,
    csv: Option<&Path>,
    out_dir: Option<&Path>,
    explain: bool,
) -> Result<()> {
    let (config, result) = scan_with(args)?;

    print_market(&result, &config);
    print_setups(&result);

    if explain && !result.top_setups.is_empty() {
        let explainer = FallbackExplainer::from_env();
        info!(explainer = explainer.primary_name(), "explaining top setups");
        for setup in &result.top_setups {
            print_explanation(&explainer, setup);
        }
    }

    if let Some(path) = json {
        std::fs::write(path, export_json(&result)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("JSON written to: {}", path.display());
    }
    if let Some(path) = csv {
        std::fs::write(path, export_setups_csv(&result.all_setups)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("CSV written to: {}", path.display());
    }
    if let Some(dir) = out_dir {
        let dir = save_scan(&result, dir)?;
        println!("Artifacts saved to: {}", dir.display());
    }

    Ok(())
}

fn run_universe_cmd(config: Option<&Path>, universe: Option<&Path>) -> Result<()> {
    let config = load_config(config, universe)?;
    config.validate()?;
    let universe = &config.universe;

    println!(
        "{} symbols in {} sectors (benchmark {})",
        universe.ticker_count(),
        universe.sector_names().len(),
        config.benchmark
    );
    for sector in universe.sector_names() {
        let tickers = universe.sector_tickers(sector).unwrap_or_default();
        let names: Vec<&str> = tickers.iter().map(|t| display_name(t)).collect();
        println!("{sector:<28} {}", names.join(", "));
    }
    Ok(())
}

fn run_explain_cmd(symbols: &[String], args: &ScanArgs) -> Result<()> {
    let (config, result) = scan_with(args)?;
    print_market(&result, &config);

    let explainer = FallbackExplainer::from_env();
    let mut missing = Vec::new();
    for symbol in symbols {
        match result.find_setup(symbol) {
            Some(setup) => print_explanation(&explainer, setup),
            None => {
                let full = if symbol.contains('.') {
                    symbol.to_uppercase()
                } else {
                    format!("{}.NS", symbol.to_uppercase())
                };
                match result.skip_reason(&full) {
                    Some(reason) => println!("{symbol}: no setup ({reason})"),
                    None => println!("{symbol}: not in the configured universe"),
                }
                missing.push(symbol.as_str());
            }
        }
    }

    if missing.len() == symbols.len() {
        bail!("none of the requested symbols qualified: {}", missing.join(", "));
    }
    Ok(())
}

// ── Output ───────────────────────────────────────────────────────────

fn print_market(result: &ScanResult, config: &ScanConfig) {
    println!();
    println!("=== Market ===");
    println!("Benchmark:      {}", result.benchmark_symbol);
    println!("Trend:          {}", result.market_trend);
    println!("Change:         {:+.2}%", result.benchmark_change_pct);
    println!("ATR:            {:.2}", result.benchmark_atr);
    if let Some(err) = &result.benchmark_error {
        println!("WARNING: benchmark unavailable ({err}); trend assumed NEUTRAL");
    }
    println!(
        "Data:           {} {} bars, delayed ~{} min",
        config.period, config.interval, config.data_delay_minutes
    );
    println!(
        "Scanned:        {} symbols, {} setups, {} skipped",
        result.symbols_scanned,
        result.total_setup_count,
        result.skipped.len()
    );
}

fn print_setups(result: &ScanResult) {
    println!();
    if result.top_setups.is_empty() {
        println!("No setups met the filters.");
        return;
    }

    println!("=== Top Setups ===");
    println!(
        "{:<3} {:<12} {:<6} {:>5} {:>10} {:>10} {:>10} {:>5} {:>5}",
        "#", "Symbol", "Bias", "Score", "Entry", "Stop", "Target", "RR", "Qty"
    );
    println!("{}", "-".repeat(75));
    for (i, s) in result.top_setups.iter().enumerate() {
        println!(
            "{:<3} {:<12} {:<6} {:>5} {:>10.2} {:>10.2} {:>10.2} {:>5.2} {:>5}",
            i + 1,
            s.name,
            s.bias.as_str(),
            s.score,
            s.levels.entry,
            s.levels.stop_loss,
            s.levels.target,
            s.levels.risk_reward,
            s.levels.position_size
        );
    }
    if result.all_setups.len() > result.top_setups.len() {
        println!(
            "... {} more setups (use --json or --csv for the full list)",
            result.all_setups.len() - result.top_setups.len()
        );
    }
}

fn print_explanation(explainer: &FallbackExplainer, setup: &Setup) {
    let text = explainer.explain(&ExplanationRequest::from_setup(setup));
    println!();
    println!("--- {} ({}, score {}) ---", setup.name, setup.bias, setup.score);
    println!("{text}");
}
