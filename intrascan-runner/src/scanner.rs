//! Scan orchestration: benchmark regime, per-symbol fan-out, ranking.
//!
//! Flow:
//! 1. Fetch the benchmark and classify the market regime (neutral on failure)
//! 2. Evaluate every universe symbol on a bounded worker pool
//! 3. Keep the setups, record a [`SkipReason`] for everything else
//! 4. Sort by score descending (symbol ascending on ties), take `top_n`
//!
//! [`run_scan`] is total: every failure is contained at the symbol boundary
//! and the caller always receives a `ScanResult`.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use intrascan_core::data::{display_name, DataError, DataProvider};
use intrascan_core::domain::{BarSeries, Bias, MarketTrend, StructureLabel};
use intrascan_core::fingerprint::DatasetHash;
use intrascan_core::indicators::enrich;
use intrascan_core::regime::{classify_regime, MarketRegime};
use intrascan_core::risk::calculate_levels;
use intrascan_core::round2;
use intrascan_core::scoring::{score_setup, ScoreInputs};
use intrascan_core::structure::detect_structure;

use crate::config::ScanConfig;
use crate::result::{ScanResult, Setup, SkipReason, SkippedSymbol, SCHEMA_VERSION};

/// Outcome of one symbol: the bars it was judged on (if fetched) and the verdict.
struct SymbolOutcome {
    symbol: String,
    series: Option<BarSeries>,
    verdict: Result<Setup, SkipReason>,
}

/// Run one complete scan against `provider`.
///
/// An invalid configuration yields an empty, neutral result with
/// `config_error` set; no data is fetched.
pub fn run_scan(config: &ScanConfig, provider: &dyn DataProvider) -> ScanResult {
    if let Err(e) = config.validate() {
        warn!(error = %e, "scan configuration rejected");
        return rejected_scan(config, e.to_string());
    }

    info!(
        provider = provider.name(),
        symbols = config.universe.ticker_count(),
        period = %config.period,
        interval = %config.interval,
        "starting scan"
    );

    // ── Market regime (must finish before any scoring) ──
    let (benchmark, regime, benchmark_error) =
        match provider.fetch(&config.benchmark, &config.period, &config.interval) {
            Ok(series) => {
                let regime = classify_regime(&series, config.atr_period);
                (Some(series), regime, None)
            }
            Err(e) => {
                warn!(benchmark = %config.benchmark, error = %e, "benchmark unavailable, trend set to NEUTRAL");
                (None, MarketRegime::neutral(), Some(e.to_string()))
            }
        };
    info!(
        trend = %regime.trend,
        change_pct = regime.change_pct,
        atr = regime.atr,
        "market regime"
    );

    // ── Per-symbol fan-out ──
    let tickers = config.universe.all_tickers();
    let outcomes = evaluate_all(&tickers, config, regime.trend, provider);

    let dataset_hash = DatasetHash::of(
        benchmark
            .iter()
            .chain(outcomes.iter().filter_map(|o| o.series.as_ref())),
    );

    let mut all_setups = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome.verdict {
            Ok(setup) => all_setups.push(setup),
            Err(reason) => {
                debug!(symbol = %outcome.symbol, %reason, "skipped");
                skipped.push(SkippedSymbol {
                    symbol: outcome.symbol,
                    reason,
                });
            }
        }
    }

    rank_setups(&mut all_setups);
    let top_setups: Vec<Setup> = all_setups.iter().take(config.top_n).cloned().collect();

    info!(
        setups = all_setups.len(),
        skipped = skipped.len(),
        dataset = dataset_hash.short(),
        "scan complete"
    );

    ScanResult {
        schema_version: SCHEMA_VERSION,
        config_error: None,
        benchmark_symbol: config.benchmark.clone(),
        market_trend: regime.trend,
        benchmark_change_pct: regime.change_pct,
        benchmark_atr: regime.atr,
        benchmark_error,
        symbols_scanned: tickers.len(),
        total_setup_count: all_setups.len(),
        top_setups,
        all_setups,
        skipped,
        dataset_hash: dataset_hash.0,
    }
}

fn rejected_scan(config: &ScanConfig, error: String) -> ScanResult {
    let regime = MarketRegime::neutral();
    ScanResult {
        schema_version: SCHEMA_VERSION,
        config_error: Some(error),
        benchmark_symbol: config.benchmark.clone(),
        market_trend: regime.trend,
        benchmark_change_pct: regime.change_pct,
        benchmark_atr: regime.atr,
        benchmark_error: None,
        symbols_scanned: 0,
        total_setup_count: 0,
        top_setups: Vec::new(),
        all_setups: Vec::new(),
        skipped: Vec::new(),
        dataset_hash: DatasetHash::of(std::iter::empty::<&BarSeries>()).0,
    }
}

/// Score descending, then symbol ascending.
pub fn rank_setups(setups: &mut [Setup]) {
    setups.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.symbol.cmp(&b.symbol)));
}

/// Evaluate `tickers` on a pool of `config.workers` threads, preserving input order.
fn evaluate_all(
    tickers: &[&str],
    config: &ScanConfig,
    market_trend: MarketTrend,
    provider: &dyn DataProvider,
) -> Vec<SymbolOutcome> {
    let work = |symbol: &&str| fetch_and_evaluate(symbol, config, market_trend, provider);

    if config.workers > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()
        {
            Ok(pool) => return pool.install(|| tickers.par_iter().map(work).collect()),
            Err(e) => warn!(error = %e, "failed to build worker pool, scanning sequentially"),
        }
    }

    tickers.iter().map(work).collect()
}

fn fetch_and_evaluate(
    symbol: &str,
    config: &ScanConfig,
    market_trend: MarketTrend,
    provider: &dyn DataProvider,
) -> SymbolOutcome {
    match provider.fetch(symbol, &config.period, &config.interval) {
        Ok(series) => {
            let verdict = evaluate_series(&series, config, market_trend);
            SymbolOutcome {
                symbol: symbol.to_string(),
                series: Some(series),
                verdict,
            }
        }
        Err(e) => {
            let reason = match e {
                DataError::DataUnavailable { .. } => SkipReason::DataUnavailable,
                other => SkipReason::FetchFailed(other.to_string()),
            };
            SymbolOutcome {
                symbol: symbol.to_string(),
                series: None,
                verdict: Err(reason),
            }
        }
    }
}

/// Judge one symbol's bars against the market trend.
///
/// Checks run in a fixed order and the first failure is reported: history
/// length, price floor, indicator availability, bias, risk, score.
pub fn evaluate_series(
    series: &BarSeries,
    config: &ScanConfig,
    market_trend: MarketTrend,
) -> Result<Setup, SkipReason> {
    let required = config.required_bars();
    if series.len() < required {
        return Err(SkipReason::InsufficientHistory {
            bars: series.len(),
            required,
        });
    }

    let price = series.last().close;
    if price < config.min_price {
        return Err(SkipReason::BelowPriceFloor {
            price,
            floor: config.min_price,
        });
    }

    let history = enrich(series, &config.indicator_params());
    let last = match history.last() {
        Some(bar) => bar.indicators,
        None => return Err(SkipReason::DataUnavailable),
    };

    let atr = match last.atr {
        Some(atr) if atr > 0.0 => atr,
        Some(_) => return Err(SkipReason::UntradeableRisk),
        None => return Err(SkipReason::IndicatorUndefined("atr".into())),
    };
    let vwap = last
        .vwap
        .ok_or_else(|| SkipReason::IndicatorUndefined("vwap".into()))?;
    let volume_spike = last
        .volume_spike
        .ok_or_else(|| SkipReason::IndicatorUndefined("volume_spike".into()))?;

    let structure = detect_structure(series.bars());
    let bias = determine_bias(price, vwap, volume_spike, structure, market_trend);
    if bias == Bias::None {
        return Err(SkipReason::NoBias);
    }

    let levels = calculate_levels(price, bias, atr, config.max_risk_per_trade);
    if !levels.is_tradeable() {
        return Err(SkipReason::UntradeableRisk);
    }
    if levels.risk_reward < config.min_risk_reward {
        return Err(SkipReason::RiskRewardBelowMinimum {
            risk_reward: levels.risk_reward,
            minimum: config.min_risk_reward,
        });
    }

    let score = score_setup(&ScoreInputs {
        bias,
        price,
        vwap,
        volume_spike,
        structure,
        risk_reward: levels.risk_reward,
        market_trend,
    });
    if score < config.min_score {
        return Err(SkipReason::ScoreBelowMinimum {
            score,
            minimum: config.min_score,
        });
    }

    let symbol = series.symbol();
    Ok(Setup {
        symbol: symbol.to_string(),
        name: display_name(symbol).to_string(),
        sector: config.universe.sector_of(symbol).map(str::to_string),
        bias,
        current_price: round2(price),
        vwap: round2(vwap),
        volume_ratio: last.volume_ratio.map(round2),
        structure,
        atr: round2(atr),
        levels,
        market_trend,
        score,
        max_risk_rupees: config.max_risk_per_trade,
        data_delay_minutes: config.data_delay_minutes,
        history,
    })
}

/// LONG needs price above VWAP, a volume spike, bullish structure and a
/// market that is not bearish; SHORT is the mirror. LONG is checked first.
pub fn determine_bias(
    price: f64,
    vwap: f64,
    volume_spike: bool,
    structure: StructureLabel,
    market_trend: MarketTrend,
) -> Bias {
    let long_ok = price > vwap
        && volume_spike
        && structure == StructureLabel::Bullish
        && market_trend != StructureLabel::Bearish;
    if long_ok {
        return Bias::Long;
    }

    let short_ok = price < vwap
        && volume_spike
        && structure == StructureLabel::Bearish
        && market_trend != StructureLabel::Bullish;
    if short_ok {
        return Bias::Short;
    }

    Bias::None
}
