//! Criterion benchmarks for the per-symbol hot path.
//!
//! Benchmarks:
//! 1. Single indicators (VWAP, ATR, volume average)
//! 2. Full enrichment of one series
//! 3. Classification + risk + scoring on an enriched series

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use intrascan_core::data::synthetic::generate_bars;
use intrascan_core::domain::{Bar, BarSeries, Bias, StructureLabel};
use intrascan_core::indicators::{
    enrich, Atr, Indicator, IndicatorParams, VolumeAverage, VolumeRatio, Vwap,
};
use intrascan_core::risk::calculate_levels;
use intrascan_core::scoring::{score_setup, ScoreInputs};
use intrascan_core::structure::detect_structure;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap();
    let timestamps: Vec<_> = (0..n)
        .map(|i| start + chrono::Duration::minutes(5 * i as i64))
        .collect();
    generate_bars("BENCH.NS", &timestamps)
}

// One session, one week, one month of 5-minute bars.
const SIZES: [usize; 3] = [75, 375, 1575];

// ── 1. Single Indicators ─────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for &bar_count in &SIZES {
        let bars = make_bars(bar_count);

        let stack: Vec<Box<dyn Indicator>> = vec![
            Box::new(Vwap::new()),
            Box::new(Atr::new(14)),
            Box::new(VolumeAverage::new(10)),
            Box::new(VolumeRatio::new(10)),
        ];
        for ind in &stack {
            group.bench_with_input(
                BenchmarkId::new(ind.name(), bar_count),
                &bar_count,
                |b, _| b.iter(|| ind.compute(black_box(&bars))),
            );
        }
    }

    group.finish();
}

// ── 2. Enrichment ────────────────────────────────────────────────────

fn bench_enrich(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich");
    let params = IndicatorParams::default();

    for &bar_count in &SIZES {
        let series = BarSeries::new("BENCH.NS", make_bars(bar_count)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(bar_count), &bar_count, |b, _| {
            b.iter(|| enrich(black_box(&series), black_box(&params)))
        });
    }

    group.finish();
}

// ── 3. Decision Path ─────────────────────────────────────────────────

fn bench_decision(c: &mut Criterion) {
    let series = BarSeries::new("BENCH.NS", make_bars(75)).unwrap();
    let enriched = enrich(&series, &IndicatorParams::default());
    let last = enriched.last().unwrap().clone();
    let atr = last.indicators.atr.unwrap_or(1.0);
    let vwap = last.indicators.vwap.unwrap_or(last.bar.close);

    c.bench_function("structure_risk_score", |b| {
        b.iter(|| {
            let structure = detect_structure(black_box(series.bars()));
            let levels = calculate_levels(black_box(last.bar.close), Bias::Long, atr, 50.0);
            score_setup(&ScoreInputs {
                bias: Bias::Long,
                price: last.bar.close,
                vwap,
                volume_spike: last.indicators.is_spike(),
                structure,
                risk_reward: levels.risk_reward,
                market_trend: StructureLabel::Neutral,
            })
        })
    });
}

criterion_group!(benches, bench_indicators, bench_enrich, bench_decision);
criterion_main!(benches);
