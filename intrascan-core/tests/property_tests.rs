//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Score bounds: every input combination scores within 0..=100
//! 2. Score monotonicity: adding an aligned condition never lowers the score
//! 3. Risk levels: stop and target sit on opposite sides of entry
//! 4. VWAP bounds - VWAP stays within the min/max typical price seen so far
//! 5. Structure: a constant price shift does not change the label

use chrono::{Duration, NaiveDate, NaiveDateTime};
use intrascan_core::domain::{Bar, Bias, StructureLabel};
use intrascan_core::indicators::{Indicator, Vwap};
use intrascan_core::risk::calculate_levels;
use intrascan_core::scoring::{score_setup, ScoreInputs, MAX_SCORE};
use intrascan_core::structure::detect_structure;
use proptest::prelude::*;

fn ts(i: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap()
        + Duration::minutes(5 * i as i64)
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_bias() -> impl Strategy<Value = Bias> {
    prop_oneof![Just(Bias::Long), Just(Bias::Short), Just(Bias::None)]
}

fn arb_label() -> impl Strategy<Value = StructureLabel> {
    prop_oneof![
        Just(StructureLabel::Bullish),
        Just(StructureLabel::Bearish),
        Just(StructureLabel::Neutral),
    ]
}

fn arb_price() -> impl Strategy<Value = f64> {
    (20.0..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

prop_compose! {
    fn arb_score_inputs()(
        bias in arb_bias(),
        price in arb_price(),
        vwap in arb_price(),
        volume_spike in any::<bool>(),
        structure in arb_label(),
        risk_reward in 0.0..5.0_f64,
        market_trend in arb_label(),
    ) -> ScoreInputs {
        ScoreInputs { bias, price, vwap, volume_spike, structure, risk_reward, market_trend }
    }
}

/// (high, low, close, volume) in whole paise with low <= close <= high.
fn arb_bar_shape() -> impl Strategy<Value = (f64, f64, f64, u64)> {
    (2_000u32..100_000, 0u32..2_000, 0u32..=100, 0u64..1_000_000).prop_map(
        |(low, range, pct, volume)| {
            let close = low + range * pct / 100;
            (
                (low + range) as f64 / 100.0,
                low as f64 / 100.0,
                close as f64 / 100.0,
                volume,
            )
        },
    )
}

fn bars_from(shapes: &[(f64, f64, f64, u64)]) -> Vec<Bar> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, &(high, low, close, volume))| Bar {
            timestamp: ts(i),
            open: close,
            high,
            low,
            close,
            volume,
        })
        .collect()
}

// ── 1. Score Bounds ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn score_is_bounded(inputs in arb_score_inputs()) {
        let score = score_setup(&inputs);
        prop_assert!(score <= MAX_SCORE);
        prop_assert!(score % 5 == 0);
    }
}

// ── 2. Score Monotonicity ────────────────────────────────────────────

proptest! {
    /// Turning on the volume spike or raising RR never lowers the score.
    #[test]
    fn score_monotone_in_aligned_conditions(
        inputs in arb_score_inputs(),
        extra_rr in 0.0..3.0_f64,
    ) {
        let base = score_setup(&inputs);

        let spiked = ScoreInputs { volume_spike: true, ..inputs };
        prop_assert!(score_setup(&spiked) >= base);

        let better_rr = ScoreInputs { risk_reward: inputs.risk_reward + extra_rr, ..inputs };
        prop_assert!(score_setup(&better_rr) >= base);
    }

    /// Aligning structure with a directional bias never lowers the score.
    #[test]
    fn aligned_structure_never_hurts(inputs in arb_score_inputs()) {
        let base = score_setup(&inputs);
        if let Some(label) = inputs.bias.aligned_label() {
            let aligned = ScoreInputs { structure: label, ..inputs };
            prop_assert!(score_setup(&aligned) >= base);
        }
    }
}

// ── 3. Risk Levels ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn stop_and_target_bracket_entry(
        entry in arb_price(),
        atr in 0.05..50.0_f64,
        budget in 1.0..10_000.0_f64,
        long in any::<bool>(),
    ) {
        let bias = if long { Bias::Long } else { Bias::Short };
        let levels = calculate_levels(entry, bias, atr, budget);

        if long {
            prop_assert!(levels.stop_loss <= levels.entry);
            prop_assert!(levels.target >= levels.entry);
        } else {
            prop_assert!(levels.stop_loss >= levels.entry);
            prop_assert!(levels.target <= levels.entry);
        }
        prop_assert_eq!(levels.risk_reward, 2.0);

        // Sizing never exceeds the budget at full precision.
        let risk_per_share = 1.5 * atr;
        let tolerance = budget * 1e-9;
        prop_assert!(levels.position_size as f64 * risk_per_share <= budget + tolerance);
        prop_assert!((levels.position_size + 1) as f64 * risk_per_share > budget - tolerance);
    }

    #[test]
    fn no_bias_is_always_flat(entry in arb_price(), atr in 0.0..50.0_f64) {
        let levels = calculate_levels(entry, Bias::None, atr, 50.0);
        prop_assert_eq!(levels.position_size, 0);
        prop_assert_eq!(levels.stop_loss, levels.entry);
        prop_assert_eq!(levels.target, levels.entry);
        prop_assert!(!levels.is_tradeable());
    }
}

// ── 4. VWAP Bounds ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn vwap_within_typical_price_range(shapes in prop::collection::vec(arb_bar_shape(), 1..60)) {
        let bars = bars_from(&shapes);
        let vwap = Vwap::new().compute(&bars);
        prop_assert_eq!(vwap.len(), bars.len());

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut cum_volume = 0u64;
        for (bar, v) in bars.iter().zip(&vwap) {
            cum_volume += bar.volume;
            if bar.volume > 0 {
                lo = lo.min(bar.typical_price());
                hi = hi.max(bar.typical_price());
            }
            if cum_volume == 0 {
                prop_assert!(v.is_nan());
            } else {
                prop_assert!(*v >= lo - 1e-6 && *v <= hi + 1e-6);
            }
        }
    }
}

// ── 5. Structure ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn structure_invariant_under_price_shift(
        shapes in prop::collection::vec(arb_bar_shape(), 0..8),
        shift in 0u32..50_000,
    ) {
        let shift = shift as f64 / 100.0;
        let bars = bars_from(&shapes);
        let shifted: Vec<Bar> = bars
            .iter()
            .map(|b| Bar {
                open: b.open + shift,
                high: b.high + shift,
                low: b.low + shift,
                close: b.close + shift,
                ..b.clone()
            })
            .collect();

        let label = detect_structure(&bars);
        prop_assert_eq!(label, detect_structure(&shifted));
        if bars.len() < 3 {
            prop_assert_eq!(label, StructureLabel::Neutral);
        }
    }

    #[test]
    fn structure_depends_only_on_last_three(
        prefix in prop::collection::vec(arb_bar_shape(), 0..10),
        tail in prop::collection::vec(arb_bar_shape(), 3..4),
    ) {
        let tail_only = bars_from(&tail);
        let mut full_shapes = prefix.clone();
        full_shapes.extend(tail.iter().copied());
        let full = bars_from(&full_shapes);
        prop_assert_eq!(detect_structure(&full), detect_structure(&tail_only));
    }
}
