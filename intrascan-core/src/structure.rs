//! Market structure: higher-highs/higher-lows vs lower-highs/lower-lows.

use crate::domain::{Bar, StructureLabel};

/// Classify the last three bars.
///
/// BULLISH when both highs and lows are strictly increasing, BEARISH when both
/// are strictly decreasing, NEUTRAL otherwise or with fewer than three bars.
pub fn detect_structure(bars: &[Bar]) -> StructureLabel {
    let n = bars.len();
    if n < 3 {
        return StructureLabel::Neutral;
    }
    let [a, b, c] = [&bars[n - 3], &bars[n - 2], &bars[n - 1]];

    let higher_highs = c.high > b.high && b.high > a.high;
    let higher_lows = c.low > b.low && b.low > a.low;
    let lower_highs = c.high < b.high && b.high < a.high;
    let lower_lows = c.low < b.low && b.low < a.low;

    if higher_highs && higher_lows {
        StructureLabel::Bullish
    } else if lower_highs && lower_lows {
        StructureLabel::Bearish
    } else {
        StructureLabel::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_ohlcv_bars;

    fn hl(pairs: &[(f64, f64)]) -> Vec<Bar> {
        let data: Vec<_> = pairs
            .iter()
            .map(|&(h, l)| ((h + l) / 2.0, h, l, (h + l) / 2.0, 1000))
            .collect();
        make_ohlcv_bars(&data)
    }

    #[test]
    fn rising_highs_and_lows_is_bullish() {
        let bars = hl(&[(10.0, 8.0), (11.0, 9.0), (12.0, 10.0)]);
        assert_eq!(detect_structure(&bars), StructureLabel::Bullish);
    }

    #[test]
    fn falling_highs_and_lows_is_bearish() {
        let bars = hl(&[(12.0, 10.0), (11.0, 9.0), (10.0, 8.0)]);
        assert_eq!(detect_structure(&bars), StructureLabel::Bearish);
    }

    #[test]
    fn mixed_is_neutral() {
        // Higher highs, lower lows (expansion)
        let bars = hl(&[(10.0, 8.0), (11.0, 7.0), (12.0, 6.0)]);
        assert_eq!(detect_structure(&bars), StructureLabel::Neutral);
        // Non-monotonic highs
        let bars = hl(&[(10.0, 8.0), (12.0, 9.0), (11.0, 10.0)]);
        assert_eq!(detect_structure(&bars), StructureLabel::Neutral);
    }

    #[test]
    fn equal_values_are_not_strict() {
        let bars = hl(&[(10.0, 8.0), (11.0, 9.0), (11.0, 10.0)]);
        assert_eq!(detect_structure(&bars), StructureLabel::Neutral);
    }

    #[test]
    fn only_last_three_bars_matter() {
        let bars = hl(&[(20.0, 18.0), (5.0, 3.0), (10.0, 8.0), (11.0, 9.0), (12.0, 10.0)]);
        assert_eq!(detect_structure(&bars), StructureLabel::Bullish);
    }

    #[test]
    fn short_series_is_neutral() {
        assert_eq!(detect_structure(&[]), StructureLabel::Neutral);
        let bars = hl(&[(10.0, 8.0), (11.0, 9.0)]);
        assert_eq!(detect_structure(&bars), StructureLabel::Neutral);
    }
}
