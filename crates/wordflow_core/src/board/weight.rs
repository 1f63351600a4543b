//! Weight → visual parameter mapping.
//!
//! Every function here accepts arbitrary numeric input: weights are truncated
//! and clamped into `1..=999`, never rejected.

use serde::{Deserialize, Serialize};

pub const WEIGHT_FLOOR: f64 = 1.0;
pub const WEIGHT_CEIL: f64 = 999.0;

const FONT_BASE_REM: f64 = 1.5;
const FONT_SPAN_REM: f64 = 3.0;
const MAX_EXTRA_COPIES: f64 = 5.0;
const LIGHT_SPEEDUP: f64 = 0.75;

/// Upper bound on animated copies of a single word, whatever the density.
pub const MAX_COPIES_PER_WORD: usize = 60;

/// Animation duration bounds in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min: 14.0,
            max: 28.0,
        }
    }
}

/// Maps a weight to `[0, 1]`. Non-finite input counts as the lightest weight.
pub fn normalize_weight(weight: f64) -> f64 {
    let truncated = if weight.is_finite() {
        weight.trunc()
    } else if weight == f64::INFINITY {
        WEIGHT_CEIL
    } else {
        WEIGHT_FLOOR
    };
    (truncated.clamp(WEIGHT_FLOOR, WEIGHT_CEIL) - WEIGHT_FLOOR) / (WEIGHT_CEIL - WEIGHT_FLOOR)
}

/// Font size in rem, `1.5..=4.5`.
pub fn font_size_rem(weight: f64) -> f64 {
    FONT_BASE_REM + normalize_weight(weight) * FONT_SPAN_REM
}

/// How many animated copies a word gets: `1..=6` scaled by `density`, kept
/// within `1..=MAX_COPIES_PER_WORD`. A NaN product yields one copy; an
/// infinite one saturates at the cap.
pub fn frequency(weight: f64, density: f64) -> usize {
    let base = 1.0 + (normalize_weight(weight) * MAX_EXTRA_COPIES).round();
    let scaled = (base * density).round();
    if scaled.is_nan() || scaled < 1.0 {
        1
    } else if scaled >= MAX_COPIES_PER_WORD as f64 {
        MAX_COPIES_PER_WORD
    } else {
        scaled as usize
    }
}

/// Seconds for one pass across the viewport; heavier words drift slower.
pub fn duration_sec(weight: f64, range: SpeedRange) -> f64 {
    let t = normalize_weight(weight);
    range.min + (1.0 - LIGHT_SPEEDUP * (1.0 - t)) * (range.max - range.min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_hits_both_ends() {
        assert_eq!(normalize_weight(1.0), 0.0);
        assert_eq!(normalize_weight(999.0), 1.0);
        assert_eq!(normalize_weight(500.0), 499.0 / 998.0);
    }

    #[test]
    fn malformed_weights_are_coerced() {
        assert_eq!(normalize_weight(-40.0), 0.0);
        assert_eq!(normalize_weight(0.0), 0.0);
        assert_eq!(normalize_weight(5000.0), 1.0);
        assert_eq!(normalize_weight(f64::NAN), 0.0);
        assert_eq!(normalize_weight(f64::INFINITY), 1.0);
        assert_eq!(normalize_weight(2.9), normalize_weight(2.0));
    }

    #[test]
    fn font_size_spans_one_and_a_half_to_four_and_a_half() {
        assert_eq!(font_size_rem(1.0), 1.5);
        assert_eq!(font_size_rem(999.0), 4.5);
    }

    #[test]
    fn frequency_scales_with_weight_and_density() {
        assert_eq!(frequency(1.0, 1.0), 1);
        assert_eq!(frequency(999.0, 1.0), 6);
        assert_eq!(frequency(999.0, 2.0), 12);
        assert_eq!(frequency(999.0, 0.5), 3);
        assert_eq!(frequency(999.0, 0.0), 1);
        assert_eq!(frequency(500.0, -3.0), 1);
        assert_eq!(frequency(500.0, f64::NAN), 1);
    }

    #[test]
    fn frequency_is_capped_for_huge_density() {
        assert_eq!(frequency(999.0, 1e30), MAX_COPIES_PER_WORD);
        assert_eq!(frequency(999.0, f64::INFINITY), MAX_COPIES_PER_WORD);
        assert_eq!(frequency(1.0, 1e6), MAX_COPIES_PER_WORD);
        assert_eq!(frequency(999.0, 10.0), MAX_COPIES_PER_WORD);
    }

    #[test]
    fn duration_grows_with_weight() {
        let range = SpeedRange::default();
        assert_eq!(duration_sec(1.0, range), 17.5);
        assert_eq!(duration_sec(999.0, range), 28.0);
        assert!(duration_sec(100.0, range) < duration_sec(900.0, range));
    }

    #[test]
    fn duration_with_degenerate_range_is_constant() {
        let range = SpeedRange {
            min: 10.0,
            max: 10.0,
        };
        assert_eq!(duration_sec(1.0, range), 10.0);
        assert_eq!(duration_sec(999.0, range), 10.0);
    }
}
