//! Lane layout: replicate, shuffle and position word instances.
//!
//! # Invariants
//! - Output length equals the sum of `frequency(weight, density)` over inputs.
//! - Output texts are a permutation of the replicated input texts.
//! - `lane < lane_count`, `delay_sec <= 0`, `|delay_sec| < duration_sec`.
//! - Layout never fails; empty input yields an empty layout.

use crate::board::weight::{duration_sec, font_size_rem, frequency, SpeedRange};
use crate::model::word::Word;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const LANE_ROW_PX: f64 = 120.0;
pub const MIN_LANES: u32 = 3;
pub const MAX_LANES: u32 = 14;
pub const FALLBACK_LANES: u32 = 8;
pub const LANE_SPACING_PX: i64 = 28;
pub const JITTER_PX: i64 = 5;

/// Board input record. `weight` is taken as-is and coerced by the mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: String,
    pub text: String,
    pub weight: f64,
}

impl WordEntry {
    pub fn new(id: impl Into<String>, text: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            weight,
        }
    }
}

impl From<&Word> for WordEntry {
    fn from(word: &Word) -> Self {
        Self {
            id: word.id.to_string(),
            text: word.text.clone(),
            weight: word.weight as f64,
        }
    }
}

/// One animated instance of a word. Regenerated on every layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub key: String,
    pub text: String,
    pub lane: u32,
    pub vertical_offset_px: i64,
    pub font_size_rem: f64,
    pub duration_sec: f64,
    /// Negative so the item starts mid-flight.
    pub delay_sec: f64,
}

/// Everything besides the words that shapes a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub density: f64,
    pub speed_range: SpeedRange,
    pub lane_count: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            density: 1.0,
            speed_range: SpeedRange::default(),
            lane_count: FALLBACK_LANES,
        }
    }
}

/// Lanes that fit a viewport of `height_px`: one per 120px, clamped to
/// `3..=14`. Zero, negative or non-finite heights mean "unknown" and give 8.
pub fn lane_count(height_px: f64) -> u32 {
    if !height_px.is_finite() || height_px <= 0.0 {
        return FALLBACK_LANES;
    }
    let rows = (height_px / LANE_ROW_PX).floor();
    rows.clamp(f64::from(MIN_LANES), f64::from(MAX_LANES)) as u32
}

/// Expands each entry into `frequency(weight, density)` references.
pub fn replicate(words: &[WordEntry], density: f64) -> Vec<&WordEntry> {
    words
        .iter()
        .flat_map(|word| std::iter::repeat(word).take(frequency(word.weight, density)))
        .collect()
}

/// Builds a fresh layout from `words`, drawing all randomness from `rng`.
pub fn layout<R: Rng + ?Sized>(
    words: &[WordEntry],
    params: &LayoutParams,
    rng: &mut R,
) -> Vec<DisplayItem> {
    let mut instances = replicate(words, params.density);
    instances.shuffle(rng);

    let lanes = params.lane_count.max(1);
    instances
        .into_iter()
        .enumerate()
        .map(|(index, word)| {
            let duration = duration_sec(word.weight, params.speed_range);
            let lane = rng.gen_range(0..lanes);
            let jitter = rng.gen_range(-JITTER_PX..JITTER_PX);
            let delay = -rng.gen::<f64>() * duration;
            DisplayItem {
                key: format!("{}-{}-{:08x}", word.id, index, rng.gen::<u32>()),
                text: word.text.clone(),
                lane,
                vertical_offset_px: i64::from(lane) * LANE_SPACING_PX + jitter,
                font_size_rem: font_size_rem(word.weight),
                duration_sec: duration,
                delay_sec: delay,
            }
        })
        .collect()
}
