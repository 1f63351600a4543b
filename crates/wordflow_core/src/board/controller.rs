//! Recompute-on-change owner of one board instance.
//!
//! # Responsibility
//! - Memoize layout inputs and regenerate items only when one changes.
//! - Coalesce viewport resizes to at most one recompute per animation frame.
//! - Notify a listener with the full item list after every recompute.
//!
//! # Invariants
//! - Nothing is laid out before `mount`.
//! - Each recompute replaces the previous items wholesale.

use crate::board::layout::{lane_count, layout, DisplayItem, LayoutParams, WordEntry, FALLBACK_LANES};
use crate::board::weight::SpeedRange;
use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_VIEWPORT_CLASS: &str = "h-full w-screen";

/// Caller-tunable board settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardOptions {
    /// Replication multiplier; 1.0 is the standard crowding.
    pub density: f64,
    pub speed_range_sec: SpeedRange,
    /// Passed through to the rendering layer untouched.
    pub viewport_class: String,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            density: 1.0,
            speed_range_sec: SpeedRange::default(),
            viewport_class: DEFAULT_VIEWPORT_CLASS.to_string(),
        }
    }
}

type LayoutListener = Box<dyn FnMut(&[DisplayItem])>;

pub struct Board<R: Rng> {
    options: BoardOptions,
    words: Vec<WordEntry>,
    lane_count: u32,
    pending_height: Option<f64>,
    mounted: bool,
    items: Vec<DisplayItem>,
    revision: u64,
    rng: R,
    listener: Option<LayoutListener>,
}

impl Board<ChaCha8Rng> {
    /// Board with a reproducible random source.
    pub fn seeded(options: BoardOptions, seed: u64) -> Self {
        Self::new(options, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Board<R> {
    pub fn new(options: BoardOptions, rng: R) -> Self {
        Self {
            options,
            words: Vec::new(),
            lane_count: FALLBACK_LANES,
            pending_height: None,
            mounted: false,
            items: Vec::new(),
            revision: 0,
            rng,
            listener: None,
        }
    }

    /// Registers the callback that receives every new item list.
    pub fn on_layout(&mut self, listener: impl FnMut(&[DisplayItem]) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Attaches the board to a viewport of `height_px` and lays it out.
    pub fn mount(&mut self, height_px: f64) {
        self.lane_count = lane_count(height_px);
        self.pending_height = None;
        self.mounted = true;
        self.recompute();
    }

    pub fn set_words(&mut self, words: Vec<WordEntry>) {
        if self.words == words {
            return;
        }
        self.words = words;
        self.recompute_if_mounted();
    }

    pub fn set_density(&mut self, density: f64) {
        if self.options.density == density {
            return;
        }
        self.options.density = density;
        self.recompute_if_mounted();
    }

    pub fn set_speed_range(&mut self, range: SpeedRange) {
        if self.options.speed_range_sec == range {
            return;
        }
        self.options.speed_range_sec = range;
        self.recompute_if_mounted();
    }

    /// Replaces all options; only layout-relevant changes trigger a recompute.
    pub fn set_options(&mut self, options: BoardOptions) {
        let layout_changed = self.options.density != options.density
            || self.options.speed_range_sec != options.speed_range_sec;
        self.options = options;
        if layout_changed {
            self.recompute_if_mounted();
        }
    }

    /// Records a viewport height; applied on the next `animation_frame`.
    pub fn observe_resize(&mut self, height_px: f64) {
        self.pending_height = Some(height_px);
    }

    /// Applies the latest pending resize. Returns whether a recompute ran.
    pub fn animation_frame(&mut self) -> bool {
        let Some(height_px) = self.pending_height.take() else {
            return false;
        };
        if !self.mounted {
            return false;
        }
        let lanes = lane_count(height_px);
        if lanes == self.lane_count {
            return false;
        }
        self.lane_count = lanes;
        self.recompute();
        true
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Number of recomputes so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn lane_count(&self) -> u32 {
        self.lane_count
    }

    pub fn options(&self) -> &BoardOptions {
        &self.options
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn recompute_if_mounted(&mut self) {
        if self.mounted {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        let params = LayoutParams {
            density: self.options.density,
            speed_range: self.options.speed_range_sec,
            lane_count: self.lane_count,
        };
        self.items = layout(&self.words, &params, &mut self.rng);
        self.revision += 1;
        debug!(
            "event=board_layout module=board status=ok revision={} words={} items={} lanes={}",
            self.revision,
            self.words.len(),
            self.items.len(),
            self.lane_count
        );
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.items);
        }
    }
}
