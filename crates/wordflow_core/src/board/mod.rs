//! Floating word board.
//!
//! # Responsibility
//! - Map word weights to font size, copy count and animation duration.
//! - Lay weighted words out into lanes as continuously moving instances.
//! - Own recomputation for one display instance.
//!
//! The board never fails: malformed weights are coerced and empty input
//! produces an empty layout.

pub mod controller;
pub mod layout;
pub mod weight;

pub use controller::{Board, BoardOptions};
pub use layout::{lane_count, layout, DisplayItem, LayoutParams, WordEntry};
pub use weight::{
    duration_sec, font_size_rem, frequency, normalize_weight, SpeedRange, MAX_COPIES_PER_WORD,
};
