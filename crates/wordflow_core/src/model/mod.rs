//! Domain model for word lists and their weighted words.
//!
//! # Responsibility
//! - Define the records persisted by the repository layer.
//! - Own field validation shared by repositories and the optimistic session.
//!
//! # Invariants
//! - Every list and word is identified by a stable UUID.
//! - A word's weight is always an integer in `1..=999` once persisted.

pub mod validation;
pub mod word;
pub mod word_list;
