//! Weighted word record.
//!
//! # Invariants
//! - `(list_id, text)` is unique.
//! - `weight` is within `1..=999`; text is non-blank and at most 200 characters.

use crate::db::now_epoch_ms;
use crate::model::validation::{validate_weight, validate_word_text, ValidationError};
use crate::model::word_list::WordListId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type WordId = Uuid;

/// Weight applied when a word is created without one.
pub const DEFAULT_WEIGHT: i64 = 1;

/// One weighted word belonging to a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub list_id: WordListId,
    pub text: String,
    pub weight: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Word {
    pub fn new(list_id: WordListId, text: impl Into<String>, weight: i64) -> Self {
        let now = now_epoch_ms();
        Self {
            id: Uuid::new_v4(),
            list_id,
            text: text.into(),
            weight,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_word_text(&self.text)?;
        validate_weight(self.weight)
    }
}
