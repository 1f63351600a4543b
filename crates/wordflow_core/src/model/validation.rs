//! Field validation rules for lists and words.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const LIST_NAME_MAX_CHARS: usize = 100;
pub const WORD_TEXT_MAX_CHARS: usize = 200;
pub const WEIGHT_MIN: i64 = 1;
pub const WEIGHT_MAX: i64 = 999;

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid slug regex"));

/// Rejection reasons for list/word input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyListName,
    ListNameTooLong { chars: usize },
    InvalidSlug(String),
    EmptyWordText,
    WordTextTooLong { chars: usize },
    WeightOutOfRange(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyListName => write!(f, "list name cannot be empty"),
            Self::ListNameTooLong { chars } => write!(
                f,
                "list name has {chars} characters; at most {LIST_NAME_MAX_CHARS} allowed"
            ),
            Self::InvalidSlug(slug) => {
                write!(f, "slug `{slug}` must match [a-z0-9-]+")
            }
            Self::EmptyWordText => write!(f, "word text cannot be empty"),
            Self::WordTextTooLong { chars } => write!(
                f,
                "word text has {chars} characters; at most {WORD_TEXT_MAX_CHARS} allowed"
            ),
            Self::WeightOutOfRange(weight) => write!(
                f,
                "weight {weight} is outside {WEIGHT_MIN}..={WEIGHT_MAX}"
            ),
        }
    }
}

impl Error for ValidationError {}

pub fn validate_list_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyListName);
    }
    let chars = name.chars().count();
    if chars > LIST_NAME_MAX_CHARS {
        return Err(ValidationError::ListNameTooLong { chars });
    }
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_RE.is_match(slug) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSlug(slug.to_string()))
    }
}

pub fn validate_word_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyWordText);
    }
    let chars = text.chars().count();
    if chars > WORD_TEXT_MAX_CHARS {
        return Err(ValidationError::WordTextTooLong { chars });
    }
    Ok(())
}

pub fn validate_weight(weight: i64) -> Result<(), ValidationError> {
    if (WEIGHT_MIN..=WEIGHT_MAX).contains(&weight) {
        Ok(())
    } else {
        Err(ValidationError::WeightOutOfRange(weight))
    }
}
