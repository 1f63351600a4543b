//! Word list record.
//!
//! # Invariants
//! - `slug` matches `[a-z0-9-]+` and is unique across lists.
//! - `name` is non-blank and at most 100 characters.
//! - `created_at`/`updated_at` are epoch milliseconds.

use crate::db::now_epoch_ms;
use crate::model::validation::{validate_list_name, validate_slug, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type WordListId = Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static NON_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\-]").expect("valid slug filter regex"));

/// Named, ordered collection of weighted words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordList {
    pub id: WordListId,
    pub name: String,
    pub slug: String,
    /// Free-form theme hint for the display (e.g. `blue`).
    pub theme: Option<String>,
    /// Manual ordering hint; not used for list pagination.
    pub order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl WordList {
    /// Creates a list with a fresh id and `created_at = updated_at = now`.
    ///
    /// An empty `slug` is replaced by [`derive_slug`] of the name.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let name = name.into();
        let mut slug = slug.into();
        let id = Uuid::new_v4();
        if slug.is_empty() {
            slug = derive_slug(&name, id);
        }
        let now = now_epoch_ms();
        Self {
            id,
            name,
            slug,
            theme: None,
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_list_name(&self.name)?;
        validate_slug(&self.slug)
    }
}

/// Lowercases, turns whitespace runs into `-`, and drops everything outside
/// `[a-z0-9-]`. May return an empty string (e.g. for non-latin names).
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let dashed = WHITESPACE_RE.replace_all(&lowered, "-");
    NON_SLUG_RE.replace_all(&dashed, "").into_owned()
}

/// [`slugify`], falling back to `list-<first 8 hex of id>` when nothing survives.
pub fn derive_slug(name: &str, id: WordListId) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        let simple = id.simple().to_string();
        format!("list-{}", &simple[..8])
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_slug, slugify, WordList};
    use uuid::Uuid;

    #[test]
    fn slugify_collapses_whitespace_and_strips_symbols() {
        assert_eq!(slugify("  Hello   World! "), "hello-world");
        assert_eq!(slugify("Rust_2024 edition"), "rust2024-edition");
    }

    #[test]
    fn derive_slug_falls_back_for_non_latin_names() {
        let id = Uuid::parse_str("0123abcd-0000-4000-8000-000000000000").unwrap();
        assert_eq!(derive_slug("基本ワードリスト", id), "list-0123abcd");
        assert_eq!(derive_slug("Basic", id), "basic");
    }

    #[test]
    fn new_list_derives_slug_when_missing() {
        let list = WordList::new("Daily Words", "");
        assert_eq!(list.slug, "daily-words");
        assert_eq!(list.created_at, list.updated_at);
        assert!(list.validate().is_ok());
    }
}
