//! Demo data loader.
//!
//! # Invariants
//! - Seeding replaces all existing lists and words in one transaction.

use crate::model::word::Word;
use crate::model::word_list::WordList;
use crate::repo::word_list_repo::{SqliteWordListRepository, WordListRepository};
use crate::repo::word_repo::{SqliteWordRepository, WordRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;

struct SeedList {
    name: &'static str,
    slug: &'static str,
    order: i64,
    theme: &'static str,
    words: &'static [(&'static str, i64)],
}

const DEMO_LISTS: &[SeedList] = &[
    SeedList {
        name: "基本ワードリスト",
        slug: "basic",
        order: 1,
        theme: "blue",
        words: &[("海", 1), ("山", 2)],
    },
    SeedList {
        name: "感情ワードリスト",
        slug: "feelings",
        order: 2,
        theme: "pink",
        words: &[("楽しい", 1), ("悲しい", 1), ("怒り", 3)],
    },
];

/// Counts of rows written by [`seed_demo_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub lists: usize,
    pub words: usize,
}

/// Wipes the store and inserts the demo lists `basic` and `feelings`.
pub fn seed_demo_data(conn: &mut Connection) -> RepoResult<SeedSummary> {
    let tx = conn.transaction()?;
    tx.execute_batch("DELETE FROM words; DELETE FROM word_lists;")?;

    let mut summary = SeedSummary { lists: 0, words: 0 };
    {
        let lists = SqliteWordListRepository::try_new(&tx)?;
        let words = SqliteWordRepository::try_new(&tx)?;
        for seed in DEMO_LISTS {
            let mut list = WordList::new(seed.name, seed.slug);
            list.order = seed.order;
            list.theme = Some(seed.theme.to_string());
            let list_id = lists.create_list(&list)?;
            summary.lists += 1;

            for (text, weight) in seed.words {
                words.create_word(&Word::new(list_id, *text, *weight))?;
                summary.words += 1;
            }
        }
    }
    tx.commit()?;

    info!(
        "event=seed module=seed status=ok lists={} words={}",
        summary.lists, summary.words
    );
    Ok(summary)
}
