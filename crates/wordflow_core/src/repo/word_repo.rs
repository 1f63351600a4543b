//! Word repository contract and SQLite implementation.
//!
//! # Invariants
//! - Words of a list are ordered by `weight DESC, created_at ASC, id ASC`.
//! - Writing a duplicate `(list_id, text)` yields `Conflict(DuplicateWordText)`.
//! - Creating a word for a missing list yields `NotFound`.

use crate::db::now_epoch_ms;
use crate::model::validation::{validate_weight, validate_word_text};
use crate::model::word::{Word, WordId};
use crate::model::word_list::WordListId;
use crate::repo::{
    constraint_failure, ensure_schema_ready, parse_uuid, ConflictKind, ConstraintFailure,
    RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const WORD_SELECT_SQL: &str = "SELECT
    id,
    list_id,
    text,
    weight,
    created_at,
    updated_at
FROM words";

pub trait WordRepository {
    fn create_word(&self, word: &Word) -> RepoResult<WordId>;
    /// Replaces text and weight of an existing word.
    fn update_word(&self, id: WordId, text: &str, weight: i64) -> RepoResult<()>;
    fn delete_word(&self, id: WordId) -> RepoResult<()>;
    fn get_word(&self, id: WordId) -> RepoResult<Option<Word>>;
    fn list_words(&self, list_id: WordListId) -> RepoResult<Vec<Word>>;
}

pub struct SqliteWordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWordRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, &["word_lists", "words"])?;
        Ok(Self { conn })
    }
}

impl WordRepository for SqliteWordRepository<'_> {
    fn create_word(&self, word: &Word) -> RepoResult<WordId> {
        word.validate()?;

        self.conn
            .execute(
                "INSERT INTO words (
                    id,
                    list_id,
                    text,
                    weight,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    word.id.to_string(),
                    word.list_id.to_string(),
                    word.text.as_str(),
                    word.weight,
                    word.created_at,
                    word.updated_at,
                ],
            )
            .map_err(|err| match constraint_failure(&err) {
                Some(ConstraintFailure::Unique) => {
                    RepoError::Conflict(ConflictKind::DuplicateWordText)
                }
                Some(ConstraintFailure::ForeignKey) => {
                    RepoError::not_found("word list", word.list_id)
                }
                None => err.into(),
            })?;

        Ok(word.id)
    }

    fn update_word(&self, id: WordId, text: &str, weight: i64) -> RepoResult<()> {
        validate_word_text(text)?;
        validate_weight(weight)?;

        let changed = self
            .conn
            .execute(
                "UPDATE words
                 SET text = ?2, weight = ?3, updated_at = ?4
                 WHERE id = ?1;",
                params![id.to_string(), text, weight, now_epoch_ms()],
            )
            .map_err(|err| match constraint_failure(&err) {
                Some(ConstraintFailure::Unique) => {
                    RepoError::Conflict(ConflictKind::DuplicateWordText)
                }
                _ => err.into(),
            })?;
        if changed == 0 {
            return Err(RepoError::not_found("word", id));
        }
        Ok(())
    }

    fn delete_word(&self, id: WordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM words WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::not_found("word", id));
        }
        Ok(())
    }

    fn get_word(&self, id: WordId) -> RepoResult<Option<Word>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORD_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_word_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_words(&self, list_id: WordListId) -> RepoResult<Vec<Word>> {
        let mut stmt = self.conn.prepare(&format!(
            "{WORD_SELECT_SQL}
             WHERE list_id = ?1
             ORDER BY weight DESC, created_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([list_id.to_string()])?;
        let mut words = Vec::new();
        while let Some(row) = rows.next()? {
            words.push(parse_word_row(row)?);
        }
        Ok(words)
    }
}

fn parse_word_row(row: &Row<'_>) -> RepoResult<Word> {
    let id_text: String = row.get("id")?;
    let list_id_text: String = row.get("list_id")?;
    let word = Word {
        id: parse_uuid(&id_text, "words.id")?,
        list_id: parse_uuid(&list_id_text, "words.list_id")?,
        text: row.get("text")?,
        weight: row.get("weight")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    word.validate()
        .map_err(|err| RepoError::InvalidData(format!("word {id_text}: {err}")))?;
    Ok(word)
}
