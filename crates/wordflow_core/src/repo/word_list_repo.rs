//! Word list repository contract and SQLite implementation.
//!
//! # Invariants
//! - Pages are ordered by `created_at DESC, id ASC`.
//! - A cursor resumes strictly after the list it names.
//! - Deleting a list removes its words through the `ON DELETE CASCADE` key.

use crate::db::now_epoch_ms;
use crate::model::validation::validate_list_name;
use crate::model::word_list::{WordList, WordListId};
use crate::repo::{
    constraint_failure, ensure_schema_ready, parse_uuid, ConflictKind, ConstraintFailure,
    RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const LIST_SELECT_SQL: &str = "SELECT
    id,
    name,
    slug,
    theme,
    sort_order,
    created_at,
    updated_at
FROM word_lists";

const LISTS_DEFAULT_LIMIT: u32 = 20;
const LISTS_LIMIT_MAX: u32 = 100;

/// Cursor pagination input for list browsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordListPageQuery {
    /// Defaults to 20, clamped to `1..=100`.
    pub limit: Option<u32>,
    /// Id of the last list seen on the previous page.
    pub cursor: Option<WordListId>,
}

/// One page of lists plus the cursor for the next page, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordListPage {
    pub items: Vec<WordList>,
    pub next_cursor: Option<WordListId>,
}

pub trait WordListRepository {
    fn create_list(&self, list: &WordList) -> RepoResult<WordListId>;
    fn rename_list(&self, id: WordListId, name: &str) -> RepoResult<()>;
    fn delete_list(&self, id: WordListId) -> RepoResult<()>;
    fn get_list(&self, id: WordListId) -> RepoResult<Option<WordList>>;
    fn get_list_by_slug(&self, slug: &str) -> RepoResult<Option<WordList>>;
    /// Most recently created list.
    fn get_latest_list(&self) -> RepoResult<Option<WordList>>;
    fn list_page(&self, query: &WordListPageQuery) -> RepoResult<WordListPage>;
}

pub struct SqliteWordListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWordListRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, &["word_lists"])?;
        Ok(Self { conn })
    }
}

impl WordListRepository for SqliteWordListRepository<'_> {
    fn create_list(&self, list: &WordList) -> RepoResult<WordListId> {
        list.validate()?;

        self.conn
            .execute(
                "INSERT INTO word_lists (
                    id,
                    name,
                    slug,
                    theme,
                    sort_order,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    list.id.to_string(),
                    list.name.as_str(),
                    list.slug.as_str(),
                    list.theme.as_deref(),
                    list.order,
                    list.created_at,
                    list.updated_at,
                ],
            )
            .map_err(|err| match constraint_failure(&err) {
                Some(ConstraintFailure::Unique) => RepoError::Conflict(ConflictKind::DuplicateSlug),
                _ => err.into(),
            })?;

        Ok(list.id)
    }

    fn rename_list(&self, id: WordListId, name: &str) -> RepoResult<()> {
        validate_list_name(name)?;

        let changed = self.conn.execute(
            "UPDATE word_lists
             SET name = ?2, updated_at = ?3
             WHERE id = ?1;",
            params![id.to_string(), name, now_epoch_ms()],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("word list", id));
        }
        Ok(())
    }

    fn delete_list(&self, id: WordListId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM word_lists WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::not_found("word list", id));
        }
        Ok(())
    }

    fn get_list(&self, id: WordListId) -> RepoResult<Option<WordList>> {
        self.query_one(&format!("{LIST_SELECT_SQL} WHERE id = ?1;"), &id.to_string())
    }

    fn get_list_by_slug(&self, slug: &str) -> RepoResult<Option<WordList>> {
        self.query_one(&format!("{LIST_SELECT_SQL} WHERE slug = ?1;"), slug)
    }

    fn get_latest_list(&self) -> RepoResult<Option<WordList>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LIST_SELECT_SQL} ORDER BY created_at DESC, id ASC LIMIT 1;"
        ))?;
        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_list_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_page(&self, query: &WordListPageQuery) -> RepoResult<WordListPage> {
        let limit = normalize_list_limit(query.limit);
        let mut sql = format!("{LIST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(cursor) = query.cursor {
            let cursor_text = cursor.to_string();
            let cursor_created_at: i64 = self
                .conn
                .query_row(
                    "SELECT created_at FROM word_lists WHERE id = ?1;",
                    [cursor_text.as_str()],
                    |row| row.get(0),
                )
                .optional()?
                .ok_or_else(|| RepoError::not_found("word list cursor", cursor))?;

            sql.push_str(" AND (created_at < ? OR (created_at = ? AND id > ?))");
            bind_values.push(Value::Integer(cursor_created_at));
            bind_values.push(Value::Integer(cursor_created_at));
            bind_values.push(Value::Text(cursor_text));
        }

        // One extra row tells whether another page exists.
        sql.push_str(" ORDER BY created_at DESC, id ASC LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit) + 1));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_list_row(row)?);
        }

        let next_cursor = if items.len() > limit as usize {
            items.truncate(limit as usize);
            items.last().map(|list| list.id)
        } else {
            None
        };

        Ok(WordListPage { items, next_cursor })
    }
}

impl SqliteWordListRepository<'_> {
    fn query_one(&self, sql: &str, key: &str) -> RepoResult<Option<WordList>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_list_row(row)?)),
            None => Ok(None),
        }
    }
}

/// Applies the list page limit contract: unset or zero means 20, maximum 100.
pub fn normalize_list_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => LISTS_DEFAULT_LIMIT,
        Some(value) => value.min(LISTS_LIMIT_MAX),
    }
}

fn parse_list_row(row: &Row<'_>) -> RepoResult<WordList> {
    let id_text: String = row.get("id")?;
    let list = WordList {
        id: parse_uuid(&id_text, "word_lists.id")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
        theme: row.get("theme")?,
        order: row.get("sort_order")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    list.validate()
        .map_err(|err| RepoError::InvalidData(format!("word list {id_text}: {err}")))?;
    Ok(list)
}
