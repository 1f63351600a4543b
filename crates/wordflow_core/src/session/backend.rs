//! Data-access seam used by the optimistic session.

use crate::model::word::{Word, WordId};
use crate::model::word_list::{WordList, WordListId};
use crate::repo::word_list_repo::{SqliteWordListRepository, WordListPage};
use crate::repo::word_repo::SqliteWordRepository;
use crate::repo::RepoResult;
use crate::service::word_list_service::{CreateWordListRequest, WordListService};
use crate::service::word_service::WordService;
use rusqlite::Connection;

/// Remote side of the session: every call is a single attempt.
pub trait WordListBackend {
    fn list_lists(&mut self, limit: u32) -> RepoResult<WordListPage>;
    fn create_list(&mut self, request: &CreateWordListRequest) -> RepoResult<WordList>;
    fn rename_list(&mut self, id: WordListId, name: &str) -> RepoResult<WordList>;
    fn delete_list(&mut self, id: WordListId) -> RepoResult<()>;
    fn list_words(&mut self, list_id: WordListId) -> RepoResult<Vec<Word>>;
    fn create_word(
        &mut self,
        list_id: WordListId,
        text: &str,
        weight: Option<i64>,
    ) -> RepoResult<Word>;
    fn update_word(&mut self, id: WordId, text: &str, weight: i64) -> RepoResult<Word>;
    fn delete_word(&mut self, id: WordId) -> RepoResult<()>;
}

/// Backend that talks straight to a migrated SQLite connection.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn lists(
        &self,
    ) -> RepoResult<WordListService<SqliteWordListRepository<'_>, SqliteWordRepository<'_>>> {
        Ok(WordListService::new(
            SqliteWordListRepository::try_new(&self.conn)?,
            SqliteWordRepository::try_new(&self.conn)?,
        ))
    }

    fn words(&self) -> RepoResult<WordService<SqliteWordRepository<'_>>> {
        Ok(WordService::new(SqliteWordRepository::try_new(&self.conn)?))
    }
}

impl WordListBackend for SqliteBackend {
    fn list_lists(&mut self, limit: u32) -> RepoResult<WordListPage> {
        self.lists()?.list_page(Some(limit), None)
    }

    fn create_list(&mut self, request: &CreateWordListRequest) -> RepoResult<WordList> {
        self.lists()?.create_list(request)
    }

    fn rename_list(&mut self, id: WordListId, name: &str) -> RepoResult<WordList> {
        self.lists()?.rename_list(id, name)
    }

    fn delete_list(&mut self, id: WordListId) -> RepoResult<()> {
        self.lists()?.delete_list(id)
    }

    fn list_words(&mut self, list_id: WordListId) -> RepoResult<Vec<Word>> {
        Ok(self.words()?.list_by_list_id(list_id)?.items)
    }

    fn create_word(
        &mut self,
        list_id: WordListId,
        text: &str,
        weight: Option<i64>,
    ) -> RepoResult<Word> {
        self.words()?.create_word(list_id, text, weight)
    }

    fn update_word(&mut self, id: WordId, text: &str, weight: i64) -> RepoResult<Word> {
        self.words()?.update_word(id, text, weight)
    }

    fn delete_word(&mut self, id: WordId) -> RepoResult<()> {
        self.words()?.delete_word(id)
    }
}
