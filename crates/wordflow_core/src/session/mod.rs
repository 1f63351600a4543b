//! Optimistic client-side session over word lists and words.
//!
//! # Responsibility
//! - Cache the visible lists, the active list and its words.
//! - Apply each mutation locally first, then confirm it with the backend.
//! - Report outcomes as user-facing notices.
//!
//! # Invariants
//! - A failed mutation restores the exact snapshot taken before it.
//! - Tentative entries carry a local id until the backend answer replaces it.
//! - Uniqueness conflicts surface as `Notice::Conflict`; any other failure as
//!   `Notice::Failure`.

mod backend;

pub use backend::{SqliteBackend, WordListBackend};

use crate::board::layout::WordEntry;
use crate::model::validation::ValidationError;
use crate::model::word::{Word, WordId, DEFAULT_WEIGHT};
use crate::model::word_list::{WordList, WordListId};
use crate::repo::{RepoError, RepoResult};
use crate::service::word_list_service::CreateWordListRequest;
use log::{info, warn};
use uuid::Uuid;

/// Page size the session asks for when (re)loading lists.
pub const SESSION_LIST_LIMIT: u32 = 50;

/// User-facing outcome of one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Conflict(String),
    Failure(String),
}

/// Cache entry; `tentative` until the backend has confirmed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached<T> {
    pub record: T,
    pub tentative: bool,
}

impl<T> Cached<T> {
    fn confirmed(record: T) -> Self {
        Self {
            record,
            tentative: false,
        }
    }

    fn tentative(record: T) -> Self {
        Self {
            record,
            tentative: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    lists: Vec<Cached<WordList>>,
    active_list: Option<WordListId>,
    words: Vec<Cached<Word>>,
}

pub struct WordListSession<B: WordListBackend> {
    backend: B,
    lists: Vec<Cached<WordList>>,
    next_cursor: Option<WordListId>,
    active_list: Option<WordListId>,
    words: Vec<Cached<Word>>,
    notices: Vec<Notice>,
}

impl<B: WordListBackend> WordListSession<B> {
    /// Empty session; call [`Self::refresh_lists`] to load.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lists: Vec::new(),
            next_cursor: None,
            active_list: None,
            words: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Session preloaded from the backend, activating `initial_active` or the
    /// first list.
    pub fn open(backend: B, initial_active: Option<WordListId>) -> RepoResult<Self> {
        let mut session = Self::new(backend);
        session.refresh_lists()?;
        let active = initial_active.or_else(|| session.lists.first().map(|l| l.record.id));
        if let Some(id) = active {
            session.select_list(id)?;
        }
        Ok(session)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn lists(&self) -> &[Cached<WordList>] {
        &self.lists
    }

    pub fn next_cursor(&self) -> Option<WordListId> {
        self.next_cursor
    }

    pub fn active_list_id(&self) -> Option<WordListId> {
        self.active_list
    }

    pub fn active_list(&self) -> Option<&WordList> {
        let id = self.active_list?;
        self.lists
            .iter()
            .map(|cached| &cached.record)
            .find(|list| list.id == id)
    }

    pub fn words(&self) -> &[Cached<Word>] {
        &self.words
    }

    /// Words of the active list as board input.
    pub fn board_entries(&self) -> Vec<WordEntry> {
        self.words
            .iter()
            .map(|cached| WordEntry::from(&cached.record))
            .collect()
    }

    /// Drains notices accumulated since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Replaces the cached lists with the backend's first page.
    pub fn refresh_lists(&mut self) -> RepoResult<()> {
        let page = self.backend.list_lists(SESSION_LIST_LIMIT)?;
        self.lists = page.items.into_iter().map(Cached::confirmed).collect();
        self.next_cursor = page.next_cursor;
        Ok(())
    }

    /// Makes `id` the active list and loads its words.
    pub fn select_list(&mut self, id: WordListId) -> RepoResult<()> {
        self.active_list = Some(id);
        self.refresh_words()
    }

    /// Reloads the active list's words; clears them when no list is active.
    pub fn refresh_words(&mut self) -> RepoResult<()> {
        self.words = match self.active_list {
            Some(id) => self
                .backend
                .list_words(id)?
                .into_iter()
                .map(Cached::confirmed)
                .collect(),
            None => Vec::new(),
        };
        Ok(())
    }

    pub fn create_list(&mut self, name: &str) -> RepoResult<WordList> {
        let name = name.trim();
        if name.is_empty() {
            self.notices
                .push(Notice::Failure("enter a list name".to_string()));
            return Err(RepoError::Validation(ValidationError::EmptyListName));
        }

        let snapshot = self.snapshot();
        let placeholder = WordList::new(name, format!("tentative-{}", Uuid::new_v4().simple()));
        let temp_id = placeholder.id;
        self.lists.push(Cached::tentative(placeholder));

        let result = self
            .backend
            .create_list(&CreateWordListRequest::named(name));
        let outcome = match result {
            Ok(created) => {
                replace_tentative(&mut self.lists, temp_id, created.clone(), |l| l.id);
                self.active_list = Some(created.id);
                self.words.clear();
                self.notices
                    .push(Notice::Success("list created".to_string()));
                Ok(created)
            }
            Err(err) => Err(self.roll_back(snapshot, err, "failed to create the list")),
        };
        self.settle_lists();
        outcome
    }

    pub fn rename_list(&mut self, id: WordListId, name: &str) -> RepoResult<WordList> {
        let name = name.trim();
        let snapshot = self.snapshot();
        if let Some(cached) = self.lists.iter_mut().find(|c| c.record.id == id) {
            cached.record.name = name.to_string();
        }

        let outcome = match self.backend.rename_list(id, name) {
            Ok(renamed) => {
                self.notices
                    .push(Notice::Success("list renamed".to_string()));
                Ok(renamed)
            }
            Err(err) => Err(self.roll_back(snapshot, err, "failed to rename the list")),
        };
        self.settle_lists();
        outcome
    }

    /// Deletes a list; on success the first remaining list becomes active.
    pub fn delete_list(&mut self, id: WordListId) -> RepoResult<()> {
        let snapshot = self.snapshot();
        self.lists.retain(|cached| cached.record.id != id);

        let outcome = match self.backend.delete_list(id) {
            Ok(()) => {
                self.active_list = self.lists.first().map(|cached| cached.record.id);
                if let Err(err) = self.refresh_words() {
                    warn!("event=session_refresh module=session status=error target=words error={err}");
                    self.words.clear();
                }
                self.notices
                    .push(Notice::Success("list deleted".to_string()));
                Ok(())
            }
            Err(err) => Err(self.roll_back(snapshot, err, "failed to delete the list")),
        };
        self.settle_lists();
        outcome
    }

    /// Adds a word to the active list; `weight` defaults to 1.
    pub fn create_word(&mut self, text: &str, weight: Option<i64>) -> RepoResult<Word> {
        let list_id = self.require_active_list()?;
        let snapshot = self.snapshot();
        let placeholder = Word::new(list_id, text, weight.unwrap_or(DEFAULT_WEIGHT));
        let temp_id = placeholder.id;
        self.words.push(Cached::tentative(placeholder));

        match self.backend.create_word(list_id, text, weight) {
            Ok(created) => {
                replace_tentative(&mut self.words, temp_id, created.clone(), |w| w.id);
                self.settle_words();
                self.notices.push(Notice::Success("word added".to_string()));
                Ok(created)
            }
            Err(err) => Err(self.roll_back(snapshot, err, "failed to add the word")),
        }
    }

    pub fn update_word(&mut self, id: WordId, text: &str, weight: i64) -> RepoResult<Word> {
        self.require_active_list()?;
        let snapshot = self.snapshot();
        if let Some(cached) = self.words.iter_mut().find(|c| c.record.id == id) {
            cached.record.text = text.to_string();
            cached.record.weight = weight;
        }

        match self.backend.update_word(id, text, weight) {
            Ok(updated) => {
                self.settle_words();
                self.notices
                    .push(Notice::Success("word updated".to_string()));
                Ok(updated)
            }
            Err(err) => Err(self.roll_back(snapshot, err, "failed to update the word")),
        }
    }

    pub fn delete_word(&mut self, id: WordId) -> RepoResult<()> {
        self.require_active_list()?;
        let snapshot = self.snapshot();
        self.words.retain(|cached| cached.record.id != id);

        match self.backend.delete_word(id) {
            Ok(()) => {
                self.settle_words();
                self.notices
                    .push(Notice::Success("word deleted".to_string()));
                Ok(())
            }
            Err(err) => Err(self.roll_back(snapshot, err, "failed to delete the word")),
        }
    }

    fn require_active_list(&mut self) -> RepoResult<WordListId> {
        match self.active_list {
            Some(id) => Ok(id),
            None => {
                self.notices
                    .push(Notice::Failure("select a list first".to_string()));
                Err(RepoError::not_found("active word list", "none"))
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            lists: self.lists.clone(),
            active_list: self.active_list,
            words: self.words.clone(),
        }
    }

    fn roll_back(&mut self, snapshot: Snapshot, err: RepoError, failure: &str) -> RepoError {
        self.lists = snapshot.lists;
        self.active_list = snapshot.active_list;
        self.words = snapshot.words;

        let notice = match &err {
            RepoError::Conflict(kind) => Notice::Conflict(kind.to_string()),
            _ => Notice::Failure(failure.to_string()),
        };
        info!(
            "event=session_rollback module=session status=ok conflict={}",
            err.is_conflict()
        );
        self.notices.push(notice);
        err
    }

    // Refetch after a list mutation settles; the cache stays as-is on failure.
    fn settle_lists(&mut self) {
        if let Err(err) = self.refresh_lists() {
            warn!("event=session_refresh module=session status=error target=lists error={err}");
        }
    }

    fn settle_words(&mut self) {
        if let Err(err) = self.refresh_words() {
            warn!("event=session_refresh module=session status=error target=words error={err}");
        }
    }
}

fn replace_tentative<T, K: PartialEq>(
    entries: &mut [Cached<T>],
    temp_key: K,
    confirmed: T,
    key: impl Fn(&T) -> K,
) {
    if let Some(entry) = entries
        .iter_mut()
        .find(|entry| entry.tentative && key(&entry.record) == temp_key)
    {
        *entry = Cached::confirmed(confirmed);
    }
}
