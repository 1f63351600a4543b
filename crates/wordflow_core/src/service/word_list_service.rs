//! Word list use-case service.
//!
//! # Invariants
//! - Names are trimmed before validation and persistence.
//! - A missing slug is derived from the name; an explicit one is used as-is.
//! - Renaming keeps the slug unchanged.

use crate::model::word::Word;
use crate::model::word_list::{WordList, WordListId};
use crate::repo::word_list_repo::{WordListPage, WordListPageQuery, WordListRepository};
use crate::repo::word_repo::WordRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Input for creating a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWordListRequest {
    pub name: String,
    pub theme: Option<String>,
    pub order: Option<i64>,
    /// Explicit slug; derived from `name` when `None`.
    pub slug: Option<String>,
}

impl CreateWordListRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A list together with its words in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordListWithWords {
    #[serde(flatten)]
    pub list: WordList,
    pub words: Vec<Word>,
}

pub struct WordListService<L: WordListRepository, W: WordRepository> {
    lists: L,
    words: W,
}

impl<L: WordListRepository, W: WordRepository> WordListService<L, W> {
    pub fn new(lists: L, words: W) -> Self {
        Self { lists, words }
    }

    /// Creates a list and returns the persisted record.
    pub fn create_list(&self, request: &CreateWordListRequest) -> RepoResult<WordList> {
        let name = request.name.trim();
        let mut list = WordList::new(name, request.slug.clone().unwrap_or_default());
        list.theme = request.theme.clone();
        list.order = request.order.unwrap_or(0);

        match self.lists.create_list(&list) {
            Ok(id) => {
                info!("event=list_create module=service status=ok list_id={id}");
                Ok(list)
            }
            Err(err) => {
                warn!("event=list_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    pub fn rename_list(&self, id: WordListId, name: &str) -> RepoResult<WordList> {
        self.lists.rename_list(id, name.trim())?;
        info!("event=list_rename module=service status=ok list_id={id}");
        self.lists
            .get_list(id)?
            .ok_or_else(|| RepoError::not_found("word list", id))
    }

    /// Deletes a list and, through the schema cascade, all of its words.
    pub fn delete_list(&self, id: WordListId) -> RepoResult<()> {
        self.lists.delete_list(id)?;
        info!("event=list_delete module=service status=ok list_id={id}");
        Ok(())
    }

    pub fn get_latest_list(&self) -> RepoResult<Option<WordList>> {
        self.lists.get_latest_list()
    }

    pub fn get_list_by_slug(&self, slug: &str) -> RepoResult<Option<WordList>> {
        self.lists.get_list_by_slug(slug)
    }

    /// Cursor-paginated browse, newest first.
    pub fn list_page(
        &self,
        limit: Option<u32>,
        cursor: Option<WordListId>,
    ) -> RepoResult<WordListPage> {
        self.lists.list_page(&WordListPageQuery { limit, cursor })
    }

    pub fn get_list_with_words_by_slug(&self, slug: &str) -> RepoResult<Option<WordListWithWords>> {
        let Some(list) = self.lists.get_list_by_slug(slug)? else {
            return Ok(None);
        };
        let words = self.words.list_words(list.id)?;
        Ok(Some(WordListWithWords { list, words }))
    }

    /// The most recently created list with its words; what a board shows when
    /// no list is named.
    pub fn get_latest_list_with_words(&self) -> RepoResult<Option<WordListWithWords>> {
        let Some(list) = self.lists.get_latest_list()? else {
            return Ok(None);
        };
        let words = self.words.list_words(list.id)?;
        Ok(Some(WordListWithWords { list, words }))
    }
}
