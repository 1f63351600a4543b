//! Word use-case service.

use crate::model::word::{Word, WordId, DEFAULT_WEIGHT};
use crate::model::word_list::WordListId;
use crate::repo::word_repo::WordRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Envelope for a list's words, heaviest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordsResult {
    pub items: Vec<Word>,
}

pub struct WordService<R: WordRepository> {
    repo: R,
}

impl<R: WordRepository> WordService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_by_list_id(&self, list_id: WordListId) -> RepoResult<WordsResult> {
        let items = self.repo.list_words(list_id)?;
        Ok(WordsResult { items })
    }

    /// Adds a word; `weight` defaults to 1.
    pub fn create_word(
        &self,
        list_id: WordListId,
        text: &str,
        weight: Option<i64>,
    ) -> RepoResult<Word> {
        let word = Word::new(list_id, text, weight.unwrap_or(DEFAULT_WEIGHT));
        match self.repo.create_word(&word) {
            Ok(id) => {
                info!("event=word_create module=service status=ok list_id={list_id} word_id={id}");
                Ok(word)
            }
            Err(err) => {
                log_write_failure("word_create", &err);
                Err(err)
            }
        }
    }

    pub fn update_word(&self, id: WordId, text: &str, weight: i64) -> RepoResult<Word> {
        if let Err(err) = self.repo.update_word(id, text, weight) {
            log_write_failure("word_update", &err);
            return Err(err);
        }
        info!("event=word_update module=service status=ok word_id={id}");
        self.repo
            .get_word(id)?
            .ok_or_else(|| RepoError::not_found("word", id))
    }

    pub fn delete_word(&self, id: WordId) -> RepoResult<()> {
        self.repo.delete_word(id)?;
        info!("event=word_delete module=service status=ok word_id={id}");
        Ok(())
    }
}

fn log_write_failure(event: &str, err: &RepoError) {
    if err.is_conflict() {
        warn!("event={event} module=service status=conflict");
    } else {
        warn!("event={event} module=service status=error error={err}");
    }
}
