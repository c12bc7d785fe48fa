use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::error::CoreError;
use crate::repository::WordRepository;
use crate::word::Word;

/// Days after which a reviewed word is due again
pub const REVIEW_INTERVAL_DAYS: i64 = 3;

/// A user's saved words.
///
/// Every successful mutation writes the whole collection back through the
/// repository. Words keep insertion order; re-adding an id replaces in place.
pub struct WordBook {
    user_id: String,
    words: Vec<Word>,
    repository: Arc<dyn WordRepository>,
}

impl WordBook {
    /// Empty word book, nothing is read from the repository
    pub fn new(user_id: impl Into<String>, repository: Arc<dyn WordRepository>) -> Self {
        Self {
            user_id: user_id.into(),
            words: Vec::new(),
            repository,
        }
    }

    /// Load the word book for `user_id`.
    ///
    /// A store that cannot be read is treated as empty; the failure is only logged.
    pub fn load(user_id: impl Into<String>, repository: Arc<dyn WordRepository>) -> Self {
        let mut book = Self::new(user_id, repository);

        match book.repository.load(&book.user_id) {
            Ok(words) => {
                for word in words {
                    book.upsert(word);
                }
                tracing::debug!(
                    "Loaded {} words for user {}",
                    book.words.len(),
                    book.user_id
                );
            }
            Err(e) => {
                tracing::warn!("Failed to load word book for {}: {}", book.user_id, e);
            }
        }

        book
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Insert or replace a word by id, then persist
    pub fn add_word(&mut self, word: Word) -> Result<(), CoreError> {
        self.upsert(word);
        self.save()
    }

    /// Remove a word by id. Persists only when something was removed.
    pub fn remove_word(&mut self, id: &str) -> Result<bool, CoreError> {
        let Some(position) = self.position(id) else {
            return Ok(false);
        };
        self.words.remove(position);
        self.save()?;
        Ok(true)
    }

    /// Mark a word reviewed now and persist, false if the id is unknown
    pub fn mark_reviewed(&mut self, id: &str) -> Result<bool, CoreError> {
        let Some(position) = self.position(id) else {
            return Ok(false);
        };
        self.words[position].mark_as_reviewed();
        self.save()?;
        Ok(true)
    }

    /// Drop every word and persist the empty book
    pub fn clear(&mut self) -> Result<(), CoreError> {
        self.words.clear();
        self.save()
    }

    pub fn get_word(&self, id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id() == id)
    }

    /// Snapshot of every word
    pub fn all_words(&self) -> Vec<Word> {
        self.words.clone()
    }

    pub fn words_by_language(&self, code: &str) -> Vec<Word> {
        self.words
            .iter()
            .filter(|w| w.language_code() == code)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over text or translation.
    ///
    /// The query is trimmed first; an empty query matches every word.
    pub fn search_words(&self, query: &str) -> Vec<Word> {
        let query = query.trim().to_lowercase();
        self.words
            .iter()
            .filter(|w| {
                w.text().to_lowercase().contains(&query)
                    || w.translation().to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Newest words first, at most `limit`
    pub fn recent_words(&self, limit: usize) -> Vec<Word> {
        let mut words = self.words.clone();
        words.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        words.truncate(limit);
        words
    }

    pub fn words_needing_review(&self) -> Vec<Word> {
        self.words_needing_review_at(Utc::now())
    }

    /// Words never reviewed or last reviewed more than [`REVIEW_INTERVAL_DAYS`] before `now`
    pub fn words_needing_review_at(&self, now: DateTime<Utc>) -> Vec<Word> {
        let cutoff = now - Duration::days(REVIEW_INTERVAL_DAYS);
        self.words
            .iter()
            .filter(|w| w.last_reviewed().is_none_or(|reviewed| reviewed < cutoff))
            .cloned()
            .collect()
    }

    pub fn total_word_count(&self) -> usize {
        self.words.len()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.words.iter().position(|w| w.id() == id)
    }

    fn upsert(&mut self, word: Word) {
        match self.position(word.id()) {
            Some(position) => self.words[position] = word,
            None => self.words.push(word),
        }
    }

    fn save(&self) -> Result<(), CoreError> {
        self.repository.save(&self.user_id, &self.words).inspect_err(|e| {
            tracing::error!("Failed to save word book for {}: {}", self.user_id, e);
        })
    }
}
