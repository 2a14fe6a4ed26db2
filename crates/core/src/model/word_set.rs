use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{VocabularyEntry, WordSetId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordSetError {
    #[error("word set name cannot be empty")]
    EmptyName,

    #[error("word set must contain at least one word")]
    NoWords,
}

//
// ─── WORD SET ──────────────────────────────────────────────────────────────────
//

/// A named vocabulary list saved in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSet {
    id: WordSetId,
    name: String,
    words: Vec<VocabularyEntry>,
    created_at: DateTime<Utc>,
}

impl WordSet {
    /// Creates a new set with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `WordSetError::EmptyName` if the trimmed name is empty.
    /// Returns `WordSetError::NoWords` if `words` is empty.
    pub fn new(
        name: impl Into<String>,
        words: Vec<VocabularyEntry>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, WordSetError> {
        Self::from_persisted(WordSetId::generate(), name, words, created_at)
    }

    /// Rehydrate a set from storage, applying the same validation as `new`.
    ///
    /// # Errors
    ///
    /// Returns `WordSetError` if the name is blank or the set has no words.
    pub fn from_persisted(
        id: WordSetId,
        name: impl Into<String>,
        words: Vec<VocabularyEntry>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, WordSetError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(WordSetError::EmptyName);
        }
        if words.is_empty() {
            return Err(WordSetError::NoWords);
        }

        Ok(Self {
            id,
            name: name.to_owned(),
            words,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> WordSetId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn words(&self) -> &[VocabularyEntry] {
        &self.words
    }

    #[must_use]
    pub fn into_words(self) -> Vec<VocabularyEntry> {
        self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn words() -> Vec<VocabularyEntry> {
        vec![VocabularyEntry::new("1", "Mitigate", "Giảm nhẹ")]
    }

    #[test]
    fn trims_name() {
        let set = WordSet::new("  Week 1 ", words(), fixed_now()).unwrap();
        assert_eq!(set.name(), "Week 1");
        assert_eq!(set.len(), 1);
        assert_eq!(set.created_at(), fixed_now());
    }

    #[test]
    fn rejects_blank_name() {
        let err = WordSet::new("   ", words(), fixed_now()).unwrap_err();
        assert_eq!(err, WordSetError::EmptyName);
    }

    #[test]
    fn rejects_empty_word_list() {
        let err = WordSet::new("Week 1", Vec::new(), fixed_now()).unwrap_err();
        assert_eq!(err, WordSetError::NoWords);
    }
}
