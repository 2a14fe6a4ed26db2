//! Flip-card browsing over the active word list.

use thiserror::Error;

use crate::model::VocabularyEntry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlashcardError {
    #[error("no words to review")]
    Empty,
}

/// Cursor over a word list. Movement is clamped to the ends of the list.
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    words: Vec<VocabularyEntry>,
    position: usize,
}

impl FlashcardDeck {
    /// # Errors
    ///
    /// Returns `FlashcardError::Empty` if `words` is empty.
    pub fn new(words: Vec<VocabularyEntry>) -> Result<Self, FlashcardError> {
        if words.is_empty() {
            return Err(FlashcardError::Empty);
        }
        Ok(Self { words, position: 0 })
    }

    #[must_use]
    pub fn current(&self) -> &VocabularyEntry {
        &self.words[self.position]
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
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
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.words.len()
    }

    /// Step forward. Returns `false` when already on the last card.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Step back. Returns `false` when already on the first card.
    pub fn previous(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Move on after the learner rated the current card ("known" or "still
    /// learning"). Stays put on the last card.
    pub fn advance_after_rating(&mut self) -> bool {
        self.next()
    }
}
