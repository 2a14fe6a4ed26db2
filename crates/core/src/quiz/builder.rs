use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::VocabularyEntry;
use crate::quiz::{Question, QuizError};

/// Wrong options offered next to the correct translation.
pub const DISTRACTOR_COUNT: usize = 3;

/// Turns a word list into a shuffled quiz.
///
/// Every entry yields one choice question and one recall question; the whole
/// sequence is then shuffled so both order and kind interleaving are random.
pub struct QuestionSetBuilder<'a> {
    entries: &'a [VocabularyEntry],
}

impl<'a> QuestionSetBuilder<'a> {
    #[must_use]
    pub fn new(entries: &'a [VocabularyEntry]) -> Self {
        Self { entries }
    }

    /// Build using the thread-local generator.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoEntries` if the word list is empty.
    pub fn build(self) -> Result<Vec<Question>, QuizError> {
        self.build_with_rng(&mut rand::rng())
    }

    /// Build with a caller-supplied generator, for reproducible orderings.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoEntries` if the word list is empty.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Vec<Question>, QuizError> {
        if self.entries.is_empty() {
            return Err(QuizError::NoEntries);
        }

        let mut questions = Vec::with_capacity(self.entries.len() * 2);
        for (index, entry) in self.entries.iter().enumerate() {
            let mut options = self.pick_distractors(index, rng);
            options.push(entry.translation.clone());
            options.shuffle(rng);

            questions.push(Question::choice(entry.clone(), options));
            questions.push(Question::recall(entry.clone()));
        }

        questions.shuffle(rng);
        Ok(questions)
    }

    /// Draws up to `DISTRACTOR_COUNT` translations from the other entries.
    ///
    /// Distinct values that differ from the correct translation come first.
    /// Empty slots are then filled with repeats of wrong translations, and
    /// only as a last resort with copies of the correct one. The result
    /// always has `min(DISTRACTOR_COUNT, others)` items.
    fn pick_distractors<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Vec<String> {
        let correct = self.entries[index].translation.as_str();
        let mut others: Vec<&str> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, e)| e.translation.as_str())
            .collect();
        others.shuffle(rng);

        let wanted = DISTRACTOR_COUNT.min(others.len());
        let mut picked: Vec<&str> = Vec::with_capacity(wanted);
        let mut wrong_repeats: Vec<&str> = Vec::new();
        let mut answer_copies: Vec<&str> = Vec::new();

        for candidate in others {
            if candidate == correct {
                answer_copies.push(candidate);
            } else if picked.len() < wanted && !picked.contains(&candidate) {
                picked.push(candidate);
            } else {
                wrong_repeats.push(candidate);
            }
        }

        let missing = wanted.saturating_sub(picked.len());
        picked.extend(
            wrong_repeats
                .into_iter()
                .chain(answer_copies)
                .take(missing),
        );
        picked.into_iter().map(str::to_owned).collect()
    }
}
