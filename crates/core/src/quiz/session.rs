use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{QuestionId, VocabularyEntry};
use crate::quiz::{Question, QuestionSetBuilder, QuizError, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Finished,
}

/// What the caller shows after an answer, whether it was right or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_id: QuestionId,
    pub correct: bool,
    pub correct_answer: String,
}

/// Final score of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

impl QuizResult {
    /// Share of correct answers, rounded down.
    #[must_use]
    pub fn percentage(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.score * 100 / self.total
    }
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// Serializable state of a session, for callers that want to resume later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub questions: Vec<Question>,
    pub position: usize,
    pub score: usize,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a shuffled question set.
///
/// Answers are final: there is no skip, undo or retry. The session becomes
/// `Finished` right after the last question is answered.
#[derive(Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    position: usize,
    score: usize,
    status: SessionStatus,
}

impl QuizSession {
    /// Build a session from a word list using the thread-local generator.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoEntries` if `entries` is empty.
    pub fn new(entries: &[VocabularyEntry]) -> Result<Self, QuizError> {
        Self::from_questions(QuestionSetBuilder::new(entries).build()?)
    }

    /// Build a session with a caller-supplied generator.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoEntries` if `entries` is empty.
    pub fn with_rng<R: Rng + ?Sized>(
        entries: &[VocabularyEntry],
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        Self::from_questions(QuestionSetBuilder::new(entries).build_with_rng(rng)?)
    }

    /// Start a session over an already built question sequence, in order.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` if `questions` is empty.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self {
            questions,
            position: 0,
            score: 0,
            status: SessionStatus::Active,
        })
    }

    /// Rehydrate a session from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidSnapshot` if the snapshot is empty, points
    /// past the end, or claims more points than answered questions.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, QuizError> {
        let SessionSnapshot {
            questions,
            position,
            score,
        } = snapshot;

        if questions.is_empty() {
            return Err(invalid("no questions"));
        }
        if position > questions.len() {
            return Err(invalid(format!(
                "position {position} past {} questions",
                questions.len()
            )));
        }
        if score > position {
            return Err(invalid(format!("score {score} above answered {position}")));
        }

        let status = if position == questions.len() {
            SessionStatus::Finished
        } else {
            SessionStatus::Active
        };

        Ok(Self {
            questions,
            position,
            score,
            status,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            questions: self.questions.clone(),
            position: self.position,
            score: self.score,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.questions.len(),
            answered: self.position,
            remaining: self.questions.len().saturating_sub(self.position),
            is_complete: self.is_finished(),
        }
    }

    /// The question waiting for an answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` once every question has been answered.
    pub fn current_question(&self) -> Result<&Question, QuizError> {
        if self.is_finished() {
            return Err(QuizError::Finished);
        }
        self.questions.get(self.position).ok_or(QuizError::Finished)
    }

    /// Check `raw` against the current question and move on.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` if the session is already finished; the
    /// score and position are left untouched.
    pub fn submit_answer(&mut self, raw: &str) -> Result<AnswerFeedback, QuizError> {
        let question = self.current_question()?;
        let correct_answer = question.answer().to_owned();
        let question_id = question.id().clone();
        let correct = normalize(raw) == normalize(&correct_answer);

        if correct {
            self.score += 1;
        }
        self.position += 1;
        if self.position >= self.questions.len() {
            self.status = SessionStatus::Finished;
        }

        Ok(AnswerFeedback {
            question_id,
            correct,
            correct_answer,
        })
    }

    /// Final score.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` while questions remain.
    pub fn result(&self) -> Result<QuizResult, QuizError> {
        if !self.is_finished() {
            return Err(QuizError::NotFinished);
        }
        Ok(QuizResult {
            score: self.score,
            total: self.questions.len(),
        })
    }
}

fn invalid(reason: impl Into<String>) -> QuizError {
    QuizError::InvalidSnapshot {
        reason: reason.into(),
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("score", &self.score)
            .field("status", &self.status)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RandomSource;

    fn entries(n: usize) -> Vec<VocabularyEntry> {
        (1..=n)
            .map(|i| VocabularyEntry::new(i.to_string(), format!("term {i}"), format!("Nghĩa {i}")))
            .collect()
    }

    fn answer_all_correctly(session: &mut QuizSession) {
        while !session.is_finished() {
            let answer = session.current_question().unwrap().answer().to_owned();
            assert!(session.submit_answer(&answer).unwrap().correct);
        }
    }

    #[test]
    fn empty_word_list_is_rejected() {
        assert_eq!(QuizSession::new(&[]).unwrap_err(), QuizError::NoEntries);
        assert_eq!(
            QuizSession::from_questions(Vec::new()).unwrap_err(),
            QuizError::NoQuestions
        );
    }

    #[test]
    fn starts_active_at_zero() {
        let session = QuizSession::new(&entries(3)).unwrap();
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.position(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.total(), 6);
    }

    #[test]
    fn current_question_is_idempotent() {
        let session = QuizSession::new(&entries(2)).unwrap();
        let first = session.current_question().unwrap().id().clone();
        let again = session.current_question().unwrap().id().clone();
        assert_eq!(first, again);
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn accent_free_answer_counts_as_correct() {
        let list = vec![VocabularyEntry::new("1", "Mitigate", "Giảm nhẹ")];
        let mut session = QuizSession::new(&list).unwrap();

        let feedback = session.submit_answer("giam nhe").unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.correct_answer, "Giảm nhẹ");
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn wrong_answer_still_reports_translation_and_advances() {
        let list = vec![VocabularyEntry::new("1", "Mitigate", "Giảm nhẹ")];
        let mut session = QuizSession::new(&list).unwrap();
        let expected_id = session.current_question().unwrap().id().clone();

        let feedback = session.submit_answer("tăng lên").unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, "Giảm nhẹ");
        assert_eq!(feedback.question_id, expected_id);
        assert_eq!(session.score(), 0);
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn accepts_exactly_two_answers_per_entry() {
        let n = 4;
        let mut session = QuizSession::new(&entries(n)).unwrap();
        for i in 0..2 * n {
            assert!(!session.is_finished(), "finished early at {i}");
            session.submit_answer("nope").unwrap();
        }
        assert!(session.is_finished());

        let err = session.submit_answer("nope").unwrap_err();
        assert_eq!(err, QuizError::Finished);
        assert_eq!(session.position(), 2 * n);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn all_correct_gives_full_score() {
        let n = 5;
        let mut session =
            QuizSession::with_rng(&entries(n), &mut RandomSource::seeded(3).rng()).unwrap();
        answer_all_correctly(&mut session);

        assert_eq!(session.result().unwrap(), QuizResult { score: 2 * n, total: 2 * n });
        assert_eq!(session.result().unwrap().percentage(), 100);
    }

    #[test]
    fn finished_session_rejects_current_question() {
        let mut session = QuizSession::new(&entries(1)).unwrap();
        answer_all_correctly(&mut session);
        assert_eq!(session.current_question().unwrap_err(), QuizError::Finished);
    }

    #[test]
    fn result_requires_finished_session() {
        let session = QuizSession::new(&entries(2)).unwrap();
        assert_eq!(session.result().unwrap_err(), QuizError::NotFinished);
    }

    #[test]
    fn progress_tracks_answers() {
        let mut session = QuizSession::new(&entries(2)).unwrap();
        session.submit_answer("x").unwrap();
        let progress = session.progress();
        assert_eq!(progress.total, 4);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.remaining, 3);
        assert!(!progress.is_complete);
    }

    #[test]
    fn snapshot_resumes_where_it_left_off() {
        let mut session = QuizSession::new(&entries(3)).unwrap();
        let answer = session.current_question().unwrap().answer().to_owned();
        session.submit_answer(&answer).unwrap();

        let json = serde_json::to_string(&session.snapshot()).unwrap();
        let restored = QuizSession::restore(serde_json::from_str(&json).unwrap()).unwrap();

        assert_eq!(restored.position(), 1);
        assert_eq!(restored.score(), 1);
        assert_eq!(restored.status(), SessionStatus::Active);
        assert_eq!(restored.questions(), session.questions());
    }

    #[test]
    fn restore_rejects_inconsistent_snapshots() {
        let questions = QuizSession::new(&entries(1)).unwrap().questions().to_vec();

        let past_end = SessionSnapshot {
            questions: questions.clone(),
            position: 3,
            score: 0,
        };
        assert!(matches!(
            QuizSession::restore(past_end),
            Err(QuizError::InvalidSnapshot { .. })
        ));

        let inflated = SessionSnapshot {
            questions,
            position: 1,
            score: 2,
        };
        assert!(matches!(
            QuizSession::restore(inflated),
            Err(QuizError::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn restoring_a_completed_snapshot_is_finished() {
        let mut session = QuizSession::new(&entries(1)).unwrap();
        answer_all_correctly(&mut session);
        let restored = QuizSession::restore(session.snapshot()).unwrap();
        assert!(restored.is_finished());
        assert_eq!(restored.result().unwrap(), QuizResult { score: 2, total: 2 });
    }
}
