use std::sync::Arc;

use storage::{JsonStoreExt, KeyValueStore, keys};
use vocab_core::RandomSource;
use vocab_core::model::VocabularyEntry;
use vocab_core::quiz::{AnswerFeedback, QuizResult, QuizSession, SessionSnapshot};

use crate::error::QuizServiceError;
use crate::stats_service::StatsService;
use crate::vault_service::VaultService;

/// Result of answering a single question in a quiz.
///
/// When the last answer completes the quiz but the result cannot be stored,
/// `recording_error` is set and `result` is still returned so the caller can
/// retry with [`QuizLoopService::record`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAnswer {
    pub feedback: AnswerFeedback,
    pub is_complete: bool,
    pub result: Option<QuizResult>,
    pub recording_error: Option<String>,
}

/// Starts quizzes and books finished results into the stats.
///
/// The session itself stays a plain value owned by the caller; this service
/// only touches storage around it.
#[derive(Clone)]
pub struct QuizLoopService {
    random: RandomSource,
    store: Arc<dyn KeyValueStore>,
    vault: VaultService,
    stats: StatsService,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, vault: VaultService, stats: StatsService) -> Self {
        Self {
            random: RandomSource::default(),
            store,
            vault,
            stats,
        }
    }

    #[must_use]
    pub fn with_random(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    /// Start a quiz over `entries`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` if `entries` is empty.
    pub fn start(&self, entries: &[VocabularyEntry]) -> Result<QuizSession, QuizServiceError> {
        let session = QuizSession::with_rng(entries, &mut self.random.rng())?;
        tracing::info!(
            words = entries.len(),
            questions = session.total(),
            "quiz started"
        );
        Ok(session)
    }

    /// Start a quiz over the active word list.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NoActiveWords` if no list is active.
    /// Returns `QuizServiceError` on storage failures.
    pub async fn start_active(&self) -> Result<QuizSession, QuizServiceError> {
        let words = self
            .vault
            .active_words()
            .await?
            .ok_or(QuizServiceError::NoActiveWords)?;
        self.start(&words)
    }

    /// Answer the current question; records the result once the quiz ends.
    ///
    /// A storage failure while recording does not fail the answer; it is
    /// reported through `QuizAnswer::recording_error`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` if the session is already finished.
    pub async fn answer(
        &self,
        session: &mut QuizSession,
        raw: &str,
    ) -> Result<QuizAnswer, QuizServiceError> {
        let feedback = session.submit_answer(raw)?;
        tracing::debug!(
            question = %feedback.question_id,
            correct = feedback.correct,
            "answer checked"
        );

        if !session.is_finished() {
            return Ok(QuizAnswer {
                feedback,
                is_complete: false,
                result: None,
                recording_error: None,
            });
        }

        let result = session.result()?;
        let recording_error = self.record(&result).await.err().map(|e| {
            tracing::warn!(error = %e, score = result.score, "quiz result not recorded");
            e.to_string()
        });

        Ok(QuizAnswer {
            feedback,
            is_complete: true,
            result: Some(result),
            recording_error,
        })
    }

    /// Book a finished quiz into the stats and drop its saved progress.
    ///
    /// Saved progress is cleared before gold is paid, so retrying after a
    /// failure never pays twice.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` on storage failures.
    pub async fn record(&self, result: &QuizResult) -> Result<(), QuizServiceError> {
        self.store.remove(keys::QUIZ_SESSION).await?;
        self.stats.record_quiz(result).await?;
        Ok(())
    }

    /// Persist an unfinished quiz so it can be resumed later.
    ///
    /// A finished session clears any saved progress instead.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` on storage failures.
    pub async fn save_progress(&self, session: &QuizSession) -> Result<(), QuizServiceError> {
        if session.is_finished() {
            self.store.remove(keys::QUIZ_SESSION).await?;
            return Ok(());
        }
        self.store
            .save_json(keys::QUIZ_SESSION, &session.snapshot())
            .await?;
        tracing::debug!(position = session.position(), "quiz progress saved");
        Ok(())
    }

    /// Resume a saved quiz, if there is a usable one.
    ///
    /// Snapshots that fail validation are discarded.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` on storage failures.
    pub async fn resume(&self) -> Result<Option<QuizSession>, QuizServiceError> {
        let snapshot = match self
            .store
            .load_json::<SessionSnapshot>(keys::QUIZ_SESSION)
            .await
        {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(None),
            Err(storage::StorageError::Serialization(reason)) => {
                tracing::warn!(%reason, "discarding unreadable quiz snapshot");
                self.store.remove(keys::QUIZ_SESSION).await?;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match QuizSession::restore(snapshot) {
            Ok(session) if !session.is_finished() => Ok(Some(session)),
            Ok(_) => {
                self.store.remove(keys::QUIZ_SESSION).await?;
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding invalid quiz snapshot");
                self.store.remove(keys::QUIZ_SESSION).await?;
                Ok(None)
            }
        }
    }
}
