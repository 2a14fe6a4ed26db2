use std::sync::Arc;

use storage::{JsonStoreExt, KeyValueStore, keys};
use vocab_core::model::{RewardPolicy, StudyStats};
use vocab_core::quiz::QuizResult;

use crate::error::StatsServiceError;

/// Loads and updates the learner's running totals.
#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn KeyValueStore>,
    reward: RewardPolicy,
}

impl StatsService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            reward: RewardPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_reward(mut self, reward: RewardPolicy) -> Self {
        self.reward = reward;
        self
    }

    #[must_use]
    pub fn reward(&self) -> RewardPolicy {
        self.reward
    }

    /// Load persisted stats (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError` on storage failures.
    pub async fn load(&self) -> Result<StudyStats, StatsServiceError> {
        let stats = self.store.load_json::<StudyStats>(keys::STATS).await?;
        Ok(stats.unwrap_or_default())
    }

    /// Apply `change` to the stored stats and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError` on storage failures.
    pub async fn update(
        &self,
        change: impl FnOnce(&mut StudyStats) + Send,
    ) -> Result<StudyStats, StatsServiceError> {
        let mut stats = self.load().await?;
        change(&mut stats);
        self.store.save_json(keys::STATS, &stats).await?;
        Ok(stats)
    }

    /// # Errors
    ///
    /// Returns `StatsServiceError` on storage failures.
    pub async fn start_set(&self, len: usize) -> Result<StudyStats, StatsServiceError> {
        self.update(|stats| stats.start_set(len)).await
    }

    /// # Errors
    ///
    /// Returns `StatsServiceError` on storage failures.
    pub async fn mark_known(&self) -> Result<StudyStats, StatsServiceError> {
        self.update(StudyStats::mark_known).await
    }

    /// Record a finished quiz and pay out gold at the configured rate.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError` on storage failures.
    pub async fn record_quiz(&self, result: &QuizResult) -> Result<StudyStats, StatsServiceError> {
        let reward = self.reward;
        let stats = self.update(|stats| stats.record_quiz(result, reward)).await?;
        tracing::info!(
            score = result.score,
            total = result.total,
            gold = stats.gold,
            "quiz result recorded"
        );
        Ok(stats)
    }
}
