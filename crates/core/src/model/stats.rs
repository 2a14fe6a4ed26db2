use serde::{Deserialize, Serialize};

use crate::quiz::QuizResult;

/// Gold a learner starts with before any quiz.
pub const STARTING_GOLD: u32 = 500;

/// Exchange rate from quiz points to gold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPolicy {
    pub gold_per_point: u32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self { gold_per_point: 10 }
    }
}

/// Running totals shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub gold: u32,
    pub mastered_count: u32,
    pub learning_count: u32,
    pub last_score: Option<u32>,
}

impl Default for StudyStats {
    fn default() -> Self {
        Self {
            gold: STARTING_GOLD,
            mastered_count: 0,
            learning_count: 0,
            last_score: None,
        }
    }
}

impl StudyStats {
    /// Reset the learning counters for a newly activated list.
    pub fn start_set(&mut self, len: usize) {
        self.learning_count = u32::try_from(len).unwrap_or(u32::MAX);
        self.mastered_count = 0;
    }

    /// Move one word from "learning" to "mastered".
    pub fn mark_known(&mut self) {
        self.mastered_count = self.mastered_count.saturating_add(1);
        self.learning_count = self.learning_count.saturating_sub(1);
    }

    /// Store the score of a finished quiz and pay out its reward.
    pub fn record_quiz(&mut self, result: &QuizResult, reward: RewardPolicy) {
        let score = u32::try_from(result.score).unwrap_or(u32::MAX);
        self.last_score = Some(score);
        self.gold = self
            .gold
            .saturating_add(score.saturating_mul(reward.gold_per_point));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fresh_profile() {
        let stats = StudyStats::default();
        assert_eq!(stats.gold, 500);
        assert_eq!(stats.last_score, None);
    }

    #[test]
    fn mark_known_never_underflows() {
        let mut stats = StudyStats::default();
        stats.start_set(1);
        stats.mark_known();
        stats.mark_known();
        assert_eq!(stats.mastered_count, 2);
        assert_eq!(stats.learning_count, 0);
    }

    #[test]
    fn start_set_resets_mastered() {
        let mut stats = StudyStats::default();
        stats.mark_known();
        stats.start_set(10);
        assert_eq!(stats.learning_count, 10);
        assert_eq!(stats.mastered_count, 0);
    }

    #[test]
    fn record_quiz_pays_gold() {
        let mut stats = StudyStats::default();
        stats.record_quiz(&QuizResult { score: 7, total: 20 }, RewardPolicy::default());
        assert_eq!(stats.last_score, Some(7));
        assert_eq!(stats.gold, 570);
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(StudyStats::default()).unwrap();
        assert_eq!(value["masteredCount"], 0);
        assert!(value["lastScore"].is_null());
    }
}
