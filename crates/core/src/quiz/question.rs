use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, VocabularyEntry};

/// How a question is asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick the translation from a shuffled list of options.
    Choice { options: Vec<String> },
    /// Type the translation from memory.
    Recall,
}

impl QuestionKind {
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            QuestionKind::Choice { .. } => "choice",
            QuestionKind::Recall => "recall",
        }
    }
}

/// A single quiz question about one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    entry: VocabularyEntry,
    kind: QuestionKind,
}

impl Question {
    #[must_use]
    pub fn choice(entry: VocabularyEntry, options: Vec<String>) -> Self {
        Self::new(entry, QuestionKind::Choice { options })
    }

    #[must_use]
    pub fn recall(entry: VocabularyEntry) -> Self {
        Self::new(entry, QuestionKind::Recall)
    }

    fn new(entry: VocabularyEntry, kind: QuestionKind) -> Self {
        Self {
            id: QuestionId::for_entry(&entry.id, kind.suffix()),
            entry,
            kind,
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn entry(&self) -> &VocabularyEntry {
        &self.entry
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::Choice { .. })
    }

    /// Options of a choice question; empty for recall questions.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::Choice { options } => options,
            QuestionKind::Recall => &[],
        }
    }

    /// The canonical answer, i.e. the entry's translation.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.entry.translation
    }
}
