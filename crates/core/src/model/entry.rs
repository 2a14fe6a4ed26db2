use serde::{Deserialize, Serialize};

use crate::model::ids::EntryId;

/// One word of a study list.
///
/// Entries are produced outside the engine (manual import, enrichment, the
/// bundled sample) and are only ever read by it. The serialized field names
/// match the stored vault format, so `translation` is written as
/// `vietnameseTranslation` and `level` as `bandLevel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: EntryId,
    pub term: String,
    #[serde(rename = "vietnameseTranslation", alias = "translation")]
    pub translation: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: String,
    #[serde(rename = "bandLevel", alias = "level", default)]
    pub level: String,
    #[serde(default)]
    pub collocations: Vec<String>,
}

impl VocabularyEntry {
    /// Minimal entry with only the fields the quiz needs.
    #[must_use]
    pub fn new(id: impl Into<String>, term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(id),
            term: term.into(),
            translation: translation.into(),
            definition: String::new(),
            example: String::new(),
            level: String::new(),
            collocations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_collocations<I, S>(mut self, collocations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collocations = collocations.into_iter().map(Into::into).collect();
        self
    }
}
