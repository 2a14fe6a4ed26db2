use std::sync::Arc;

use vocab_core::model::WordSet;

use crate::enrichment::Enricher;
use crate::error::ImportError;
use crate::vault_service::VaultService;

/// What the learner typed on the import screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRequest {
    /// A pasted list or passage.
    Bulk(String),
    /// One word, optionally with the learner's own translation.
    Single { term: String, translation: String },
}

impl ImportRequest {
    /// Text handed to the enricher, or `None` when there is nothing to send.
    #[must_use]
    pub fn to_prompt_text(&self) -> Option<String> {
        match self {
            ImportRequest::Bulk(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_owned())
            }
            ImportRequest::Single { term, translation } => {
                let term = term.trim();
                (!term.is_empty())
                    .then(|| format!("WORD: {term} | TRANS: {}", translation.trim()))
            }
        }
    }
}

/// Enriches raw input and saves the outcome as a new word set.
#[derive(Clone)]
pub struct ImportService {
    enricher: Arc<dyn Enricher>,
    vault: VaultService,
}

impl ImportService {
    #[must_use]
    pub fn new(enricher: Arc<dyn Enricher>, vault: VaultService) -> Self {
        Self { enricher, vault }
    }

    /// # Errors
    ///
    /// Returns `ImportError::MissingName` for a blank set name,
    /// `ImportError::EmptyInput` when there is no text or term, and
    /// enrichment or vault errors otherwise.
    pub async fn import(&self, name: &str, request: &ImportRequest) -> Result<WordSet, ImportError> {
        if name.trim().is_empty() {
            return Err(ImportError::MissingName);
        }
        let text = request.to_prompt_text().ok_or(ImportError::EmptyInput)?;

        let words = self.enricher.enrich(&text).await.inspect_err(|e| {
            tracing::warn!(error = %e, "import enrichment failed");
        })?;

        Ok(self.vault.save_set(name, words).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use storage::{InMemoryStore, KeyValueStore};
    use vocab_core::Clock;
    use vocab_core::model::VocabularyEntry;

    use crate::error::EnrichError;
    use crate::stats_service::StatsService;

    #[derive(Default)]
    struct RecordingEnricher {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Enricher for RecordingEnricher {
        async fn enrich(&self, raw_text: &str) -> Result<Vec<VocabularyEntry>, EnrichError> {
            self.seen.lock().unwrap().push(raw_text.to_owned());
            Ok(vec![VocabularyEntry::new("1", "Mitigate", "Giảm nhẹ")])
        }
    }

    fn service(enricher: Arc<RecordingEnricher>) -> (ImportService, VaultService) {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let stats = StatsService::new(Arc::clone(&store));
        let vault = VaultService::new(Clock::default(), store, stats);
        (ImportService::new(enricher, vault.clone()), vault)
    }

    #[test]
    fn single_word_prompt_format() {
        let request = ImportRequest::Single {
            term: " mitigate ".into(),
            translation: "giảm nhẹ".into(),
        };
        assert_eq!(
            request.to_prompt_text().as_deref(),
            Some("WORD: mitigate | TRANS: giảm nhẹ")
        );
    }

    #[tokio::test]
    async fn import_saves_and_activates_set() {
        let enricher = Arc::new(RecordingEnricher::default());
        let (imports, vault) = service(Arc::clone(&enricher));

        let set = imports
            .import("Week 1", &ImportRequest::Bulk("mitigate: giảm nhẹ".into()))
            .await
            .unwrap();

        assert_eq!(set.name(), "Week 1");
        assert_eq!(vault.list_sets().await.unwrap().len(), 1);
        assert!(vault.active_words().await.unwrap().is_some());
        assert_eq!(*enricher.seen.lock().unwrap(), vec!["mitigate: giảm nhẹ".to_string()]);
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_enrichment() {
        let enricher = Arc::new(RecordingEnricher::default());
        let (imports, _) = service(Arc::clone(&enricher));

        let err = imports
            .import(" ", &ImportRequest::Bulk("text".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::MissingName));
        assert!(enricher.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_input_is_rejected() {
        let enricher = Arc::new(RecordingEnricher::default());
        let (imports, _) = service(enricher);

        let err = imports
            .import("Week 1", &ImportRequest::Bulk("   ".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::EmptyInput));
    }
}
