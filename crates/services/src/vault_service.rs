use std::sync::Arc;

use storage::{JsonStoreExt, KeyValueStore, keys};
use vocab_core::Clock;
use vocab_core::model::{VocabularyEntry, WordSet, WordSetError, WordSetId};

use crate::error::VaultError;
use crate::sample::sample_set;
use crate::stats_service::StatsService;

/// Saved word sets plus the list that is currently being studied.
///
/// Activating a list (saving a new set, applying a saved one, or loading the
/// sample) also resets the learning counters in the stats.
#[derive(Clone)]
pub struct VaultService {
    clock: Clock,
    store: Arc<dyn KeyValueStore>,
    stats: StatsService,
}

impl VaultService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn KeyValueStore>, stats: StatsService) -> Self {
        Self {
            clock,
            store,
            stats,
        }
    }

    /// All saved sets, newest first.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` on storage failures.
    pub async fn list_sets(&self) -> Result<Vec<WordSet>, VaultError> {
        let sets = self.store.load_json::<Vec<WordSet>>(keys::VAULT).await?;
        Ok(sets.unwrap_or_default())
    }

    /// Validate and save a new set, then make it the active list.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::WordSet` if the name is blank or there are no words.
    /// Returns `VaultError` on storage failures.
    pub async fn save_set(
        &self,
        name: &str,
        words: Vec<VocabularyEntry>,
    ) -> Result<WordSet, VaultError> {
        let set = WordSet::new(name, words, self.clock.now())?;

        let mut sets = self.list_sets().await?;
        sets.insert(0, set.clone());
        self.store.save_json(keys::VAULT, &sets).await?;
        tracing::info!(set = %set.id(), name = set.name(), words = set.len(), "word set saved");

        self.apply_words(set.words().to_vec()).await?;
        Ok(set)
    }

    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if no set has this id.
    /// Returns `VaultError` on storage failures.
    pub async fn get_set(&self, id: WordSetId) -> Result<WordSet, VaultError> {
        self.list_sets()
            .await?
            .into_iter()
            .find(|set| set.id() == id)
            .ok_or(VaultError::NotFound(id))
    }

    /// Remove a saved set. The active list is left as it is.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if no set has this id.
    /// Returns `VaultError` on storage failures.
    pub async fn delete_set(&self, id: WordSetId) -> Result<(), VaultError> {
        let mut sets = self.list_sets().await?;
        let before = sets.len();
        sets.retain(|set| set.id() != id);
        if sets.len() == before {
            return Err(VaultError::NotFound(id));
        }

        self.store.save_json(keys::VAULT, &sets).await?;
        tracing::info!(set = %id, "word set deleted");
        Ok(())
    }

    /// Make a saved set the active list.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if no set has this id.
    /// Returns `VaultError` on storage failures.
    pub async fn apply_set(&self, id: WordSetId) -> Result<WordSet, VaultError> {
        let set = self.get_set(id).await?;
        self.apply_words(set.words().to_vec()).await?;
        Ok(set)
    }

    /// Make `words` the active list.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::WordSet` if `words` is empty.
    /// Returns `VaultError` on storage failures.
    pub async fn apply_words(&self, words: Vec<VocabularyEntry>) -> Result<(), VaultError> {
        if words.is_empty() {
            return Err(WordSetError::NoWords.into());
        }
        self.store.save_json(keys::ACTIVE_WORDS, &words).await?;
        self.stats.start_set(words.len()).await?;
        tracing::debug!(words = words.len(), "active word list replaced");
        Ok(())
    }

    /// Activate the bundled sample list and return it.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` on storage failures.
    pub async fn load_sample(&self) -> Result<Vec<VocabularyEntry>, VaultError> {
        let words = sample_set();
        self.apply_words(words.clone()).await?;
        Ok(words)
    }

    /// The list currently being studied, if any.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` on storage failures.
    pub async fn active_words(&self) -> Result<Option<Vec<VocabularyEntry>>, VaultError> {
        let words = self
            .store
            .load_json::<Vec<VocabularyEntry>>(keys::ACTIVE_WORDS)
            .await?;
        Ok(words.filter(|w| !w.is_empty()))
    }
}
