use std::sync::Arc;

use storage::Storage;
use vocab_core::model::RewardPolicy;
use vocab_core::{Clock, RandomSource};

use crate::enrichment::{ChatEnricher, Enricher};
use crate::error::AppServicesError;
use crate::import_service::ImportService;
use crate::quiz_service::QuizLoopService;
use crate::stats_service::StatsService;
use crate::vault_service::VaultService;

/// Knobs the app passes in when wiring services.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServicesOptions {
    pub clock: Clock,
    pub random: RandomSource,
    pub reward: RewardPolicy,
}

/// Assembles app-facing services over one store.
#[derive(Clone)]
pub struct AppServices {
    stats: Arc<StatsService>,
    vault: Arc<VaultService>,
    quiz: Arc<QuizLoopService>,
    imports: Arc<ImportService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, enriching via the
    /// environment-configured chat endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        options: ServicesOptions,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(storage, Arc::new(ChatEnricher::from_env()), options))
    }

    #[must_use]
    pub fn new(storage: Storage, enricher: Arc<dyn Enricher>, options: ServicesOptions) -> Self {
        let stats = StatsService::new(Arc::clone(&storage.store)).with_reward(options.reward);
        let vault = VaultService::new(options.clock, Arc::clone(&storage.store), stats.clone());
        let quiz = QuizLoopService::new(Arc::clone(&storage.store), vault.clone(), stats.clone())
            .with_random(options.random);
        let imports = ImportService::new(enricher, vault.clone());

        Self {
            stats: Arc::new(stats),
            vault: Arc::new(vault),
            quiz: Arc::new(quiz),
            imports: Arc::new(imports),
        }
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn vault(&self) -> Arc<VaultService> {
        Arc::clone(&self.vault)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn imports(&self) -> Arc<ImportService> {
        Arc::clone(&self.imports)
    }
}
