//! Shared error types for the services crate.

use thiserror::Error;

use storage::{SqliteInitError, StorageError};
use vocab_core::model::{WordSetError, WordSetId};
use vocab_core::quiz::QuizError;

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `VaultService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VaultError {
    #[error("word set {0} not found")]
    NotFound(WordSetId),
    #[error(transparent)]
    WordSet(#[from] WordSetError),
    #[error(transparent)]
    Stats(#[from] StatsServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("no active word list; import or apply a set first")]
    NoActiveWords,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Vault(#[from] VaultError),
    #[error(transparent)]
    Stats(#[from] StatsServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by an `Enricher`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnrichError {
    #[error("enrichment is not configured")]
    Disabled,
    #[error("enrichment returned an empty response")]
    EmptyResponse,
    #[error("enrichment request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("enrichment response is not a word list: {0}")]
    Malformed(String),
    #[error("no vocabulary terms detected")]
    NoTerms,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `ImportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("a name is required for the imported set")]
    MissingName,
    #[error("nothing to import")]
    EmptyInput,
    #[error(transparent)]
    Enrich(#[from] EnrichError),
    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
