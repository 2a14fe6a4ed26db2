#![forbid(unsafe_code)]

pub mod app_services;
pub mod enrichment;
pub mod error;
pub mod import_service;
pub mod quiz_service;
pub mod sample;
pub mod stats_service;
pub mod vault_service;

pub use vocab_core::{Clock, RandomSource};

pub use app_services::{AppServices, ServicesOptions};
pub use enrichment::{ChatEnricher, Enricher, EnricherConfig};
pub use error::{
    AppServicesError, EnrichError, ImportError, QuizServiceError, StatsServiceError, VaultError,
};
pub use import_service::{ImportRequest, ImportService};
pub use quiz_service::{QuizAnswer, QuizLoopService};
pub use sample::sample_set;
pub use stats_service::StatsService;
pub use vault_service::VaultService;
