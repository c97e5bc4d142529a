//! Translation Gateway
//!
//! A resilient translation gateway fronting a third-party translation
//! provider behind a stable, provider-agnostic interface:
//! - retrying upstream HTTP client with linear backoff and bounded timeouts
//! - cache-aside decorator with asynchronous, bounded write-back
//! - canonical response assembly into one stable schema
//! - best-effort language heuristic for providers that report no source
//!
//! The surrounding process (HTTP routing, signal handling, metrics) is an
//! external collaborator that calls in through [`TranslationProvider`].

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    DomainError, TranslationField, TranslationProvider, TranslationRequest, TranslationResponse,
};
pub use infrastructure::ProviderFactory;
