//! Cache-aside decorator for translation providers
//!
//! Wraps any provider with a synchronous read-through and a detached,
//! bounded write-back. Cache failures of any kind are downgraded to logged
//! warnings; the caller is never blocked by cache I/O beyond the
//! synchronous read.
//!
//! The persisted entry is a reduced shape, so a cache hit reconstructs only
//! the primary sentence pair, the alternative translations, and the
//! detection block; dictionary, spell, and example blocks are omitted on
//! hits even when requested. Cache hits are cheaper but leaner than live
//! calls with rich field sets.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::key::CacheKeyGenerator;
use crate::config::CacheConfig;
use crate::domain::cache::{Cache, CachedTranslation, CACHE_FORMAT_VERSION};
use crate::domain::translation::{
    Alternative, AlternativeTranslation, LanguageDetectionResult, Sentence,
};
use crate::domain::{DomainError, TranslationProvider, TranslationRequest, TranslationResponse};

const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the caching decorator
#[derive(Debug, Clone)]
pub struct CachedProviderConfig {
    /// Entry TTL; zero means entries never expire
    pub ttl: Duration,
    /// Disabled mode delegates every call without touching the cache
    pub enabled: bool,
    /// Share entries across providers instead of scoping keys per provider
    pub share_across_services: bool,
    /// Bound for the detached write-back, independent of the caller
    pub write_timeout: Duration,
}

impl Default for CachedProviderConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::ZERO,
            enabled: true,
            share_across_services: true,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

impl From<&CacheConfig> for CachedProviderConfig {
    fn from(config: &CacheConfig) -> Self {
        let write_timeout = if config.write_timeout_secs == 0 {
            DEFAULT_WRITE_TIMEOUT
        } else {
            config.write_timeout()
        };

        Self {
            ttl: config.ttl(),
            enabled: config.enabled,
            share_across_services: config.share_across_services,
            write_timeout,
        }
    }
}

/// Cache-aside decorator over any translation provider
#[derive(Debug)]
pub struct CachedTranslationProvider {
    inner: Arc<dyn TranslationProvider>,
    cache: Option<Arc<dyn Cache>>,
    key_generator: CacheKeyGenerator,
    config: CachedProviderConfig,
}

impl CachedTranslationProvider {
    pub fn new(
        inner: Arc<dyn TranslationProvider>,
        cache: Arc<dyn Cache>,
        config: CachedProviderConfig,
    ) -> Self {
        let key_generator = CacheKeyGenerator::new(config.share_across_services);

        Self {
            inner,
            cache: Some(cache),
            key_generator,
            config,
        }
    }

    /// Pass-through decorator without a cache collaborator
    pub fn without_cache(inner: Arc<dyn TranslationProvider>) -> Self {
        Self {
            inner,
            cache: None,
            key_generator: CacheKeyGenerator::new(true),
            config: CachedProviderConfig {
                enabled: false,
                ..Default::default()
            },
        }
    }

    fn cache_key(&self, request: &TranslationRequest, model: &str) -> String {
        self.key_generator.generate(
            &self.inner.name(),
            &request.text,
            request.source_lang.as_deref().unwrap_or(""),
            &request.target_lang,
            model,
        )
    }

    /// Synchronous read-through; every failure mode is a miss
    async fn read_entry(&self, cache: &Arc<dyn Cache>, key: &str) -> Option<CachedTranslation> {
        let payload = match cache.get(key).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "cache get failed");
                return None;
            }
        };

        let entry: CachedTranslation = match serde_json::from_slice(&payload) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "ignoring corrupted cache entry");
                return None;
            }
        };

        if entry.version != CACHE_FORMAT_VERSION {
            debug!(
                key,
                cached_version = entry.version,
                current_version = CACHE_FORMAT_VERSION,
                "cache version mismatch, treating as miss"
            );
            return None;
        }

        Some(entry)
    }

    /// Derives the reduced persisted shape from a live response
    fn build_entry(
        &self,
        request: &TranslationRequest,
        model: &str,
        response: &TranslationResponse,
    ) -> CachedTranslation {
        let translated_text = response.translated_text();

        let alternatives: Vec<String> = response
            .alternative_translations
            .iter()
            .flat_map(|alt| alt.alternative.iter())
            .map(|a| a.word_postproc.clone())
            .filter(|text| !text.is_empty() && *text != translated_text)
            .collect();

        let source_lang = if response.src.is_empty() {
            request.source_lang.clone().unwrap_or_default()
        } else {
            response.src.clone()
        };

        CachedTranslation {
            original_text: request.text.clone(),
            source_lang,
            target_lang: request.target_lang.clone(),
            translated_text,
            alternatives: (!alternatives.is_empty()).then_some(alternatives),
            service: self.inner.name(),
            model: (!model.is_empty()).then(|| model.to_string()),
            cached_at: chrono::Utc::now().timestamp_millis(),
            version: CACHE_FORMAT_VERSION,
        }
    }

    /// Reconstructs the subset of the canonical response the entry can carry
    ///
    /// Primary sentence pair, alternatives, and the detection block; richer
    /// blocks are not recoverable from the reduced entry.
    fn response_from_entry(&self, entry: CachedTranslation) -> TranslationResponse {
        let mut response = TranslationResponse {
            src: entry.source_lang.clone(),
            sentences: vec![Sentence {
                orig: entry.original_text.clone(),
                trans: entry.translated_text.clone(),
                ..Default::default()
            }],
            ld_result: Some(LanguageDetectionResult::single(
                entry.source_lang.clone(),
                0.99,
            )),
            ..Default::default()
        };

        if let Some(alternatives) = entry.alternatives {
            response.alternative_translations = vec![AlternativeTranslation {
                src_phrase: entry.original_text,
                alternative: alternatives
                    .into_iter()
                    .map(|text| Alternative {
                        word_postproc: text,
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }];
        }

        response
    }

    /// Fire-and-forget write-back with its own timeout
    ///
    /// Runs detached from the caller's request lifetime; the caller's
    /// cancellation has no effect on it.
    fn spawn_write(&self, cache: Arc<dyn Cache>, key: String, entry: CachedTranslation) {
        let ttl = self.config.ttl;
        let write_timeout = self.config.write_timeout;

        tokio::spawn(async move {
            let payload = match serde_json::to_vec(&entry) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(key, error = %e, "cache serialization failed");
                    return;
                }
            };

            match tokio::time::timeout(write_timeout, cache.set(&key, &payload, ttl)).await {
                Ok(Ok(())) => {
                    debug!(key, ttl_secs = ttl.as_secs(), "cache entry saved");
                }
                Ok(Err(e)) => {
                    warn!(key, error = %e, "cache set failed");
                }
                Err(_) => {
                    warn!(key, timeout = ?write_timeout, "cache write timed out");
                }
            }
        });
    }
}

#[async_trait]
impl TranslationProvider for CachedTranslationProvider {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, DomainError> {
        self.translate_with_model(request, "").await
    }

    async fn translate_with_model(
        &self,
        request: &TranslationRequest,
        model: &str,
    ) -> Result<TranslationResponse, DomainError> {
        let cache = match (&self.cache, self.config.enabled) {
            (Some(cache), true) => cache,
            _ => return self.inner.translate_with_model(request, model).await,
        };

        let key = self.cache_key(request, model);

        if let Some(entry) = self.read_entry(cache, &key).await {
            debug!(key, service = %self.inner.name(), "cache hit");
            return Ok(self.response_from_entry(entry));
        }

        debug!(key, service = %self.inner.name(), "cache miss, calling provider");

        let response = self.inner.translate_with_model(request, model).await?;

        let entry = self.build_entry(request, model, &response);
        self.spawn_write(Arc::clone(cache), key, entry);

        Ok(response)
    }

    fn name(&self) -> String {
        format!("cached-{}", self.inner.name())
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}
