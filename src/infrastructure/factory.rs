//! Provider factory - the composition point
//!
//! Builds a concrete provider from configuration and optionally layers the
//! caching decorator on top. Included as the composition seam, not as a
//! feature surface.

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::cache::{CachedProviderConfig, CachedTranslationProvider, RedisCache, RedisCacheConfig};
use super::deeplx::{DeepLxClientConfig, DeepLxProvider};
use crate::config::{AppConfig, CacheConfig, TranslationConfig};
use crate::domain::cache::Cache;
use crate::domain::{DomainError, TranslationProvider};

/// Supported upstream services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    DeepLx,
    /// Reserved, not yet implemented
    Google,
    /// Reserved, not yet implemented
    Baidu,
    /// Reserved, not yet implemented
    Youdao,
}

impl FromStr for ServiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deeplx" => Ok(Self::DeepLx),
            "google" => Ok(Self::Google),
            "baidu" => Ok(Self::Baidu),
            "youdao" => Ok(Self::Youdao),
            other => Err(DomainError::configuration(format!(
                "unknown translation service type: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeepLx => write!(f, "deeplx"),
            Self::Google => write!(f, "google"),
            Self::Baidu => write!(f, "baidu"),
            Self::Youdao => write!(f, "youdao"),
        }
    }
}

/// Factory for translation providers
#[derive(Debug, Default)]
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates the bare provider named by the configuration
    pub fn create(
        &self,
        config: &TranslationConfig,
    ) -> Result<Arc<dyn TranslationProvider>, DomainError> {
        if config.api_key.trim().is_empty() {
            return Err(DomainError::configuration(
                "translation.api_key must not be empty",
            ));
        }

        match config.service_type.parse::<ServiceType>()? {
            ServiceType::DeepLx => {
                let provider = DeepLxProvider::new(DeepLxClientConfig::from(config))?;
                Ok(Arc::new(provider))
            }
            reserved => Err(DomainError::configuration(format!(
                "translation service '{}' is not implemented yet",
                reserved
            ))),
        }
    }

    /// Layers the caching decorator over any provider
    pub fn create_cached(
        &self,
        inner: Arc<dyn TranslationProvider>,
        cache: Arc<dyn Cache>,
        config: &CacheConfig,
    ) -> Arc<dyn TranslationProvider> {
        Arc::new(CachedTranslationProvider::new(
            inner,
            cache,
            CachedProviderConfig::from(config),
        ))
    }

    /// Builds the fully composed provider from the application configuration
    ///
    /// With caching disabled (or a Redis connection failure downgraded by
    /// the caller) this returns the bare provider.
    pub async fn create_from_app_config(
        &self,
        config: &AppConfig,
    ) -> Result<Arc<dyn TranslationProvider>, DomainError> {
        let provider = self.create(&config.translation)?;

        if !config.cache.enabled {
            info!(service = %provider.name(), "translation cache disabled");
            return Ok(provider);
        }

        let cache = RedisCache::new(RedisCacheConfig::from(&config.cache)).await?;
        info!(
            service = %provider.name(),
            ttl_secs = config.cache.ttl_secs,
            shared = config.cache.share_across_services,
            "translation cache enabled"
        );

        Ok(self.create_cached(provider, Arc::new(cache), &config.cache))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;

    fn deeplx_config() -> TranslationConfig {
        TranslationConfig {
            api_key: "sk-test".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_service_type_parsing() {
        assert_eq!("deeplx".parse::<ServiceType>().unwrap(), ServiceType::DeepLx);
        assert_eq!("DeepLX".parse::<ServiceType>().unwrap(), ServiceType::DeepLx);
        assert_eq!(" google ".parse::<ServiceType>().unwrap(), ServiceType::Google);
        assert!("esperanto-api".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_create_deeplx_provider() {
        let provider = ProviderFactory::new().create(&deeplx_config()).unwrap();
        assert_eq!(provider.name(), "DeepLX");
        assert!(provider.is_available());
    }

    #[test]
    fn test_create_requires_api_key() {
        let config = TranslationConfig::default();
        let result = ProviderFactory::new().create(&config);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_reserved_services_rejected() {
        let mut config = deeplx_config();
        config.service_type = "google".to_string();

        let result = ProviderFactory::new().create(&config);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_create_cached_wraps_provider() {
        let factory = ProviderFactory::new();
        let inner = factory.create(&deeplx_config()).unwrap();

        let cached = factory.create_cached(
            inner,
            Arc::new(MockCache::new()),
            &CacheConfig {
                enabled: true,
                ..Default::default()
            },
        );

        assert_eq!(cached.name(), "cached-DeepLX");
        assert!(cached.is_available());
    }

    #[tokio::test]
    async fn test_app_config_without_cache_yields_bare_provider() {
        let config = AppConfig {
            translation: deeplx_config(),
            ..Default::default()
        };

        let provider = ProviderFactory::new()
            .create_from_app_config(&config)
            .await
            .unwrap();

        assert_eq!(provider.name(), "DeepLX");
    }
}
