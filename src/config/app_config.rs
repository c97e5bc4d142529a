use std::time::Duration;

use serde::Deserialize;

/// Application configuration
///
/// Every knob has a default, so the gateway is fully constructible from an
/// empty configuration plus a valid API key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub translation: TranslationConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// Upstream translation provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Provider to use ("deeplx" is the only implemented one)
    pub service_type: String,
    /// Provider API key (required, no default)
    pub api_key: String,
    /// Override for the provider base URL; empty uses the provider default
    pub base_url: String,
    /// Default model identifier; empty lets the provider decide
    pub model: String,
    /// Per-attempt request timeout in seconds
    pub request_timeout_secs: u64,
    /// Upper bound for one logical call across all attempts, in seconds
    pub overall_timeout_secs: u64,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Linear backoff step between attempts, in milliseconds
    pub backoff_step_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            service_type: "deeplx".to_string(),
            api_key: String::new(),
            base_url: String::new(),
            model: String::new(),
            request_timeout_secs: 10,
            overall_timeout_secs: 30,
            max_retries: 2,
            backoff_step_ms: 200,
        }
    }
}

impl TranslationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_secs(self.overall_timeout_secs)
    }

    pub fn backoff_step(&self) -> Duration {
        Duration::from_millis(self.backoff_step_ms)
    }
}

/// External cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether translation results are memoized at all
    pub enabled: bool,
    /// Redis connection URL
    pub url: String,
    /// Entry TTL in seconds; 0 means no expiry
    pub ttl_secs: u64,
    /// Share entries across providers instead of scoping keys per provider
    pub share_across_services: bool,
    /// Bound for the detached cache write, in seconds
    pub write_timeout_secs: u64,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "redis://127.0.0.1:6379".to_string(),
            ttl_secs: 0,
            share_across_services: true,
            write_timeout_secs: 5,
            connection_timeout_secs: 5,
        }
    }
}

impl CacheConfig {
    /// Entry TTL; zero means entries never expire
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from files and `APP__`-prefixed environment
    /// variables (e.g. `APP__TRANSLATION__API_KEY`)
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validates the parts the gateway cannot run without
    pub fn validate(&self) -> Result<(), crate::domain::DomainError> {
        if self.translation.service_type.trim().is_empty() {
            return Err(crate::domain::DomainError::configuration(
                "translation.service_type must not be empty",
            ));
        }
        if self.translation.api_key.trim().is_empty() {
            return Err(crate::domain::DomainError::configuration(
                "translation.api_key must not be empty",
            ));
        }
        Ok(())
    }
}
