//! Retrying HTTP client for the DeepLX upstream

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::TranslationConfig;
use crate::domain::DomainError;

const DEFAULT_BASE_URL: &str = "https://deeplx.jayogo.com/translate";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_OVERALL_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(200);

/// Configuration for the upstream client
#[derive(Debug, Clone)]
pub struct DeepLxClientConfig {
    /// API key, embedded in the request URL
    pub api_key: String,
    /// Base URL without the trailing key segment
    pub base_url: String,
    /// Timeout applied to each individual attempt
    pub request_timeout: Duration,
    /// Deadline for the whole logical call, across all attempts
    pub overall_timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Linear backoff step between attempts
    pub backoff_step: Duration,
}

impl DeepLxClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            overall_timeout: DEFAULT_OVERALL_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }

    /// Sets the base URL, trimming any trailing slash
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-attempt timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the overall deadline for one logical call
    pub fn with_overall_timeout(mut self, timeout: Duration) -> Self {
        self.overall_timeout = timeout;
        self
    }

    /// Sets the retry budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the linear backoff step
    pub fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }
}

impl From<&TranslationConfig> for DeepLxClientConfig {
    fn from(config: &TranslationConfig) -> Self {
        let mut client_config = Self::new(config.api_key.clone())
            .with_request_timeout(config.request_timeout())
            .with_overall_timeout(config.overall_timeout())
            .with_max_retries(config.max_retries)
            .with_backoff_step(config.backoff_step());

        if !config.base_url.trim().is_empty() {
            client_config = client_config.with_base_url(config.base_url.trim());
        }

        client_config
    }
}

/// Request body in the shape the upstream expects
#[derive(Debug, Serialize)]
struct DeepLxRequest {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,
    target_lang: String,
}

/// Raw upstream response payload, kept opaque for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeepLxResponse {
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub source_lang: String,
    #[serde(default)]
    pub target_lang: String,
}

/// Result of one logical upstream call, always well-formed
///
/// Exactly one of `translated_text` / `error_message` is meaningful, gated
/// by `success`.
#[derive(Debug, Clone, Default)]
pub struct TranslationOutcome {
    pub success: bool,
    /// Distinguishes a fired deadline from transport failure
    pub cancelled: bool,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub error_message: String,
    pub raw: Option<DeepLxResponse>,
}

impl TranslationOutcome {
    fn from_response(response: DeepLxResponse) -> Self {
        Self {
            success: true,
            translated_text: response.data.clone(),
            source_lang: response.source_lang.clone(),
            target_lang: response.target_lang.clone(),
            raw: Some(response),
            ..Default::default()
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
            ..Default::default()
        }
    }

    fn cancelled(message: impl Into<String>) -> Self {
        Self {
            cancelled: true,
            error_message: message.into(),
            ..Default::default()
        }
    }
}

/// How a single attempt failed
enum AttemptError {
    /// Timeout, transport failure, 5xx, or a malformed body; worth retrying
    Transient(String),
    /// Upstream rejection (non-2xx, non-5xx); retrying cannot help
    Fatal(String),
}

/// Retrying upstream client
///
/// Performs one logical translation in up to `max_retries + 1` attempts with
/// linear backoff. The connection pool is shared across all calls.
#[derive(Debug, Clone)]
pub struct DeepLxClient {
    config: DeepLxClientConfig,
    http: reqwest::Client,
}

impl DeepLxClient {
    pub fn new(config: DeepLxClientConfig) -> Result<Self, DomainError> {
        if config.api_key.is_empty() || !config.api_key.starts_with("sk-") {
            return Err(DomainError::configuration(
                "DeepLX API key must start with 'sk-'",
            ));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(DeepLxClientConfig::new(api_key))
    }

    /// True when the client holds a usable API key
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Performs one logical translation
    ///
    /// The returned outcome is always well-formed; transport failures and
    /// upstream rejections end up in `error_message`, never in a panic or
    /// an `Err`.
    pub async fn translate(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: &str,
    ) -> TranslationOutcome {
        self.translate_with_model(text, source_lang, target_lang, "")
            .await
    }

    /// Performs one logical translation against a specific model
    pub async fn translate_with_model(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: &str,
        model: &str,
    ) -> TranslationOutcome {
        let request = DeepLxRequest {
            text: text.to_string(),
            source_lang: source_lang
                .filter(|s| !s.is_empty())
                .map(|s| s.to_uppercase()),
            target_lang: target_lang.to_uppercase(),
        };

        self.do_request(&request, model).await
    }

    async fn do_request(&self, request: &DeepLxRequest, model: &str) -> TranslationOutcome {
        let url = self.build_url(model);

        let payload = match serde_json::to_vec(request) {
            Ok(payload) => payload,
            Err(e) => {
                return TranslationOutcome::failure(format!("failed to serialize request: {}", e))
            }
        };

        let deadline = Instant::now() + self.config.overall_timeout;
        let mut last_error = String::new();

        for attempt in 0..=self.config.max_retries {
            let now = Instant::now();
            if now >= deadline {
                return TranslationOutcome::cancelled(format!(
                    "deadline exceeded after {} attempt(s): {}",
                    attempt, last_error
                ));
            }

            // Effective timeout is the smaller of the per-attempt budget and
            // whatever remains of the overall deadline.
            let attempt_timeout = self.config.request_timeout.min(deadline - now);

            match tokio::time::timeout(attempt_timeout, self.send(&url, &payload)).await {
                Ok(Ok(response)) => {
                    debug!(attempt, "upstream translation succeeded");
                    return TranslationOutcome::from_response(response);
                }
                Ok(Err(AttemptError::Fatal(message))) => {
                    return TranslationOutcome::failure(message);
                }
                Ok(Err(AttemptError::Transient(message))) => {
                    last_error = message;
                }
                Err(_) => {
                    last_error = format!("attempt timed out after {:?}", attempt_timeout);
                }
            }

            if attempt < self.config.max_retries {
                warn!(attempt, error = %last_error, "retrying upstream translation");
                tokio::time::sleep(self.backoff(attempt)).await;
            }
        }

        TranslationOutcome::failure(last_error)
    }

    async fn send(&self, url: &str, payload: &[u8]) -> Result<DeepLxResponse, AttemptError> {
        let response = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload.to_vec())
            .send()
            .await
            .map_err(|e| AttemptError::Transient(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Transient(format!("failed to read response: {}", e)))?;

        if status.is_server_error() {
            return Err(AttemptError::Transient(format!("HTTP {}: {}", status, body)));
        }

        if !status.is_success() {
            return Err(AttemptError::Fatal(format!("HTTP {}: {}", status, body)));
        }

        // A malformed body may be an individually corrupted response, so it
        // is retried like a transient failure.
        serde_json::from_str(&body)
            .map_err(|e| AttemptError::Transient(format!("failed to parse response: {}", e)))
    }

    fn build_url(&self, model: &str) -> String {
        if model.is_empty() {
            format!("{}/{}", self.config.base_url, self.config.api_key)
        } else {
            format!("{}/{}/{}", self.config.base_url, self.config.api_key, model)
        }
    }

    /// Linear backoff keeps the worst-case total latency small and
    /// deterministic; this client sits behind a caller-facing timeout.
    fn backoff(&self, attempt: u32) -> Duration {
        self.config.backoff_step * (attempt + 1)
    }
}
