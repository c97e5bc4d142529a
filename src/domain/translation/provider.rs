//! Translation provider port

use std::fmt::Debug;

use async_trait::async_trait;

use super::request::TranslationRequest;
use super::response::TranslationResponse;
use crate::domain::DomainError;

/// Capability interface for translation providers
///
/// Concrete providers (the upstream-HTTP-backed one, the caching decorator)
/// are variants behind this trait and compose via explicit wrapping.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Performs one logical translation
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, DomainError>;

    /// Performs one logical translation with a specific model
    ///
    /// An empty model falls back to the provider's default behavior.
    async fn translate_with_model(
        &self,
        request: &TranslationRequest,
        model: &str,
    ) -> Result<TranslationResponse, DomainError>;

    /// Provider name used for health reporting and cache scoping
    fn name(&self) -> String;

    /// Whether the provider is configured and usable
    fn is_available(&self) -> bool;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock provider with call counting for cache-hit assertions
    #[derive(Debug)]
    pub struct MockTranslationProvider {
        name: String,
        response: Option<TranslationResponse>,
        error: Option<String>,
        calls: AtomicUsize,
    }

    impl MockTranslationProvider {
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                response: None,
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_response(mut self, response: TranslationResponse) -> Self {
            self.response = Some(response);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// Number of times translate was invoked
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationProvider for MockTranslationProvider {
        async fn translate(
            &self,
            request: &TranslationRequest,
        ) -> Result<TranslationResponse, DomainError> {
            self.translate_with_model(request, "").await
        }

        async fn translate_with_model(
            &self,
            _request: &TranslationRequest,
            _model: &str,
        ) -> Result<TranslationResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(ref error) = self.error {
                return Err(DomainError::provider(&self.name, error));
            }

            self.response
                .clone()
                .ok_or_else(|| DomainError::provider(&self.name, "No mock response configured"))
        }

        fn name(&self) -> String {
            self.name.clone()
        }

        fn is_available(&self) -> bool {
            true
        }
    }
}
