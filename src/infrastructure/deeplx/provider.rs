//! DeepLX-backed translation provider
//!
//! Wraps the retrying client and assembles its raw outcome into the
//! canonical response schema. The upstream supplies only a translation and
//! alternatives, so the transliteration, dictionary, spell-check, and
//! example blocks are synthesized best-effort to preserve the compatibility
//! shape, not semantic richness.

use async_trait::async_trait;

use super::client::{DeepLxClient, DeepLxClientConfig, TranslationOutcome};
use crate::domain::translation::lang;
use crate::domain::{
    translation::{
        Alternative, AlternativeTranslation, DictEntry, Dictionary, Examples,
        LanguageDetectionResult, Sentence, SpellCheck,
    },
    DomainError, TranslationField, TranslationProvider, TranslationRequest, TranslationResponse,
};

const DEFAULT_PROVIDER_NAME: &str = "DeepLX";

/// Translation provider backed by the DeepLX HTTP API
#[derive(Debug)]
pub struct DeepLxProvider {
    client: DeepLxClient,
    name: String,
}

impl DeepLxProvider {
    pub fn new(config: DeepLxClientConfig) -> Result<Self, DomainError> {
        Ok(Self {
            client: DeepLxClient::new(config)?,
            name: DEFAULT_PROVIDER_NAME.to_string(),
        })
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(DeepLxClientConfig::new(api_key))
    }

    /// Overrides the reported provider name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn outcome_to_error(&self, outcome: &TranslationOutcome) -> DomainError {
        if outcome.cancelled {
            DomainError::cancelled(outcome.error_message.clone())
        } else {
            DomainError::provider(&self.name, outcome.error_message.clone())
        }
    }

    /// Maps a successful outcome into the canonical schema, populating only
    /// the requested blocks
    fn assemble(&self, request: &TranslationRequest, outcome: &TranslationOutcome) -> TranslationResponse {
        let mut detected = lang::normalize_language_code(&outcome.source_lang);
        if detected.is_empty() {
            detected = lang::detect_language(&request.text, "");
        }

        let mut response = TranslationResponse {
            src: detected.clone(),
            ld_result: Some(LanguageDetectionResult::single(detected, 0.99)),
            ..Default::default()
        };

        if request.wants(TranslationField::Translation) {
            response.sentences.push(Sentence {
                orig: request.text.clone(),
                trans: outcome.translated_text.clone(),
                backend: 1,
                ..Default::default()
            });
        }

        if request.wants(TranslationField::Transliteration) {
            // Synthetic: the upstream has no transliteration data.
            response.sentences.push(Sentence {
                src_translit: request.text.clone(),
                translit: request.text.to_uppercase(),
                ..Default::default()
            });
        }

        if request.wants(TranslationField::Dictionary) {
            // Synthetic single entry built from the main translation.
            response.dict = vec![Dictionary {
                pos: "translation".to_string(),
                entry: vec![DictEntry {
                    word: outcome.translated_text.clone(),
                    reverse_translation: vec![request.text.clone()],
                    score: 0.95,
                }],
            }];

            let alternatives: Vec<Alternative> = outcome
                .raw
                .as_ref()
                .map(|raw| {
                    raw.alternatives
                        .iter()
                        .filter(|alt| !alt.is_empty())
                        .map(|alt| Alternative {
                            word_postproc: alt.clone(),
                            score: 0.9,
                            ..Default::default()
                        })
                        .collect()
                })
                .unwrap_or_default();

            if !alternatives.is_empty() {
                response.alternative_translations = vec![AlternativeTranslation {
                    src_phrase: request.text.clone(),
                    alternative: alternatives,
                    ..Default::default()
                }];
            }
        }

        if request.wants(TranslationField::SpellCheck) {
            // Synthetic: echo the trimmed original.
            response.spell = Some(SpellCheck {
                spell_res: request.text.trim().to_string(),
            });
        }

        if request.wants(TranslationField::Examples) {
            // The upstream supplies no examples.
            response.examples = Some(Examples::default());
        }

        response
    }

    /// Degraded rendering for a failed outcome: the original text is echoed
    /// back as the translation so the schema stays well-formed
    ///
    /// The provider path maps failed outcomes to hard errors instead; this
    /// rendering exists for callers that prefer echo-on-failure semantics.
    pub fn degraded_response(&self, request: &TranslationRequest) -> TranslationResponse {
        let detected = lang::detect_language(
            &request.text,
            request.source_lang.as_deref().unwrap_or(""),
        );

        TranslationResponse {
            src: detected.clone(),
            sentences: vec![Sentence {
                orig: request.text.clone(),
                trans: request.text.clone(),
                ..Default::default()
            }],
            ld_result: Some(LanguageDetectionResult::single(detected, 0.5)),
            ..Default::default()
        }
    }
}

#[async_trait]
impl TranslationProvider for DeepLxProvider {
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
        request.validate()?;

        let outcome = self
            .client
            .translate_with_model(
                &request.text,
                request.explicit_source_lang(),
                &request.target_lang,
                model,
            )
            .await;

        if !outcome.success {
            return Err(self.outcome_to_error(&outcome));
        }

        Ok(self.assemble(request, &outcome))
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_available(&self) -> bool {
        self.client.is_configured()
    }
}
