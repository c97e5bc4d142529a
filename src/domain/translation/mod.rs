//! Translation domain - request/response models and the provider port

pub mod lang;
mod provider;
mod request;
mod response;

pub use provider::TranslationProvider;
pub use request::{TranslationField, TranslationRequest, AUTO_SOURCE_LANG};
pub use response::{
    Alternative, AlternativeTranslation, DictEntry, Dictionary, Example, Examples,
    LanguageDetectionResult, Sentence, SpellCheck, TranslationResponse,
};

#[cfg(test)]
pub use provider::mock::MockTranslationProvider;
