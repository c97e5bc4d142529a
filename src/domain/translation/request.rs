//! Translation request model

use serde::{Deserialize, Serialize};

/// Sentinel source-language value meaning "detect the language for me"
pub const AUTO_SOURCE_LANG: &str = "auto";

/// Optional response blocks a caller can request
///
/// The wire tokens match the Google Translate `dt` parameter values so
/// existing browser-extension-style clients keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationField {
    /// "t" - the translation itself
    Translation,
    /// "rm" - transliteration of the source text
    Transliteration,
    /// "bd" - dictionary entries and alternative translations
    Dictionary,
    /// "qca" - spell-check suggestion
    SpellCheck,
    /// "ex" - example sentences
    Examples,
}

impl TranslationField {
    /// Parses a wire token; unknown tokens yield `None` and are ignored
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "t" => Some(Self::Translation),
            "rm" => Some(Self::Transliteration),
            "bd" => Some(Self::Dictionary),
            "qca" => Some(Self::SpellCheck),
            "ex" => Some(Self::Examples),
            _ => None,
        }
    }

    /// Returns the wire token for this field
    pub fn token(&self) -> &'static str {
        match self {
            Self::Translation => "t",
            Self::Transliteration => "rm",
            Self::Dictionary => "bd",
            Self::SpellCheck => "qca",
            Self::Examples => "ex",
        }
    }
}

/// Immutable translation request
///
/// The target language must be non-empty by the time the request reaches the
/// upstream client; `validate` enforces this at the provider boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Source text to translate
    pub text: String,
    /// Source language code; `None`, empty or "auto" means undetermined
    pub source_lang: Option<String>,
    /// Target language code (required)
    pub target_lang: String,
    /// Requested optional response blocks
    pub fields: Vec<TranslationField>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: None,
            target_lang: target_lang.into(),
            fields: vec![TranslationField::Translation],
        }
    }

    /// Sets the source language
    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = Some(source_lang.into());
        self
    }

    /// Replaces the requested field set
    pub fn with_fields(mut self, fields: Vec<TranslationField>) -> Self {
        self.fields = fields;
        self
    }

    /// Parses a list of wire tokens into the field set, dropping unknown ones
    pub fn with_field_tokens(mut self, tokens: &[&str]) -> Self {
        self.fields = tokens
            .iter()
            .filter_map(|t| TranslationField::from_token(t))
            .collect();
        self
    }

    /// True when the caller asked for the given block
    pub fn wants(&self, field: TranslationField) -> bool {
        self.fields.contains(&field)
    }

    /// Returns the source language unless it is empty or the auto sentinel
    pub fn explicit_source_lang(&self) -> Option<&str> {
        self.source_lang
            .as_deref()
            .filter(|s| !s.trim().is_empty() && !s.eq_ignore_ascii_case(AUTO_SOURCE_LANG))
    }

    pub fn validate(&self) -> Result<(), crate::domain::DomainError> {
        if self.target_lang.trim().is_empty() {
            return Err(crate::domain::DomainError::validation(
                "target language must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_tokens_round_trip() {
        for field in [
            TranslationField::Translation,
            TranslationField::Transliteration,
            TranslationField::Dictionary,
            TranslationField::SpellCheck,
            TranslationField::Examples,
        ] {
            assert_eq!(TranslationField::from_token(field.token()), Some(field));
        }
    }

    #[test]
    fn test_unknown_token_ignored() {
        assert_eq!(TranslationField::from_token("xyz"), None);

        let request = TranslationRequest::new("hello", "zh").with_field_tokens(&["t", "xyz", "bd"]);
        assert_eq!(
            request.fields,
            vec![TranslationField::Translation, TranslationField::Dictionary]
        );
    }

    #[test]
    fn test_explicit_source_lang() {
        let request = TranslationRequest::new("hello", "zh");
        assert_eq!(request.explicit_source_lang(), None);

        let request = request.with_source_lang("auto");
        assert_eq!(request.explicit_source_lang(), None);

        let request = TranslationRequest::new("hello", "zh").with_source_lang("EN");
        assert_eq!(request.explicit_source_lang(), Some("EN"));

        let request = TranslationRequest::new("hello", "zh").with_source_lang("  ");
        assert_eq!(request.explicit_source_lang(), None);
    }

    #[test]
    fn test_validate_requires_target_lang() {
        let request = TranslationRequest::new("hello", "");
        assert!(request.validate().is_err());

        let request = TranslationRequest::new("hello", "zh");
        assert!(request.validate().is_ok());
    }
}
