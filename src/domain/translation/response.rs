//! Canonical translation response schema
//!
//! The on-wire JSON shape is a compatibility surface: consumers depend on
//! exact field presence per requested field set, so every optional block is
//! skipped from serialization when absent instead of being emitted empty.

use serde::{Deserialize, Serialize};

/// Stable output schema returned to all callers regardless of provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    /// Detected source language
    pub src: String,

    /// Ordered sentence pairs (original, translated, optional transliteration)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<Sentence>,

    /// Dictionary entries, present only when the "bd" field was requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dict: Vec<Dictionary>,

    /// Spell-check suggestion, present only when "qca" was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell: Option<SpellCheck>,

    /// Language-detection block; confidences are length-aligned with srclangs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ld_result: Option<LanguageDetectionResult>,

    /// Alternative-translation candidates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_translations: Vec<AlternativeTranslation>,

    /// Example sentences, present only when "ex" was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Examples>,
}

/// Single sentence pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub orig: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trans: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub backend: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub src_translit: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub translit: String,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

/// Dictionary block keyed by part of speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    pub pos: String,
    pub entry: Vec<DictEntry>,
}

/// Concrete dictionary translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictEntry {
    pub word: String,
    pub reverse_translation: Vec<String>,
    pub score: f64,
}

/// Spell-check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCheck {
    pub spell_res: String,
}

/// Detected languages with aligned confidence scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageDetectionResult {
    pub srclangs: Vec<String>,
    pub srclangs_confidences: Vec<f64>,
}

impl LanguageDetectionResult {
    /// Builds a single-language detection block
    pub fn single(lang: impl Into<String>, confidence: f64) -> Self {
        Self {
            srclangs: vec![lang.into()],
            srclangs_confidences: vec![confidence],
        }
    }
}

/// Alternative translations for one source phrase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlternativeTranslation {
    #[serde(default)]
    pub src_phrase: String,
    #[serde(default)]
    pub raw_src_segment: String,
    pub alternative: Vec<Alternative>,
}

/// Single alternative candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub word_postproc: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub has_preceding_space: bool,
    #[serde(default)]
    pub attach_to_next_token: bool,
}

/// Example sentence collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Examples {
    #[serde(rename = "example")]
    pub examples: Vec<Example>,
}

/// Single example sentence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    #[serde(default)]
    pub source_type: i32,
}

impl TranslationResponse {
    /// Concatenation of all translated sentence fragments
    pub fn translated_text(&self) -> String {
        self.sentences.iter().map(|s| s.trans.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrequested_blocks_absent_from_json() {
        let response = TranslationResponse {
            src: "en".to_string(),
            sentences: vec![Sentence {
                orig: "Hello".to_string(),
                trans: "你好".to_string(),
                backend: 1,
                ..Default::default()
            }],
            ld_result: Some(LanguageDetectionResult::single("en", 0.99)),
            ..Default::default()
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["src"], "en");
        assert!(json.get("dict").is_none());
        assert!(json.get("spell").is_none());
        assert!(json.get("examples").is_none());
        assert!(json.get("alternative_translations").is_none());
        assert_eq!(json["ld_result"]["srclangs"][0], "en");
    }

    #[test]
    fn test_sentence_skips_empty_fields() {
        let sentence = Sentence {
            src_translit: "hello".to_string(),
            translit: "HELLO".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&sentence).unwrap();
        assert!(json.get("orig").is_none());
        assert!(json.get("trans").is_none());
        assert!(json.get("backend").is_none());
        assert_eq!(json["translit"], "HELLO");
    }

    #[test]
    fn test_translated_text_concatenates_sentences() {
        let response = TranslationResponse {
            src: "en".to_string(),
            sentences: vec![
                Sentence {
                    trans: "Bonjour".to_string(),
                    ..Default::default()
                },
                Sentence {
                    trans: " le monde".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(response.translated_text(), "Bonjour le monde");
    }

    #[test]
    fn test_ld_result_lengths_aligned() {
        let ld = LanguageDetectionResult::single("zh-CN", 0.99);
        assert_eq!(ld.srclangs.len(), ld.srclangs_confidences.len());
    }
}
