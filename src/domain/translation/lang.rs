//! Best-effort language heuristic
//!
//! Used only when the upstream provider does not report a source language.
//! Deterministic, total, no side effects.

use super::request::AUTO_SOURCE_LANG;

/// Returns a normalized language code for the given text
///
/// A non-empty requested language that is not the auto sentinel wins
/// unconditionally. Otherwise the text is scanned in character order and the
/// first recognized script family decides; unrecognized text falls back to
/// "en".
pub fn detect_language(text: &str, requested: &str) -> String {
    let requested = requested.trim();
    if !requested.is_empty() && !requested.eq_ignore_ascii_case(AUTO_SOURCE_LANG) {
        return normalize_language_code(requested);
    }

    for c in text.chars() {
        if is_cjk(c) {
            return "zh-CN".to_string();
        }
        if is_cyrillic(c) {
            return "ru".to_string();
        }
        if is_japanese_kana(c) {
            return "ja".to_string();
        }
        if is_hangul(c) {
            return "ko".to_string();
        }
    }

    "en".to_string()
}

/// Collapses regional variants into the codes the canonical schema uses
pub fn normalize_language_code(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "zh" | "zh-hans" => "zh-CN".to_string(),
        "zh-hant" => "zh-TW".to_string(),
        "en" | "en-us" => "en".to_string(),
        "en-gb" => "en-GB".to_string(),
        "ja" => "ja".to_string(),
        "ko" => "ko".to_string(),
        "fr" => "fr".to_string(),
        "de" => "de".to_string(),
        "es" => "es".to_string(),
        "ru" => "ru".to_string(),
        "pt" | "pt-br" => "pt".to_string(),
        "it" => "it".to_string(),
        "ar" => "ar".to_string(),
        other => other.to_string(),
    }
}

/// CJK unified ideograph ranges (base, extension A, extension B)
pub fn is_cjk(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{20000}'..='\u{2A6DF}')
}

pub fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}')
}

/// Hiragana or Katakana
pub fn is_japanese_kana(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}')
}

pub fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7AF}')
}
