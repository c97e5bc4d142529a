//! Persisted cache entry shape

use serde::{Deserialize, Serialize};

/// Current cache format version
///
/// Incremented whenever the persisted shape changes incompatibly; readers
/// treat any other version as a miss, never repairing entries in place.
pub const CACHE_FORMAT_VERSION: i32 = 1;

/// Reduced translation shape persisted in the external cache
///
/// Deliberately smaller than the canonical response: only the primary
/// translation and its alternatives survive a round trip, so cache hits are
/// cheaper but leaner than live calls with rich field sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedTranslation {
    /// Original text before translation
    pub original_text: String,
    /// Source language (detected, or the requested one when detection failed)
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
    /// Primary translation (all sentence fragments concatenated)
    pub translated_text: String,
    /// Alternative translations, excluding the primary one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<String>>,
    /// Provider that produced the translation
    pub service: String,
    /// Model used, when one was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Write timestamp, epoch milliseconds
    pub cached_at: i64,
    /// Format version, checked against `CACHE_FORMAT_VERSION` on read
    pub version: i32,
}
