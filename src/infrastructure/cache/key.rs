//! Cache key derivation

use sha2::{Digest, Sha256};

/// Namespace prefix for every translation cache key
pub const KEY_PREFIX: &str = "translate";

/// Scope segment used when entries are shared across providers
pub const SHARED_SCOPE: &str = "shared";

/// Deterministic cache key generator
///
/// Keys look like `translate:{scope}:{digest}` where the scope is either the
/// lowercased provider name or the shared sentinel, and the digest is the
/// first 16 hex characters of SHA-256 over the normalized inputs.
///
/// Keys are deliberately not qualified by the requested field set: caching a
/// response under one field set and reusing it for another is an accepted
/// approximation.
#[derive(Debug, Clone)]
pub struct CacheKeyGenerator {
    share_across_services: bool,
}

impl CacheKeyGenerator {
    pub fn new(share_across_services: bool) -> Self {
        Self {
            share_across_services,
        }
    }

    /// Derives the key for one request
    pub fn generate(
        &self,
        service: &str,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        model: &str,
    ) -> String {
        let digest = Self::digest(text, source_lang, target_lang, model);

        if self.share_across_services {
            format!("{}:{}:{}", KEY_PREFIX, SHARED_SCOPE, digest)
        } else {
            format!("{}:{}:{}", KEY_PREFIX, service.to_lowercase(), digest)
        }
    }

    /// Identical normalized inputs always yield the identical digest
    fn digest(text: &str, source_lang: &str, target_lang: &str, model: &str) -> String {
        let normalized = format!(
            "{}|{}|{}|{}",
            text.trim(),
            source_lang.trim().to_lowercase(),
            target_lang.trim().to_lowercase(),
            model.trim().to_lowercase(),
        );

        let hash = Sha256::digest(normalized.as_bytes());
        hex::encode(&hash[..8])
    }
}
