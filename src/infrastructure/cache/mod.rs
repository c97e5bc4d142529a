//! Cache infrastructure - key derivation, Redis backend, caching decorator

mod cached_provider;
mod key;
mod redis;

pub use cached_provider::{CachedProviderConfig, CachedTranslationProvider};
pub use key::{CacheKeyGenerator, KEY_PREFIX, SHARED_SCOPE};
pub use redis::{RedisCache, RedisCacheConfig};
