//! Cache domain - external key-value cache port and the persisted entry shape

mod entry;
mod repository;

pub use entry::{CachedTranslation, CACHE_FORMAT_VERSION};
pub use repository::Cache;

#[cfg(test)]
pub use repository::mock::MockCache;
