//! Cache trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::DomainError;

/// External key-value cache port
///
/// `get` returns `Ok(None)` for an absent key so absence stays
/// distinguishable from a found-but-empty value and from a read error.
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// Gets the raw payload stored under a key, or `None` when absent
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError>;

    /// Stores a raw payload under a key
    ///
    /// A zero TTL means the entry never expires; eviction is owned by the
    /// external store.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), DomainError>;

    /// Deletes a key; absent keys are not an error
    async fn delete(&self, key: &str) -> Result<(), DomainError>;

    /// Checks the connection to the backing store
    async fn ping(&self) -> Result<(), DomainError>;

    /// Releases the connection to the backing store
    async fn close(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock cache for decorator tests
    ///
    /// Records every set so write-back behavior can be asserted without
    /// racing the detached write task.
    #[derive(Debug, Default)]
    pub struct MockCache {
        entries: Mutex<HashMap<String, Vec<u8>>>,
        get_error: Mutex<Option<String>>,
        set_error: Mutex<Option<String>>,
        set_count: Mutex<usize>,
    }

    impl MockCache {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates an entry
        pub fn with_entry(self, key: impl Into<String>, value: Vec<u8>) -> Self {
            self.entries.lock().unwrap().insert(key.into(), value);
            self
        }

        /// Makes every get fail with the given message
        pub fn with_get_error(self, error: impl Into<String>) -> Self {
            *self.get_error.lock().unwrap() = Some(error.into());
            self
        }

        /// Makes every set fail with the given message
        pub fn with_set_error(self, error: impl Into<String>) -> Self {
            *self.set_error.lock().unwrap() = Some(error.into());
            self
        }

        pub fn stored(&self, key: &str) -> Option<Vec<u8>> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        pub fn set_count(&self) -> usize {
            *self.set_count.lock().unwrap()
        }

        pub fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
            if let Some(ref error) = *self.get_error.lock().unwrap() {
                return Err(DomainError::cache(error.clone()));
            }
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8], _ttl: Duration) -> Result<(), DomainError> {
            *self.set_count.lock().unwrap() += 1;
            if let Some(ref error) = *self.set_error.lock().unwrap() {
                return Err(DomainError::cache(error.clone()));
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<(), DomainError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }

        async fn ping(&self) -> Result<(), DomainError> {
            Ok(())
        }

        async fn close(&self) -> Result<(), DomainError> {
            Ok(())
        }
    }
}
