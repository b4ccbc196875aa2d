//! In-memory settings store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::{SettingsBackend, SettingsError, StoredValue};

/// Settings kept only for the lifetime of the process.
///
/// Used when no data directory is available, and in tests.
#[derive(Default)]
pub struct MemoryBackend {
    values: DashMap<String, StoredValue>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<StoredValue>, SettingsError> {
        Ok(self.values.get(key).map(|value| value.clone()))
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<DateTime<Utc>, SettingsError> {
        let updated_at = Utc::now();
        self.values.insert(key.to_string(), StoredValue { bytes, updated_at });
        Ok(updated_at)
    }

    async fn remove(&self, key: &str) -> Result<bool, SettingsError> {
        Ok(self.values.remove(key).is_some())
    }
}
