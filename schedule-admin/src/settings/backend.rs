//! Storage behind the admin settings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::SettingsError;

/// An encoded setting and when it was last written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    pub bytes: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}

/// Where [`AdminSettings`](super::AdminSettings) keeps its encoded values.
///
/// Values are opaque bytes here; encoding is the settings layer's job.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Read a stored value.
    async fn read(&self, key: &str) -> Result<Option<StoredValue>, SettingsError>;

    /// Store a value, returning the time it was written.
    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<DateTime<Utc>, SettingsError>;

    /// Remove a value. Returns whether one was stored.
    async fn remove(&self, key: &str) -> Result<bool, SettingsError>;
}
