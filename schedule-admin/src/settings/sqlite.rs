//! SQLite settings store.
//!
//! The admin reads every setting at startup and is the only writer, so the
//! whole table is loaded into memory when the database is opened and reads
//! never touch SQLite afterwards.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::debug;

use super::{SettingsBackend, SettingsError, StoredValue};

/// Settings persisted in SQLite, mirrored in a DashMap.
pub struct SqliteBackend {
    client: Client,
    values: DashMap<String, StoredValue>,
}

impl SqliteBackend {
    /// Open (or create) the settings database and load every stored value.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let client = async_sqlite::ClientBuilder::new().path(path).open().await?;

        let rows = client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS admin_settings (
                        key TEXT PRIMARY KEY,
                        value BLOB NOT NULL,
                        updated_at INTEGER NOT NULL
                    )",
                    [],
                )?;
                let mut stmt = conn.prepare("SELECT key, value, updated_at FROM admin_settings")?;
                let rows = stmt.query_map([], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Vec<u8>>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                })?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await?;

        debug!("loaded {} stored setting(s)", rows.len());
        let values = rows
            .into_iter()
            .map(|(key, bytes, updated)| {
                let updated_at = DateTime::<Utc>::from_timestamp(updated, 0).unwrap_or_default();
                (key, StoredValue { bytes, updated_at })
            })
            .collect();

        Ok(Self { client, values })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn read(&self, key: &str) -> Result<Option<StoredValue>, SettingsError> {
        Ok(self.values.get(key).map(|value| value.clone()))
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<DateTime<Utc>, SettingsError> {
        let updated_at = Utc::now();
        let key_owned = key.to_string();
        let stored = bytes.clone();
        let timestamp = updated_at.timestamp();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO admin_settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    rusqlite::params![&key_owned, &stored, timestamp],
                )
            })
            .await?;

        self.values.insert(key.to_string(), StoredValue { bytes, updated_at });
        Ok(updated_at)
    }

    async fn remove(&self, key: &str) -> Result<bool, SettingsError> {
        let key_owned = key.to_string();
        let removed = self
            .client
            .conn(move |conn| conn.execute("DELETE FROM admin_settings WHERE key = ?1", [&key_owned]))
            .await?;

        self.values.remove(key);
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let path = std::env::temp_dir().join(format!("schedule-admin-settings-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let written = {
            let backend = SqliteBackend::open(&path).await.expect("open db");
            backend.write("server.url", vec![1, 2, 3]).await.expect("write");
            backend.write("server.url", vec![4]).await.expect("overwrite")
        };

        let backend = SqliteBackend::open(&path).await.expect("reopen db");
        let stored = backend.read("server.url").await.expect("read").expect("stored");
        assert_eq!(stored.bytes, vec![4]);
        assert_eq!(stored.updated_at.timestamp(), written.timestamp());

        assert!(backend.remove("server.url").await.expect("remove"));
        assert!(!backend.remove("server.url").await.expect("remove again"));
        assert_eq!(backend.read("server.url").await.expect("read"), None);

        let _ = std::fs::remove_file(&path);
    }
}
