//! Admin settings: the server to talk to, the session used for it, and the
//! toolbar labels.
//!
//! Values are bincode-encoded and persisted through a [`SettingsBackend`].
//! Connection settings can be overridden from the environment, which wins over
//! the store.

mod backend;
mod memory;
mod sqlite;

pub use backend::{SettingsBackend, StoredValue};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use schedule_select::labels::Labels;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Used when neither the store nor the environment names a server.
pub const DEFAULT_URL: &str = "http://localhost:5000";

/// Every setting the admin stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// Base URL of the schedule site.
    ServerUrl,
    /// `Cookie` header of a logged-in admin session.
    SessionCookie,
    /// CSRF token of that session, required for deletes.
    CsrfToken,
    /// Text labels of the selection toolbar and dialogs.
    Labels,
}

impl Setting {
    /// Settings that can be changed from the console.
    pub const EDITABLE: [Setting; 3] = [Setting::ServerUrl, Setting::SessionCookie, Setting::CsrfToken];

    /// Store key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ServerUrl => "server.url",
            Self::SessionCookie => "server.session_cookie",
            Self::CsrfToken => "server.csrf_token",
            Self::Labels => "labels",
        }
    }

    /// Environment variable that overrides the stored value.
    pub fn env_var(&self) -> Option<&'static str> {
        match self {
            Self::ServerUrl => Some("SCHEDULE_ADMIN_URL"),
            Self::SessionCookie => Some("SCHEDULE_ADMIN_COOKIE"),
            Self::CsrfToken => Some("SCHEDULE_ADMIN_CSRF"),
            Self::Labels => None,
        }
    }

    /// Credentials are never echoed back.
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::SessionCookie | Self::CsrfToken)
    }

    /// Parse the short name used by `config set`/`config unset`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "url" => Some(Self::ServerUrl),
            "cookie" => Some(Self::SessionCookie),
            "csrf" => Some(Self::CsrfToken),
            _ => None,
        }
    }
}

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Typed access to the admin's settings.
#[derive(Clone)]
pub struct AdminSettings {
    backend: Arc<dyn SettingsBackend>,
}

impl AdminSettings {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Stored value of a setting, ignoring the environment.
    pub async fn get<T: DeserializeOwned>(&self, setting: Setting) -> Result<Option<T>, SettingsError> {
        match self.backend.read(setting.key()).await? {
            Some(stored) => Ok(Some(
                bincode::deserialize(&stored.bytes).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// When a setting was last stored.
    pub async fn changed_at(&self, setting: Setting) -> Result<Option<DateTime<Utc>>, SettingsError> {
        Ok(self.backend.read(setting.key()).await?.map(|stored| stored.updated_at))
    }

    /// Store a setting.
    pub async fn set<T: Serialize + Sync>(&self, setting: Setting, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.write(setting.key(), bytes).await?;
        Ok(())
    }

    /// Forget a setting. Returns whether it was stored.
    pub async fn unset(&self, setting: Setting) -> Result<bool, SettingsError> {
        self.backend.remove(setting.key()).await
    }
}

/// Resolved startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    pub server_url: String,
    pub session_cookie: Option<String>,
    pub csrf_token: Option<String>,
    pub labels: Labels,
}

impl AdminConfig {
    /// Load from the store, letting the process environment override it.
    pub async fn load(settings: &AdminSettings) -> Result<Self, SettingsError> {
        Self::load_with(settings, |name| std::env::var(name).ok()).await
    }

    /// Load from the store with `env` looking up overrides.
    pub async fn load_with(
        settings: &AdminSettings,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            server_url: text_setting(settings, Setting::ServerUrl, &env)
                .await?
                .unwrap_or_else(|| DEFAULT_URL.to_string()),
            session_cookie: text_setting(settings, Setting::SessionCookie, &env).await?,
            csrf_token: text_setting(settings, Setting::CsrfToken, &env).await?,
            labels: settings.get(Setting::Labels).await?.unwrap_or_default(),
        })
    }
}

/// A non-empty environment override, else the stored value.
async fn text_setting(
    settings: &AdminSettings,
    setting: Setting,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<Option<String>, SettingsError> {
    let from_env = setting
        .env_var()
        .and_then(env)
        .filter(|value| !value.trim().is_empty());
    match from_env {
        Some(value) => Ok(Some(value)),
        None => settings.get(setting).await,
    }
}

/// Name of the environment variable currently overriding `setting`, if any.
pub fn env_override(setting: Setting) -> Option<&'static str> {
    setting
        .env_var()
        .filter(|name| std::env::var(name).is_ok_and(|value| !value.trim().is_empty()))
}
