//! Startup errors.

use schedule_select::error::SelectError;
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Client(#[from] schedule_lib::Error),
    #[error(transparent)]
    Setup(#[from] SelectError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
