//! Error types

/// Errors raised by the selection core.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// The manager was built before all collaborators were wired in.
    #[error("selection manager is missing its {missing} collaborator")]
    Configuration {
        /// Name of the first missing collaborator.
        missing: &'static str,
    },
}

impl SelectError {
    /// Creates a configuration error for a missing collaborator.
    pub fn missing(missing: &'static str) -> Self {
        Self::Configuration { missing }
    }
}

/// A single delete request that did not succeed.
///
/// Only the message is kept; it is what the user sees in the error toast.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DeleteFailure {
    /// Human-readable failure message.
    pub message: String,
}

impl DeleteFailure {
    /// Creates a new delete failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors from parsing a key string such as `"ctrl+a"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    /// Nothing to parse.
    #[error("empty key string")]
    Empty,

    /// A modifier that is not ctrl, shift, alt or cmd.
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),

    /// A key name that is not recognized.
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}
