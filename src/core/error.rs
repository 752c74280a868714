//! Error types shared across the shell

use thiserror::Error;

use super::WindowId;

/// Errors raised by the windowing host
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Window {0} does not exist")]
    NoSuchWindow(WindowId),

    #[error("Failed to create window: {0}")]
    CreateFailed(String),

    #[error("Failed to load {url}: {reason}")]
    LoadFailed { url: String, reason: String },
}

/// Errors raised by the session cookie store
#[derive(Debug, Error)]
pub enum CookieError {
    #[error("Invalid cookie URL: {0}")]
    InvalidUrl(String),

    #[error("Cookie store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cookie store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors raised by the settings store
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors raised by the window/session orchestrator
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Window {0} is not registered")]
    UnknownWindow(WindowId),

    #[error("A cookie clear is already in progress")]
    ClearInProgress,

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Cookie(#[from] CookieError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
