//! Window identity and geometry

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned window identifier, stable for the lifetime of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Inner size of a window in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(1600, 900)
    }
}

/// How a window came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowRole {
    /// The window created at startup; closing it ends the shell
    Primary,
    /// Opened for an intercepted new-window request
    Spawned,
    /// Login popup for an OAuth round-trip
    AuthPopup,
}

impl WindowRole {
    pub fn label(&self) -> &'static str {
        match self {
            WindowRole::Primary => "primary",
            WindowRole::Spawned => "spawned",
            WindowRole::AuthPopup => "auth-popup",
        }
    }
}
