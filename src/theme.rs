//! Theme propagation
//!
//! Themes are plain stylesheets inserted under a fixed key, so attaching
//! the same theme twice leaves the window exactly as attaching it once.

use crate::core::{HostError, WindowId};
use crate::host::WindowHost;
use crate::settings::{SettingsStore, THEME};

/// Stylesheet key owned by the theme propagator
pub const THEME_STYLESHEET_KEY: &str = "repldesk-theme";

/// Re-skins window content
pub trait ThemePropagator: Send + Sync {
    /// (Re)inject the current theme into `window`. Must be idempotent.
    fn attach(&self, host: &mut dyn WindowHost, window: WindowId) -> Result<(), HostError>;

    /// Pick up a theme change from settings
    fn reconfigure(&mut self, _settings: &dyn SettingsStore) {}
}

/// Built-in theme stylesheets
fn builtin_css(name: &str) -> Option<&'static str> {
    match name {
        "default" => Some(""),
        "dark" => Some(
            "body, .workspace-page { background-color: #1d2333 !important; color: #e1e4e8 !important; }",
        ),
        "midnight" => Some(
            "body, .workspace-page { background-color: #0b0d12 !important; color: #c9d1d9 !important; }\n\
             a { color: #58a6ff !important; }",
        ),
        _ => None,
    }
}

/// Theme named by the `theme` setting
pub struct SettingsTheme {
    name: String,
    css: String,
}

impl SettingsTheme {
    pub fn from_settings(settings: &dyn SettingsStore) -> Self {
        let mut theme = Self {
            name: "default".to_string(),
            css: String::new(),
        };
        theme.reconfigure(settings);
        theme
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Names of the themes shipped with the shell
    pub fn available() -> &'static [&'static str] {
        &["default", "dark", "midnight"]
    }
}

impl ThemePropagator for SettingsTheme {
    fn attach(&self, host: &mut dyn WindowHost, window: WindowId) -> Result<(), HostError> {
        host.insert_stylesheet(window, THEME_STYLESHEET_KEY, &self.css)
    }

    fn reconfigure(&mut self, settings: &dyn SettingsStore) {
        let name = settings.get_string(THEME).unwrap_or_else(|| "default".to_string());
        match builtin_css(&name) {
            Some(css) => {
                self.name = name;
                self.css = css.to_string();
            }
            None => {
                tracing::warn!("Unknown theme '{}', using default", name);
                self.name = "default".to_string();
                self.css = String::new();
            }
        }
    }
}
