//! Shell configuration and on-disk locations

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::{WindowSize, WINDOW_BACKGROUND};

/// When the cookie clearing protocol persists the jar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlushPolicy {
    /// Flush after every removed cookie
    #[default]
    PerRemoval,
    /// Flush once after the last removal
    OnCompletion,
}

/// Static shell configuration read from `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub background_color: String,
    pub cookie_flush: FlushPolicy,
    /// Show the inspector entry in the content context menu
    pub inspector: bool,
    /// Overrides the platform data directory (cookie jar location)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        let size = WindowSize::default();
        Self {
            window_width: size.width,
            window_height: size.height,
            background_color: WINDOW_BACKGROUND.to_string(),
            cookie_flush: FlushPolicy::default(),
            inspector: true,
            data_dir: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not determine the user directories")]
    NoProjectDirs,
}

impl ShellConfig {
    const FILE_NAME: &'static str = "config.toml";

    /// Load `config.toml` from `dir`, falling back to defaults when absent
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(Self::FILE_NAME);
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn window_size(&self) -> WindowSize {
        WindowSize::new(self.window_width, self.window_height)
    }
}

/// Where the shell keeps its files
#[derive(Debug, Clone)]
pub struct ShellPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl ShellPaths {
    /// Platform directories for the app
    pub fn discover() -> Result<Self, ConfigError> {
        let dirs = directories::ProjectDirs::from("it", "repl", "repldesk").ok_or(ConfigError::NoProjectDirs)?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Everything under one root, for portable installs
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
        }
    }

    /// Apply the config's data directory override
    pub fn with_config(mut self, config: &ShellConfig) -> Self {
        if let Some(dir) = &config.data_dir {
            self.data_dir = dir.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.window_size(), WindowSize::new(1600, 900));
        assert_eq!(config.background_color, "#393c42");
        assert_eq!(config.cookie_flush, FlushPolicy::PerRemoval);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ShellConfig::load_from(dir.path()).unwrap(), ShellConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "window_width = 1280\ncookie_flush = \"on-completion\"\n",
        )
        .unwrap();
        let config = ShellConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.window_height, 900);
        assert_eq!(config.cookie_flush, FlushPolicy::OnCompletion);
    }

    #[test]
    fn test_data_dir_override() {
        let config = ShellConfig {
            data_dir: Some(PathBuf::from("/tmp/jar")),
            ..ShellConfig::default()
        };
        let paths = ShellPaths::rooted_at(Path::new("/opt/repldesk")).with_config(&config);
        assert_eq!(paths.data_dir, PathBuf::from("/tmp/jar"));
        assert_eq!(paths.config_dir, PathBuf::from("/opt/repldesk/config"));
    }
}
