//! Command-line interface
//!
//! Every command drives the same orchestrator the desktop host uses, backed
//! by the headless host and the on-disk settings and cookie stores.

pub mod cookies;
pub mod edit_mode;
pub mod route;
pub mod settings;
pub mod status;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::browser::{CookieJar, FileCookieJar};
use crate::config::{ShellConfig, ShellPaths};
use crate::context_menu::StandardContextMenu;
use crate::dialog::ConfirmPrompt;
use crate::external::ExternalOpener;
use crate::host::HeadlessHost;
use crate::settings::{FileSettings, SettingsStore};
use crate::shell::{Orchestrator, Services};
use crate::theme::SettingsTheme;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
    /// Config or settings file could not be read or parsed
    pub const CONFIG_ERROR: i32 = 2;
    /// Another cookie clear was already running
    pub const BUSY: i32 = 3;
}

#[derive(Parser, Debug)]
#[command(name = "repldesk")]
#[command(about = "Desktop shell for the repl.it web app")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs and command output as JSON
    #[arg(long = "json", global = true)]
    pub json_output: bool,

    /// Keep config and data under this directory instead of the platform defaults
    #[arg(long, global = true, env = "REPLDESK_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show edit mode, theme and cookie jar summary (default)
    Status,

    /// Inspect or clear the session cookie jar
    Cookies(cookies::CookiesArgs),

    /// Switch between the default and the alternate code editor
    EditMode(edit_mode::EditModeArgs),

    /// Show how the shell routes a URL
    Route(route::RouteArgs),

    /// Read or change persisted settings
    Settings(settings::SettingsArgs),
}

/// Resolved locations and configuration for one invocation
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: ShellPaths,
    pub config: ShellConfig,
    pub json: bool,
}

impl Context {
    pub fn load(home: Option<PathBuf>, json: bool) -> anyhow::Result<Self> {
        let base = match home {
            Some(root) => ShellPaths::rooted_at(&root),
            None => ShellPaths::discover()?,
        };
        let config = ShellConfig::load_from(&base.config_dir)
            .with_context(|| format!("loading config from {}", base.config_dir.display()))?;
        let paths = base.with_config(&config);

        tracing::debug!(
            config = %paths.config_dir.display(),
            data = %paths.data_dir.display(),
            "Resolved shell paths"
        );

        Ok(Self { paths, config, json })
    }

    pub fn settings(&self) -> anyhow::Result<FileSettings> {
        FileSettings::load_from(&self.paths.config_dir)
            .with_context(|| format!("loading settings from {}", self.paths.config_dir.display()))
    }

    pub fn cookie_jar(&self) -> anyhow::Result<Arc<FileCookieJar>> {
        let jar = FileCookieJar::open(&self.paths.data_dir)
            .with_context(|| format!("opening cookie jar in {}", self.paths.data_dir.display()))?;
        Ok(Arc::new(jar))
    }

    /// Start an orchestrator on the headless host, writing through to the settings file
    pub fn shell(
        &self,
        cookies: Arc<dyn CookieJar>,
        prompt: Box<dyn ConfirmPrompt>,
        opener: Box<dyn ExternalOpener>,
    ) -> anyhow::Result<Orchestrator<HeadlessHost>> {
        let settings = self.settings()?;
        self.shell_with_settings(Box::new(settings), cookies, prompt, opener)
    }

    /// Start an orchestrator on the headless host over the given settings store
    pub fn shell_with_settings(
        &self,
        settings: Box<dyn SettingsStore>,
        cookies: Arc<dyn CookieJar>,
        prompt: Box<dyn ConfirmPrompt>,
        opener: Box<dyn ExternalOpener>,
    ) -> anyhow::Result<Orchestrator<HeadlessHost>> {
        let theme = SettingsTheme::from_settings(settings.as_ref());
        let context_menu = if self.config.inspector {
            StandardContextMenu::new()
        } else {
            StandardContextMenu::without_inspector()
        };

        let services = Services {
            settings,
            theme: Box::new(theme),
            cookies,
            context_menu: Box::new(context_menu),
            prompt,
            opener,
        };

        Ok(Orchestrator::new(HeadlessHost::new(), self.config.clone(), services)?)
    }

    /// Print a serializable value as JSON, or the plain rendering otherwise
    pub fn emit<T: serde::Serialize>(&self, value: &T, plain: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", plain());
        }
        Ok(())
    }
}
