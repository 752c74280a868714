//! Window/session orchestrator
//!
//! Owns every live window the shell created, routes navigation and
//! new-window requests, runs the OAuth popup flow, drives cookie clearing,
//! and keeps the browsing identity consistent across windows.
//!
//! The hosting runtime forwards each content event to
//! [`Orchestrator::handle_event`] and applies the returned [`Reaction`].

pub mod auth;
pub mod cookie_clear;
pub mod registry;


use std::sync::Arc;

use crate::browser::CookieJar;
use crate::config::ShellConfig;
use crate::context_menu::ContextMenuDecorator;
use crate::core::{
    ClearScope, IdentityBroadcast, ShellError, WindowId, WindowRole, ALTERNATE_EDITOR_USER_AGENT,
    GENERIC_USER_AGENT, SERVICE_HOME_URL, SERVICE_ROOT_DOMAIN,
};
use crate::dialog::ConfirmPrompt;
use crate::external::{self, ExternalOpener, LinkTarget};
use crate::host::{Reaction, WindowEvent, WindowHost, WindowSpec};
use crate::preload::{Preload, AUTH_DONE_MESSAGE};
use crate::settings::{SettingsStore, ENABLE_ACE, THEME};
use crate::theme::ThemePropagator;

use auth::{AuthProvider, AuthSessions};
pub use cookie_clear::{ClearReport, CookieClearer};
use registry::WindowRegistry;

/// Question asked before wiping the whole jar
pub const CLEAR_ALL_PROMPT: &str = "Are you sure you want to clear all cookies?";

/// Collaborators the orchestrator drives
pub struct Services {
    pub settings: Box<dyn SettingsStore>,
    pub theme: Box<dyn ThemePropagator>,
    pub cookies: Arc<dyn CookieJar>,
    pub context_menu: Box<dyn ContextMenuDecorator>,
    pub prompt: Box<dyn ConfirmPrompt>,
    pub opener: Box<dyn ExternalOpener>,
}

/// Result of a clear request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The operator declined; nothing was touched
    Declined,
    Cleared(ClearReport),
}

pub struct Orchestrator<H: WindowHost> {
    host: H,
    config: ShellConfig,
    settings: Box<dyn SettingsStore>,
    theme: Box<dyn ThemePropagator>,
    context_menu: Box<dyn ContextMenuDecorator>,
    prompt: Box<dyn ConfirmPrompt>,
    opener: Box<dyn ExternalOpener>,
    clearer: Arc<CookieClearer>,
    registry: WindowRegistry,
    auth: AuthSessions,
    identity: IdentityBroadcast,
    primary: WindowId,
}

impl<H: WindowHost> Orchestrator<H> {
    /// Create the primary window and start tracking it.
    ///
    /// Fails only if the host cannot create or load the primary window.
    pub fn new(mut host: H, config: ShellConfig, services: Services) -> Result<Self, ShellError> {
        let spec = WindowSpec::new(config.window_size()).with_preload(Preload::EditorClipboardFix);
        let primary = host.create_window(&spec)?;
        host.set_background_color(primary, &config.background_color)?;

        let clearer = Arc::new(CookieClearer::new(
            services.cookies,
            config.cookie_flush,
            SERVICE_ROOT_DOMAIN,
        ));

        let mut shell = Self {
            host,
            config,
            settings: services.settings,
            theme: services.theme,
            context_menu: services.context_menu,
            prompt: services.prompt,
            opener: services.opener,
            clearer,
            registry: WindowRegistry::new(),
            auth: AuthSessions::new(),
            identity: IdentityBroadcast::new(),
            primary,
        };

        if !shell.settings.has(ENABLE_ACE) {
            if let Err(e) = shell.settings.set(ENABLE_ACE, false.into()) {
                tracing::warn!("Could not initialize {}: {}", ENABLE_ACE, e);
            }
        }
        if shell.settings.get_bool(ENABLE_ACE) {
            shell.identity.update(ALTERNATE_EDITOR_USER_AGENT);
        }

        shell.register_window(primary, WindowRole::Primary);
        shell.host.load_url(primary, SERVICE_HOME_URL, None)?;

        tracing::info!("Shell started with primary {}", primary);
        Ok(shell)
    }

    pub fn primary(&self) -> WindowId {
        self.primary
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    #[cfg(test)]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn windows(&self) -> &WindowRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }

    pub fn identity(&self) -> &IdentityBroadcast {
        &self.identity
    }

    #[cfg(test)]
    pub fn pending_logins(&self) -> usize {
        self.auth.pending()
    }

    pub fn edit_mode_enabled(&self) -> bool {
        self.settings.get_bool(ENABLE_ACE)
    }

    /// Instrument a window. Every window goes through here, primary included.
    fn register_window(&mut self, window: WindowId, role: WindowRole) {
        if let Err(e) = self.context_menu.decorate(&mut self.host, window) {
            tracing::warn!("Context menu unavailable for {}: {}", window, e);
        }

        if !self.registry.insert(window, role) {
            tracing::debug!("{} already registered", window);
            return;
        }

        if let Some(user_agent) = self.identity.current() {
            if let Err(e) = self.host.set_user_agent(window, &user_agent) {
                tracing::warn!("Could not apply identity to {}: {}", window, e);
            }
        }

        self.attach_theme(window);
        tracing::debug!(role = role.label(), "Registered {} ({} open)", window, self.registry.len());
    }

    fn attach_theme(&mut self, window: WindowId) {
        if let Err(e) = self.theme.attach(&mut self.host, window) {
            tracing::warn!("Theme attach failed for {}: {}", window, e);
        }
    }

    /// React to a content event of `window`
    pub async fn handle_event(&mut self, window: WindowId, event: WindowEvent) -> Result<Reaction, ShellError> {
        if !self.registry.contains(window) {
            return Err(ShellError::UnknownWindow(window));
        }

        match event {
            WindowEvent::WillNavigate { url } => Ok(self.on_will_navigate(window, &url)),
            WindowEvent::NewWindowRequested { url } if window == self.primary => self.on_new_window(&url).await,
            WindowEvent::NewWindowRequested { url } => {
                tracing::debug!("{} opens {} itself", window, url);
                Ok(Reaction::Proceed)
            }
            WindowEvent::DidFinishLoad => {
                self.attach_theme(window);
                Ok(Reaction::Proceed)
            }
            WindowEvent::IpcMessage { body } => {
                if body == AUTH_DONE_MESSAGE {
                    self.on_auth_done(window)?;
                } else {
                    tracing::debug!("Ignoring IPC message from {}: {}", window, body);
                }
                Ok(Reaction::Proceed)
            }
            WindowEvent::Closed => Ok(self.on_closed(window)),
        }
    }

    fn on_will_navigate(&mut self, window: WindowId, url: &str) -> Reaction {
        // Login popups walk through provider pages that must stay in-app.
        let reaction = if self.registry.role(window) == Some(WindowRole::AuthPopup) {
            Reaction::Proceed
        } else {
            match external::classify(url, SERVICE_ROOT_DOMAIN) {
                LinkTarget::External(target) => {
                    tracing::info!("Opening {} in the system browser", target);
                    if let Err(e) = self.opener.open(&target) {
                        tracing::warn!("Could not open {}: {}", target, e);
                    }
                    Reaction::Cancel
                }
                LinkTarget::InApp | LinkTarget::Passthrough => Reaction::Proceed,
            }
        };

        if self.edit_mode_enabled() {
            self.reassert_identity(window);
        }

        reaction
    }

    /// Put the alternate-editor identity back on one window
    fn reassert_identity(&mut self, window: WindowId) {
        self.identity.update(ALTERNATE_EDITOR_USER_AGENT);
        match self.host.user_agent(window) {
            Ok(current) if current == ALTERNATE_EDITOR_USER_AGENT => {}
            _ => {
                if let Err(e) = self.host.set_user_agent(window, ALTERNATE_EDITOR_USER_AGENT) {
                    tracing::warn!("Could not reassert identity on {}: {}", window, e);
                }
            }
        }
    }

    async fn on_new_window(&mut self, url: &str) -> Result<Reaction, ShellError> {
        match AuthProvider::from_completion_url(url) {
            Some(provider) => self.begin_oauth(provider, url).await,
            None => self.open_spawned(url),
        }
    }

    fn open_spawned(&mut self, url: &str) -> Result<Reaction, ShellError> {
        let spec = WindowSpec::new(self.config.window_size()).with_preload(Preload::EditorClipboardFix);
        let window = self.host.create_window(&spec)?;
        self.register_window(window, WindowRole::Spawned);
        self.load_registered(window, url, Some(GENERIC_USER_AGENT))?;

        tracing::info!("Opened {} in {}", url, window);
        Ok(Reaction::Redirect(window))
    }

    /// Isolate the login from stale third-party sessions, then open the popup.
    ///
    /// The session waits for `authDone` without a deadline; a popup that never
    /// reports back simply stays open until the user closes it.
    async fn begin_oauth(&mut self, provider: AuthProvider, url: &str) -> Result<Reaction, ShellError> {
        match self.clearer.clear(ClearScope::NonService).await {
            Ok(report) if !report.is_complete() => {
                tracing::warn!("Login cookie isolation incomplete: {} cookies left behind", report.failed);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Login cookie isolation skipped: {}", e),
        }

        let spec = WindowSpec::new(self.config.window_size()).with_preload(Preload::LoginAssist);
        let popup = self.host.create_window(&spec)?;
        self.register_window(popup, WindowRole::AuthPopup);
        self.load_registered(popup, url, Some(GENERIC_USER_AGENT))?;

        let session = self.auth.begin(provider, popup);
        tracing::info!(%session, "{} login started in {}", provider.display_name(), popup);
        Ok(Reaction::Redirect(popup))
    }

    /// Load into a freshly registered window, dropping it again if the load fails
    fn load_registered(&mut self, window: WindowId, url: &str, user_agent: Option<&str>) -> Result<(), ShellError> {
        if let Err(e) = self.host.load_url(window, url, user_agent) {
            self.registry.remove(window);
            tracing::warn!("Dropped {} after failed load: {}", window, e);
            return Err(e.into());
        }
        Ok(())
    }

    fn on_auth_done(&mut self, window: WindowId) -> Result<(), ShellError> {
        let Some(session) = self.auth.complete(window) else {
            tracing::debug!("authDone from {} with no pending login", window);
            return Ok(());
        };

        let elapsed = chrono::Utc::now() - session.started_at;
        tracing::info!(
            session = %session.id,
            "{} login finished after {}s",
            session.provider.display_name(),
            elapsed.num_seconds()
        );
        self.host.load_url(self.primary, SERVICE_HOME_URL, None)?;
        Ok(())
    }

    fn on_closed(&mut self, window: WindowId) -> Reaction {
        self.registry.remove(window);
        if let Some(session) = self.auth.abandon(window) {
            tracing::warn!(session = %session.id, "Login popup closed before the login finished");
        }

        if window == self.primary {
            tracing::info!("Primary window closed");
            Reaction::Exit
        } else {
            tracing::debug!("{} closed ({} open)", window, self.registry.len());
            Reaction::Proceed
        }
    }

    /// Switch every window between the default and alternate-editor identity.
    ///
    /// `Some(state)` persists the flag; `None` reapplies the alternate
    /// identity without touching it.
    pub fn toggle_edit_mode(&mut self, explicit: Option<bool>) -> Result<(), ShellError> {
        let user_agent = match explicit {
            Some(true) => {
                self.settings.set(ENABLE_ACE, true.into())?;
                ALTERNATE_EDITOR_USER_AGENT.to_string()
            }
            Some(false) => {
                self.settings.set(ENABLE_ACE, false.into())?;
                self.host.default_user_agent()
            }
            None => ALTERNATE_EDITOR_USER_AGENT.to_string(),
        };

        self.identity.update(user_agent.clone());

        for window in self.registry.ids() {
            if let Err(e) = self.host.set_user_agent(window, &user_agent) {
                tracing::warn!("Could not set identity on {}: {}", window, e);
                continue;
            }
            if let Err(e) = self.host.reload(window) {
                tracing::warn!("Could not reload {}: {}", window, e);
            }
        }

        tracing::info!(enabled = ?explicit, "Edit mode identity applied to {} windows", self.registry.len());
        Ok(())
    }

    /// Run the cookie clearing protocol.
    ///
    /// A full clear asks the operator first and reloads every window after.
    pub async fn clear_cookies(&mut self, oauth_only: bool) -> Result<ClearOutcome, ShellError> {
        if !oauth_only && !self.prompt.confirm(CLEAR_ALL_PROMPT, "Confirm") {
            tracing::info!("Cookie clear declined");
            return Ok(ClearOutcome::Declined);
        }

        let scope = if oauth_only { ClearScope::NonService } else { ClearScope::All };
        let report = self.clearer.clear(scope).await?;
        tracing::info!("{:?} clear removed {} cookies", report.scope, report.removed);

        if !oauth_only {
            self.reload_all();
        }

        Ok(ClearOutcome::Cleared(report))
    }

    /// Reload every registered window, returning how many reloaded
    pub fn reload_all(&mut self) -> usize {
        let mut reloaded = 0;
        for window in self.registry.ids() {
            match self.host.reload(window) {
                Ok(()) => reloaded += 1,
                Err(e) => tracing::warn!("Could not reload {}: {}", window, e),
            }
        }
        reloaded
    }

    /// Persist a theme choice and re-skin every window
    pub fn set_theme(&mut self, name: &str) -> Result<(), ShellError> {
        self.settings.set(THEME, name.into())?;
        self.theme.reconfigure(self.settings.as_ref());
        for window in self.registry.ids() {
            self.attach_theme(window);
        }
        Ok(())
    }
}
