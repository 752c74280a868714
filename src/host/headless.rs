//! In-memory window host
//!
//! Models windows without a display: every primitive records what it was
//! asked to do. Backs the CLI and the orchestrator tests.

use std::collections::{BTreeMap, HashMap};
use url::Url;

use super::{WindowHost, WindowSpec};
use crate::context_menu::ContextMenuItem;
use crate::core::{HostError, WindowId};

/// Identity a headless window presents before anything overrides it
pub const HEADLESS_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) repldesk Safari/537.36";

/// A load request as the window received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRecord {
    pub url: String,
    pub user_agent: Option<String>,
}

/// Recorded state of one headless window
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    pub spec: WindowSpec,
    /// Source of the preload script injected at creation
    pub preload_script: Option<&'static str>,
    pub user_agent: String,
    pub background: Option<String>,
    pub loads: Vec<LoadRecord>,
    pub reloads: usize,
    pub stylesheets: BTreeMap<String, String>,
    pub stylesheet_inserts: usize,
    pub context_menu: Vec<ContextMenuItem>,
}

impl HeadlessWindow {
    fn new(spec: WindowSpec) -> Self {
        Self {
            preload_script: spec.preload.map(|p| p.script()),
            spec,
            user_agent: HEADLESS_USER_AGENT.to_string(),
            background: None,
            loads: Vec::new(),
            reloads: 0,
            stylesheets: BTreeMap::new(),
            stylesheet_inserts: 0,
            context_menu: Vec::new(),
        }
    }

    /// URL of the most recent load, if any
    pub fn current_url(&self) -> Option<&str> {
        self.loads.last().map(|load| load.url.as_str())
    }

    /// One-line account of what the window was asked to do
    pub fn summary(&self) -> String {
        format!(
            "{} at {}x{}, {} load(s), {} reload(s), {} stylesheet(s) from {} insert(s), {} menu item(s), background {}, preload {} bytes",
            self.current_url().unwrap_or("about:blank"),
            self.spec.size.width,
            self.spec.size.height,
            self.loads.len(),
            self.reloads,
            self.stylesheets.len(),
            self.stylesheet_inserts,
            self.context_menu.len(),
            self.background.as_deref().unwrap_or("unset"),
            self.preload_script.map_or(0, str::len),
        )
    }
}

/// Window host that keeps everything in memory
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_id: u64,
    windows: HashMap<WindowId, HeadlessWindow>,
    fail_creates: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `create_window` fail
    #[cfg(test)]
    pub fn set_fail_creates(&mut self, fail: bool) {
        self.fail_creates = fail;
    }

    pub fn window(&self, id: WindowId) -> Option<&HeadlessWindow> {
        self.windows.get(&id)
    }

    #[cfg(test)]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Drop a window as if the user closed it
    #[cfg(test)]
    pub fn close(&mut self, id: WindowId) -> bool {
        self.windows.remove(&id).is_some()
    }

    fn get_mut(&mut self, id: WindowId) -> Result<&mut HeadlessWindow, HostError> {
        self.windows.get_mut(&id).ok_or(HostError::NoSuchWindow(id))
    }
}

impl WindowHost for HeadlessHost {
    fn create_window(&mut self, spec: &WindowSpec) -> Result<WindowId, HostError> {
        if self.fail_creates {
            return Err(HostError::CreateFailed("window creation disabled".to_string()));
        }
        self.next_id += 1;
        let id = WindowId(self.next_id);
        self.windows.insert(id, HeadlessWindow::new(spec.clone()));
        tracing::trace!(
            preload = spec.preload.map_or("none", |p| p.name()),
            "Headless host created {} ({}x{})",
            id,
            spec.size.width,
            spec.size.height
        );
        Ok(id)
    }

    fn load_url(&mut self, window: WindowId, url: &str, user_agent: Option<&str>) -> Result<(), HostError> {
        if let Err(e) = Url::parse(url) {
            return Err(HostError::LoadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            });
        }
        let win = self.get_mut(window)?;
        win.loads.push(LoadRecord {
            url: url.to_string(),
            user_agent: user_agent.map(str::to_string),
        });
        Ok(())
    }

    fn user_agent(&self, window: WindowId) -> Result<String, HostError> {
        self.windows
            .get(&window)
            .map(|w| w.user_agent.clone())
            .ok_or(HostError::NoSuchWindow(window))
    }

    fn set_user_agent(&mut self, window: WindowId, user_agent: &str) -> Result<(), HostError> {
        self.get_mut(window)?.user_agent = user_agent.to_string();
        Ok(())
    }

    fn default_user_agent(&self) -> String {
        HEADLESS_USER_AGENT.to_string()
    }

    fn reload(&mut self, window: WindowId) -> Result<(), HostError> {
        self.get_mut(window)?.reloads += 1;
        Ok(())
    }

    fn set_background_color(&mut self, window: WindowId, color: &str) -> Result<(), HostError> {
        self.get_mut(window)?.background = Some(color.to_string());
        Ok(())
    }

    fn insert_stylesheet(&mut self, window: WindowId, key: &str, css: &str) -> Result<(), HostError> {
        let win = self.get_mut(window)?;
        win.stylesheets.insert(key.to_string(), css.to_string());
        win.stylesheet_inserts += 1;
        Ok(())
    }

    fn attach_context_menu(&mut self, window: WindowId, items: &[ContextMenuItem]) -> Result<(), HostError> {
        self.get_mut(window)?.context_menu = items.to_vec();
        tracing::trace!(
            "Context menu of {}: {}",
            window,
            items.iter().map(|item| item.label()).collect::<Vec<_>>().join(", ")
        );
        Ok(())
    }
}
