//! Windowing host interface
//!
//! The shell never talks to a webview toolkit directly. The hosting runtime
//! implements [`WindowHost`] and forwards each content event to
//! [`crate::shell::Orchestrator::handle_event`], acting on the returned
//! [`Reaction`].

pub mod headless;

use crate::context_menu::ContextMenuItem;
use crate::core::{HostError, WindowId, WindowSize};
use crate::preload::Preload;

pub use headless::HeadlessHost;

/// Parameters for creating a native window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub size: WindowSize,
    /// Script injected before any page script runs
    pub preload: Option<Preload>,
}

impl WindowSpec {
    pub fn new(size: WindowSize) -> Self {
        Self { size, preload: None }
    }

    /// Builder pattern: set the preload script
    pub fn with_preload(mut self, preload: Preload) -> Self {
        self.preload = Some(preload);
        self
    }
}

/// Content event raised by a window.
///
/// IPC messages and closes only come from a webview runtime; the headless
/// host never raises them on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// The page is about to navigate the window itself
    WillNavigate { url: String },
    /// The page asked for a new window (target=_blank, window.open)
    NewWindowRequested { url: String },
    /// The page finished loading
    DidFinishLoad,
    /// Message posted by a preload script over the host IPC channel
    #[allow(dead_code)]
    IpcMessage { body: String },
    /// The window was closed by the user or the host
    #[allow(dead_code)]
    Closed,
}

/// What the host should do with the default action of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Let the default action happen
    Proceed,
    /// Prevent the default action
    Cancel,
    /// Prevent the default action and use this window as its destination
    Redirect(WindowId),
    /// The primary window is gone; the shell should exit
    Exit,
}

/// Native window primitives supplied by the hosting runtime
pub trait WindowHost: Send {
    /// Create a window and return its id
    fn create_window(&mut self, spec: &WindowSpec) -> Result<WindowId, HostError>;

    /// Load `url`, optionally with a one-off identity for this load
    fn load_url(&mut self, window: WindowId, url: &str, user_agent: Option<&str>) -> Result<(), HostError>;

    /// The identity the window currently presents
    fn user_agent(&self, window: WindowId) -> Result<String, HostError>;

    fn set_user_agent(&mut self, window: WindowId, user_agent: &str) -> Result<(), HostError>;

    /// The identity the host gives new windows
    fn default_user_agent(&self) -> String;

    fn reload(&mut self, window: WindowId) -> Result<(), HostError>;

    fn set_background_color(&mut self, window: WindowId, color: &str) -> Result<(), HostError>;

    /// Insert a stylesheet under `key`, replacing any sheet with the same key
    fn insert_stylesheet(&mut self, window: WindowId, key: &str, css: &str) -> Result<(), HostError>;

    fn attach_context_menu(&mut self, window: WindowId, items: &[ContextMenuItem]) -> Result<(), HostError>;
}
