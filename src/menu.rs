//! Menu action surface
//!
//! The application menu itself is built by the host; it only needs to know
//! which actions exist and how to run them.

use crate::core::ShellError;
use crate::host::WindowHost;
use crate::shell::{ClearOutcome, Orchestrator};

/// An operator action reachable from the application menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Checkbox item: on selects the alternate editor
    ToggleEditMode(bool),
    /// Wipe the whole cookie jar (asks first)
    ClearCookies,
    /// Drop third-party login cookies only
    ClearLoginCookies,
    ReloadAll,
    SetTheme(String),
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::ToggleEditMode(_) => "Use Ace Editor",
            MenuAction::ClearCookies => "Clear Cookies",
            MenuAction::ClearLoginCookies => "Clear Login Cookies",
            MenuAction::ReloadAll => "Reload All Windows",
            MenuAction::SetTheme(_) => "Theme",
        }
    }
}

/// What running an action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Done,
    Cleared(ClearOutcome),
    Reloaded(usize),
}

/// Run a menu action against the orchestrator
pub async fn dispatch<H: WindowHost>(
    shell: &mut Orchestrator<H>,
    action: MenuAction,
) -> Result<MenuOutcome, ShellError> {
    tracing::debug!("Menu action: {} ({:?})", action.label(), action);
    match action {
        MenuAction::ToggleEditMode(checked) => {
            shell.toggle_edit_mode(Some(checked))?;
            Ok(MenuOutcome::Done)
        }
        MenuAction::ClearCookies => Ok(MenuOutcome::Cleared(shell.clear_cookies(false).await?)),
        MenuAction::ClearLoginCookies => Ok(MenuOutcome::Cleared(shell.clear_cookies(true).await?)),
        MenuAction::ReloadAll => Ok(MenuOutcome::Reloaded(shell.reload_all())),
        MenuAction::SetTheme(name) => {
            shell.set_theme(&name)?;
            Ok(MenuOutcome::Done)
        }
    }
}
