//! Per-window context menu decorator

use crate::core::{HostError, WindowId};
use crate::host::WindowHost;

/// An entry of the content context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuItem {
    Cut,
    Copy,
    Paste,
    SelectAll,
    CopyLink,
    Inspect,
}

impl ContextMenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            ContextMenuItem::Cut => "Cut",
            ContextMenuItem::Copy => "Copy",
            ContextMenuItem::Paste => "Paste",
            ContextMenuItem::SelectAll => "Select All",
            ContextMenuItem::CopyLink => "Copy Link",
            ContextMenuItem::Inspect => "Inspect Element",
        }
    }
}

/// Attaches a context menu scoped to one window
pub trait ContextMenuDecorator: Send + Sync {
    fn decorate(&self, host: &mut dyn WindowHost, window: WindowId) -> Result<(), HostError>;
}

/// Edit actions plus link copying and the inspector
pub struct StandardContextMenu {
    items: Vec<ContextMenuItem>,
}

impl StandardContextMenu {
    pub fn new() -> Self {
        Self {
            items: vec![
                ContextMenuItem::Cut,
                ContextMenuItem::Copy,
                ContextMenuItem::Paste,
                ContextMenuItem::SelectAll,
                ContextMenuItem::CopyLink,
                ContextMenuItem::Inspect,
            ],
        }
    }

    /// Menu without the inspector entry
    pub fn without_inspector() -> Self {
        let mut menu = Self::new();
        menu.items.retain(|item| *item != ContextMenuItem::Inspect);
        menu
    }

}

impl Default for StandardContextMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextMenuDecorator for StandardContextMenu {
    fn decorate(&self, host: &mut dyn WindowHost, window: WindowId) -> Result<(), HostError> {
        host.attach_context_menu(window, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WindowSize;
    use crate::host::{HeadlessHost, WindowSpec};

    fn decorated(menu: &StandardContextMenu) -> Vec<ContextMenuItem> {
        let mut host = HeadlessHost::new();
        let id = host.create_window(&WindowSpec::new(WindowSize::default())).unwrap();
        menu.decorate(&mut host, id).unwrap();
        host.window(id).unwrap().context_menu.clone()
    }

    #[test]
    fn test_standard_menu_has_inspector() {
        let items = decorated(&StandardContextMenu::new());
        assert_eq!(items.last(), Some(&ContextMenuItem::Inspect));
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn test_without_inspector() {
        let items = decorated(&StandardContextMenu::without_inspector());
        assert!(!items.contains(&ContextMenuItem::Inspect));
        assert!(items.contains(&ContextMenuItem::Paste));
    }
}
