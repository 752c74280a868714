//! Registry of live windows

use std::collections::HashMap;

use crate::core::{WindowId, WindowRole};

/// Insertion-ordered arena of live windows keyed by id
#[derive(Debug, Default)]
pub struct WindowRegistry {
    order: Vec<WindowId>,
    roles: HashMap<WindowId, WindowRole>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a window. Returns false if it was already registered.
    pub fn insert(&mut self, id: WindowId, role: WindowRole) -> bool {
        if self.roles.contains_key(&id) {
            return false;
        }
        self.order.push(id);
        self.roles.insert(id, role);
        true
    }

    /// Forget a window, returning the role it had
    pub fn remove(&mut self, id: WindowId) -> Option<WindowRole> {
        let removed = self.roles.remove(&id)?;
        self.order.retain(|w| *w != id);
        Some(removed)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.roles.contains_key(&id)
    }

    pub fn role(&self, id: WindowId) -> Option<WindowRole> {
        self.roles.get(&id).copied()
    }

    /// Ids in registration order
    pub fn ids(&self) -> Vec<WindowId> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let mut registry = WindowRegistry::new();
        registry.insert(WindowId(3), WindowRole::Primary);
        registry.insert(WindowId(1), WindowRole::Spawned);
        registry.insert(WindowId(2), WindowRole::AuthPopup);
        assert_eq!(registry.ids(), vec![WindowId(3), WindowId(1), WindowId(2)]);
        assert_eq!(registry.role(WindowId(2)), Some(WindowRole::AuthPopup));
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut registry = WindowRegistry::new();
        assert!(registry.insert(WindowId(1), WindowRole::Primary));
        assert!(!registry.insert(WindowId(1), WindowRole::Spawned));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.role(WindowId(1)), Some(WindowRole::Primary));
    }

    #[test]
    fn test_remove_keeps_order_of_rest() {
        let mut registry = WindowRegistry::new();
        for i in 1..=4 {
            registry.insert(WindowId(i), WindowRole::Spawned);
        }
        assert_eq!(registry.remove(WindowId(2)), Some(WindowRole::Spawned));
        assert!(registry.remove(WindowId(2)).is_none());
        assert_eq!(registry.ids(), vec![WindowId(1), WindowId(3), WindowId(4)]);
        assert!(!registry.contains(WindowId(2)));
    }
}
