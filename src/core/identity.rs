//! Browsing identity (user-agent) shared by every window
//!
//! The identity is process-wide state: one value, read by anyone, updated
//! only through [`IdentityBroadcast::update`], observed through
//! [`IdentityBroadcast::subscribe`].

use tokio::sync::watch;

/// Generic desktop identity used for spawned windows and login popups
pub const GENERIC_USER_AGENT: &str = "chrome";

/// Tablet identity the service requires to serve its alternate editor
pub const ALTERNATE_EDITOR_USER_AGENT: &str = "Mozilla/5.0 (iPad; CPU OS 11_0 like Mac OS X) \
     AppleWebKit/604.1.34 (KHTML, like Gecko) Version/11.0 Mobile/15A5341f Safari/604.1";

/// Process-wide browsing identity.
///
/// `None` means no identity was ever forced and windows keep whatever the
/// host assigned them at creation.
pub struct IdentityBroadcast {
    tx: watch::Sender<Option<String>>,
}

impl IdentityBroadcast {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// The identity currently in force
    pub fn current(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    /// Replace the identity, returning true if it changed
    pub fn update(&self, user_agent: impl Into<String>) -> bool {
        let user_agent = user_agent.into();
        self.tx.send_if_modified(|current| {
            if current.as_deref() == Some(user_agent.as_str()) {
                false
            } else {
                *current = Some(user_agent);
                true
            }
        })
    }

    /// Observe identity changes
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

impl Default for IdentityBroadcast {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unset() {
        let identity = IdentityBroadcast::new();
        assert_eq!(identity.current(), None);
    }

    #[test]
    fn test_update_reports_change() {
        let identity = IdentityBroadcast::new();
        assert!(identity.update(ALTERNATE_EDITOR_USER_AGENT));
        assert!(!identity.update(ALTERNATE_EDITOR_USER_AGENT));
        assert_eq!(identity.current().as_deref(), Some(ALTERNATE_EDITOR_USER_AGENT));
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let identity = IdentityBroadcast::new();
        let mut rx = identity.subscribe();
        identity.update("agent-a");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_deref(), Some("agent-a"));
    }
}
