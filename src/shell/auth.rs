//! OAuth login interception
//!
//! Each login round-trip is an [`AuthSession`] keyed by its popup window.
//! Completing or abandoning a session removes it, so a session can resume
//! the primary window at most once and repeated logins never share state.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::core::WindowId;

/// Google login completion endpoint of the hosted service
pub const GOOGLE_COMPLETION_URL: &str = "https://repl.it/auth/google/get?close=1";

/// GitHub login completion endpoint of the hosted service
pub const GITHUB_COMPLETION_URL: &str = "https://repl.it/auth/github/get?close=1";

/// Third-party identity provider of a login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthProvider {
    Google,
    GitHub,
}

impl AuthProvider {
    /// Match a new-window target exactly against the completion endpoints
    pub fn from_completion_url(url: &str) -> Option<Self> {
        match url {
            GOOGLE_COMPLETION_URL => Some(AuthProvider::Google),
            GITHUB_COMPLETION_URL => Some(AuthProvider::GitHub),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AuthProvider::Google => "Google",
            AuthProvider::GitHub => "GitHub",
        }
    }
}

/// One in-flight login
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: Uuid,
    pub provider: AuthProvider,
    pub started_at: DateTime<Utc>,
}

/// In-flight logins keyed by popup window
#[derive(Debug, Default)]
pub struct AuthSessions {
    sessions: HashMap<WindowId, AuthSession>,
}

impl AuthSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm completion for a popup
    pub fn begin(&mut self, provider: AuthProvider, popup: WindowId) -> Uuid {
        let session = AuthSession {
            id: Uuid::new_v4(),
            provider,
            started_at: Utc::now(),
        };
        let id = session.id;
        if let Some(previous) = self.sessions.insert(popup, session) {
            tracing::warn!(session = %previous.id, "Replaced login session on reused popup {}", popup);
        }
        id
    }

    /// Consume the session of `popup`; `None` if it has none or already completed
    pub fn complete(&mut self, popup: WindowId) -> Option<AuthSession> {
        self.sessions.remove(&popup)
    }

    /// Drop the session of a popup that went away without completing
    pub fn abandon(&mut self, popup: WindowId) -> Option<AuthSession> {
        self.sessions.remove(&popup)
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_url_exact_match() {
        assert_eq!(AuthProvider::from_completion_url(GOOGLE_COMPLETION_URL), Some(AuthProvider::Google));
        assert_eq!(AuthProvider::from_completion_url(GITHUB_COMPLETION_URL), Some(AuthProvider::GitHub));
        assert_eq!(AuthProvider::from_completion_url("https://repl.it/auth/google/get"), None);
        assert_eq!(AuthProvider::from_completion_url("https://repl.it/auth/github/get?close=1&x=2"), None);
    }

    #[test]
    fn test_session_completes_once() {
        let mut sessions = AuthSessions::new();
        sessions.begin(AuthProvider::GitHub, WindowId(7));
        assert_eq!(sessions.pending(), 1);
        assert!(sessions.complete(WindowId(7)).is_some());
        assert!(sessions.complete(WindowId(7)).is_none());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut sessions = AuthSessions::new();
        let a = sessions.begin(AuthProvider::Google, WindowId(2));
        let b = sessions.begin(AuthProvider::GitHub, WindowId(3));
        assert_ne!(a, b);
        assert_eq!(sessions.complete(WindowId(3)).map(|s| s.provider), Some(AuthProvider::GitHub));
        assert_eq!(sessions.pending(), 1);
        assert_eq!(sessions.abandon(WindowId(2)).map(|s| s.provider), Some(AuthProvider::Google));
    }
}
