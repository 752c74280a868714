//! Cookie model - a single entry of the session cookie jar

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A cookie as reported by the session cookie store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie domain, possibly with a leading dot (e.g. ".repl.it")
    pub domain: String,

    /// Cookie path (e.g. "/")
    #[serde(default = "default_path")]
    pub path: String,

    pub name: String,

    /// Opaque value, never inspected
    pub value: String,

    #[serde(default)]
    pub secure: bool,

    #[serde(default)]
    pub http_only: bool,

    /// Expiry, `None` for session cookies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

fn default_path() -> String {
    "/".to_string()
}

impl Cookie {
    /// Create a session cookie with path "/"
    pub fn new(domain: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            path: default_path(),
            name: name.into(),
            value: value.into(),
            secure: false,
            http_only: false,
            expires: None,
        }
    }

    /// Builder pattern: set path
    #[cfg(test)]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// The URL the cookie store expects when removing this cookie.
    ///
    /// A domain cookie (leading dot) is addressed through its `www` host,
    /// so ".repl.it" with path "/" becomes "https://www.repl.it/".
    pub fn removal_url(&self) -> String {
        let prefix = if self.domain.starts_with('.') { "www" } else { "" };
        format!("https://{}{}{}", prefix, self.domain, self.path)
    }

    /// Whether this cookie belongs to the hosted service.
    ///
    /// Substring match on purpose: subdomains and dotted domain cookies of
    /// the service both count.
    pub fn is_service_cookie(&self, root_domain: &str) -> bool {
        self.domain.contains(root_domain)
    }

    /// Whether the cookie would be sent to `url` (domain-match plus path-match)
    pub fn matches_url(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        let domain = self.domain.trim_start_matches('.').to_ascii_lowercase();

        let domain_matches = host == domain || host.ends_with(&format!(".{}", domain));
        if !domain_matches {
            return false;
        }

        let path = url.path();
        path == self.path
            || (path.starts_with(&self.path)
                && (self.path.ends_with('/') || path[self.path.len()..].starts_with('/')))
    }

    /// Check if the cookie has expired
    pub fn is_expired(&self) -> bool {
        self.expires.is_some_and(|expires| expires <= Utc::now())
    }
}

/// Which cookies a clear pass selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    /// Every cookie in the jar
    All,
    /// Third-party cookies only; the service's own session survives
    NonService,
}

/// Cookies split into the ones a clear pass removes and the ones it keeps
#[derive(Debug, Clone, Default)]
pub struct CookiePartition {
    pub remove: Vec<Cookie>,
    pub keep: Vec<Cookie>,
}

impl CookiePartition {
    /// Partition a snapshot of the jar, preserving enumeration order
    pub fn split(cookies: Vec<Cookie>, scope: ClearScope, root_domain: &str) -> Self {
        let (remove, keep) = cookies.into_iter().partition(|cookie| match scope {
            ClearScope::All => true,
            ClearScope::NonService => !cookie.is_service_cookie(root_domain),
        });
        Self { remove, keep }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_url_dotted_domain() {
        let cookie = Cookie::new(".repl.it", "connect.sid", "abc");
        assert_eq!(cookie.removal_url(), "https://www.repl.it/");
    }

    #[test]
    fn test_removal_url_host_only() {
        let cookie = Cookie::new("accounts.google.com", "SID", "x").with_path("/signin");
        assert_eq!(cookie.removal_url(), "https://accounts.google.com/signin");
    }

    #[test]
    fn test_service_cookie_detection() {
        assert!(Cookie::new(".repl.it", "a", "1").is_service_cookie("repl.it"));
        assert!(Cookie::new("staging.repl.it", "a", "1").is_service_cookie("repl.it"));
        assert!(!Cookie::new("github.com", "a", "1").is_service_cookie("repl.it"));
    }

    #[test]
    fn test_matches_url() {
        let cookie = Cookie::new(".repl.it", "sid", "1");
        assert!(cookie.matches_url(&Url::parse("https://www.repl.it/").unwrap()));
        assert!(cookie.matches_url(&Url::parse("https://repl.it/~").unwrap()));
        assert!(!cookie.matches_url(&Url::parse("https://notrepl.it/").unwrap()));

        let scoped = Cookie::new("github.com", "sid", "1").with_path("/login");
        assert!(scoped.matches_url(&Url::parse("https://github.com/login").unwrap()));
        assert!(scoped.matches_url(&Url::parse("https://github.com/login/oauth").unwrap()));
        assert!(!scoped.matches_url(&Url::parse("https://github.com/loginx").unwrap()));
        assert!(!scoped.matches_url(&Url::parse("https://github.com/").unwrap()));
    }

    #[test]
    fn test_expiry() {
        let session = Cookie::new(".repl.it", "sid", "1");
        assert!(!session.is_expired());

        let stale = Cookie {
            expires: Some(Utc::now() - chrono::Duration::hours(1)),
            ..session.clone()
        };
        assert!(stale.is_expired());

        let fresh = Cookie {
            expires: Some(Utc::now() + chrono::Duration::days(30)),
            ..session
        };
        assert!(!fresh.is_expired());
    }

    #[test]
    fn test_partition_non_service_keeps_order() {
        let cookies = vec![
            Cookie::new("google.com", "a", "1"),
            Cookie::new(".repl.it", "b", "2"),
            Cookie::new("github.com", "c", "3"),
        ];
        let partition = CookiePartition::split(cookies, ClearScope::NonService, "repl.it");
        let removed: Vec<_> = partition.remove.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(removed, vec!["a", "c"]);
        assert_eq!(partition.keep.len(), 1);
    }

    #[test]
    fn test_partition_all() {
        let cookies = vec![Cookie::new(".repl.it", "b", "2"), Cookie::new("x.com", "c", "3")];
        let partition = CookiePartition::split(cookies, ClearScope::All, "repl.it");
        assert_eq!(partition.remove.len(), 2);
        assert!(partition.keep.is_empty());
    }
}
