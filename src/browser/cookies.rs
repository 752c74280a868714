//! Session cookie store gateway
//!
//! [`CookieJar`] is the narrow interface the shell needs from the host's
//! cookie store. [`FileCookieJar`] is a durable JSON-backed implementation
//! used by the CLI and the headless host.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use url::Url;

use crate::core::{Cookie, CookieError};

/// Session cookie store
#[async_trait]
pub trait CookieJar: Send + Sync {
    /// Snapshot every cookie, in store order
    async fn get_all(&self) -> Result<Vec<Cookie>, CookieError>;

    /// Remove the cookies named `name` that would be sent to `url`
    async fn remove(&self, url: &str, name: &str) -> Result<(), CookieError>;

    /// Persist pending changes to durable storage
    async fn flush(&self) -> Result<(), CookieError>;
}

fn remove_matching(cookies: &mut Vec<Cookie>, url: &str, name: &str) -> Result<(), CookieError> {
    let parsed = Url::parse(url).map_err(|e| CookieError::InvalidUrl(format!("{}: {}", url, e)))?;

    let before = cookies.len();
    cookies.retain(|c| !(c.name == name && c.matches_url(&parsed)));

    if cookies.len() == before {
        tracing::debug!("No cookie named {} matched {}", name, url);
    }
    Ok(())
}

fn lock_cookies(cookies: &Mutex<Vec<Cookie>>) -> MutexGuard<'_, Vec<Cookie>> {
    // A poisoned jar still holds consistent data: every mutation is a
    // single Vec operation.
    cookies.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Cookie jar persisted as a JSON array on disk.
///
/// Mutations stay in memory until [`CookieJar::flush`].
pub struct FileCookieJar {
    path: PathBuf,
    cookies: Mutex<Vec<Cookie>>,
}

impl FileCookieJar {
    const FILE_NAME: &'static str = "cookies.json";

    /// Open the jar stored in `dir`, starting empty if no file exists yet
    pub fn open(dir: &Path) -> Result<Self, CookieError> {
        let path = dir.join(Self::FILE_NAME);
        let cookies = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };

        tracing::debug!("Opened cookie jar at {} ({} cookies)", path.display(), cookies.len());

        Ok(Self {
            path,
            cookies: Mutex::new(cookies),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a cookie, replacing any with the same domain, path and name
    pub fn insert(&self, cookie: Cookie) {
        let mut cookies = self.lock();
        cookies.retain(|c| !(c.domain == cookie.domain && c.path == cookie.path && c.name == cookie.name));
        cookies.push(cookie);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Cookie>> {
        lock_cookies(&self.cookies)
    }

    fn write_atomically(&self, content: &str) -> Result<(), CookieError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl CookieJar for FileCookieJar {
    async fn get_all(&self) -> Result<Vec<Cookie>, CookieError> {
        Ok(self.lock().clone())
    }

    async fn remove(&self, url: &str, name: &str) -> Result<(), CookieError> {
        remove_matching(&mut self.lock(), url, name)
    }

    async fn flush(&self) -> Result<(), CookieError> {
        let content = {
            let cookies = self.lock();
            serde_json::to_string_pretty(&*cookies)?
        };
        self.write_atomically(&content)
    }
}

/// Volatile jar, for dry runs against a snapshot of a real store
#[derive(Default)]
pub struct MemoryCookieJar {
    cookies: Mutex<Vec<Cookie>>,
}

impl MemoryCookieJar {
    pub fn new(cookies: Vec<Cookie>) -> Self {
        Self {
            cookies: Mutex::new(cookies),
        }
    }

    pub fn len(&self) -> usize {
        lock_cookies(&self.cookies).len()
    }
}

#[async_trait]
impl CookieJar for MemoryCookieJar {
    async fn get_all(&self) -> Result<Vec<Cookie>, CookieError> {
        Ok(lock_cookies(&self.cookies).clone())
    }

    async fn remove(&self, url: &str, name: &str) -> Result<(), CookieError> {
        remove_matching(&mut lock_cookies(&self.cookies), url, name)
    }

    async fn flush(&self) -> Result<(), CookieError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_jar(dir: &Path) -> FileCookieJar {
        let jar = FileCookieJar::open(dir).unwrap();
        jar.insert(Cookie::new(".repl.it", "connect.sid", "s1"));
        jar.insert(Cookie::new("accounts.google.com", "SID", "g1"));
        jar.insert(Cookie::new(".github.com", "logged_in", "yes"));
        jar
    }

    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let jar = FileCookieJar::open(dir.path()).unwrap();
        assert!(jar.is_empty());
        assert!(jar.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_by_removal_url() {
        let dir = tempfile::tempdir().unwrap();
        let jar = seeded_jar(dir.path());

        let cookie = Cookie::new(".github.com", "logged_in", "yes");
        jar.remove(&cookie.removal_url(), &cookie.name).await.unwrap();

        let names: Vec<_> = jar.get_all().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["connect.sid", "SID"]);
    }

    #[tokio::test]
    async fn test_remove_wrong_name_keeps_cookie() {
        let dir = tempfile::tempdir().unwrap();
        let jar = seeded_jar(dir.path());
        jar.remove("https://www.repl.it/", "other").await.unwrap();
        assert_eq!(jar.len(), 3);
    }

    #[tokio::test]
    async fn test_remove_invalid_url() {
        let dir = tempfile::tempdir().unwrap();
        let jar = seeded_jar(dir.path());
        let err = jar.remove("not a url", "SID").await.unwrap_err();
        assert!(matches!(err, CookieError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_flush_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let jar = seeded_jar(dir.path());
            jar.remove("https://accounts.google.com/", "SID").await.unwrap();
            jar.flush().await.unwrap();
        }

        let reopened = FileCookieJar::open(dir.path()).unwrap();
        assert_eq!(reopened.len(), 2);
    }

    #[tokio::test]
    async fn test_unflushed_changes_are_not_durable() {
        let dir = tempfile::tempdir().unwrap();
        {
            let jar = seeded_jar(dir.path());
            jar.flush().await.unwrap();
            jar.remove("https://accounts.google.com/", "SID").await.unwrap();
        }

        let reopened = FileCookieJar::open(dir.path()).unwrap();
        assert_eq!(reopened.len(), 3);
    }

    #[test]
    fn test_insert_replaces_same_key() {
        let dir = tempfile::tempdir().unwrap();
        let jar = FileCookieJar::open(dir.path()).unwrap();
        jar.insert(Cookie::new(".repl.it", "sid", "old"));
        jar.insert(Cookie::new(".repl.it", "sid", "new"));
        assert_eq!(jar.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_jar_leaves_source_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let jar = seeded_jar(dir.path());
        let snapshot = MemoryCookieJar::new(jar.get_all().await.unwrap());

        snapshot.remove("https://accounts.google.com/", "SID").await.unwrap();
        snapshot.flush().await.unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(jar.len(), 3);
    }
}
