//! Browser-side collaborators: the session cookie store

pub mod cookies;

pub use cookies::{CookieJar, FileCookieJar, MemoryCookieJar};
