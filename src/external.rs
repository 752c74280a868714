//! External link routing
//!
//! Service pages stay in the shell; anything else opens in the system browser.

use url::Url;

/// Where a navigation target belongs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Same-service page, navigate in place
    InApp,
    /// Off-service web page, hand to the system browser
    External(Url),
    /// Not a web URL (about:, data:, javascript:, unparsable), left to the host
    Passthrough,
}

/// Classify a navigation target against the service root domain
pub fn classify(url: &str, root_domain: &str) -> LinkTarget {
    let Ok(parsed) = Url::parse(url) else {
        return LinkTarget::Passthrough;
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return LinkTarget::Passthrough;
    }

    let Some(host) = parsed.host_str() else {
        return LinkTarget::Passthrough;
    };

    let host = host.to_ascii_lowercase();
    if host == root_domain || host.ends_with(&format!(".{}", root_domain)) {
        LinkTarget::InApp
    } else {
        LinkTarget::External(parsed)
    }
}

/// Opens URLs outside the shell
pub trait ExternalOpener: Send + Sync {
    fn open(&self, url: &Url) -> std::io::Result<()>;
}

/// The platform's default browser
pub struct SystemBrowser;

impl ExternalOpener for SystemBrowser {
    fn open(&self, url: &Url) -> std::io::Result<()> {
        open::that(url.as_str())
    }
}

/// Logs URLs instead of opening them
pub struct NoopOpener;

impl ExternalOpener for NoopOpener {
    fn open(&self, url: &Url) -> std::io::Result<()> {
        tracing::info!("Would open {} in the system browser", url);
        Ok(())
    }
}
