//! `repldesk route`
//!
//! Replays a URL through the orchestrator as both a new-window request and a
//! navigation of the primary window. The shell runs against snapshots of the
//! jar and the settings, so nothing stored is ever touched.

use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use super::Context;
use crate::browser::{CookieJar, MemoryCookieJar};
use crate::dialog::AutoConfirm;
use crate::external::{ExternalOpener, NoopOpener, SystemBrowser};
use crate::host::{Reaction, WindowEvent};
use crate::settings::MemorySettings;

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// URL to route
    pub url: String,

    /// Actually open external targets in the system browser
    #[arg(long)]
    pub open: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Routing {
    url: String,
    /// Window role a new-window request would produce
    new_window: String,
    /// User agent the new window loads with
    new_window_user_agent: Option<String>,
    /// Cookies a login would drop first
    login_cookies_cleared: usize,
    /// What a navigation of the primary window does
    navigation: String,
}

pub async fn run(ctx: &Context, args: RouteArgs) -> anyhow::Result<()> {
    let routing = route(ctx, &args.url, args.open).await?;
    ctx.emit(&routing, || {
        let mut out = format!("New window:  {}", routing.new_window);
        if let Some(ua) = &routing.new_window_user_agent {
            out.push_str(&format!(" (user agent \"{}\")", ua));
        }
        if routing.login_cookies_cleared > 0 {
            out.push_str(&format!("\n             after dropping {} login cookies", routing.login_cookies_cleared));
        }
        out.push_str(&format!("\nNavigation:  {}", routing.navigation));
        out
    })
}

async fn route(ctx: &Context, url: &str, open: bool) -> anyhow::Result<Routing> {
    let snapshot = Arc::new(MemoryCookieJar::new(ctx.cookie_jar()?.get_all().await?));
    let before = snapshot.len();
    let opener: Box<dyn ExternalOpener> = if open {
        Box::new(SystemBrowser)
    } else {
        Box::new(NoopOpener)
    };

    let settings = MemorySettings::snapshot_of(&ctx.settings()?);
    let mut shell = ctx.shell_with_settings(
        Box::new(settings),
        snapshot.clone() as Arc<dyn CookieJar>,
        Box::new(AutoConfirm(false)),
        opener,
    )?;
    let primary = shell.primary();

    let reaction = shell
        .handle_event(primary, WindowEvent::NewWindowRequested { url: url.to_string() })
        .await?;
    let (new_window, new_window_user_agent) = match reaction {
        Reaction::Redirect(window) => {
            shell.handle_event(window, WindowEvent::DidFinishLoad).await?;
            if let Some(win) = shell.host().window(window) {
                tracing::debug!("New window {}: {}", window, win.summary());
            }
            let role = shell.windows().role(window).map_or("unknown", |r| r.label());
            let user_agent = shell
                .host()
                .window(window)
                .and_then(|w| w.loads.last())
                .and_then(|load| load.user_agent.clone());
            (role.to_string(), user_agent)
        }
        other => (format!("{:?}", other).to_lowercase(), None),
    };

    let navigation = match shell
        .handle_event(primary, WindowEvent::WillNavigate { url: url.to_string() })
        .await?
    {
        Reaction::Proceed => "in app",
        Reaction::Cancel => "system browser",
        Reaction::Redirect(_) | Reaction::Exit => "unexpected",
    };

    Ok(Routing {
        url: url.to_string(),
        new_window,
        new_window_user_agent,
        login_cookies_cleared: before - snapshot.len(),
        navigation: navigation.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::FileCookieJar;
    use crate::core::{Cookie, GENERIC_USER_AGENT};
    use crate::settings::{SettingsStore, THEME};
    use crate::shell::auth::GOOGLE_COMPLETION_URL;

    async fn seeded_context(root: &std::path::Path) -> Context {
        let ctx = Context::load(Some(root.to_path_buf()), false).unwrap();
        let jar = FileCookieJar::open(&ctx.paths.data_dir).unwrap();
        jar.insert(Cookie::new(".repl.it", "connect.sid", "1"));
        jar.insert(Cookie::new("accounts.google.com", "SID", "2"));
        jar.flush().await.unwrap();
        ctx
    }

    #[tokio::test]
    async fn test_login_route_leaves_jar_alone() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = seeded_context(dir.path()).await;

        let routing = route(&ctx, GOOGLE_COMPLETION_URL, false).await.unwrap();

        assert_eq!(routing.new_window, "auth-popup");
        assert_eq!(routing.new_window_user_agent.as_deref(), Some(GENERIC_USER_AGENT));
        assert_eq!(routing.login_cookies_cleared, 1);
        assert_eq!(routing.navigation, "in app");
        assert_eq!(FileCookieJar::open(&ctx.paths.data_dir).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_external_route() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = seeded_context(dir.path()).await;

        let routing = route(&ctx, "https://example.com/docs", false).await.unwrap();

        assert_eq!(routing.new_window, "spawned");
        assert_eq!(routing.login_cookies_cleared, 0);
        assert_eq!(routing.navigation, "system browser");
    }

    #[tokio::test]
    async fn test_route_leaves_settings_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = seeded_context(dir.path()).await;
        let settings_path = ctx.paths.config_dir.join("settings.toml");

        route(&ctx, "https://repl.it/~", false).await.unwrap();
        assert!(!settings_path.exists());

        ctx.settings().unwrap().set(THEME, "dark".into()).unwrap();
        let before = std::fs::read_to_string(&settings_path).unwrap();
        route(&ctx, "https://example.com/", false).await.unwrap();
        assert_eq!(std::fs::read_to_string(&settings_path).unwrap(), before);
    }
}
