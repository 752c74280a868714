//! `repldesk cookies`

use clap::{Args, Subcommand};
use serde::Serialize;
use std::sync::Arc;

use super::Context;
use crate::browser::CookieJar;
use crate::core::{Cookie, SERVICE_ROOT_DOMAIN};
use crate::dialog::{AutoConfirm, ConfirmPrompt, TerminalPrompt};
use crate::external::NoopOpener;
use crate::menu::{self, MenuAction, MenuOutcome};
use crate::shell::ClearOutcome;

#[derive(Args, Debug)]
pub struct CookiesArgs {
    #[command(subcommand)]
    pub action: CookiesAction,
}

#[derive(Subcommand, Debug)]
pub enum CookiesAction {
    /// List stored cookies (values are not printed)
    List {
        /// Only cookies whose domain contains this text
        #[arg(long)]
        domain: Option<String>,
    },

    /// Clear the jar, or only third-party login cookies
    Clear {
        /// Keep repl.it cookies; drop the rest without asking
        #[arg(long)]
        oauth_only: bool,

        /// Do not ask before clearing everything
        #[arg(short, long)]
        yes: bool,

        /// Reload every window after a login-cookie clear (a full clear always reloads)
        #[arg(long, requires = "oauth_only")]
        reload: bool,
    },
}

#[derive(Debug, Serialize)]
struct CookieRow<'a> {
    domain: &'a str,
    path: &'a str,
    name: &'a str,
    secure: bool,
    http_only: bool,
    service: bool,
    expired: bool,
}

impl<'a> From<&'a Cookie> for CookieRow<'a> {
    fn from(cookie: &'a Cookie) -> Self {
        Self {
            domain: &cookie.domain,
            path: &cookie.path,
            name: &cookie.name,
            secure: cookie.secure,
            http_only: cookie.http_only,
            service: cookie.is_service_cookie(SERVICE_ROOT_DOMAIN),
            expired: cookie.is_expired(),
        }
    }
}

pub async fn run(ctx: &Context, args: CookiesArgs) -> anyhow::Result<()> {
    match args.action {
        CookiesAction::List { domain } => list(ctx, domain.as_deref()).await,
        CookiesAction::Clear { oauth_only, yes, reload } => run_clear(ctx, oauth_only, yes, reload).await,
    }
}

async fn list(ctx: &Context, domain: Option<&str>) -> anyhow::Result<()> {
    let jar = ctx.cookie_jar()?;
    let cookies = jar.get_all().await?;
    let rows: Vec<CookieRow> = cookies
        .iter()
        .filter(|c| domain.map_or(true, |d| c.domain.contains(d)))
        .map(CookieRow::from)
        .collect();

    ctx.emit(&rows, || {
        if rows.is_empty() {
            return "No cookies".to_string();
        }
        rows.iter()
            .map(|row| {
                let mut flags = Vec::new();
                if row.secure {
                    flags.push("secure");
                }
                if row.http_only {
                    flags.push("httponly");
                }
                if row.expired {
                    flags.push("expired");
                }
                format!("{}{}\t{}\t{}", row.domain, row.path, row.name, flags.join(","))
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

#[derive(Debug, Default, Serialize)]
struct Cleared {
    cancelled: bool,
    removed: usize,
    kept: usize,
    failed: usize,
    flush_failures: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    reloaded: Option<usize>,
}

impl Cleared {
    fn render(&self) -> String {
        if self.cancelled {
            return "Cancelled".to_string();
        }
        let mut out = format!("Removed {} cookies, kept {}", self.removed, self.kept);
        if let Some(count) = self.reloaded {
            out.push_str(&format!(", reloaded {} window(s)", count));
        }
        out
    }
}

async fn run_clear(ctx: &Context, oauth_only: bool, yes: bool, reload: bool) -> anyhow::Result<()> {
    let prompt: Box<dyn ConfirmPrompt> = if yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(TerminalPrompt)
    };

    let cleared = clear(ctx, prompt, oauth_only, reload).await?;
    ctx.emit(&cleared, || cleared.render())?;

    if cleared.failed > 0 || cleared.flush_failures > 0 {
        anyhow::bail!(
            "{} cookies could not be removed and {} flushes failed",
            cleared.failed,
            cleared.flush_failures
        );
    }
    Ok(())
}

async fn clear(
    ctx: &Context,
    prompt: Box<dyn ConfirmPrompt>,
    oauth_only: bool,
    reload: bool,
) -> anyhow::Result<Cleared> {
    let jar = ctx.cookie_jar()?;
    tracing::debug!("Clearing cookies in {}", jar.path().display());

    let mut shell = ctx.shell(jar as Arc<dyn CookieJar>, prompt, Box::new(NoopOpener))?;
    let action = if oauth_only {
        MenuAction::ClearLoginCookies
    } else {
        MenuAction::ClearCookies
    };

    let report = match menu::dispatch(&mut shell, action).await? {
        MenuOutcome::Cleared(ClearOutcome::Cleared(report)) => report,
        _ => {
            return Ok(Cleared {
                cancelled: true,
                ..Cleared::default()
            })
        }
    };

    let reloaded = if reload {
        match menu::dispatch(&mut shell, MenuAction::ReloadAll).await? {
            MenuOutcome::Reloaded(count) => Some(count),
            _ => None,
        }
    } else {
        None
    };

    Ok(Cleared {
        cancelled: false,
        removed: report.removed,
        kept: report.kept,
        failed: report.failed,
        flush_failures: report.flush_failures,
        reloaded,
    })
}
