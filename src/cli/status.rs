//! `repldesk status`

use serde::Serialize;

use super::Context;
use crate::browser::CookieJar;
use crate::core::SERVICE_ROOT_DOMAIN;
use crate::settings::{SettingsStore, ENABLE_ACE};
use crate::theme::SettingsTheme;

#[derive(Debug, Serialize)]
struct Status {
    edit_mode: bool,
    theme: String,
    cookies: usize,
    service_cookies: usize,
    expired_cookies: usize,
    config_dir: String,
    data_dir: String,
}

pub async fn run(ctx: &Context) -> anyhow::Result<()> {
    let settings = ctx.settings()?;
    let jar = ctx.cookie_jar()?;
    let cookies = jar.get_all().await?;

    let status = Status {
        edit_mode: settings.get_bool(ENABLE_ACE),
        theme: SettingsTheme::from_settings(&settings).name().to_string(),
        cookies: cookies.len(),
        service_cookies: cookies.iter().filter(|c| c.is_service_cookie(SERVICE_ROOT_DOMAIN)).count(),
        expired_cookies: cookies.iter().filter(|c| c.is_expired()).count(),
        config_dir: ctx.paths.config_dir.display().to_string(),
        data_dir: ctx.paths.data_dir.display().to_string(),
    };

    ctx.emit(&status, || {
        format!(
            "Edit mode:  {}\nTheme:      {}\nCookies:    {} ({} service, {} third-party, {} expired)\nConfig:     {}\nData:       {}",
            if status.edit_mode { "ace" } else { "default" },
            status.theme,
            status.cookies,
            status.service_cookies,
            status.cookies - status.service_cookies,
            status.expired_cookies,
            status.config_dir,
            status.data_dir,
        )
    })
}
