//! `repldesk edit-mode`

use clap::{Args, ValueEnum};
use serde::Serialize;

use super::Context;
use crate::dialog::AutoConfirm;
use crate::external::NoopOpener;
use crate::menu::{self, MenuAction};
use crate::settings::{SettingsStore, ENABLE_ACE};

#[derive(Args, Debug)]
pub struct EditModeArgs {
    #[arg(value_enum, default_value = "status")]
    pub action: EditModeAction,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditModeAction {
    /// Use the alternate (ace) editor
    On,
    /// Use the default editor
    Off,
    Status,
}

#[derive(Debug, Serialize)]
struct EditMode {
    enabled: bool,
    user_agent: Option<String>,
    /// Whether the shared identity moved
    identity_changed: bool,
    #[serde(skip)]
    windows: usize,
}

pub async fn run(ctx: &Context, args: EditModeArgs) -> anyhow::Result<()> {
    if args.action == EditModeAction::Status {
        let enabled = ctx.settings()?.get_bool(ENABLE_ACE);
        let mode = EditMode {
            enabled,
            user_agent: None,
            identity_changed: false,
            windows: 0,
        };
        return ctx.emit(&mode, || format!("Edit mode is {}", if enabled { "on" } else { "off" }));
    }

    let mode = toggle(ctx, args.action == EditModeAction::On).await?;
    ctx.emit(&mode, || {
        format!(
            "Edit mode {}, applied to {} window(s){}",
            if mode.enabled { "on" } else { "off" },
            mode.windows,
            if mode.identity_changed { "" } else { " (identity unchanged)" }
        )
    })
}

async fn toggle(ctx: &Context, on: bool) -> anyhow::Result<EditMode> {
    let jar = ctx.cookie_jar()?;
    let mut shell = ctx.shell(jar, Box::new(AutoConfirm(false)), Box::new(NoopOpener))?;

    let identity = shell.identity().subscribe();
    menu::dispatch(&mut shell, MenuAction::ToggleEditMode(on)).await?;

    Ok(EditMode {
        enabled: shell.edit_mode_enabled(),
        user_agent: shell.identity().current(),
        identity_changed: identity.has_changed().unwrap_or(false),
        windows: shell.windows().len(),
    })
}
