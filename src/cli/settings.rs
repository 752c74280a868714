//! `repldesk settings`

use clap::{Args, Subcommand};
use std::collections::BTreeMap;

use super::Context;
use crate::dialog::AutoConfirm;
use crate::external::NoopOpener;
use crate::menu::{self, MenuAction};
use crate::settings::{SettingValue, SettingsStore, ENABLE_ACE, THEME};
use crate::theme::SettingsTheme;

#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print one setting
    Get { key: String },
    /// Change one setting ("true"/"false" are stored as booleans)
    Set { key: String, value: String },
    /// Print every setting
    List,
}

pub async fn run(ctx: &Context, args: SettingsArgs) -> anyhow::Result<()> {
    let mut settings = ctx.settings()?;

    match args.action {
        SettingsAction::Get { key } => match settings.get(&key) {
            Some(value) => ctx.emit(&value, || value.to_string()),
            None => anyhow::bail!("Setting '{}' not found", key),
        },
        SettingsAction::Set { key, value } => {
            let value = validate(&key, SettingValue::parse(&value))?;
            if key == THEME {
                // re-skins open windows as well as persisting the choice
                let mut shell = ctx.shell(ctx.cookie_jar()?, Box::new(AutoConfirm(false)), Box::new(NoopOpener))?;
                menu::dispatch(&mut shell, MenuAction::SetTheme(value.to_string())).await?;
            } else {
                settings.set(&key, value.clone())?;
            }
            tracing::info!("Saved {} = {} to {}", key, value, settings.path().display());
            Ok(())
        }
        SettingsAction::List => {
            let entries: BTreeMap<String, SettingValue> = settings.entries().into_iter().collect();
            ctx.emit(&entries, || {
                entries
                    .iter()
                    .map(|(k, v)| format!("{} = {}", k, v))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
    }
}

/// Reject values the shell would misread for keys it owns
fn validate(key: &str, value: SettingValue) -> anyhow::Result<SettingValue> {
    match key {
        ENABLE_ACE if value.as_bool().is_none() => {
            anyhow::bail!("invalid value '{}' for {}: expected true or false", value, key)
        }
        THEME => {
            let name = value.as_str().unwrap_or_default();
            if !SettingsTheme::available().contains(&name) {
                anyhow::bail!(
                    "invalid theme '{}': expected one of {}",
                    value,
                    SettingsTheme::available().join(", ")
                );
            }
            Ok(value)
        }
        _ => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_owned_keys() {
        assert!(validate(ENABLE_ACE, SettingValue::parse("true")).is_ok());
        assert!(validate(ENABLE_ACE, SettingValue::parse("yes")).is_err());
        assert!(validate(THEME, SettingValue::parse("dark")).is_ok());
        assert!(validate(THEME, SettingValue::parse("neon")).is_err());
        assert!(validate("window-note", SettingValue::parse("anything")).is_ok());
    }

    #[tokio::test]
    async fn test_set_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::load(Some(dir.path().to_path_buf()), false).unwrap();

        run(
            &ctx,
            SettingsArgs {
                action: SettingsAction::Set {
                    key: THEME.to_string(),
                    value: "midnight".to_string(),
                },
            },
        )
        .await
        .unwrap();

        assert_eq!(ctx.settings().unwrap().get_string(THEME).as_deref(), Some("midnight"));
    }

    #[tokio::test]
    async fn test_set_plain_key() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::load(Some(dir.path().to_path_buf()), false).unwrap();

        run(
            &ctx,
            SettingsArgs {
                action: SettingsAction::Set {
                    key: ENABLE_ACE.to_string(),
                    value: "true".to_string(),
                },
            },
        )
        .await
        .unwrap();

        let settings = ctx.settings().unwrap();
        assert!(settings.get_bool(ENABLE_ACE));
        assert!(!settings.has(THEME));
    }
}
