//! repldesk - desktop shell for the repl.it web app
//!
//! Wraps the hosted IDE in native windows and owns everything the page can't:
//! - Window registry and new-window interception
//! - OAuth popup flow with login cookie isolation
//! - Cookie clearing (`repldesk cookies clear`)
//! - Alternate editor identity across all windows (`repldesk edit-mode`)

mod browser;
mod cli;
mod config;
mod context_menu;
mod core;
mod dialog;
mod external;
mod host;
mod logging;
mod menu;
mod preload;
mod settings;
mod shell;
mod theme;

use clap::Parser;
use cli::{exit_codes, Cli, Commands, Context};

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    // Initialize logging
    if let Err(e) = logging::init(cli.verbose, cli.json_output) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let ctx = match Context::load(cli.home.clone(), cli.json_output) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return exit_codes::CONFIG_ERROR;
        }
    };

    // Create tokio runtime for async commands
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {}", e);
            return exit_codes::UNEXPECTED_FAILURE;
        }
    };

    let result = rt.block_on(async {
        match cli.command {
            Some(Commands::Status) | None => cli::status::run(&ctx).await,
            Some(Commands::Cookies(args)) => cli::cookies::run(&ctx, args).await,
            Some(Commands::EditMode(args)) => cli::edit_mode::run(&ctx, args).await,
            Some(Commands::Route(args)) => cli::route::run(&ctx, args).await,
            Some(Commands::Settings(args)) => cli::settings::run(&ctx, args).await,
        }
    });

    match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            categorize_error(&e)
        }
    }
}

/// Categorize an error into the appropriate exit code
fn categorize_error(e: &anyhow::Error) -> i32 {
    use crate::config::ConfigError;
    use crate::core::{SettingsError, ShellError};

    if let Some(shell) = e.downcast_ref::<ShellError>() {
        return match shell {
            ShellError::ClearInProgress => exit_codes::BUSY,
            ShellError::Settings(_) => exit_codes::CONFIG_ERROR,
            _ => exit_codes::UNEXPECTED_FAILURE,
        };
    }

    if e.chain().any(|cause| cause.is::<SettingsError>() || cause.is::<ConfigError>()) {
        exit_codes::CONFIG_ERROR
    } else {
        exit_codes::UNEXPECTED_FAILURE
    }
}
