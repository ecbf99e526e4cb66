//! Exercism CLI bridge.
//!
//! Locates the `exercism` executable, mirrors its token and workspace into
//! `settings.json` under the bridge home, and runs download and submit
//! workflows with interactive prompts in the terminal.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exercism_bridge::configure::{ConfigureOutcome, configure_token, configure_workspace};
use exercism_bridge::context::BridgeContext;
use exercism_bridge::core::platform::Platform;
use exercism_bridge::exercise::{download, prompt_and_download, submit};
use exercism_bridge::exit_codes;
use exercism_bridge::io::config::{BridgeConfig, load_config, write_config};
use exercism_bridge::io::dialogs::TerminalDialogs;
use exercism_bridge::io::paths::{BridgePaths, HOME_ENV, resolve_home};
use exercism_bridge::io::process::ShellRunner;
use exercism_bridge::io::settings::SettingsStore;
use exercism_bridge::logging;
use exercism_bridge::menu::show_menu;
use exercism_bridge::startup::initialize;

#[derive(Parser)]
#[command(
    name = "exercism-bridge",
    version,
    about = "Drive the Exercism CLI: configuration, downloads and submissions",
    after_help = "Arguments are interpolated into shell command lines without escaping. \
                  Only pass values you would type into a shell yourself."
)]
struct Cli {
    /// Bridge home holding config.toml and settings.json.
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Locate the CLI and sync the cached token/workspace with it.
    Init,
    /// Prompt for an API token and register it with the CLI.
    ConfigureToken,
    /// Prompt for a workspace directory and register it with the CLI.
    ConfigureWorkspace,
    /// Run a download command copied from an exercise page.
    Download {
        /// Full command line, e.g. "exercism download --exercise=bob --track=rust".
        /// Prompted for when omitted.
        command: Option<String>,
    },
    /// Submit the solution files listed in `.exercism/config.json`.
    Submit {
        /// Exercise directory (defaults to the current directory).
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Pick an action from the options menu.
    Menu {
        /// Exercise directory used by "Submit solution".
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILED);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init();

    let env_home = std::env::var(HOME_ENV).ok();
    let paths = BridgePaths::new(resolve_home(cli.home.as_deref(), env_home.as_deref())?);
    let config = load_config(&paths.config_path)?;
    let runner = ShellRunner::with_timeout(config.process.timeout());
    let ctx = BridgeContext::new(Platform::current(), config);
    let dialogs = TerminalDialogs::new();
    let mut store = SettingsStore::load(&paths.settings_path)?;

    match cli.command {
        Command::Init => cmd_init(&ctx, &runner, &dialogs, &mut store, &paths),
        Command::ConfigureToken => {
            report_configured(configure_token(&ctx, &runner, &dialogs, &mut store)?)
        }
        Command::ConfigureWorkspace => {
            report_configured(configure_workspace(&ctx, &runner, &dialogs, &mut store)?)
        }
        Command::Download { command } => {
            match command {
                Some(line) => {
                    download(&ctx, &runner, &dialogs, line.trim())?;
                }
                None => {
                    prompt_and_download(&ctx, &runner, &dialogs)?;
                }
            }
            Ok(exit_codes::OK)
        }
        Command::Submit { root } => {
            submit(&ctx, &runner, &dialogs, &exercise_root(root.as_deref())?)?;
            Ok(exit_codes::OK)
        }
        Command::Menu { root } => {
            let root = exercise_root(root.as_deref())?;
            show_menu(&ctx, &runner, &dialogs, &mut store, &root)?;
            Ok(exit_codes::OK)
        }
    }
}

fn cmd_init(
    ctx: &BridgeContext,
    runner: &ShellRunner,
    dialogs: &TerminalDialogs,
    store: &mut SettingsStore,
    paths: &BridgePaths,
) -> Result<i32> {
    if !paths.config_path.exists() {
        write_config(&paths.config_path, &BridgeConfig::default())?;
    }
    let outcome = initialize(ctx, runner, dialogs, store)?;
    match outcome.location {
        Some(location) if outcome.initialized => {
            println!("{}", location.path.display());
            Ok(exit_codes::OK)
        }
        _ => Ok(exit_codes::NOT_FOUND),
    }
}

fn report_configured(outcome: ConfigureOutcome) -> Result<i32> {
    if let ConfigureOutcome::Configured(value) = outcome {
        println!("{}", value);
    }
    Ok(exit_codes::OK)
}

fn exercise_root(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(root) => std::path::absolute(root)
            .with_context(|| format!("resolve exercise root {}", root.display())),
        None => std::env::current_dir().context("read current directory"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_download_with_command() {
        let cli = Cli::parse_from([
            "exercism-bridge",
            "download",
            "exercism download --exercise=bob --track=rust",
        ]);
        assert!(matches!(
            cli.command,
            Command::Download { command: Some(ref line) } if line.ends_with("--track=rust")
        ));
    }

    #[test]
    fn parse_download_without_command_prompts() {
        let cli = Cli::parse_from(["exercism-bridge", "download"]);
        assert!(matches!(cli.command, Command::Download { command: None }));
    }

    #[test]
    fn parse_global_home_after_subcommand() {
        let cli = Cli::parse_from(["exercism-bridge", "submit", "--home", "/tmp/h"]);
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/h")));
        assert!(matches!(cli.command, Command::Submit { root: None }));
    }

    #[test]
    fn parse_submit_root() {
        let cli = Cli::parse_from(["exercism-bridge", "submit", "--root", "ex/bob"]);
        assert!(matches!(
            cli.command,
            Command::Submit { root: Some(ref root) } if root == Path::new("ex/bob")
        ));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
