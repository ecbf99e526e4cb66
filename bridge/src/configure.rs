//! Interactive token and workspace configuration.
//!
//! Each flow asks the user for a value, hands it to the CLI and stores it once
//! the CLI accepts it. A rejection offers Retry/Cancel; Retry goes back to the
//! prompt, so every extra CLI invocation corresponds to one user decision.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::context::BridgeContext;
use crate::core::types::ConfigField;
use crate::io::dialogs::{Dialogs, Severity};
use crate::io::process::ProcessRunner;
use crate::io::settings::SettingsStore;

const RETRY: usize = 0;
const REJECTION_ACTIONS: [&str; 2] = ["Retry", "Cancel"];

/// Result of a configuration flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigureOutcome {
    /// The CLI accepted the value and the settings store now holds it.
    Configured(String),
    /// The user dismissed the prompt, entered nothing, or cancelled after a rejection.
    Cancelled,
}

struct FlowText {
    prompt: &'static str,
    progress: &'static str,
    rejected: &'static str,
}

fn flow_text(field: ConfigField) -> FlowText {
    match field {
        ConfigField::Token => FlowText {
            prompt: "Please input the token",
            progress: "Configuring token...",
            rejected: "Invalid token.",
        },
        ConfigField::Workspace => FlowText {
            prompt: "Please choose the workspace directory",
            progress: "Configuring workspace...",
            rejected: "Invalid workspace.",
        },
    }
}

/// Ask for an API token and register it with the CLI.
pub fn configure_token<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
    store: &mut SettingsStore,
) -> Result<ConfigureOutcome> {
    configure_field(ctx, runner, dialogs, store, ConfigField::Token)
}

/// Ask for a workspace directory and register it with the CLI.
pub fn configure_workspace<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
    store: &mut SettingsStore,
) -> Result<ConfigureOutcome> {
    configure_field(ctx, runner, dialogs, store, ConfigField::Workspace)
}

/// Run the configuration flow for `field`.
#[instrument(skip_all, fields(field = field.key()))]
pub fn configure_field<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
    store: &mut SettingsStore,
    field: ConfigField,
) -> Result<ConfigureOutcome> {
    let text = flow_text(field);
    loop {
        let value = match ask_value(dialogs, field, text.prompt)? {
            Some(value) => value,
            None => {
                debug!("prompt dismissed");
                return Ok(ConfigureOutcome::Cancelled);
            }
        };

        let command = match field {
            ConfigField::Token => ctx.commands.configure_token(&value),
            ConfigField::Workspace => ctx.commands.configure_workspace(Path::new(&value)),
        };
        let result = dialogs.with_progress(text.progress, || runner.run(&command));

        if result.succeeded {
            store.set_field(field, &value)?;
            info!("cli accepted new value");
            return Ok(ConfigureOutcome::Configured(value));
        }

        warn!(error = ?result.error_message, "cli rejected value");
        let choice = dialogs.notify(Severity::Error, text.rejected, &REJECTION_ACTIONS)?;
        if choice != Some(RETRY) {
            return Ok(ConfigureOutcome::Cancelled);
        }
    }
}

fn ask_value<D: Dialogs>(dialogs: &D, field: ConfigField, prompt: &str) -> Result<Option<String>> {
    let value = match field {
        ConfigField::Token => dialogs.input_text(prompt)?,
        ConfigField::Workspace => dialogs
            .pick_directory(prompt)?
            .map(|dir| dir.display().to_string()),
    };
    Ok(value.filter(|v| !v.is_empty()))
}
