//! Reconcile cached settings with the CLI's own configuration.
//!
//! The CLI is authoritative: a value it reports always replaces the cached
//! one, and a value it lacks has to come from the user.

use anyhow::{Result, anyhow};
use tracing::{debug, info, instrument, warn};

use crate::configure::configure_field;
use crate::context::BridgeContext;
use crate::core::reconcile::{parse_show_configuration, plan};
use crate::core::types::{ConfigField, LocalConfig, ReconcilePlan, UpdateDecision};
use crate::io::dialogs::{Dialogs, Severity};
use crate::io::process::ProcessRunner;
use crate::io::settings::SettingsStore;

/// Ask the CLI for its configuration and decide what each cached field needs.
///
/// Fails without a partial plan when the CLI invocation does not succeed.
#[instrument(skip_all)]
pub fn reconcile<R: ProcessRunner>(
    ctx: &BridgeContext,
    runner: &R,
    local: &LocalConfig,
) -> Result<ReconcilePlan> {
    let result = runner.run(&ctx.commands.show_configuration());
    if !result.succeeded {
        warn!("show configuration failed");
        return Err(anyhow!(
            "read {} configuration: {}",
            ctx.program(),
            result.failure_message()
        ));
    }

    // The CLI prints its configuration on stderr; fall back to stdout for builds that don't.
    let listing = if result.stderr.trim().is_empty() {
        &result.stdout
    } else {
        &result.stderr
    };
    let remote = parse_show_configuration(listing);
    let decided = plan(&remote, local);
    debug!(
        token = kind(&decided.token),
        workspace = kind(&decided.workspace),
        "reconciliation planned"
    );
    Ok(decided)
}

/// Log-safe name of a decision (never the token value).
fn kind(decision: &UpdateDecision) -> &'static str {
    match decision {
        UpdateDecision::NoChange => "no_change",
        UpdateDecision::UpdateTo(_) => "update",
        UpdateDecision::PromptUser => "prompt",
    }
}

/// Apply a plan: copy CLI values into the store, offer to configure missing ones.
#[instrument(skip_all)]
pub fn apply_plan<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
    store: &mut SettingsStore,
    plan: &ReconcilePlan,
) -> Result<()> {
    for (field, decision) in [
        (ConfigField::Token, &plan.token),
        (ConfigField::Workspace, &plan.workspace),
    ] {
        match decision {
            UpdateDecision::NoChange => {}
            UpdateDecision::UpdateTo(value) => {
                info!(key = field.key(), "following cli configuration");
                store.set_field(field, value)?;
            }
            UpdateDecision::PromptUser => {
                let message = format!("Exercism: {} is not configured", field.label());
                let choice = dialogs.notify(Severity::Warning, &message, &["Configure"])?;
                if choice == Some(0) {
                    configure_field(ctx, runner, dialogs, store, field)?;
                }
            }
        }
    }
    Ok(())
}

/// Reconcile against the CLI and apply the result to `store`.
pub fn reconcile_and_apply<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
    store: &mut SettingsStore,
) -> Result<ReconcilePlan> {
    let decided = reconcile(ctx, runner, &store.local_config())?;
    apply_plan(ctx, runner, dialogs, store, &decided)?;
    Ok(decided)
}
