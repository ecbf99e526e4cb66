//! One-time initialization: find the CLI, then align settings with it.

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::context::BridgeContext;
use crate::core::types::{ReconcilePlan, ToolLocation};
use crate::io::dialogs::{Dialogs, Severity};
use crate::io::locator::{locate, verify};
use crate::io::process::ProcessRunner;
use crate::io::settings::SettingsStore;
use crate::reconcile::reconcile_and_apply;

const VIEW_INSTALL: usize = 0;
const LOCATE_EXECUTABLE: usize = 1;
const NOT_FOUND_ACTIONS: [&str; 2] = ["View install instructions", "Locate executable"];

/// What startup established.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupOutcome {
    /// The CLI was found and its location is cached.
    pub initialized: bool,
    pub location: Option<ToolLocation>,
    /// Reconciliation result; `None` when uninitialized or the CLI could not report.
    pub plan: Option<ReconcilePlan>,
}

/// Locate the CLI (cache, `PATH`, then the user) and reconcile settings.
#[instrument(skip_all)]
pub fn initialize<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
    store: &mut SettingsStore,
) -> Result<StartupOutcome> {
    let Some(location) = find_cli(ctx, runner, dialogs, store)? else {
        info!("cli not available; staying uninitialized");
        return Ok(StartupOutcome::default());
    };

    let plan = match reconcile_and_apply(ctx, runner, dialogs, store) {
        Ok(plan) => Some(plan),
        Err(err) => {
            warn!("reconciliation failed");
            dialogs.notify(Severity::Error, &format!("{err:#}"), &[])?;
            None
        }
    };

    Ok(StartupOutcome {
        initialized: true,
        location: Some(location),
        plan,
    })
}

fn find_cli<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
    store: &mut SettingsStore,
) -> Result<Option<ToolLocation>> {
    if let Some(cached) = store.settings().exercism_path.clone() {
        if let Some(location) = verify(&cached) {
            debug!(path = %cached.display(), "cached cli location still valid");
            return Ok(Some(location));
        }
        store.clear_exercism_path()?;
    }

    if let Some(location) = locate(runner, ctx.platform, ctx.program()) {
        store.set_exercism_path(&location.path)?;
        return Ok(Some(location));
    }

    let message = format!("Exercism: could not find the `{}` executable", ctx.program());
    match dialogs.notify(Severity::Error, &message, &NOT_FOUND_ACTIONS)? {
        Some(VIEW_INSTALL) => {
            let opened = runner.run(&ctx.open(&ctx.config.cli.install_url));
            if !opened.succeeded {
                warn!(error = ?opened.error_message, "could not open install instructions");
            }
            Ok(None)
        }
        Some(LOCATE_EXECUTABLE) => {
            let Some(chosen) = dialogs.pick_file("Path to the exercism executable")? else {
                return Ok(None);
            };
            match verify(&chosen) {
                Some(location) => {
                    store.set_exercism_path(&location.path)?;
                    Ok(Some(location))
                }
                None => {
                    warn!(path = %chosen.display(), "chosen path is not a file");
                    Ok(None)
                }
            }
        }
        _ => Ok(None),
    }
}
