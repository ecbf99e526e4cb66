//! Exercise download and solution submission.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::context::BridgeContext;
use crate::io::dialogs::{Dialogs, Severity};
use crate::io::manifest::load_manifest;
use crate::io::process::ProcessRunner;

const VIEW_RESULTS: &str = "View results";

/// Prompt for the download command line the exercise page shows.
pub const DOWNLOAD_PROMPT: &str = "Paste the download command";

/// Result of a download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Input was not a download command; nothing ran.
    Rejected,
    /// Command ran; this is what was shown to the user.
    Reported(String),
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No exercise manifest under the root; nothing ran.
    NotAnExercise,
    /// CLI accepted the submission.
    Submitted {
        message: String,
        results_url: Option<String>,
    },
    /// Submission (or reading the manifest) failed; `0` is the reported message.
    Failed(String),
}

/// Run a user-supplied download command.
///
/// Only lines starting with `<program> download ` are accepted, so a stray
/// paste cannot run an arbitrary shell command. The CLI's own text is reported
/// whether or not it exited successfully.
#[instrument(skip_all)]
pub fn download<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
    command_line: &str,
) -> Result<DownloadOutcome> {
    if !ctx.commands.is_download_command(command_line) {
        debug!("input is not a download command");
        return Ok(DownloadOutcome::Rejected);
    }

    let result = dialogs.with_progress("Downloading exercise...", || runner.run(command_line));
    let nothing_captured = result.stdout.is_empty() && result.stderr.is_empty();
    let message = match &result.error_message {
        Some(error) if nothing_captured => error.clone(),
        _ => result.combined_output(),
    };
    if !result.succeeded {
        warn!("download command failed");
    }
    dialogs.notify(Severity::Info, &message, &[])?;
    Ok(DownloadOutcome::Reported(message))
}

/// Ask for a download command line and run it. `None` when dismissed.
pub fn prompt_and_download<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
) -> Result<Option<DownloadOutcome>> {
    let Some(line) = dialogs.input_text(DOWNLOAD_PROMPT)? else {
        debug!("download prompt dismissed");
        return Ok(None);
    };
    download(ctx, runner, dialogs, line.trim()).map(Some)
}

/// Submit the solution files of the exercise rooted at `root`.
///
/// Silently does nothing when `root` has no `.exercism/config.json`.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn submit<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
    root: &Path,
) -> Result<SubmitOutcome> {
    let manifest = match load_manifest(root) {
        Ok(Some(manifest)) => manifest,
        Ok(None) => return Ok(SubmitOutcome::NotAnExercise),
        Err(err) => {
            let message = format!("{err:#}");
            dialogs.notify(Severity::Error, &message, &[])?;
            return Ok(SubmitOutcome::Failed(message));
        }
    };

    let files = manifest.resolve(root);
    let command = ctx.commands.submit(&files);
    debug!(files = files.len(), "submitting solution");
    let result = dialogs.with_progress("Submitting solution...", || runner.run(&command));

    if !result.succeeded {
        let message = result.failure_message();
        warn!("submission failed");
        dialogs.notify(Severity::Error, &message, &[])?;
        return Ok(SubmitOutcome::Failed(message));
    }

    let message = result.combined_output();
    let results_url = result.stdout.split_whitespace().next().map(str::to_string);
    info!(results_url = ?results_url, "solution submitted");

    let actions: &[&str] = if results_url.is_some() {
        &[VIEW_RESULTS]
    } else {
        &[]
    };
    let choice = dialogs.notify(Severity::Info, &message, actions)?;
    if let (Some(0), Some(url)) = (choice, results_url.as_deref()) {
        let opened = runner.run(&ctx.open(url));
        if !opened.succeeded {
            warn!(error = ?opened.error_message, "could not open results");
        }
    }

    Ok(SubmitOutcome::Submitted {
        message,
        results_url,
    })
}
