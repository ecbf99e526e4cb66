//! Locate the CLI executable on `PATH`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::core::commands::lookup_command;
use crate::core::platform::Platform;
use crate::core::types::ToolLocation;
use crate::io::process::ProcessRunner;

/// Resolve `program` with the platform lookup command.
///
/// Returns `None` when the lookup fails or when the reported path is not a
/// regular file (a stale `PATH` entry is not trusted).
#[instrument(skip_all, fields(program = %program))]
pub fn locate<R: ProcessRunner>(
    runner: &R,
    platform: Platform,
    program: &str,
) -> Option<ToolLocation> {
    let command = lookup_command(platform.lookup_command(), program);
    let result = runner.run(&command);
    if !result.succeeded {
        debug!(command = %command, "lookup command failed");
        return None;
    }

    // `where` lists every match, one per line; the first one is what the shell would run.
    let reported = result
        .stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())?;

    match verify(Path::new(reported)) {
        Some(location) => {
            info!(path = %location.path.display(), "located cli");
            Some(location)
        }
        None => {
            warn!(path = reported, "lookup reported a path that is not a file");
            None
        }
    }
}

/// Confirm that `path` still points at a regular file.
///
/// Symlinks are followed, so a dangling link is rejected.
pub fn verify(path: &Path) -> Option<ToolLocation> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(ToolLocation {
            path: PathBuf::from(path),
            verified_as_file: true,
        }),
        _ => None,
    }
}
