//! Reader for the per-exercise `.exercism/config.json` manifest.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::debug;

use crate::io::paths::manifest_path;

/// Solution files listed by an exercise manifest, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionManifest {
    pub solution_file_paths: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    files: RawFiles,
}

#[derive(Debug, Deserialize)]
struct RawFiles {
    solution: Vec<String>,
}

impl SolutionManifest {
    /// Parse the manifest JSON. Fields other than `files.solution` are ignored.
    pub fn parse(raw: &str) -> Result<Self> {
        let parsed: RawManifest = serde_json::from_str(raw).context("parse exercise manifest")?;
        if parsed.files.solution.is_empty() {
            return Err(anyhow!("exercise manifest lists no solution files"));
        }
        Ok(Self {
            solution_file_paths: parsed.files.solution,
        })
    }

    /// Absolute solution paths inside `root`, in manifest order.
    pub fn resolve(&self, root: &Path) -> Vec<PathBuf> {
        self.solution_file_paths
            .iter()
            .map(|relative| root.join(relative))
            .collect()
    }
}

/// Load the manifest of the exercise rooted at `root`.
///
/// Returns `Ok(None)` when `root` is not an exercise directory.
pub fn load_manifest(root: &Path) -> Result<Option<SolutionManifest>> {
    let path = manifest_path(root);
    if !path.is_file() {
        debug!(path = %path.display(), "no exercise manifest");
        return Ok(None);
    }
    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let manifest =
        SolutionManifest::parse(&raw).with_context(|| format!("load {}", path.display()))?;
    debug!(files = manifest.solution_file_paths.len(), "loaded exercise manifest");
    Ok(Some(manifest))
}
