//! Canonical file locations under the bridge home directory.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};

/// Environment variable overriding the bridge home directory.
pub const HOME_ENV: &str = "EXERCISM_BRIDGE_HOME";

/// Relative location of the per-exercise manifest inside a workspace root.
pub const MANIFEST_RELATIVE_PATH: &str = ".exercism/config.json";

/// All canonical paths within the bridge home.
#[derive(Debug, Clone)]
pub struct BridgePaths {
    pub home: PathBuf,
    pub config_path: PathBuf,
    pub settings_path: PathBuf,
}

impl BridgePaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            config_path: home.join("config.toml"),
            settings_path: home.join("settings.json"),
            home,
        }
    }
}

/// Pick the bridge home: the explicit flag, then `EXERCISM_BRIDGE_HOME`,
/// then `<config dir>/exercism-bridge`.
pub fn resolve_home(flag: Option<&Path>, env_value: Option<&str>) -> Result<PathBuf> {
    if let Some(flag) = flag {
        return Ok(flag.to_path_buf());
    }
    if let Some(value) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    let base = dirs::config_dir().ok_or_else(|| anyhow!("no config directory for this user"))?;
    Ok(base.join("exercism-bridge"))
}

/// Manifest path for a workspace root.
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_RELATIVE_PATH)
}
