//! Persisted key-value settings (`settings.json` under the bridge home).
//!
//! Mirrors the CLI's token and workspace so the front-end can show them
//! without spawning the CLI, and caches the located executable path.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::types::{ConfigField, LocalConfig};
use crate::io::fs::write_atomic;

/// On-disk settings document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub token: Option<String>,
    pub workspace: Option<String>,
    /// Last verified location of the CLI executable.
    pub exercism_path: Option<PathBuf>,
}

impl Settings {
    pub fn local_config(&self) -> LocalConfig {
        LocalConfig {
            token: self.token.clone(),
            workspace: self.workspace.clone(),
        }
    }
}

/// Settings bound to their file; every mutation is written through.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load settings, starting empty when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = if path.exists() {
            debug!(path = %path.display(), "loading settings");
            let contents = fs::read_to_string(path)
                .with_context(|| format!("read settings {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("parse settings {}", path.display()))?
        } else {
            Settings::default()
        };
        Ok(Self {
            path: path.to_path_buf(),
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn local_config(&self) -> LocalConfig {
        self.settings.local_config()
    }

    /// Store a new value for `field` and persist it.
    pub fn set_field(&mut self, field: ConfigField, value: &str) -> Result<()> {
        let slot = match field {
            ConfigField::Token => &mut self.settings.token,
            ConfigField::Workspace => &mut self.settings.workspace,
        };
        *slot = Some(value.to_string());
        // Tokens are credentials; only the key is logged.
        info!(key = field.key(), "settings updated");
        self.save()
    }

    pub fn set_exercism_path(&mut self, path: &Path) -> Result<()> {
        self.settings.exercism_path = Some(path.to_path_buf());
        info!(path = %path.display(), "cached cli location");
        self.save()
    }

    pub fn clear_exercism_path(&mut self) -> Result<()> {
        if self.settings.exercism_path.take().is_some() {
            debug!("cleared stale cli location");
            self.save()?;
        }
        Ok(())
    }

    /// Atomically write settings to disk (temp file + rename).
    fn save(&self) -> Result<()> {
        let mut buf = serde_json::to_string_pretty(&self.settings).context("serialize settings")?;
        buf.push('\n');
        write_atomic(&self.path, &buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn missing_file_loads_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::load(&temp.path().join("settings.json")).expect("load");
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn updates_are_written_through() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("home").join("settings.json");
        let mut store = SettingsStore::load(&path).expect("load");
        store.set_field(ConfigField::Token, "abc123").expect("token");
        store
            .set_field(ConfigField::Workspace, "/home/u/ex")
            .expect("workspace");
        store
            .set_exercism_path(Path::new("/usr/bin/exercism"))
            .expect("path");

        let reloaded = SettingsStore::load(&path).expect("reload");
        assert_eq!(
            reloaded.local_config(),
            LocalConfig {
                token: Some("abc123".to_string()),
                workspace: Some("/home/u/ex".to_string()),
            }
        );
        assert_eq!(
            reloaded.settings().exercism_path.as_deref(),
            Some(Path::new("/usr/bin/exercism"))
        );
    }

    #[test]
    fn document_uses_stable_keys() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("settings.json");
        let mut store = SettingsStore::load(&path).expect("load");
        store.set_field(ConfigField::Token, "t").expect("token");

        let raw: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        let mut keys: Vec<&str> = raw
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["exercism_path", "token", "workspace"]);
    }

    #[test]
    fn clearing_absent_path_does_not_create_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("settings.json");
        let mut store = SettingsStore::load(&path).expect("load");
        store.clear_exercism_path().expect("clear");
        assert!(!path.exists());
    }
}
