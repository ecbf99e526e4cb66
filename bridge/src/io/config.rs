//! Bridge configuration stored in `config.toml` under the bridge home.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::io::fs::write_atomic;

/// Bridge configuration (TOML).
///
/// Edited by humans; missing fields fall back to defaults that match the
/// stock Exercism CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    pub cli: CliConfig,
    pub process: ProcessConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    /// Executable name looked up on `PATH` and used in every command line.
    pub program: String,

    /// Opened when the CLI cannot be found and the user asks how to install it.
    pub install_url: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            program: "exercism".to_string(),
            install_url: "https://exercism.org/cli-walkthrough".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProcessConfig {
    /// Kill CLI invocations running longer than this. Unset means wait forever.
    pub timeout_secs: Option<u64>,
}

impl ProcessConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        let program = self.cli.program.trim();
        if program.is_empty() {
            return Err(anyhow!("cli.program must be non-empty"));
        }
        if self.cli.program.chars().any(char::is_whitespace) {
            return Err(anyhow!("cli.program must not contain whitespace"));
        }
        if self.cli.install_url.trim().is_empty() {
            return Err(anyhow!("cli.install_url must be non-empty"));
        }
        if self.process.timeout_secs == Some(0) {
            return Err(anyhow!("process.timeout_secs must be > 0 when set"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BridgeConfig::default()`.
pub fn load_config(path: &Path) -> Result<BridgeConfig> {
    if !path.exists() {
        let cfg = BridgeConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BridgeConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &BridgeConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}
