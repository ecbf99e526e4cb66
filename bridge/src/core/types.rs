//! Shared deterministic types for the bridge core.
//!
//! These types define stable contracts between the locator, the reconciler,
//! the configurator flows and the exercise workflows. They carry no I/O.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Verified location of the CLI executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolLocation {
    pub path: PathBuf,
    /// True when the path was confirmed to be a regular file.
    pub verified_as_file: bool,
}

/// Configuration reported by the CLI itself. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    pub token: Option<String>,
    pub workspace: Option<String>,
}

/// Cached mirror of the CLI configuration held by the settings store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    pub token: Option<String>,
    pub workspace: Option<String>,
}

/// What to do with one cached field after comparing it to the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    /// Cache already matches the CLI.
    NoChange,
    /// CLI reports a different value; the cache must follow it.
    UpdateTo(String),
    /// CLI has no value; the user has to supply one.
    PromptUser,
}

/// Per-field decisions produced by one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub token: UpdateDecision,
    pub workspace: UpdateDecision,
}

/// Settings field touched by reconciliation and the configurator flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Token,
    Workspace,
}

impl ConfigField {
    /// Key under which the field is persisted.
    pub fn key(self) -> &'static str {
        match self {
            ConfigField::Token => "token",
            ConfigField::Workspace => "workspace",
        }
    }

    /// Label the CLI prints in front of the value in `configure -s` output.
    pub fn label(self) -> &'static str {
        match self {
            ConfigField::Token => "Token",
            ConfigField::Workspace => "Workspace",
        }
    }
}
