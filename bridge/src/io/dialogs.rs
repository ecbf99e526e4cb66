//! Presentation seam: prompts, notices and progress indication.
//!
//! Flows never talk to the terminal directly. They go through [`Dialogs`],
//! implemented by [`TerminalDialogs`] for the binary and by scripted fakes in
//! tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dialoguer::console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use tracing::debug;

/// How prominently a notice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// User interaction required by the flows.
///
/// Every prompt returns `None` when the user dismisses it.
pub trait Dialogs {
    /// Ask for free text.
    fn input_text(&self, prompt: &str) -> Result<Option<String>>;

    /// Ask for a single existing directory.
    fn pick_directory(&self, prompt: &str) -> Result<Option<PathBuf>>;

    /// Ask for a single existing file.
    fn pick_file(&self, prompt: &str) -> Result<Option<PathBuf>>;

    /// Show a message with optional actions; returns the chosen action index.
    fn notify(&self, severity: Severity, message: &str, actions: &[&str]) -> Result<Option<usize>>;

    /// Quick-pick among `items`.
    fn pick_one(&self, prompt: &str, items: &[&str]) -> Result<Option<usize>>;

    /// Run `task` while a non-cancellable progress message is shown.
    fn with_progress<T, F: FnOnce() -> T>(&self, message: &str, task: F) -> T;
}

/// Interactive terminal implementation backed by `dialoguer`.
#[derive(Default)]
pub struct TerminalDialogs {
    theme: ColorfulTheme,
}

impl TerminalDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    fn pick_path(&self, prompt: &str, want_dir: bool) -> Result<Option<PathBuf>> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    return Ok(());
                }
                let path = Path::new(trimmed);
                match (want_dir, path.is_dir(), path.is_file()) {
                    (true, true, _) | (false, _, true) => Ok(()),
                    (true, _, _) => Err(format!("{trimmed} is not a directory")),
                    (false, _, _) => Err(format!("{trimmed} is not a file")),
                }
            })
            .interact_text()
            .context("read path")?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let path = std::path::absolute(trimmed)
            .with_context(|| format!("resolve {trimmed}"))?;
        Ok(Some(path))
    }
}

impl Dialogs for TerminalDialogs {
    fn input_text(&self, prompt: &str) -> Result<Option<String>> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("read input")?;
        Ok(Some(value.trim().to_string()))
    }

    fn pick_directory(&self, prompt: &str) -> Result<Option<PathBuf>> {
        self.pick_path(prompt, true)
    }

    fn pick_file(&self, prompt: &str) -> Result<Option<PathBuf>> {
        self.pick_path(prompt, false)
    }

    fn notify(&self, severity: Severity, message: &str, actions: &[&str]) -> Result<Option<usize>> {
        let styled = match severity {
            Severity::Info => style(message),
            Severity::Warning => style(message).yellow(),
            Severity::Error => style(message).red(),
        };
        if actions.is_empty() {
            match severity {
                Severity::Info => println!("{styled}"),
                Severity::Warning | Severity::Error => eprintln!("{styled}"),
            }
            return Ok(None);
        }
        let choice = Select::with_theme(&self.theme)
            .with_prompt(styled.to_string())
            .items(actions)
            .default(0)
            .interact_opt()
            .context("read choice")?;
        debug!(?choice, "notice answered");
        Ok(choice)
    }

    fn pick_one(&self, prompt: &str, items: &[&str]) -> Result<Option<usize>> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .context("read selection")
    }

    fn with_progress<T, F: FnOnce() -> T>(&self, message: &str, task: F) -> T {
        eprintln!("{}", style(message).dim());
        task()
    }
}
