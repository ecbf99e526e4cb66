//! Test-only scripted collaborators and a throwaway bridge home.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::context::BridgeContext;
use crate::core::platform::Platform;
use crate::io::config::BridgeConfig;
use crate::io::dialogs::{Dialogs, Severity};
use crate::io::paths::{BridgePaths, manifest_path};
use crate::io::process::{CommandResult, ProcessRunner};
use crate::io::settings::SettingsStore;

/// Process runner answering from scripted results keyed by command prefix.
///
/// Each `on` call queues one result. A command consumes the first queued
/// result whose prefix matches; unmatched commands behave like a spawn
/// failure. Every command line is recorded.
#[derive(Default)]
pub struct ScriptedRunner {
    scripts: RefCell<Vec<(String, VecDeque<CommandResult>)>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, prefix: &str, result: CommandResult) -> Self {
        {
            let mut scripts = self.scripts.borrow_mut();
            match scripts.iter_mut().find(|(p, _)| p == prefix) {
                Some((_, queue)) => queue.push_back(result),
                None => scripts.push((prefix.to_string(), VecDeque::from([result]))),
            }
        }
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of recorded commands starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    /// Error if any scripted result was never consumed.
    pub fn assert_drained(&self) -> Result<()> {
        let scripts = self.scripts.borrow();
        let pending: Vec<&str> = scripts
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(prefix, _)| prefix.as_str())
            .collect();
        if pending.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("unconsumed scripted commands: {}", pending.join(", ")))
        }
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, command_line: &str) -> CommandResult {
        self.calls.borrow_mut().push(command_line.to_string());
        let mut scripts = self.scripts.borrow_mut();
        let next = scripts
            .iter_mut()
            .filter(|(prefix, _)| command_line.starts_with(prefix.as_str()))
            .find_map(|(_, queue)| queue.pop_front());
        next.unwrap_or_else(|| {
            CommandResult::spawn_failure(format!("no scripted result for `{command_line}`"))
        })
    }
}

/// Dialogs answering from queues; an empty queue means "dismissed".
#[derive(Default)]
pub struct ScriptedDialogs {
    inputs: RefCell<VecDeque<Option<String>>>,
    directories: RefCell<VecDeque<Option<PathBuf>>>,
    files: RefCell<VecDeque<Option<PathBuf>>>,
    answers: RefCell<VecDeque<Option<usize>>>,
    picks: RefCell<VecDeque<Option<usize>>>,
    prompts: RefCell<Vec<String>>,
    notices: RefCell<Vec<(Severity, String)>>,
    progress: RefCell<Vec<String>>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(self, value: Option<&str>) -> Self {
        self.inputs.borrow_mut().push_back(value.map(str::to_string));
        self
    }

    pub fn with_directory(self, value: Option<&Path>) -> Self {
        self.directories
            .borrow_mut()
            .push_back(value.map(Path::to_path_buf));
        self
    }

    pub fn with_file(self, value: Option<&Path>) -> Self {
        self.files.borrow_mut().push_back(value.map(Path::to_path_buf));
        self
    }

    /// Queue the action chosen on the next notice that offers actions.
    pub fn with_answer(self, value: Option<usize>) -> Self {
        self.answers.borrow_mut().push_back(value);
        self
    }

    pub fn with_pick(self, value: Option<usize>) -> Self {
        self.picks.borrow_mut().push_back(value);
        self
    }

    /// Prompts shown so far (text, directory and file prompts).
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn notices(&self) -> Vec<(Severity, String)> {
        self.notices.borrow().clone()
    }

    pub fn progress(&self) -> Vec<String> {
        self.progress.borrow().clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn input_text(&self, prompt: &str) -> Result<Option<String>> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.inputs.borrow_mut().pop_front().flatten())
    }

    fn pick_directory(&self, prompt: &str) -> Result<Option<PathBuf>> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.directories.borrow_mut().pop_front().flatten())
    }

    fn pick_file(&self, prompt: &str) -> Result<Option<PathBuf>> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.files.borrow_mut().pop_front().flatten())
    }

    fn notify(&self, severity: Severity, message: &str, actions: &[&str]) -> Result<Option<usize>> {
        self.notices
            .borrow_mut()
            .push((severity, message.to_string()));
        if actions.is_empty() {
            return Ok(None);
        }
        Ok(self.answers.borrow_mut().pop_front().flatten())
    }

    fn pick_one(&self, _prompt: &str, _items: &[&str]) -> Result<Option<usize>> {
        Ok(self.picks.borrow_mut().pop_front().flatten())
    }

    fn with_progress<T, F: FnOnce() -> T>(&self, message: &str, task: F) -> T {
        self.progress.borrow_mut().push(message.to_string());
        task()
    }
}

/// Temporary bridge home plus an exercise directory.
pub struct TestHome {
    temp: TempDir,
    pub paths: BridgePaths,
}

impl TestHome {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp home")?;
        let paths = BridgePaths::new(temp.path().join("home"));
        Ok(Self { temp, paths })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Linux context with default configuration.
    pub fn context(&self) -> BridgeContext {
        BridgeContext::new(Platform::Linux, BridgeConfig::default())
    }

    pub fn settings(&self) -> Result<SettingsStore> {
        SettingsStore::load(&self.paths.settings_path)
    }

    /// Create a fake executable and return its path.
    pub fn fake_binary(&self, name: &str) -> Result<PathBuf> {
        let path = self.temp.path().join("bin").join(name);
        write_file(&path, "#!/bin/sh\n")?;
        Ok(path)
    }

    /// Create an exercise directory whose manifest lists `solution`.
    pub fn exercise(&self, name: &str, solution: &[&str]) -> Result<PathBuf> {
        let root = self.temp.path().join("exercises").join(name);
        let manifest = serde_json::json!({
            "authors": ["tester"],
            "files": { "solution": solution, "test": ["tests/test.txt"] },
        });
        write_file(&manifest_path(&root), &serde_json::to_string_pretty(&manifest)?)?;
        for file in solution {
            write_file(&root.join(file), "")?;
        }
        Ok(root)
    }

    /// Plain directory without a manifest.
    pub fn plain_dir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.temp.path().join(name);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(dir)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}
