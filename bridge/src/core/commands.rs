//! Command-line builders for the CLI subcommands the bridge invokes.
//!
//! Arguments are interpolated verbatim: nothing is quoted or escaped, so a
//! value containing shell metacharacters reaches the shell as-is.

use std::path::Path;

/// Builds CLI command lines for a configured program name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliCommands {
    program: String,
}

impl CliCommands {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn show_configuration(&self) -> String {
        format!("{} configure -s", self.program)
    }

    pub fn configure_token(&self, token: &str) -> String {
        format!("{} configure -t {token}", self.program)
    }

    pub fn configure_workspace(&self, workspace: &Path) -> String {
        format!("{} configure -w {}", self.program, workspace.display())
    }

    /// Prefix a user-entered download command must start with.
    pub fn download_prefix(&self) -> String {
        format!("{} download ", self.program)
    }

    /// True when `input` is a download invocation of this CLI.
    pub fn is_download_command(&self, input: &str) -> bool {
        input.starts_with(&self.download_prefix())
    }

    /// `submit` followed by the given files, space-separated, in order.
    pub fn submit<P: AsRef<Path>>(&self, files: &[P]) -> String {
        let joined: Vec<String> = files
            .iter()
            .map(|file| file.as_ref().display().to_string())
            .collect();
        format!("{} submit {}", self.program, joined.join(" "))
    }
}

/// `<lookup> <program>`, e.g. `which exercism`.
pub fn lookup_command(lookup: &str, program: &str) -> String {
    format!("{lookup} {program}")
}

/// `<open> <target>`, e.g. `xdg-open https://...`.
pub fn open_command(open: &str, target: &str) -> String {
    format!("{open} {target}")
}
