//! Shell command execution with captured output.
//!
//! Every CLI invocation goes through [`ProcessRunner`]. A non-zero exit is
//! data, not an error: it is reported through [`CommandResult`]. Only a
//! failure to launch (or drain) the child leaves stdout/stderr empty.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// Outcome of one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
    pub error_message: Option<String>,
}

impl CommandResult {
    /// Successful exit with the given output.
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            stdout: stdout.into(),
            stderr: stderr.into(),
            error_message: None,
        }
    }

    /// Process ran but did not succeed.
    pub fn failure(
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            succeeded: false,
            stdout: stdout.into(),
            stderr: stderr.into(),
            error_message: Some(message.into()),
        }
    }

    /// Process could not be launched at all.
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        Self::failure("", "", message)
    }

    /// `<trimmed stderr> <trimmed stdout>`, the text the CLI shows users.
    pub fn combined_output(&self) -> String {
        format!("{} {}", self.stderr.trim(), self.stdout.trim())
            .trim()
            .to_string()
    }

    /// Message to surface when the command did not succeed.
    pub fn failure_message(&self) -> String {
        match &self.error_message {
            Some(message) => message.clone(),
            None => self.combined_output(),
        }
    }
}

/// Executes command lines through the platform shell.
pub trait ProcessRunner {
    fn run(&self, command_line: &str) -> CommandResult;
}

/// Runs commands with `sh -c` (Unix) or `cmd /C` (Windows).
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the child if it runs longer than `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl ProcessRunner for ShellRunner {
    #[instrument(skip_all, fields(timeout_secs = self.timeout.map(|t| t.as_secs())))]
    fn run(&self, command_line: &str) -> CommandResult {
        let captured = match run_shell(command_line, self.timeout) {
            Ok(captured) => captured,
            Err(err) => {
                error!(err = %err, "failed to run command");
                return CommandResult::spawn_failure(format!("{err:#}"));
            }
        };

        let stdout = String::from_utf8_lossy(&captured.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&captured.stderr).into_owned();

        if captured.timed_out {
            let message = format!("command timed out: {command_line}");
            return CommandResult::failure(stdout, stderr, message);
        }
        if !captured.status.success() {
            warn!(exit_code = ?captured.status.code(), "command failed");
            let mut message = match captured.status.code() {
                Some(code) => format!("command failed with exit code {code}: {command_line}"),
                None => format!("command terminated by signal: {command_line}"),
            };
            if !stderr.trim().is_empty() {
                message.push('\n');
                message.push_str(stderr.trim());
            }
            return CommandResult::failure(stdout, stderr, message);
        }

        debug!("command succeeded");
        CommandResult::success(stdout, stderr)
    }
}

struct Captured {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    timed_out: bool,
}

fn shell_command(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command_line);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        // Own process group, so a timeout can take down compound command lines.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        cmd
    }
}

/// Kill the shell and everything it started.
#[cfg(unix)]
fn kill_tree(child: &mut Child) -> Result<()> {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let pgid = i32::try_from(child.id()).context("child pid out of range")?;
    if let Err(err) = killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        debug!(err = %err, "killpg failed, killing shell only");
        child.kill().context("kill command")?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) -> Result<()> {
    child.kill().context("kill command")
}

/// Spawn the shell and drain both pipes concurrently so a chatty child
/// cannot deadlock on a full pipe.
fn run_shell(command_line: &str, timeout: Option<Duration>) -> Result<Captured> {
    let mut cmd = shell_command(command_line);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!("spawning shell");
    let mut child = cmd.spawn().context("spawn shell")?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_handle = thread::spawn(move || read_stream(stdout));
    let stderr_handle = thread::spawn(move || read_stream(stderr));

    let mut timed_out = false;
    let status = match timeout {
        None => child.wait().context("wait for command")?,
        Some(limit) => match child.wait_timeout(limit).context("wait for command")? {
            Some(status) => status,
            None => {
                warn!(timeout_secs = limit.as_secs(), "command timed out, killing");
                timed_out = true;
                kill_tree(&mut child)?;
                child.wait().context("wait command after kill")?
            }
        },
    };

    let stdout = join_output(stdout_handle).context("join stdout")?;
    let stderr = join_output(stderr_handle).context("join stderr")?;

    debug!(exit_code = ?status.code(), timed_out, "command finished");
    Ok(Captured {
        status,
        stdout,
        stderr,
        timed_out,
    })
}

fn join_output(handle: thread::JoinHandle<Result<Vec<u8>>>) -> Result<Vec<u8>> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

fn read_stream<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).context("read output")?;
    Ok(buf)
}
