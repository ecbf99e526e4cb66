//! Lifecycle tests driving the bridge flows end to end with scripted
//! collaborators: startup, reconciliation, configuration and submission.

use exercism_bridge::core::types::{LocalConfig, UpdateDecision};
use exercism_bridge::exercise::{DownloadOutcome, SubmitOutcome, download, submit};
use exercism_bridge::io::dialogs::Severity;
use exercism_bridge::io::process::CommandResult;
use exercism_bridge::startup::initialize;
use exercism_bridge::test_support::{ScriptedDialogs, ScriptedRunner, TestHome};

/// First run on a fresh machine:
///
/// 1. `which` finds the CLI, its location is cached.
/// 2. `configure -s` reports a workspace but no token.
/// 3. The user accepts "Configure", the first token is rejected, Retry, the
///    second one is accepted.
/// 4. A download and a submission follow.
///
/// A second startup then uses the cached location and finds nothing to do.
#[test]
fn first_run_configures_then_submits() {
    let home = TestHome::new().expect("home");
    let binary = home.fake_binary("exercism").expect("binary");
    let root = home
        .exercise("two-fer", &["src/lib.rs"])
        .expect("exercise");
    let ctx = home.context();
    let mut store = home.settings().expect("settings");

    let runner = ScriptedRunner::new()
        .on(
            "which exercism",
            CommandResult::success(format!("{}\n", binary.display()), ""),
        )
        .on(
            "exercism configure -s",
            CommandResult::success("", "Config dir: /c\nWorkspace /ws\n"),
        )
        .on(
            "exercism configure -t bad",
            CommandResult::failure("", "Error: invalid token", "command failed with exit code 1"),
        )
        .on("exercism configure -t good", CommandResult::success("", ""));
    let dialogs = ScriptedDialogs::new()
        .with_answer(Some(0))
        .with_input(Some("bad"))
        .with_answer(Some(0))
        .with_input(Some("good"));

    let outcome = initialize(&ctx, &runner, &dialogs, &mut store).expect("startup");
    assert!(outcome.initialized);
    let plan = outcome.plan.expect("plan");
    assert_eq!(plan.token, UpdateDecision::PromptUser);
    assert_eq!(plan.workspace, UpdateDecision::UpdateTo("/ws".to_string()));
    assert_eq!(
        home.settings().expect("reload").local_config(),
        LocalConfig {
            token: Some("good".to_string()),
            workspace: Some("/ws".to_string()),
        }
    );
    assert_eq!(
        dialogs.notices(),
        vec![
            (
                Severity::Warning,
                "Exercism: Token is not configured".to_string()
            ),
            (Severity::Error, "Invalid token.".to_string()),
        ]
    );
    runner.assert_drained().expect("startup drained");

    let line = "exercism download --exercise=two-fer --track=rust";
    let runner = ScriptedRunner::new()
        .on(line, CommandResult::success("/ws/rust/two-fer\n", "\nDownloaded to\n"))
        .on(
            "exercism submit",
            CommandResult::success("https://exercism.org/s/1\n", "Submitted\n"),
        );
    let dialogs = ScriptedDialogs::new();

    let downloaded = download(&ctx, &runner, &dialogs, line).expect("download");
    assert_eq!(
        downloaded,
        DownloadOutcome::Reported("Downloaded to /ws/rust/two-fer".to_string())
    );
    let submitted = submit(&ctx, &runner, &dialogs, &root).expect("submit");
    assert_eq!(
        submitted,
        SubmitOutcome::Submitted {
            message: "Submitted https://exercism.org/s/1".to_string(),
            results_url: Some("https://exercism.org/s/1".to_string()),
        }
    );
    assert_eq!(
        runner.calls()[1],
        format!("exercism submit {}", root.join("src/lib.rs").display())
    );
    runner.assert_drained().expect("workflow drained");

    let mut store = home.settings().expect("reload");
    let runner = ScriptedRunner::new().on(
        "exercism configure -s",
        CommandResult::success("", "Token good\nWorkspace /ws\n"),
    );
    let dialogs = ScriptedDialogs::new();
    let again = initialize(&ctx, &runner, &dialogs, &mut store).expect("second startup");
    let plan = again.plan.expect("plan");
    assert_eq!(plan.token, UpdateDecision::NoChange);
    assert_eq!(plan.workspace, UpdateDecision::NoChange);
    assert_eq!(runner.calls(), vec!["exercism configure -s"]);
    assert!(dialogs.notices().is_empty());
}

/// Without the CLI nothing past the not-found dialog runs, and a dismissed
/// dialog leaves the bridge uninitialized with an empty settings file.
#[test]
fn missing_cli_stays_uninitialized() {
    let home = TestHome::new().expect("home");
    let ctx = home.context();
    let mut store = home.settings().expect("settings");
    let runner = ScriptedRunner::new().on(
        "which exercism",
        CommandResult::failure("", "", "command failed with exit code 1"),
    );
    let dialogs = ScriptedDialogs::new();

    let outcome = initialize(&ctx, &runner, &dialogs, &mut store).expect("startup");
    assert!(!outcome.initialized);
    assert_eq!(outcome.plan, None);
    assert_eq!(runner.calls(), vec!["which exercism"]);
    assert_eq!(dialogs.notices().len(), 1);
    assert!(!home.paths.settings_path.exists());
}
