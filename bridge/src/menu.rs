//! Options quick-pick dispatching to the individual actions.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::configure::{configure_token, configure_workspace};
use crate::context::BridgeContext;
use crate::exercise::{prompt_and_download, submit};
use crate::io::dialogs::Dialogs;
use crate::io::process::ProcessRunner;
use crate::io::settings::SettingsStore;

/// Menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Download,
    Submit,
    ConfigureToken,
    ConfigureWorkspace,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::Download,
        MenuAction::Submit,
        MenuAction::ConfigureToken,
        MenuAction::ConfigureWorkspace,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Download => "Download exercise",
            MenuAction::Submit => "Submit solution",
            MenuAction::ConfigureToken => "Configure token",
            MenuAction::ConfigureWorkspace => "Configure workspace",
        }
    }
}

/// Show the menu and run the chosen action. Returns `None` when dismissed.
///
/// `root` is the exercise directory used by "Submit solution".
pub fn show_menu<R: ProcessRunner, D: Dialogs>(
    ctx: &BridgeContext,
    runner: &R,
    dialogs: &D,
    store: &mut SettingsStore,
    root: &Path,
) -> Result<Option<MenuAction>> {
    let labels = MenuAction::ALL.map(MenuAction::label);
    let Some(index) = dialogs.pick_one("Exercism", &labels)? else {
        debug!("menu dismissed");
        return Ok(None);
    };
    let Some(&action) = MenuAction::ALL.get(index) else {
        return Ok(None);
    };
    debug!(action = action.label(), "menu action chosen");

    match action {
        MenuAction::Download => {
            prompt_and_download(ctx, runner, dialogs)?;
        }
        MenuAction::Submit => {
            submit(ctx, runner, dialogs, root)?;
        }
        MenuAction::ConfigureToken => {
            configure_token(ctx, runner, dialogs, store)?;
        }
        MenuAction::ConfigureWorkspace => {
            configure_workspace(ctx, runner, dialogs, store)?;
        }
    }
    Ok(Some(action))
}
