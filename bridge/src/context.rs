//! Process-wide context built once at startup and passed to every flow.

use crate::core::commands::{CliCommands, open_command};
use crate::core::platform::Platform;
use crate::io::config::BridgeConfig;

/// Platform table, configuration and command builders.
#[derive(Debug, Clone)]
pub struct BridgeContext {
    pub platform: Platform,
    pub config: BridgeConfig,
    pub commands: CliCommands,
}

impl BridgeContext {
    pub fn new(platform: Platform, config: BridgeConfig) -> Self {
        let commands = CliCommands::new(config.cli.program.clone());
        Self {
            platform,
            config,
            commands,
        }
    }

    pub fn program(&self) -> &str {
        self.commands.program()
    }

    /// Command line opening `target` with the platform's default handler.
    pub fn open(&self, target: &str) -> String {
        open_command(self.platform.open_command(), target)
    }
}
