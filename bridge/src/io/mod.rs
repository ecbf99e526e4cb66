//! Side-effecting operations: processes, files and the terminal.

pub mod config;
pub mod dialogs;
pub mod fs;
pub mod locator;
pub mod manifest;
pub mod paths;
pub mod process;
pub mod settings;
