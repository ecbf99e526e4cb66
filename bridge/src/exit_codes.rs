//! Stable exit codes for bridge CLI commands.

/// Command completed (including dismissed prompts and rejected input).
pub const OK: i32 = 0;
/// Invalid configuration, unreadable settings or another error.
pub const FAILED: i32 = 1;
/// `init` could not find the CLI executable.
pub const NOT_FOUND: i32 = 2;
