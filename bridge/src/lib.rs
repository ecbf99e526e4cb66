//! Bridge between an editor-style front-end and the Exercism CLI.
//!
//! The crate drives the external `exercism` executable: it locates it, keeps
//! a cached copy of its configuration in sync, runs the interactive token and
//! workspace flows, and downloads or submits exercises. The architecture keeps
//! a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (platform table, command
//!   builders, `configure -s` parsing, reconciliation decisions). No I/O.
//! - **[`io`]**: Side-effecting operations (process execution, filesystem,
//!   settings, terminal dialogs). Isolated behind traits to enable fakes in
//!   tests.
//!
//! Orchestration modules ([`startup`], [`reconcile`], [`configure`],
//! [`exercise`], [`menu`]) coordinate core logic with I/O to implement the
//! CLI commands.

pub mod configure;
pub mod context;
pub mod core;
pub mod exercise;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod menu;
pub mod reconcile;
pub mod startup;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
