//! Deterministic, pure logic shared by the bridge.
//!
//! Core modules must be free of I/O side effects. They build command lines,
//! parse CLI output and compute reconciliation decisions.

pub mod commands;
pub mod platform;
pub mod reconcile;
pub mod types;
