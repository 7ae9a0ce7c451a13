// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the configured commands
//! after a change, one at a time, and reporting how each one ended.
//!
//! - [`command`] turns a command template into a program + args.
//! - [`runner`] owns the sequential, fail-fast command loop.
//! - [`backend`] provides the `CommandExecutor` trait and the concrete
//!   `ProcessExecutor` used in production, which tests can replace with a
//!   fake implementation.

pub mod backend;
pub mod command;
pub mod runner;

pub use backend::{CommandExecutor, ProcessExecutor, ProcessOutput};
pub use command::{resolve, Invocation};
pub use runner::{block_lines, BlockLine, CommandOutcome, CommandRunner, CommandStatus, RunReport};
