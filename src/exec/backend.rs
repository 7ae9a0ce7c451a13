// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The command runner talks to a `CommandExecutor` instead of spawning
//! processes itself. This makes it easy to swap in a fake executor in tests.
//!
//! - `ProcessExecutor` is the default implementation used by `kigo`. It
//!   spawns the program with `tokio::process` and waits for it to exit.
//! - Tests can provide their own `CommandExecutor` that, for example,
//!   records invocations and returns scripted outputs.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::debug;

use crate::errors::Result;
use crate::exec::command::Invocation;

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// stdout followed by stderr.
    pub output: Vec<u8>,
    pub success: bool,
    /// `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
}

/// Trait abstracting how a single command is executed.
///
/// Implementations must run the command to completion before the returned
/// future resolves. An `Err` means the command could not be launched at all.
pub trait CommandExecutor: Send {
    fn execute(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + '_>>;
}

/// Real executor backend used in production.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + '_>> {
        Box::pin(async move {
            debug!(program = %invocation.program, args = ?invocation.args, "spawning command");

            let out = Command::new(&invocation.program)
                .args(&invocation.args)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output()
                .await
                .with_context(|| format!("launching `{invocation}`"))?;

            let mut output = out.stdout;
            output.extend_from_slice(&out.stderr);

            Ok(ProcessOutput {
                output,
                success: out.status.success(),
                exit_code: out.status.code(),
            })
        })
    }
}
