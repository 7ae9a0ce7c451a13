// src/exec/runner.rs

//! Sequential, fail-fast command runner.

use std::io::{self, Write};

use tracing::{debug, error, info};

use crate::exec::backend::CommandExecutor;
use crate::exec::command::{files_argument, resolve, Invocation};

/// How a single command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// Ran but exited non-zero (`None`: killed by a signal).
    Failed { exit_code: Option<i32> },
    /// Could not be started (not found, not executable, empty command).
    LaunchFailed(String),
}

/// Result of one command in a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// The command text as configured, before substitution.
    pub command: String,
    pub invocation: Option<Invocation>,
    /// Combined stdout + stderr.
    pub output: Vec<u8>,
    pub status: CommandStatus,
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }
}

/// Everything that happened during one command sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Outcomes of the commands that were attempted, in order.
    pub outcomes: Vec<CommandOutcome>,
    /// True if a failure stopped the sequence early.
    pub interrupted: bool,
}

/// Runs command templates one after another against a list of changed files.
///
/// The first command that fails to launch or exits non-zero stops the
/// sequence; the remaining commands of that run are not attempted.
pub struct CommandRunner<E: CommandExecutor> {
    executor: E,
}

impl<E: CommandExecutor> CommandRunner<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn run(
        &mut self,
        commands: &[String],
        changed: &[String],
        placeholder: &str,
        delimiter: &str,
    ) -> RunReport {
        info!("Running commands...");

        let files = files_argument(changed);
        let mut report = RunReport::default();

        for command in commands {
            let outcome = self.run_one(command, placeholder, &files).await;
            print_block(delimiter, &outcome);

            let failed = !outcome.is_success();
            report.outcomes.push(outcome);

            if failed {
                error!("Interrupting further execution.");
                report.interrupted = true;
                break;
            }
        }

        report
    }

    async fn run_one(&mut self, command: &str, placeholder: &str, files: &str) -> CommandOutcome {
        let Some(invocation) = resolve(command, placeholder, files) else {
            return CommandOutcome {
                command: command.to_string(),
                invocation: None,
                output: Vec::new(),
                status: CommandStatus::LaunchFailed("command is empty".to_string()),
            };
        };

        match self.executor.execute(invocation.clone()).await {
            Ok(out) => CommandOutcome {
                command: command.to_string(),
                invocation: Some(invocation),
                output: out.output,
                status: if out.success {
                    CommandStatus::Success
                } else {
                    CommandStatus::Failed {
                        exit_code: out.exit_code,
                    }
                },
            },
            Err(err) => CommandOutcome {
                command: command.to_string(),
                invocation: Some(invocation),
                output: Vec::new(),
                status: CommandStatus::LaunchFailed(format!("{err:#}")),
            },
        }
    }
}

/// One line of the per-command block, tagged with where it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockLine {
    /// Info log (stderr).
    Info(String),
    /// Captured command output (stdout).
    Output(String),
    /// Error log (stderr).
    Error(String),
}

/// Lines making up the block reported after a command ran.
///
/// Always starts with the `"{delimiter} {command}:"` header, using the
/// command as configured (placeholder not substituted). Then either the
/// captured output or `...ok` if there was none, and finally an error line
/// when the command did not succeed.
pub fn block_lines(delimiter: &str, outcome: &CommandOutcome) -> Vec<BlockLine> {
    let mut lines = vec![BlockLine::Info(format!(
        "{} {}:",
        delimiter, outcome.command
    ))];

    if outcome.output.is_empty() {
        lines.push(BlockLine::Info("...ok".to_string()));
    } else {
        let text = String::from_utf8_lossy(&outcome.output);
        lines.push(BlockLine::Output(text.trim_end().to_string()));
    }

    match &outcome.status {
        CommandStatus::Success => {}
        CommandStatus::Failed { exit_code } => {
            let code = exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string());
            lines.push(BlockLine::Error(format!(
                "Error while executing `{}`: exit code {code}",
                outcome.command
            )));
        }
        CommandStatus::LaunchFailed(reason) => {
            lines.push(BlockLine::Error(format!(
                "Error while executing `{}`: {reason}",
                outcome.command
            )));
        }
    }

    lines
}

fn print_block(delimiter: &str, outcome: &CommandOutcome) {
    for line in block_lines(delimiter, outcome) {
        match line {
            BlockLine::Info(text) => info!("{text}"),
            BlockLine::Error(text) => error!(command = %outcome.command, "{text}"),
            BlockLine::Output(text) => {
                let mut stdout = io::stdout().lock();
                if let Err(err) = writeln!(stdout, "\n{text}\n").and_then(|()| stdout.flush()) {
                    debug!(error = %err, "could not write command output to stdout");
                }
            }
        }
    }
}
