// src/engine/mod.rs

//! Orchestration engine for kigo.
//!
//! This module ties together:
//! - the change detector (what changed since the last poll)
//! - the command runner (what to do about it)
//! - the polling loop and its shutdown checkpoint
//!
//! The pure phase/decision logic lives in [`core`]; the async shell that
//! sleeps, walks and spawns is implemented in [`runtime`].

use crate::exec::RunReport;
use crate::types::ChangeSet;

/// Where the watch loop is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopPhase {
    /// No detection cycle has completed yet; the next one builds the
    /// baseline hash table.
    #[default]
    Startup,
    /// Baseline is in place; changes trigger the commands.
    Steady,
}

/// What the core decided to do with one cycle's ChangeSet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleAction {
    /// First cycle: everything looks new, so nothing is run.
    DiscardBaseline { tracked: usize },
    /// Nothing changed.
    Idle,
    /// Run the command sequence for these paths.
    RunCommands(ChangeSet),
}

/// Observable result of one full cycle of the async loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleReport {
    Baseline { tracked: usize },
    Idle,
    Ran { changes: ChangeSet, report: RunReport },
}

pub mod core;
pub mod runtime;

pub use self::core::WatchState;
pub use runtime::{shutdown_channel, ShutdownHandle, WatchLoop};
