// src/engine/core.rs

//! Pure watch-loop state machine.
//!
//! The core decides what a detection result means for the cycle: discard it
//! (baseline), do nothing, or run the commands. It has no timers, no
//! filesystem and no processes, so it can be tested synchronously.

use crate::engine::{CycleAction, LoopPhase};
use crate::types::ChangeSet;

#[derive(Debug, Default)]
pub struct WatchState {
    phase: LoopPhase,
    cycles: u64,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Number of completed detection cycles, baseline included.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Feed the ChangeSet of one completed detection cycle.
    ///
    /// The first call always returns [`CycleAction::DiscardBaseline`] and
    /// moves the state to [`LoopPhase::Steady`], whatever the ChangeSet holds.
    pub fn on_cycle(&mut self, changes: ChangeSet) -> CycleAction {
        self.cycles += 1;

        match self.phase {
            LoopPhase::Startup => {
                self.phase = LoopPhase::Steady;
                CycleAction::DiscardBaseline {
                    tracked: changes.len(),
                }
            }
            LoopPhase::Steady if changes.is_empty() => CycleAction::Idle,
            LoopPhase::Steady => CycleAction::RunCommands(changes),
        }
    }
}
