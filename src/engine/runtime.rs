// src/engine/runtime.rs

use std::fmt;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::WatchConfig;
use crate::errors::Result;
use crate::exec::{CommandExecutor, CommandRunner};
use crate::watch::ChangeDetector;

use super::core::WatchState;
use super::{CycleAction, CycleReport};

/// Sending half of the shutdown signal.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Ask the loop to stop at its next cycle boundary.
    pub fn request(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a shutdown handle and the receiver a [`WatchLoop`] listens on.
pub fn shutdown_channel() -> (ShutdownHandle, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, rx)
}

/// Polling loop: sleep, detect, maybe run commands, repeat.
///
/// This is the IO shell around [`WatchState`]. It owns the detector (and so
/// the hash table) and the command runner; nothing else touches either.
pub struct WatchLoop<E: CommandExecutor> {
    config: WatchConfig,
    detector: ChangeDetector,
    runner: CommandRunner<E>,
    state: WatchState,
    shutdown_rx: watch::Receiver<bool>,
}

impl<E: CommandExecutor> fmt::Debug for WatchLoop<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchLoop")
            .field("root", &self.config.root)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<E: CommandExecutor> WatchLoop<E> {
    pub fn new(
        config: WatchConfig,
        detector: ChangeDetector,
        executor: E,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            detector,
            runner: CommandRunner::new(executor),
            state: WatchState::new(),
            shutdown_rx,
        }
    }

    pub fn state(&self) -> &WatchState {
        &self.state
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    fn shutdown_requested(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Main loop. Runs until shutdown is requested or detection fails.
    ///
    /// The sleep itself is not interrupted; a shutdown request is noticed
    /// right after it, before the next walk starts.
    pub async fn run(mut self) -> Result<()> {
        info!(
            root = %self.config.root.display(),
            interval_secs = self.config.interval.as_secs(),
            commands = self.config.commands.len(),
            "kigo watch loop started"
        );

        loop {
            tokio::time::sleep(self.config.interval).await;

            if self.shutdown_requested() {
                info!("shutdown requested; stopping watch loop");
                break;
            }

            self.run_cycle().await?;
        }

        info!(cycles = self.state.cycles(), "watch loop exiting");
        Ok(())
    }

    /// One detection cycle plus whatever it triggers, without the sleep.
    ///
    /// Detection errors are returned as-is; command failures are not errors
    /// and show up in the returned report.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let changes = self.detector.detect(&self.config)?;

        match self.state.on_cycle(changes) {
            CycleAction::DiscardBaseline { tracked } => {
                info!(tracked, "baseline built; watching for changes");
                Ok(CycleReport::Baseline { tracked })
            }
            CycleAction::Idle => {
                debug!("no changes");
                Ok(CycleReport::Idle)
            }
            CycleAction::RunCommands(changes) => {
                info!(count = changes.len(), files = ?changes, "detected changes");

                let report = self
                    .runner
                    .run(
                        &self.config.commands,
                        &changes,
                        &self.config.placeholder,
                        &self.config.delimiter,
                    )
                    .await;

                if report.interrupted {
                    warn!(
                        ran = report.outcomes.len(),
                        total = self.config.commands.len(),
                        "command sequence interrupted"
                    );
                }

                Ok(CycleReport::Ran { changes, report })
            }
        }
    }
}
