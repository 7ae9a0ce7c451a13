use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use kigo::errors::Result;
use kigo::exec::{CommandExecutor, Invocation, ProcessOutput};

/// A fake executor that:
/// - records every invocation it is asked to run
/// - succeeds with empty output unless told otherwise per program name.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<Invocation>>>,
    failing: HashSet<String>,
    missing: HashSet<String>,
    outputs: HashMap<String, Vec<u8>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded invocations; stays valid after the
    /// executor is moved into a runner or loop.
    pub fn executed(&self) -> Arc<Mutex<Vec<Invocation>>> {
        Arc::clone(&self.executed)
    }

    /// `program` runs but exits with status 1.
    pub fn failing(mut self, program: &str) -> Self {
        self.failing.insert(program.to_string());
        self
    }

    /// `program` cannot be launched.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    /// `program` prints `output`.
    pub fn with_output(mut self, program: &str, output: &str) -> Self {
        self.outputs
            .insert(program.to_string(), output.as_bytes().to_vec());
        self
    }
}

impl CommandExecutor for FakeExecutor {
    fn execute(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + '_>> {
        Box::pin(async move {
            tracing::debug!(invocation = %invocation, "fake executor recorded invocation");
            self.executed.lock().unwrap().push(invocation.clone());

            if self.missing.contains(&invocation.program) {
                return Err(anyhow::anyhow!("No such file or directory: {}", invocation.program).into());
            }

            let success = !self.failing.contains(&invocation.program);
            Ok(ProcessOutput {
                output: self
                    .outputs
                    .get(&invocation.program)
                    .cloned()
                    .unwrap_or_default(),
                success,
                exit_code: Some(if success { 0 } else { 1 }),
            })
        })
    }
}
