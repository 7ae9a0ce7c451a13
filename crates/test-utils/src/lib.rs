pub mod builders;
pub mod fake_executor;

use std::future::Future;
use std::time::Duration;

use kigo::logging::{effective_level, LOG_ENV_VAR};
use tracing_subscriber::fmt;

/// Upper bound for any single async test; the watch loop sleeps at least one
/// second per cycle, so this leaves room for a few cycles.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Install a per-test log subscriber at the level `kigo` itself would pick
/// from `KIGO_LOG` (e.g. `KIGO_LOG=debug cargo test`).
///
/// Output goes through the test writer, so it only shows for failing tests
/// unless `--nocapture` is passed. Calling it more than once is harmless.
pub fn init_tracing() {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let level = effective_level(None, env_value.as_deref());

    let _ = fmt()
        .with_max_level(level)
        .with_test_writer()
        .with_target(true)
        .try_init();
}

/// Await `f`, failing the test if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .unwrap_or_else(|_| panic!("test timed out after {TEST_TIMEOUT:?}"))
}
