//! Shared helpers for the `stepdag` test suites: log capture, a timeout
//! guard for async tests, and builders for graphs and configs.

pub mod builders;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Generous upper bound for a single async test. The simulations under test
/// are synchronous and tiny; only input reading awaits.
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Same variable the binary reads, so `STEPDAG_LOG=debug cargo test` shows
/// scheduler ticks for failing tests.
const LOG_ENV: &str = "STEPDAG_LOG";

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// The filter comes from `STEPDAG_LOG` (any `EnvFilter` directive, e.g.
/// `stepdag::sim=trace`) and defaults to `warn`, so deadlock warnings still
/// show up in the output of a failing test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Await `f`, failing the test if it runs longer than `limit`.
pub async fn with_timeout<F, T>(limit: Duration, f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(limit, f).await {
        Ok(value) => value,
        Err(_) => panic!("test did not finish within {limit:?}"),
    }
}
