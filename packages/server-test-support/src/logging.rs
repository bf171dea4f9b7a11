//! Shared tracing setup for the test suites.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install the test subscriber once per process; later calls are no-ops.
///
/// The filter comes from `TEST_LOG` when set, then `RUST_LOG`, and quiets
/// down to `warn` when neither is present.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // Test writer keeps output inside the harness capture; timestamps
        // are dropped so log lines stay stable across runs.
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
