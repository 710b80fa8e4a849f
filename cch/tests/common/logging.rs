//! Test logging initialization.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test-friendly tracing subscriber once per test binary.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}
