//! Test logging bootstrap shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Level used when neither `TEST_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_TEST_LOG: &str = "warn";

/// Pick the filter directive: `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn filter_directive<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("TEST_LOG")
        .or_else(|| lookup("RUST_LOG"))
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEST_LOG.to_string())
}

/// Initialize logging once per test binary. Safe to call from every test.
///
/// Output goes through the test writer so cargo captures it, without
/// timestamps so snapshots of log output stay stable.
///
/// ```text
/// TEST_LOG=debug cargo test -p bubble-backend --test websocket_tests
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let directive = filter_directive(|key| std::env::var(key).ok());

        fmt()
            .with_env_filter(EnvFilter::new(directive))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
