//! Shared proptest configuration for domain property tests.

use std::env;

use proptest::prelude::ProptestConfig;

/// Cases come from `PROPTEST_CASES`, defaulting low for fast CI.
pub fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(32);

    ProptestConfig {
        cases,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}
