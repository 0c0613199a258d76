//! Process-wide tracing setup for the server binary.
//!
//! JSON lines on stdout. `RUST_LOG` overrides the default filter, e.g.
//! `RUST_LOG=debug,bubble_backend::ws=trace`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when `RUST_LOG` is unset or unparsable. Per-action logs are at debug.
const DEFAULT_FILTER: &str = "info,actix_web=info,actix_server=warn";

pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
