//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests. Currently this
//! is the unified logging bootstrap used by every test binary.

pub mod logging;
