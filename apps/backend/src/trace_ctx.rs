//! Task-local trace id for HTTP requests.
//!
//! `RequestTrace` opens the scope; error responses and log lines read it back.
//! Websocket frames are handled on the session actor, outside any request
//! task, and therefore see no trace id.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Reported when no request scope is active.
pub const UNKNOWN_TRACE_ID: &str = "unknown";

/// The trace id of the current request, if the task runs inside one.
pub fn current() -> Option<String> {
    TRACE_ID.try_with(Clone::clone).ok()
}

/// The trace id of the current request, or [`UNKNOWN_TRACE_ID`].
pub fn trace_id() -> String {
    current().unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string())
}

/// Run `future` with `trace_id` as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
