//! Pluggable log sink for request and order traces.
//!
//! The client never writes to a process-wide logger directly. Instead a
//! [`LogSink`] is carried by the [`Config`](crate::Config) and handed to the
//! client at construction. [`TracingSink`] (the default) forwards everything
//! to `tracing`, so applications keep full control through whichever
//! subscriber they install.

use std::fmt;
use std::sync::Arc;

/// Maximum number of characters of a response body written to the log
pub const MAX_LOGGED_BODY: usize = 2000;

/// Destination for the client's log lines
pub trait LogSink: Send + Sync + fmt::Debug {
    /// Request and response traces
    fn debug(&self, message: &str);

    /// Connectivity and order summaries
    fn info(&self, message: &str);

    /// Rejected requests
    fn error(&self, message: &str);
}

/// Forwards log lines to `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "fapi_trading", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "fapi_trading", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "fapi_trading", "{}", message);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// The sink used when none is configured
pub fn default_sink() -> Arc<dyn LogSink> {
    Arc::new(TracingSink)
}

/// Truncate a body to [`MAX_LOGGED_BODY`] characters for logging
pub(crate) fn truncate_body(body: &str) -> &str {
    match body.char_indices().nth(MAX_LOGGED_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
