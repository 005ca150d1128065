//! Diagnostic hooks invoked while classifying lines.
//!
//! Observers only see what the matcher decided; they can never change a
//! decision. The matcher uses [`NoopObserver`] unless told otherwise.

use crate::process::matcher::MatchResult;
use tracing::{debug, trace};

/// Receives per-line decisions from a [`ProcessMatcher`](crate::ProcessMatcher).
///
/// All methods default to doing nothing.
pub trait MatchObserver: Send + Sync {
    /// The exclude pattern matched `line`.
    fn on_excluded(&self, _line: &str) {}

    /// `line` was not excluded but does not contain the match substring.
    fn on_rejected(&self, _line: &str) {}

    /// `line` matched and produced `result`.
    fn on_matched(&self, _line: &str, _result: &MatchResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {}

/// Observer that forwards decisions to `tracing` at debug/trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MatchObserver for TracingObserver {
    fn on_excluded(&self, line: &str) {
        debug!(line, "Line excluded");
    }

    fn on_rejected(&self, line: &str) {
        trace!(line, "Line does not contain match substring");
    }

    fn on_matched(&self, line: &str, result: &MatchResult) {
        debug!(
            line,
            process_name = %result.process_name,
            dimensions = ?result.dimensions,
            "Line matched"
        );
    }
}
