//! Process listing classification.
//!
//! This module provides:
//! - `pattern`: Compiled regexes with resolved named groups
//! - `matcher`: The exclude → match → dimensions → name pipeline
//! - `observer`: Diagnostic hooks called for every line decision

pub mod matcher;
pub mod observer;
pub mod pattern;

// Re-export commonly used types
pub use matcher::{Dimensions, MatchResult, MatcherConfig, ProcessMatcher};
pub use observer::{MatchObserver, NoopObserver, TracingObserver};
pub use pattern::{CompiledPattern, PatternError, PatternKind};
