//! Process Matcher Library
//!
//! Classifies process listings (one process per line, as printed by `ps`)
//! against operator-supplied rules and reports a process name plus a set of
//! dimensions for every matching line.
//!
//! # Pipeline
//!
//! Each line goes through a fixed sequence of stages:
//!
//! - **Exclude**: an optional regex; a match anywhere drops the line
//! - **Match**: a literal substring the line must contain (empty matches nothing)
//! - **Dimensions**: named groups of an optional regex become key/value tags
//! - **Process name**: derived from the command path, a constant label, or
//!   the last capture of an optional regex
//!
//! # Usage
//!
//! ```rust
//! use process_matcher::ProcessMatcher;
//!
//! let matcher = ProcessMatcher::new("python", "test", r"port=(?P<port>\d+)", "")
//!     .expect("patterns compile");
//!
//! let listing = "/usr/bin/python3 app.py --port=8080\n/usr/bin/python3 test.py";
//! let results = matcher.match_text(listing);
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].process_name, "python3");
//! assert_eq!(results[0].dimensions["port"], "8080");
//! ```

pub mod process;

// Re-export main types for convenience
pub use process::{
    CompiledPattern, Dimensions, MatchObserver, MatchResult, MatcherConfig, NoopObserver,
    PatternError, PatternKind, ProcessMatcher, TracingObserver,
};
