//! Compiled patterns for the exclude, dimensions and process name stages.
//!
//! Every pattern is compiled exactly once when the matcher is built. Named
//! capture groups are resolved at compile time so per-line evaluation never
//! has to look them up again.

use regex::{CaptureMatches, Regex};
use std::fmt;

/// Pipeline stage a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Exclude,
    Dimensions,
    ProcessName,
}

impl PatternKind {
    /// Flag/config key the pattern is supplied through.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Exclude => "exclude",
            PatternKind::Dimensions => "dimensions",
            PatternKind::ProcessName => "process_name",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a configured pattern cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid {kind} pattern '{pattern}'")]
    InvalidRegex {
        kind: PatternKind,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl PatternError {
    /// Stage whose pattern failed to compile.
    pub fn kind(&self) -> PatternKind {
        match self {
            PatternError::InvalidRegex { kind, .. } => *kind,
        }
    }
}

/// A regular expression together with its resolved named groups.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    kind: PatternKind,
    regex: Regex,
    named_groups: Vec<(usize, String)>,
}

impl CompiledPattern {
    /// Compiles `source` for the given stage.
    pub fn compile(kind: PatternKind, source: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(source).map_err(|e| PatternError::InvalidRegex {
            kind,
            pattern: source.to_string(),
            source: e,
        })?;

        let named_groups = regex
            .capture_names()
            .enumerate()
            .filter_map(|(index, name)| match name {
                Some(n) if !n.is_empty() => Some((index, n.to_string())),
                _ => None,
            })
            .collect();

        Ok(Self {
            kind,
            regex,
            named_groups,
        })
    }

    /// Like [`CompiledPattern::compile`], but an empty source disables the stage.
    pub fn compile_optional(kind: PatternKind, source: &str) -> Result<Option<Self>, PatternError> {
        if source.is_empty() {
            return Ok(None);
        }
        Self::compile(kind, source).map(Some)
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Original pattern text.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// True if the pattern matches anywhere in `line`.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Number of capture groups, not counting the implicit whole-match group.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Named groups as `(group index, name)` pairs in pattern order.
    pub fn named_groups(&self) -> &[(usize, String)] {
        &self.named_groups
    }

    /// All leftmost-first, non-overlapping matches in `line`.
    pub fn captures_iter<'r, 'h>(&'r self, line: &'h str) -> CaptureMatches<'r, 'h> {
        self.regex.captures_iter(line)
    }
}
