//! Line-by-line classification of process listings.
//!
//! A [`ProcessMatcher`] is built once from four pattern strings and then runs
//! a fixed pipeline over every line of a listing:
//!
//! 1. exclude: a line matching the exclude regex is dropped
//! 2. match: the line must contain the match substring literally
//! 3. dimensions: named groups of the dimensions regex become key/value tags
//! 4. name: the reported process name is derived from the line
//!
//! An empty match substring matches nothing.

use crate::process::observer::{MatchObserver, NoopObserver};
use crate::process::pattern::{CompiledPattern, PatternError, PatternKind};
use ahash::AHashMap as HashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Dimension mapping attached to a matched process.
pub type Dimensions = HashMap<String, String>;

static NOOP_OBSERVER: Lazy<Arc<dyn MatchObserver>> = Lazy::new(|| Arc::new(NoopObserver));

/// The four raw pattern strings a matcher is built from.
///
/// Empty strings disable the corresponding stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Literal substring a line must contain.
    #[serde(default)]
    pub match_substring: String,
    /// Regex vetoing a line when it matches anywhere.
    #[serde(default)]
    pub exclude_pattern: String,
    /// Regex whose named groups become dimensions.
    #[serde(default)]
    pub dimensions_pattern: String,
    /// Regex (or constant label when it has no groups) for the process name.
    #[serde(default)]
    pub name_pattern: String,
}

/// Classification of one matching line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub process_name: String,
    pub dimensions: Dimensions,
}

/// Compiled, read-only classifier for process listings.
pub struct ProcessMatcher {
    config: MatcherConfig,
    exclude: Option<CompiledPattern>,
    dimensions: Option<CompiledPattern>,
    name: Option<CompiledPattern>,
    observer: Arc<dyn MatchObserver>,
}

impl fmt::Debug for ProcessMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessMatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ProcessMatcher {
    /// Builds a matcher from the four pattern strings.
    pub fn new(
        match_substring: &str,
        exclude_pattern: &str,
        dimensions_pattern: &str,
        name_pattern: &str,
    ) -> Result<Self, PatternError> {
        Self::from_config(MatcherConfig {
            match_substring: match_substring.to_string(),
            exclude_pattern: exclude_pattern.to_string(),
            dimensions_pattern: dimensions_pattern.to_string(),
            name_pattern: name_pattern.to_string(),
        })
    }

    /// Builds a matcher, failing on the first pattern that does not compile.
    pub fn from_config(config: MatcherConfig) -> Result<Self, PatternError> {
        let exclude = CompiledPattern::compile_optional(PatternKind::Exclude, &config.exclude_pattern)?;
        let dimensions =
            CompiledPattern::compile_optional(PatternKind::Dimensions, &config.dimensions_pattern)?;
        let name = CompiledPattern::compile_optional(PatternKind::ProcessName, &config.name_pattern)?;

        Ok(Self {
            config,
            exclude,
            dimensions,
            name,
            observer: Arc::clone(&NOOP_OBSERVER),
        })
    }

    /// Replaces the diagnostic observer.
    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn exclude_pattern(&self) -> Option<&CompiledPattern> {
        self.exclude.as_ref()
    }

    pub fn dimensions_pattern(&self) -> Option<&CompiledPattern> {
        self.dimensions.as_ref()
    }

    pub fn name_pattern(&self) -> Option<&CompiledPattern> {
        self.name.as_ref()
    }

    /// Classifies every `\n`-separated line of `text`, keeping input order.
    pub fn match_text(&self, text: &str) -> Vec<MatchResult> {
        text.split('\n')
            .filter_map(|line| self.match_line(line))
            .collect()
    }

    /// Runs the pipeline for a single line.
    pub fn match_line(&self, line: &str) -> Option<MatchResult> {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(line) {
                self.observer.on_excluded(line);
                return None;
            }
        }

        if !self.contains_match_substring(line) {
            self.observer.on_rejected(line);
            return None;
        }

        let result = MatchResult {
            process_name: self.extract_process_name(line),
            dimensions: self.extract_dimensions(line),
        };
        self.observer.on_matched(line, &result);
        Some(result)
    }

    fn contains_match_substring(&self, line: &str) -> bool {
        let needle = self.config.match_substring.as_str();
        !needle.is_empty() && line.contains(needle)
    }

    /// Collects named groups over all matches; later matches overwrite earlier ones.
    pub fn extract_dimensions(&self, line: &str) -> Dimensions {
        let mut dimensions = Dimensions::new();
        let Some(pattern) = &self.dimensions else {
            return dimensions;
        };

        for caps in pattern.captures_iter(line) {
            for (index, name) in pattern.named_groups() {
                let value = caps.get(*index).map_or("", |m| m.as_str());
                dimensions.insert(name.clone(), value.to_string());
            }
        }
        dimensions
    }

    /// Derives the reported process name for a matched line.
    pub fn extract_process_name(&self, line: &str) -> String {
        let Some(pattern) = &self.name else {
            return command_basename(line).to_string();
        };

        // A pattern without groups is a constant label.
        if pattern.group_count() == 0 {
            return pattern.as_str().to_string();
        }

        let mut name = "";
        for caps in pattern.captures_iter(line) {
            for group in caps.iter() {
                name = group.map_or("", |m| m.as_str());
            }
        }
        name.to_string()
    }
}

/// Final path component of the first whitespace-delimited field.
///
/// Trailing slashes are ignored and `.`/`..` components are kept verbatim;
/// a field made only of slashes yields `/`. Returns an empty string for a
/// line without fields.
fn command_basename(line: &str) -> &str {
    let Some(command) = line.split_whitespace().next() else {
        return "";
    };
    let trimmed = command.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}
