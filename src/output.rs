//! Rendering of match results.
//!
//! Results are logged one event per match, and additionally written to stdout
//! as a single document so callers can parse the whole output at once.
//! Dimension keys are emitted in sorted order.

use anyhow::{Context, Result};
use process_matcher::MatchResult;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::cli::OutputFormat;

/// Serializable view of a result with deterministic key order.
#[derive(Debug, Serialize, PartialEq)]
struct ResultEntry<'a> {
    process_name: &'a str,
    dimensions: BTreeMap<&'a str, &'a str>,
}

impl<'a> From<&'a MatchResult> for ResultEntry<'a> {
    fn from(result: &'a MatchResult) -> Self {
        Self {
            process_name: &result.process_name,
            dimensions: result
                .dimensions
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
        }
    }
}

/// Emits one log event per result.
pub fn log_results(results: &[MatchResult]) {
    for result in results {
        let entry = ResultEntry::from(result);
        info!(
            process_name = %entry.process_name,
            dimensions = ?entry.dimensions,
            "Matched process"
        );
    }
}

/// Renders results as a single document, or `None` for log-only output.
pub fn render_results(results: &[MatchResult], format: OutputFormat) -> Result<Option<String>> {
    let entries: Vec<ResultEntry<'_>> = results.iter().map(ResultEntry::from).collect();

    let rendered = match format {
        OutputFormat::Json => {
            Some(serde_json::to_string(&entries).context("Failed to serialize results as JSON")?)
        }
        OutputFormat::Yaml => {
            Some(serde_yaml::to_string(&entries).context("Failed to serialize results as YAML")?)
        }
        OutputFormat::Log => None,
    };
    Ok(rendered)
}

/// Logs results and prints the rendered document on stdout.
pub fn emit_results(results: &[MatchResult], format: OutputFormat) -> Result<()> {
    log_results(results);
    if let Some(document) = render_results(results, format)? {
        println!("{}", document);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use process_matcher::ProcessMatcher;

    fn sample_results() -> Vec<MatchResult> {
        let matcher = ProcessMatcher::new(
            "python",
            "",
            r"--(?P<zone>zone)=\w+ --port=(?P<port>\d+)",
            "",
        )
        .unwrap();
        matcher.match_text("/usr/bin/python3 app.py --zone=eu --port=8080\n/bin/bash")
    }

    #[test]
    fn test_render_json_sorted_dimensions() {
        let json = render_results(&sample_results(), OutputFormat::Json)
            .unwrap()
            .unwrap();
        assert_eq!(
            json,
            r#"[{"process_name":"python3","dimensions":{"port":"8080","zone":"zone"}}]"#
        );
    }

    #[test]
    fn test_render_json_empty_is_array() {
        let json = render_results(&[], OutputFormat::Json).unwrap().unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_render_yaml_round_trips_as_value() {
        let yaml = render_results(&sample_results(), OutputFormat::Yaml)
            .unwrap()
            .unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value[0]["process_name"].as_str(), Some("python3"));
        assert_eq!(value[0]["dimensions"]["port"].as_str(), Some("8080"));
    }

    #[test]
    fn test_render_log_has_no_document() {
        assert!(render_results(&sample_results(), OutputFormat::Log)
            .unwrap()
            .is_none());
    }
}
