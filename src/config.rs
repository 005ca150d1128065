//! Configuration management for process-matcher.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat, LogLevel, OutputFormat};
use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use process_matcher::{MatcherConfig, ProcessMatcher};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_OUTPUT_FORMAT: &str = "json";

/// Locations probed, in order, when no config file is given explicitly.
const DEFAULT_CONFIG_PATHS: [&str; 6] = [
    "/etc/process-matcher/config.yaml",
    "/etc/process-matcher/config.yml",
    "/etc/process-matcher/config.json",
    "./process-matcher.yaml",
    "./process-matcher.yml",
    "./process-matcher.json",
];

/// Effective configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    // Matching rules
    /// Literal substring a line must contain
    #[serde(rename = "match", alias = "match_substring")]
    pub match_substring: Option<String>,
    /// Regex excluding matching lines
    #[serde(alias = "exclude_pattern")]
    pub exclude: Option<String>,
    /// Regex with named groups producing dimensions
    #[serde(alias = "dimensions_pattern")]
    pub dimensions: Option<String>,
    /// Regex or constant label for the process name
    #[serde(alias = "process-name")]
    pub process_name: Option<String>,

    // Output
    #[serde(alias = "output-format")]
    pub output_format: Option<String>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_substring: None,
            exclude: None,
            dimensions: None,
            process_name: None,
            output_format: Some(DEFAULT_OUTPUT_FORMAT.into()),
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
        }
    }
}

impl Config {
    /// Matcher rules with unset fields treated as empty (disabled).
    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            match_substring: self.match_substring.clone().unwrap_or_default(),
            exclude_pattern: self.exclude.clone().unwrap_or_default(),
            dimensions_pattern: self.dimensions.clone().unwrap_or_default(),
            name_pattern: self.process_name.clone().unwrap_or_default(),
        }
    }

    pub fn effective_log_level(&self) -> Result<LogLevel> {
        let raw = self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
        LogLevel::from_str(raw, true).map_err(|_| {
            anyhow!(
                "Invalid log_level '{}', expected one of off, error, warn, info, debug, trace",
                raw
            )
        })
    }

    pub fn effective_output_format(&self) -> Result<OutputFormat> {
        let raw = self.output_format.as_deref().unwrap_or(DEFAULT_OUTPUT_FORMAT);
        OutputFormat::from_str(raw, true).map_err(|_| {
            anyhow!(
                "Invalid output_format '{}', expected one of json, yaml, log",
                raw
            )
        })
    }
}

/// Validate effective config (used by --check-config, `check` and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<()> {
    cfg.effective_log_level()?;
    cfg.effective_output_format()?;
    ProcessMatcher::from_config(cfg.matcher_config())?;
    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(m) = &args.match_substring {
        config.match_substring = Some(m.clone());
    }
    if let Some(exclude) = &args.exclude {
        config.exclude = Some(exclude.clone());
    }
    if let Some(dimensions) = &args.dimensions {
        config.dimensions = Some(dimensions.clone());
    }
    if let Some(process_name) = &args.process_name {
        config.process_name = Some(process_name.clone());
    }

    if let Some(format) = args.output_format {
        config.output_format = format
            .to_possible_value()
            .map(|v| v.get_name().to_string());
    }
    if let Some(level) = args.log_level {
        config.log_level = level.to_possible_value().map(|v| v.get_name().to_string());
    }

    Ok(config)
}

/// Loads a config file, or the first existing default location.
///
/// A missing file yields the default configuration.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match DEFAULT_CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
            Some(p) => PathBuf::from(p),
            None => return Ok(Config::default()),
        },
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    parse_config(&content, &path)
}

/// Parses config content, picking the format from the file extension.
fn parse_config(content: &str, path: &Path) -> Result<Config> {
    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(content)
            .with_context(|| format!("Invalid JSON configuration in {}", path.display()))?,
        Some("toml") => toml::from_str(content)
            .with_context(|| format!("Invalid TOML configuration in {}", path.display()))?,
        _ => serde_yaml::from_str(content)
            .with_context(|| format!("Invalid YAML configuration in {}", path.display()))?,
    };
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}

/// Renders configuration in the requested format
pub fn render_config(config: &Config, format: ConfigFormat) -> Result<String> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<()> {
    println!("{}", render_config(config, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(validate_effective_config(&cfg).is_ok());
        assert_eq!(cfg.matcher_config(), MatcherConfig::default());
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_config(
            ".yaml",
            "match: nginx\nexclude: worker\ndimensions: 'port=(?P<port>\\d+)'\nlog_level: debug\n",
        );
        let cfg = load_config(Some(file.path())).unwrap();

        assert_eq!(cfg.match_substring.as_deref(), Some("nginx"));
        assert_eq!(cfg.exclude.as_deref(), Some("worker"));
        assert_eq!(cfg.dimensions.as_deref(), Some("port=(?P<port>\\d+)"));
        assert_eq!(cfg.process_name, None);
        assert_eq!(cfg.effective_log_level().unwrap(), LogLevel::Debug);
    }

    #[test]
    fn test_load_json_config() {
        let file = write_config(
            ".json",
            r#"{"match": "python", "process_name": "(python\\d*)", "output_format": "yaml"}"#,
        );
        let cfg = load_config(Some(file.path())).unwrap();

        assert_eq!(cfg.match_substring.as_deref(), Some("python"));
        assert_eq!(cfg.process_name.as_deref(), Some("(python\\d*)"));
        assert_eq!(cfg.effective_output_format().unwrap(), OutputFormat::Yaml);
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_config(".toml", "match = \"java\"\nexclude_pattern = \"jps\"\n");
        let cfg = load_config(Some(file.path())).unwrap();

        assert_eq!(cfg.match_substring.as_deref(), Some("java"));
        assert_eq!(cfg.exclude.as_deref(), Some("jps"));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        let cfg = load_config(Some(missing.as_path())).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_load_malformed_file_names_path() {
        let file = write_config(".json", "{ not json");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid JSON configuration"));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let file = write_config(".yaml", "match: nginx\nexclude: worker\n");
        let path = file.path().to_string_lossy().to_string();
        let args = Args::try_parse_from([
            "process-matcher",
            "--config",
            path.as_str(),
            "--match=httpd",
            "--log-level",
            "warn",
        ])
        .unwrap();

        let cfg = resolve_config(&args).unwrap();
        assert_eq!(cfg.match_substring.as_deref(), Some("httpd"));
        assert_eq!(cfg.exclude.as_deref(), Some("worker"));
        assert_eq!(cfg.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_no_config_ignores_file() {
        let file = write_config(".yaml", "match: nginx\n");
        let path = file.path().to_string_lossy().to_string();
        let args =
            Args::try_parse_from(["process-matcher", "--no-config", "--config", path.as_str()])
                .unwrap();

        let cfg = resolve_config(&args).unwrap();
        assert_eq!(cfg.match_substring, None);
    }

    #[test]
    fn test_validate_rejects_invalid_pattern() {
        let cfg = Config {
            dimensions: Some("(?P<port>\\d+".into()),
            ..Config::default()
        };
        let err = validate_effective_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("dimensions"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let cfg = Config {
            log_level: Some("verbose".into()),
            ..Config::default()
        };
        assert!(validate_effective_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_output_format() {
        let cfg = Config {
            output_format: Some("xml".into()),
            ..Config::default()
        };
        assert!(validate_effective_config(&cfg).is_err());
    }

    #[test]
    fn test_render_config_uses_flag_names() {
        let cfg = Config {
            match_substring: Some("nginx".into()),
            ..Config::default()
        };
        let yaml = render_config(&cfg, ConfigFormat::Yaml).unwrap();
        assert!(yaml.contains("match: nginx"));

        let rendered = render_config(&cfg, ConfigFormat::Toml).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.match_substring.as_deref(), Some("nginx"));
    }
}
