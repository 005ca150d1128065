//! CLI arguments and subcommands for process-matcher.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// How match results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A single JSON array
    Json,
    /// A single YAML sequence
    Yaml,
    /// Nothing on stdout, one log line per result only
    Log,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "process-matcher",
    about = "Classify process listings with match/exclude/dimensions/process_name rules",
    long_about = "Classify process listings with match/exclude/dimensions/process_name rules.\n\n\
                  Every line of the listing is checked against an exclude regex and a literal \
                  match substring. Matching lines are reported with a process name and the \
                  dimensions captured by the named groups of the dimensions regex.",
    version = "0.1.0",
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Literal substring a process line must contain (empty matches nothing)
    #[arg(long = "match", global = true)]
    pub match_substring: Option<String>,

    /// Regex excluding every line it matches
    #[arg(long, global = true)]
    pub exclude: Option<String>,

    /// Regex whose named groups become dimensions
    #[arg(long, global = true)]
    pub dimensions: Option<String>,

    /// Regex extracting the process name (a regex without groups is used verbatim)
    #[arg(long = "process_name", alias = "process-name", global = true)]
    pub process_name: Option<String>,

    /// Process listing to classify (read from stdin when omitted)
    #[arg(long, global = true)]
    pub processes: Option<String>,

    /// Output format for match results
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Log level
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration and compile all patterns
    Check,

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },

    /// Show the decision taken for every line of the listing
    Test {
        /// Also list excluded and non-matching lines
        #[arg(long)]
        verbose: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags_with_empty_values() {
        let args = Args::try_parse_from([
            "process-matcher",
            "--match=python",
            "--exclude=",
            "--dimensions=port=(?P<port>\\d+)",
            "--process_name=",
            "--processes=/usr/bin/python3 app.py --port=8080",
        ])
        .unwrap();

        assert_eq!(args.match_substring.as_deref(), Some("python"));
        assert_eq!(args.exclude.as_deref(), Some(""));
        assert_eq!(args.dimensions.as_deref(), Some("port=(?P<port>\\d+)"));
        assert_eq!(args.process_name.as_deref(), Some(""));
        assert_eq!(
            args.processes.as_deref(),
            Some("/usr/bin/python3 app.py --port=8080")
        );
        assert!(args.command.is_none());
    }

    #[test]
    fn test_parse_process_name_alias() {
        let args =
            Args::try_parse_from(["process-matcher", "--process-name", "(python\\d*)"]).unwrap();
        assert_eq!(args.process_name.as_deref(), Some("(python\\d*)"));
    }

    #[test]
    fn test_parse_test_subcommand_with_global_flags() {
        let args = Args::try_parse_from([
            "process-matcher",
            "test",
            "--verbose",
            "--match",
            "nginx",
        ])
        .unwrap();

        assert!(matches!(args.command, Some(Commands::Test { verbose: true })));
        assert_eq!(args.match_substring.as_deref(), Some("nginx"));
    }

    #[test]
    fn test_parse_output_format() {
        let args = Args::try_parse_from(["process-matcher", "--output-format", "yaml"]).unwrap();
        assert_eq!(args.output_format, Some(OutputFormat::Yaml));
    }
}
