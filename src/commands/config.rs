//! Config command implementation.
//!
//! Generates configuration files in various formats.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

/// Generates configuration files.
pub fn command_config(output: Option<PathBuf>, format: ConfigFormat, commented: bool) -> Result<()> {
    let config = Config::default();
    let output = match output {
        Some(path) => path,
        None => PathBuf::from(default_file_name(format)),
    };

    let mut content = render_config(&config, format)?;
    if commented && matches!(format, ConfigFormat::Yaml) {
        content = add_config_comments(content);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

fn default_file_name(format: ConfigFormat) -> &'static str {
    match format {
        ConfigFormat::Yaml => "process-matcher.yaml",
        ConfigFormat::Json => "process-matcher.json",
        ConfigFormat::Toml => "process-matcher.toml",
    }
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# Process Matcher Configuration
# =============================
#
# Matching Rules
# --------------
# match: "java"                 # Literal substring a line must contain (empty = match nothing)
# exclude: "jps|grep"           # Regex; lines matching it are dropped
# dimensions: "-Dport=(?P<port>\d+)"  # Regex; named groups become dimensions
# process_name: "-jar (\w+)\.jar"     # Regex; last capture is the name.
#                               # Without groups the text itself is the name.
#
# Output
# ------
# output_format: "json"         # json, yaml or log
#
# Logging
# -------
# log_level: "info"             # off, error, warn, info, debug, trace
"#;

    format!("{comments}\n{yaml}")
}
