//! process-matcher - version 0.1.0
//!
//! Classifies a process listing with match/exclude/dimensions/process_name rules.
//! This is the main entry point that initializes logging and handles subcommands.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use process_matcher::{ProcessMatcher, TracingObserver};
use std::io::Read;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};

use cli::{Args, Commands, LogLevel};
use commands::{command_check, command_config, command_test};
use config::{resolve_config, show_config, validate_effective_config, Config};
use output::emit_results;

/// Initializes tracing logging subsystem with configured log level.
///
/// Logs go to stderr; stdout is reserved for results.
fn setup_logging(config: &Config) -> Result<()> {
    let log_level = config.effective_log_level()?;
    let filter = match log_level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    debug!("Logging initialized with level: {:?}", log_level);
    Ok(())
}

/// Returns the listing from `--processes`, or reads it from stdin.
fn read_processes(args: &Args) -> Result<String> {
    if let Some(processes) = &args.processes {
        return Ok(processes.clone());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read process listing from stdin")?;
    Ok(buf)
}

/// Main application entry point.
fn main() -> Result<()> {
    let args = Args::parse();

    // Early config resolution for show/check modes
    if args.show_config || args.check_config {
        let config = resolve_config(&args)?;

        if args.check_config {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("❌ Configuration invalid: {:#}", e);
                std::process::exit(1);
            }
            println!("✅ Configuration is valid");
            return Ok(());
        }

        return show_config(&config, args.config_format);
    }

    let config = resolve_config(&args)?;

    if let Some(command) = &args.command {
        return match command {
            Commands::Check => command_check(&config),
            Commands::Config {
                output,
                format,
                commented,
            } => command_config(output.clone(), *format, *commented),
            Commands::Test { verbose } => {
                let processes = read_processes(&args)?;
                command_test(&processes, *verbose, &config)
            }
        };
    }

    setup_logging(&config)?;
    let format = config.effective_output_format()?;

    let matcher = ProcessMatcher::from_config(config.matcher_config())
        .context("Failed to build process matcher")?
        .with_observer(Arc::new(TracingObserver));
    debug!(?matcher, "Process matcher ready");

    let processes = read_processes(&args)?;
    let results = matcher.match_text(&processes);
    info!(
        lines = processes.split('\n').count(),
        matched = results.len(),
        "Process listing classified"
    );

    emit_results(&results, format)
}
