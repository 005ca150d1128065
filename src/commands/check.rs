//! Check command implementation.
//!
//! Validates the effective configuration and compiles every pattern.

use anyhow::Result;
use process_matcher::{CompiledPattern, PatternKind, ProcessMatcher};

use crate::config::{validate_effective_config, Config};

/// Validates configuration and reports which pipeline stages are active.
pub fn command_check(config: &Config) -> Result<()> {
    println!("🔍 Process Matcher - Configuration Check");
    println!("========================================");

    println!("\n⚙️  Checking configuration...");
    if let Err(e) = validate_effective_config(config) {
        println!("   ❌ Configuration invalid: {:#}", e);
        std::process::exit(1);
    }
    println!("   ✅ Configuration is valid");

    let matcher = ProcessMatcher::from_config(config.matcher_config())?;

    println!("\n📋 Pipeline:");
    let needle = &matcher.config().match_substring;
    if needle.is_empty() {
        println!("   ⚠️  match: not set - no line will ever match");
    } else {
        println!("   ✅ match: {:?}", needle);
    }

    describe_stage(PatternKind::Exclude, matcher.exclude_pattern());
    describe_stage(PatternKind::Dimensions, matcher.dimensions_pattern());
    describe_stage(PatternKind::ProcessName, matcher.name_pattern());

    if let Some(dimensions) = matcher.dimensions_pattern() {
        if dimensions.named_groups().is_empty() {
            println!("   ⚠️  dimensions pattern has no named groups - no dimensions will be produced");
        }
    }

    println!("\n✅ All checks passed");
    Ok(())
}

fn describe_stage(kind: PatternKind, pattern: Option<&CompiledPattern>) {
    let Some(pattern) = pattern else {
        println!("   ➖ {}: disabled", kind);
        return;
    };

    println!("   ✅ {}: /{}/", kind, pattern.as_str());
    match kind {
        PatternKind::Dimensions => {
            let names: Vec<&str> = pattern
                .named_groups()
                .iter()
                .map(|(_, name)| name.as_str())
                .collect();
            println!("   │  └─ Dimensions: {}", names.join(", "));
        }
        PatternKind::ProcessName if pattern.group_count() == 0 => {
            println!("   │  └─ No capture groups: used as constant name");
        }
        PatternKind::ProcessName => {
            println!(
                "   │  └─ {} capture groups: last capture is the name",
                pattern.group_count()
            );
        }
        PatternKind::Exclude => {}
    }
}
