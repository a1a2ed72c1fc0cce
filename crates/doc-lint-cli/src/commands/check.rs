//! Check command implementation.

use anyhow::{Context, Result};
use doc_lint_core::{Analyzer, Severity};
use doc_lint_rules::{configured_rules, SpiPolicy};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line settings for `check`.
#[derive(Debug)]
pub struct CheckOptions {
    /// How results are printed.
    pub format: OutputFormat,
    /// Extra exclude globs, added to the configured ones.
    pub exclude: Vec<String>,
    /// SPI policy override.
    pub spi: Option<SpiPolicy>,
    /// Failure threshold override.
    pub fail_on: Option<Severity>,
}

/// Runs the check command.
///
/// Without `path`, the configured `[analyzer] root` is used.
pub fn run(path: Option<&Path>, options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let fail_on = options.fail_on.unwrap_or_else(|| config.fail_on());
    let rules = configured_rules(&config, options.spi);

    let mut builder = Analyzer::builder().config(config);
    if let Some(path) = path {
        builder = builder.root(path);
    }
    for pattern in &options.exclude {
        builder = builder.exclude(pattern.clone());
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Checking {} with {} rule(s)",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root(), fail_on)?;

    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}
