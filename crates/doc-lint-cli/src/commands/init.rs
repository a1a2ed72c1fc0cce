//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "doc-lint.toml";

const DEFAULT_CONFIG: &str = r#"# doc-lint configuration

# Lowest severity that makes `doc-lint check` exit with status 1.
# fail_on = "error"

[analyzer]
# Directory (or single tree file) to analyze (default: current directory)
# root = ".build/decls"

# Tree files to analyze
include = ["**/*.decls.json"]

# Glob patterns to exclude from analysis
exclude = [
    "**/.build/checkouts/**",
    "**/target/**",
]

# Worker threads for checking trees (default: one per core)
# parallelism = 4

[rules.require-doc-comments]
enabled = true
# severity = "error"  # Override default severity
# "diagnose" reports undocumented @_spi declarations, "exempt" skips them
spi = "diagnose"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_default(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Point [analyzer] root at your exported declaration trees");
    println!("  2. Run: doc-lint check");

    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}
