//! doc-lint CLI tool.
//!
//! Usage:
//! ```bash
//! doc-lint check [OPTIONS] [PATH]
//! doc-lint list-rules
//! doc-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use doc_lint_core::Severity;
use doc_lint_rules::SpiPolicy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Documentation-coverage linter for public API declarations
#[derive(Parser)]
#[command(name = "doc-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check declaration trees for missing documentation comments
    Check {
        /// Tree file or directory to analyze (default: `[analyzer] root`, else `.`)
        path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// How SPI declarations are treated (overrides config)
        #[arg(long)]
        spi: Option<SpiArg>,

        /// Lowest severity that fails the run (overrides config)
        #[arg(long)]
        fail_on: Option<Severity>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-diagnostic compact format.
    Compact,
    /// Graphical report with source snippets.
    Rich,
}

/// `--spi` values.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SpiArg {
    /// Report undocumented SPI declarations.
    Diagnose,
    /// Skip SPI declarations and their members.
    Exempt,
}

impl From<SpiArg> for SpiPolicy {
    fn from(arg: SpiArg) -> Self {
        match arg {
            SpiArg::Diagnose => Self::Diagnose,
            SpiArg::Exempt => Self::Exempt,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
            spi,
            fail_on,
        } => {
            let project = path.clone().unwrap_or_else(|| PathBuf::from("."));
            let source = config_resolver::resolve(&project, cli.config.as_deref());
            let options = commands::check::CheckOptions {
                format,
                exclude,
                spi: spi.map(SpiPolicy::from),
                fail_on,
            };
            commands::check::run(path.as_deref(), &options, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
