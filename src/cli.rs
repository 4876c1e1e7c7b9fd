//! CLI interface for porkscan.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod analyze;
pub mod formatting;
pub mod patterns;

/// porkscan: flags pork-barrel spending in legislative bill text.
#[derive(Parser)]
#[command(name = "porkscan")]
#[command(about = "Flags pork-barrel spending in legislative bill text", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Analyzes bill documents and reports suspected pork.
    Analyze(analyze::AnalyzeCommand),
    /// Inspects and validates pattern configuration.
    Patterns(patterns::PatternsCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze(analyze_cmd) => analyze_cmd.execute().await,
            Commands::Patterns(patterns_cmd) => patterns_cmd.execute(),
        }
    }
}
