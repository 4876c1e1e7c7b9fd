//! Pattern configuration commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::analysis::Analyzer;
use crate::config::discovery::load_detector_config;
use crate::config::DEFAULT_PATTERNS_YAML;

/// Pattern configuration operations.
#[derive(Parser)]
pub struct PatternsCommand {
    /// Pattern subcommand to execute.
    #[command(subcommand)]
    pub command: PatternsSubcommands,
}

/// Pattern subcommands.
#[derive(Subcommand)]
pub enum PatternsSubcommands {
    /// Prints the resolved pattern configuration as YAML.
    Show(ShowCommand),
    /// Compiles a pattern configuration and reports what it contains.
    Check(CheckCommand),
}

impl PatternsCommand {
    /// Executes the patterns command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            PatternsSubcommands::Show(show_cmd) => show_cmd.execute(),
            PatternsSubcommands::Check(check_cmd) => check_cmd.execute(),
        }
    }
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {
    /// Prints the embedded template verbatim, ignoring user files.
    #[arg(long)]
    pub embedded: bool,

    /// Explicit pattern configuration file.
    #[arg(long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Path to the configuration directory (defaults to .porkscan/).
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        if self.embedded {
            print!("{DEFAULT_PATTERNS_YAML}");
            return Ok(());
        }

        let (config, source) =
            load_detector_config(self.patterns.as_deref(), self.config_dir.as_deref())?;
        println!("# Source: {source}");
        print!("{}", config.to_yaml_string()?);
        Ok(())
    }
}

/// Check command options.
#[derive(Parser)]
pub struct CheckCommand {
    /// Pattern file to check. Defaults to the resolved configuration.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Path to the configuration directory (defaults to .porkscan/).
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

impl CheckCommand {
    /// Executes the check command.
    pub fn execute(self) -> Result<()> {
        let (config, source) =
            load_detector_config(self.file.as_deref(), self.config_dir.as_deref())?;
        let analyzer = Analyzer::new(config)
            .with_context(|| format!("Pattern configuration is invalid ({source})"))?;

        println!("✅ {source}");
        println!(
            "{}",
            super::formatting::format_library_counts(analyzer.library())
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn check_accepts_valid_overlay() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"limits:\n  max_span_bytes: 120\n").unwrap();

        let cmd = CheckCommand {
            file: Some(file.path().to_path_buf()),
            config_dir: None,
        };
        assert!(cmd.execute().is_ok());
    }

    #[test]
    fn check_rejects_invalid_pattern() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"library:\n  item_categories:\n    - name: broken\n      pattern: '(unclosed'\n",
        )
        .unwrap();

        let cmd = CheckCommand {
            file: Some(file.path().to_path_buf()),
            config_dir: None,
        };
        let err = cmd.execute().unwrap_err();
        assert!(format!("{err:#}").contains("broken"));
    }

    #[test]
    fn show_embedded_succeeds() {
        let cmd = ShowCommand {
            embedded: true,
            patterns: None,
            config_dir: None,
        };
        assert!(cmd.execute().is_ok());
    }
}
