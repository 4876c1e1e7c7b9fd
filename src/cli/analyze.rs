//! Analyze command: scans bill documents for pork-barrel spending.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use globset::{Glob, GlobSet, GlobSetBuilder};
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::analysis::Analyzer;
use crate::config::discovery::load_detector_config;
use crate::data::{from_yaml, BillDocument, CorpusReport, DocumentReport, OutputFormat};

/// Source label used for documents read from standard input.
pub const STDIN_SOURCE: &str = "<stdin>";

/// Analyze command options.
#[derive(Parser)]
pub struct AnalyzeCommand {
    /// Files or directories to analyze. Reads standard input when omitted.
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Maximum number of documents analyzed at once.
    #[arg(long, default_value = "4")]
    pub concurrency: usize,

    /// Explicit pattern configuration file.
    #[arg(long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Path to the configuration directory (defaults to .porkscan/).
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// File name globs used when expanding directories.
    #[arg(
        long,
        value_delimiter = ',',
        default_values = ["*.txt", "*.json", "*.yaml", "*.yml"]
    )]
    pub include: Vec<String>,

    /// Only reports documents flagged as containing pork.
    #[arg(long)]
    pub only_pork: bool,

    /// Suppresses progress output and clean documents in text output.
    #[arg(long)]
    pub quiet: bool,

    /// Exits with code 2 when any document contains pork.
    #[arg(long)]
    pub fail_on_pork: bool,
}

/// A document ready for analysis, labeled with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    /// File path, `path[index]` for array entries, or [`STDIN_SOURCE`].
    pub source: String,
    /// Parsed bill.
    pub document: BillDocument,
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub async fn execute(self) -> Result<()> {
        let output_format: OutputFormat = self.format.parse().unwrap_or(OutputFormat::Text);
        let show_progress = !self.quiet && output_format == OutputFormat::Text;

        let (config, source) =
            load_detector_config(self.patterns.as_deref(), self.config_dir.as_deref())?;
        let analyzer = Arc::new(
            Analyzer::new(config)
                .with_context(|| format!("Failed to build detector from {source}"))?,
        );

        let (documents, failed) = if self.paths.is_empty() {
            (vec![read_stdin_document().await?], 0)
        } else {
            let include = build_globset(&self.include)?;
            let files = expand_paths(&self.paths, &include)?;
            load_all(&files)
        };

        if show_progress {
            println!(
                "🔍 Analyzing {} documents (patterns: {source})...",
                documents.len()
            );
        }

        let documents = analyze_all(analyzer, documents, self.concurrency).await;
        let mut report = CorpusReport::new(documents, failed);
        let exit_code = report.exit_code(self.fail_on_pork);

        // The summary keeps counting the documents filtered out here.
        if self.only_pork {
            report.documents.retain(|d| d.analysis.has_pork);
        }

        self.output_report(&report, output_format)?;

        if exit_code != 0 {
            std::process::exit(exit_code);
        }

        Ok(())
    }

    /// Outputs the report in the specified format.
    fn output_report(&self, report: &CorpusReport, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => {
                self.output_text_report(report);
                Ok(())
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(report)
                    .context("Failed to serialize report to JSON")?;
                println!("{json}");
                Ok(())
            }
            OutputFormat::Yaml => {
                let yaml =
                    crate::data::to_yaml(report).context("Failed to serialize report to YAML")?;
                println!("{yaml}");
                Ok(())
            }
        }
    }

    /// Outputs the text format report.
    fn output_text_report(&self, report: &CorpusReport) {
        use super::formatting::{format_document_line, format_item_lines, format_summary_text};

        println!();

        for document in &report.documents {
            if self.quiet && !document.analysis.has_pork {
                continue;
            }

            println!("{}", format_document_line(document));
            for item in &document.analysis.pork_items {
                println!("{}", format_item_lines(item));
            }
            println!();
        }

        println!("{}", format_summary_text(&report.summary));
    }
}

/// Compiles the `--include` globs.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern.trim())
            .with_context(|| format!("Invalid include glob: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build include globs")
}

/// Expands directories one level deep, keeping files whose names match.
///
/// Explicit file paths are kept as given, even when they do not match.
/// Directory entries are sorted for stable output.
pub fn expand_paths(paths: &[PathBuf], include: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut entries: Vec<PathBuf> = std::fs::read_dir(path)
            .with_context(|| format!("Failed to read directory: {}", path.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .filter(|p| p.file_name().is_some_and(|name| include.is_match(name)))
            .collect();
        entries.sort();

        debug!(dir = %path.display(), files = entries.len(), "Expanded directory");
        files.extend(entries);
    }

    Ok(files)
}

/// Loads every file, counting the ones that fail instead of aborting.
fn load_all(files: &[PathBuf]) -> (Vec<SourceDocument>, usize) {
    let mut documents = Vec::new();
    let mut failed = 0;

    for file in files {
        match load_documents(file) {
            Ok(loaded) => documents.extend(loaded),
            Err(e) => {
                warn!(path = %file.display(), "Skipping document: {e:#}");
                failed += 1;
            }
        }
    }

    (documents, failed)
}

/// Reads one input file.
///
/// `.json`, `.yaml` and `.yml` files hold one bill or a list of bills; any
/// other file is raw bill text.
pub fn load_documents(path: &Path) -> Result<Vec<SourceDocument>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let label = path.display().to_string();

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let bills = match extension.as_deref() {
        Some("json") => parse_json_bills(&content)
            .with_context(|| format!("Failed to parse bill JSON: {label}"))?,
        Some("yaml" | "yml") => parse_yaml_bills(&content)
            .with_context(|| format!("Failed to parse bill YAML: {label}"))?,
        _ => {
            return Ok(vec![SourceDocument {
                source: label,
                document: BillDocument::from_text(content),
            }])
        }
    };

    Ok(label_bills(&label, bills))
}

fn parse_json_bills(content: &str) -> Result<Vec<BillDocument>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

fn parse_yaml_bills(content: &str) -> Result<Vec<BillDocument>> {
    let value: serde_yaml::Value = from_yaml(content)?;
    if value.is_sequence() {
        Ok(serde_yaml::from_value(value)?)
    } else {
        Ok(vec![serde_yaml::from_value(value)?])
    }
}

/// Labels parsed bills; entries of a multi-bill file get their index appended.
fn label_bills(label: &str, bills: Vec<BillDocument>) -> Vec<SourceDocument> {
    let indexed = bills.len() != 1;
    bills
        .into_iter()
        .enumerate()
        .map(|(i, document)| SourceDocument {
            source: if indexed {
                format!("{label}[{i}]")
            } else {
                label.to_string()
            },
            document,
        })
        .collect()
}

async fn read_stdin_document() -> Result<SourceDocument> {
    let mut content = String::new();
    tokio::io::stdin()
        .read_to_string(&mut content)
        .await
        .context("Failed to read standard input")?;

    Ok(SourceDocument {
        source: STDIN_SOURCE.to_string(),
        document: BillDocument::from_text(content),
    })
}

/// Analyzes documents concurrently, preserving input order.
///
/// Each document runs on the blocking pool; at most `concurrency` run at
/// once.
pub async fn analyze_all(
    analyzer: Arc<Analyzer>,
    documents: Vec<SourceDocument>,
    concurrency: usize,
) -> Vec<DocumentReport> {
    let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrency.max(1)));

    let futs: Vec<_> = documents
        .into_iter()
        .map(|input| {
            let sem = semaphore.clone();
            let analyzer = analyzer.clone();

            async move {
                let _permit = sem
                    .acquire()
                    .await
                    .map_err(|e| anyhow::anyhow!("semaphore closed: {e}"))?;

                tokio::task::spawn_blocking(move || {
                    let analysis = analyzer.analyze_document(&input.document);
                    let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
                    DocumentReport {
                        title: non_empty(&input.document.title),
                        bill_id: input.document.bill_id.clone(),
                        source: input.source,
                        analysis,
                    }
                })
                .await
                .context("Analysis task failed")
            }
        })
        .collect();

    let results = futures::future::join_all(futs).await;

    results
        .into_iter()
        .filter_map(|result| match result {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Document analysis error: {e:#}");
                None
            }
        })
        .collect()
}
