//! Corpus report types for multi-document runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::findings::{AnalysisResult, SuspicionLevel};

/// Complete report over every analyzed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusReport {
    /// Per-document results, in input order.
    pub documents: Vec<DocumentReport>,
    /// Summary statistics.
    pub summary: CorpusSummary,
}

/// Result of analyzing a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Where the document came from (file path or "<stdin>").
    pub source: String,
    /// Bill identifier, when the input carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    /// Bill title, when the input carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Analysis outcome.
    pub analysis: AnalysisResult,
}

/// Summary statistics for a corpus report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Number of documents analyzed.
    pub total_documents: usize,
    /// Number of documents flagged as containing pork.
    pub documents_with_pork: usize,
    /// Share of documents with pork, 0–100.
    pub pork_percentage: f64,
    /// Sum of every document's total pork value.
    pub total_pork_value: f64,
    /// Number of pork items across all documents.
    pub total_items: usize,
    /// Items rated high.
    pub high_items: usize,
    /// Items rated medium.
    pub medium_items: usize,
    /// Items rated low.
    pub low_items: usize,
    /// Inputs that could not be read or parsed.
    pub failed_documents: usize,
}

impl CorpusSummary {
    /// Creates a summary from per-document results.
    pub fn from_documents(documents: &[DocumentReport], failed_documents: usize) -> Self {
        let total_documents = documents.len();
        let documents_with_pork = documents.iter().filter(|d| d.analysis.has_pork).count();
        let pork_percentage = if total_documents > 0 {
            documents_with_pork as f64 / total_documents as f64 * 100.0
        } else {
            0.0
        };

        let mut summary = Self {
            total_documents,
            documents_with_pork,
            pork_percentage,
            failed_documents,
            ..Self::default()
        };

        for document in documents {
            summary.total_pork_value += document.analysis.total_pork_value;
            for item in &document.analysis.pork_items {
                summary.total_items += 1;
                match item.suspicion_level {
                    SuspicionLevel::High => summary.high_items += 1,
                    SuspicionLevel::Medium => summary.medium_items += 1,
                    SuspicionLevel::Low => summary.low_items += 1,
                }
            }
        }

        summary
    }
}

impl CorpusReport {
    /// Creates a new report from document results.
    pub fn new(documents: Vec<DocumentReport>, failed_documents: usize) -> Self {
        let summary = CorpusSummary::from_documents(&documents, failed_documents);
        Self { documents, summary }
    }

    /// Checks if any document was flagged.
    #[must_use]
    pub fn has_pork(&self) -> bool {
        self.summary.documents_with_pork > 0
    }

    /// Determines exit code based on report and options.
    pub fn exit_code(&self, fail_on_pork: bool) -> i32 {
        if self.summary.failed_documents > 0 && self.documents.is_empty() {
            1
        } else if fail_on_pork && self.has_pork() {
            2
        } else {
            0
        }
    }
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::data::findings::PorkItem;
    use chrono::Utc;

    fn document(levels: &[SuspicionLevel], value_each: f64, indicators: usize) -> DocumentReport {
        let pork_items: Vec<PorkItem> = levels
            .iter()
            .map(|&level| PorkItem {
                description: "$5 million for a stadium".to_string(),
                amount: "$5.0M".to_string(),
                monetary_value: value_each,
                beneficiary: "Specific locality/district".to_string(),
                justification: "No clear public benefit justification".to_string(),
                suspicion_level: level,
                suspicion_score: 0,
                category: "Stadium / arena".to_string(),
            })
            .collect();

        DocumentReport {
            source: "bill.txt".to_string(),
            bill_id: None,
            title: None,
            analysis: AnalysisResult {
                has_pork: !pork_items.is_empty() || indicators >= 3,
                total_pork_value: value_each * pork_items.len() as f64,
                pork_items,
                indicator_count: indicators,
                amounts_detected: 0,
                confidence_score: 0,
                analyzed_at: Utc::now(),
            },
        }
    }

    // ── summary ────────────────────────────────────────────────────

    #[test]
    fn summary_counts_documents_and_items() {
        let docs = vec![
            document(&[SuspicionLevel::High, SuspicionLevel::Low], 5_000_000.0, 4),
            document(&[], 0.0, 0),
            document(&[SuspicionLevel::Medium], 2_000_000.0, 1),
            document(&[], 0.0, 3),
        ];
        let summary = CorpusSummary::from_documents(&docs, 1);

        assert_eq!(summary.total_documents, 4);
        assert_eq!(summary.documents_with_pork, 3);
        assert!((summary.pork_percentage - 75.0).abs() < f64::EPSILON);
        assert!((summary.total_pork_value - 12_000_000.0).abs() < f64::EPSILON);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.high_items, 1);
        assert_eq!(summary.medium_items, 1);
        assert_eq!(summary.low_items, 1);
        assert_eq!(summary.failed_documents, 1);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let summary = CorpusSummary::from_documents(&[], 0);
        assert_eq!(summary, CorpusSummary::default());
    }

    // ── exit codes ─────────────────────────────────────────────────

    #[test]
    fn exit_code_clean() {
        let report = CorpusReport::new(vec![document(&[], 0.0, 0)], 0);
        assert_eq!(report.exit_code(true), 0);
    }

    #[test]
    fn exit_code_pork_only_when_requested() {
        let report = CorpusReport::new(vec![document(&[SuspicionLevel::High], 1.0, 0)], 0);
        assert_eq!(report.exit_code(false), 0);
        assert_eq!(report.exit_code(true), 2);
    }

    #[test]
    fn exit_code_all_inputs_failed() {
        let report = CorpusReport::new(vec![], 2);
        assert_eq!(report.exit_code(false), 1);
    }

    // ── output format ──────────────────────────────────────────────

    #[test]
    fn output_format_parses() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("yml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn output_format_display() {
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
    }
}
