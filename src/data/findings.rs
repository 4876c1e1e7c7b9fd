//! Analysis result types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dollar figure found in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetaryAmount {
    /// The matched text, verbatim.
    pub raw_text: String,
    /// Absolute value in dollars, magnitude word applied.
    pub value: f64,
    /// Text surrounding the match.
    pub context_snippet: String,
}

/// Which evidence source produced an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    /// A keyword phrase occurrence.
    Keyword,
    /// A suspicious-pattern match.
    Pattern,
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Keyword => write!(f, "keyword"),
            IndicatorKind::Pattern => write!(f, "pattern"),
        }
    }
}

/// A single textual signal of pork-style spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    /// Evidence source.
    pub kind: IndicatorKind,
    /// Keyword phrase or pattern name.
    pub label: String,
    /// The matched text.
    pub matched_text: String,
    /// Text surrounding the match (the full span for pattern hits).
    pub context: String,
}

/// Per-item suspicion rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuspicionLevel {
    /// Score below the medium threshold.
    Low,
    /// Score at or above the medium threshold.
    Medium,
    /// Score at or above the high threshold.
    High,
}

impl fmt::Display for SuspicionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuspicionLevel::Low => write!(f, "Low"),
            SuspicionLevel::Medium => write!(f, "Medium"),
            SuspicionLevel::High => write!(f, "High"),
        }
    }
}

/// A monetarily quantified spending provision flagged as potential pork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PorkItem {
    /// The matched provision text.
    pub description: String,
    /// Human-formatted total of the amounts in the provision.
    pub amount: String,
    /// Sum of the amounts in the provision, in dollars.
    pub monetary_value: f64,
    /// Best guess at who benefits.
    pub beneficiary: String,
    /// Claimed public benefit, or a sentinel when none is stated.
    pub justification: String,
    /// Categorical rating derived from `suspicion_score`.
    pub suspicion_level: SuspicionLevel,
    /// Additive suspicion score.
    pub suspicion_score: u32,
    /// Name of the category pattern that produced the item.
    pub category: String,
}

/// Outcome of analyzing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Whether the document likely contains pork.
    pub has_pork: bool,
    /// Identified items, in discovery order.
    pub pork_items: Vec<PorkItem>,
    /// Sum of `pork_items[*].monetary_value`.
    pub total_pork_value: f64,
    /// Number of keyword and pattern indicators.
    pub indicator_count: usize,
    /// Number of dollar figures found anywhere in the document.
    pub amounts_detected: usize,
    /// Heuristic 0–100 estimate that the document contains pork.
    pub confidence_score: u8,
    /// When the analysis ran.
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// Returns the number of items at the given suspicion level.
    #[must_use]
    pub fn count_at(&self, level: SuspicionLevel) -> usize {
        self.pork_items
            .iter()
            .filter(|item| item.suspicion_level == level)
            .count()
    }

    /// Returns the most suspicious item level, if any items were found.
    #[must_use]
    pub fn highest_level(&self) -> Option<SuspicionLevel> {
        self.pork_items.iter().map(|item| item.suspicion_level).max()
    }
}
