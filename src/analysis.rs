//! Pork-barrel detection engine.
//!
//! An [`Analyzer`] owns a validated [`DetectorConfig`] and the
//! [`PatternLibrary`] compiled from it. Construction is the only fallible
//! step; analysis itself is total and never fails, whatever the input.
//!
//! The stages run in this order:
//!
//! 1. [`money::extract_amounts`] counts the dollar figures in the document.
//! 2. [`indicators::scan_indicators`] collects keyword and pattern hits.
//! 3. [`items::identify_items`] turns category matches into scored items.
//! 4. [`ConfidenceConfig::score`](crate::config::ConfidenceConfig::score)
//!    rates the whole document.

pub mod context;
pub mod indicators;
pub mod items;
pub mod money;
pub mod scoring;

use chrono::Utc;
use tracing::debug;

pub use context::context_window;
pub use money::format_dollars;

use crate::config::DetectorConfig;
use crate::data::{AnalysisResult, BillDocument, Indicator, MonetaryAmount, PorkItem, SuspicionLevel};
use crate::error::PorkError;
use crate::library::PatternLibrary;

/// Immutable pork detector, cheap to share across threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: DetectorConfig,
    library: PatternLibrary,
}

impl Analyzer {
    /// Validates `config` and compiles its pattern library.
    pub fn new(config: DetectorConfig) -> Result<Self, PorkError> {
        config.validate()?;
        let library = PatternLibrary::compile(&config.library, &config.limits)?;

        debug!(
            keywords = library.keywords().len(),
            suspicious_patterns = library.suspicious_patterns().len(),
            item_categories = library.item_categories().len(),
            "Compiled pattern library"
        );

        Ok(Self { config, library })
    }

    /// Creates an analyzer from the embedded default configuration.
    pub fn with_defaults() -> Result<Self, PorkError> {
        let config =
            DetectorConfig::embedded().map_err(|e| PorkError::InvalidConfig(format!("{e:#}")))?;
        Self::new(config)
    }

    /// The configuration this analyzer was built from.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// The compiled pattern library.
    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Analyzes a bill, concatenating title, summary and full text.
    pub fn analyze_document(&self, document: &BillDocument) -> AnalysisResult {
        self.analyze(&document.combined_text())
    }

    /// Analyzes one document's text.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let amounts = self.extract_amounts(text);
        let indicators = self.scan_indicators(text);
        let pork_items = self.identify_items(text);

        let total_pork_value = pork_items.iter().map(|item| item.monetary_value).sum();
        let has_pork = self
            .config
            .confidence
            .has_pork(pork_items.len(), indicators.len());
        let confidence_score = self.confidence(&pork_items, &indicators);

        debug!(
            bytes = text.len(),
            amounts = amounts.len(),
            indicators = indicators.len(),
            items = pork_items.len(),
            has_pork,
            confidence_score,
            "Analyzed document"
        );

        AnalysisResult {
            has_pork,
            pork_items,
            total_pork_value,
            indicator_count: indicators.len(),
            amounts_detected: amounts.len(),
            confidence_score,
            analyzed_at: Utc::now(),
        }
    }

    /// Extracts every dollar figure in `text`.
    pub fn extract_amounts(&self, text: &str) -> Vec<MonetaryAmount> {
        money::extract_amounts(&self.library, text, self.config.context.amount_radius)
    }

    /// Collects keyword and suspicious-pattern indicators.
    pub fn scan_indicators(&self, text: &str) -> Vec<Indicator> {
        indicators::scan_indicators(&self.library, text, self.config.context.keyword_radius)
    }

    /// Identifies and scores pork items.
    pub fn identify_items(&self, text: &str) -> Vec<PorkItem> {
        items::identify_items(&self.library, &self.config.suspicion, text)
    }

    /// Suspicion score for an item description and value.
    pub fn suspicion_score(&self, description: &str, value: f64) -> u32 {
        self.config.suspicion.score(description, value)
    }

    /// Suspicion level for a score.
    pub fn suspicion_level(&self, score: u32) -> SuspicionLevel {
        self.config.suspicion.level(score)
    }

    /// Document confidence, 0–100.
    pub fn confidence(&self, items: &[PorkItem], indicators: &[Indicator]) -> u8 {
        self.config.confidence.score(items.len(), indicators.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod test_utils {
    use std::sync::OnceLock;

    use super::Analyzer;
    use crate::library::PatternLibrary;

    /// Analyzer over the embedded configuration, compiled once per test binary.
    pub(crate) fn default_analyzer() -> &'static Analyzer {
        static ANALYZER: OnceLock<Analyzer> = OnceLock::new();
        ANALYZER.get_or_init(|| Analyzer::with_defaults().unwrap())
    }

    pub(crate) fn default_library() -> &'static PatternLibrary {
        default_analyzer().library()
    }
}
