//! Suspicion and confidence scoring.
//!
//! Both models are additive heuristics whose weights come from
//! [`SuspicionConfig`] and [`ConfidenceConfig`]. The confidence score is not a
//! calibrated probability.

use crate::config::{ConfidenceConfig, SuspicionConfig};
use crate::data::SuspicionLevel;

impl SuspicionConfig {
    /// Scores an item from its description and dollar value.
    ///
    /// Term bonuses are case-insensitive substring tests and add up
    /// independently. Value tiers use a strict `>` and are cumulative.
    pub fn score(&self, description: &str, value: f64) -> u32 {
        let lowered = description.to_lowercase();

        let terms = self
            .term_weights
            .iter()
            .filter(|weight| lowered.contains(&weight.term.to_lowercase()))
            .map(|weight| weight.points);

        let tiers = self
            .value_tiers
            .iter()
            .filter(|tier| value > tier.above)
            .map(|tier| tier.points);

        let length = (description.chars().count() > self.long_description.above_chars)
            .then_some(self.long_description.points);

        terms
            .chain(tiers)
            .chain(length)
            .fold(0, u32::saturating_add)
    }

    /// Maps a score to its level.
    pub fn level(&self, score: u32) -> SuspicionLevel {
        if score >= self.high_at {
            SuspicionLevel::High
        } else if score >= self.medium_at {
            SuspicionLevel::Medium
        } else {
            SuspicionLevel::Low
        }
    }
}

impl ConfidenceConfig {
    /// Document confidence from item and indicator counts, clamped to 0–100.
    pub fn score(&self, item_count: usize, indicator_count: usize) -> u8 {
        let base = if item_count > 0 { self.item_base } else { 0 };
        let indicators = u32::try_from(indicator_count)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.per_indicator)
            .min(self.indicator_cap);

        u8::try_from(base.saturating_add(indicators).min(100)).unwrap_or(100)
    }

    /// Whether a document counts as containing pork.
    pub fn has_pork(&self, item_count: usize, indicator_count: usize) -> bool {
        item_count > 0 || indicator_count >= self.has_pork_min_indicators
    }
}
