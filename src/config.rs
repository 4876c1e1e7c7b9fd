//! Detector configuration.
//!
//! The default configuration is loaded from an embedded YAML template so the
//! keyword lists, regular expressions, and scoring weights live in one
//! reviewable place. User configuration files are YAML overlays merged on top
//! of the template.

pub mod discovery;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PorkError;

/// The embedded default configuration.
pub const DEFAULT_PATTERNS_YAML: &str = include_str!("templates/patterns.yaml");

/// Largest accepted `limits.max_span_bytes`.
const MAX_SPAN_LIMIT: usize = 1000;

/// Complete detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Context window radii.
    pub context: ContextConfig,
    /// Resource limits applied when compiling patterns.
    pub limits: LimitsConfig,
    /// Per-item suspicion weights and thresholds.
    pub suspicion: SuspicionConfig,
    /// Document-level confidence weights.
    pub confidence: ConfidenceConfig,
    /// Keyword and pattern library.
    pub library: LibrarySpec,
}

/// Context window radii, in bytes on each side of a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Radius of the snippet stored with each monetary amount.
    pub amount_radius: usize,
    /// Radius of the snippet stored with each keyword indicator.
    pub keyword_radius: usize,
}

/// Resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum length of each `{span}` run in a pattern.
    pub max_span_bytes: usize,
}

/// Points awarded when a term appears in an item description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermWeight {
    /// Case-insensitive substring to look for.
    pub term: String,
    /// Points added when present.
    pub points: u32,
}

/// Points awarded when an item's value strictly exceeds a threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueTier {
    /// Exclusive lower bound in dollars.
    pub above: f64,
    /// Points added when exceeded.
    pub points: u32,
}

/// Points awarded for long, specific descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LengthBonus {
    /// Exclusive lower bound on description length in characters.
    pub above_chars: usize,
    /// Points added when exceeded.
    pub points: u32,
}

/// Suspicion scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspicionConfig {
    /// Independent, additive term bonuses.
    pub term_weights: Vec<TermWeight>,
    /// Cumulative value tiers.
    pub value_tiers: Vec<ValueTier>,
    /// Bonus for long descriptions.
    pub long_description: LengthBonus,
    /// Minimum score rated high.
    pub high_at: u32,
    /// Minimum score rated medium.
    pub medium_at: u32,
}

/// Document confidence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Base points when at least one pork item was identified.
    pub item_base: u32,
    /// Points per indicator.
    pub per_indicator: u32,
    /// Cap on the indicator contribution.
    pub indicator_cap: u32,
    /// Indicator count at which a document has pork even without items.
    pub has_pork_min_indicators: usize,
}

/// A named regular expression as written in the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Human-readable name, used as indicator label or item category.
    pub name: String,
    /// Pattern source, possibly containing placeholders.
    pub pattern: String,
}

/// Uncompiled pattern library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySpec {
    /// Currency expressions with `number` and optional `magnitude` groups.
    pub currency_patterns: Vec<PatternSpec>,
    /// Pork-associated keyword phrases.
    pub keywords: Vec<String>,
    /// Suspicious spending constructions.
    pub suspicious_patterns: Vec<PatternSpec>,
    /// Phrases that signal a geographically targeted beneficiary.
    pub location_indicators: Vec<String>,
    /// Item category patterns; each match may become a pork item.
    pub item_categories: Vec<PatternSpec>,
    /// Beneficiary capture patterns, tried after the location indicators.
    pub beneficiary_patterns: Vec<PatternSpec>,
    /// Beneficiary reported when no strategy captures one.
    pub beneficiary_fallback: String,
    /// Terms that count as a claimed public benefit.
    pub public_benefit_terms: Vec<String>,
}

impl DetectorConfig {
    /// Parses the embedded default configuration.
    pub fn embedded() -> Result<Self> {
        serde_yaml::from_str(DEFAULT_PATTERNS_YAML)
            .context("Failed to parse embedded pattern configuration")
    }

    /// Parses a YAML overlay and merges it over the embedded defaults.
    pub fn from_yaml_str(overlay: &str) -> Result<Self> {
        let mut base: serde_yaml::Value = serde_yaml::from_str(DEFAULT_PATTERNS_YAML)
            .context("Failed to parse embedded pattern configuration")?;
        let overlay: serde_yaml::Value =
            serde_yaml::from_str(overlay).context("Failed to parse pattern configuration")?;

        merge_yaml(&mut base, overlay);

        serde_yaml::from_value(base).context("Invalid pattern configuration")
    }

    /// Reads a YAML overlay file and merges it over the embedded defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pattern file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to load pattern file: {}", path.display()))
    }

    /// Checks that thresholds and limits are consistent.
    pub fn validate(&self) -> std::result::Result<(), PorkError> {
        if self.limits.max_span_bytes == 0 || self.limits.max_span_bytes > MAX_SPAN_LIMIT {
            return Err(PorkError::InvalidConfig(format!(
                "limits.max_span_bytes must be between 1 and {MAX_SPAN_LIMIT}, got {}",
                self.limits.max_span_bytes
            )));
        }

        if self.suspicion.medium_at > self.suspicion.high_at {
            return Err(PorkError::InvalidConfig(format!(
                "suspicion.medium_at ({}) exceeds suspicion.high_at ({})",
                self.suspicion.medium_at, self.suspicion.high_at
            )));
        }

        if let Some(tier) = self
            .suspicion
            .value_tiers
            .iter()
            .find(|tier| !tier.above.is_finite() || tier.above < 0.0)
        {
            return Err(PorkError::InvalidConfig(format!(
                "suspicion.value_tiers threshold must be a non-negative number, got {}",
                tier.above
            )));
        }

        if let Some(term) = self
            .suspicion
            .term_weights
            .iter()
            .find(|weight| weight.term.trim().is_empty())
        {
            return Err(PorkError::InvalidConfig(format!(
                "suspicion.term_weights contains an empty term ({} points)",
                term.points
            )));
        }

        if self.library.currency_patterns.is_empty() {
            return Err(PorkError::InvalidConfig(
                "library.currency_patterns must not be empty".to_string(),
            ));
        }

        if self.library.beneficiary_fallback.trim().is_empty() {
            return Err(PorkError::InvalidConfig(
                "library.beneficiary_fallback must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Serializes the configuration back to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize pattern configuration")
    }
}

/// Deep-merges `overlay` into `base`.
///
/// Mappings merge key by key; any other value in the overlay replaces the
/// base value. A null overlay leaves the base untouched.
fn merge_yaml(base: &mut serde_yaml::Value, overlay: serde_yaml::Value) {
    use serde_yaml::Value;

    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // ── embedded template ──────────────────────────────────────────

    #[test]
    fn embedded_config_parses() {
        let config = DetectorConfig::embedded().unwrap();
        assert!(config.library.keywords.iter().any(|k| k == "memorial"));
        assert!(config.library.keywords.iter().any(|k| k == "earmark"));
        assert_eq!(config.library.item_categories.len(), 6);
        assert_eq!(config.suspicion.high_at, 5);
        assert_eq!(config.suspicion.medium_at, 3);
        assert_eq!(config.confidence.item_base, 70);
    }

    #[test]
    fn embedded_config_validates() {
        let config = DetectorConfig::embedded().unwrap();
        assert!(config.validate().is_ok());
    }

    // ── overlays ───────────────────────────────────────────────────

    #[test]
    fn overlay_replaces_scalars_and_keeps_siblings() {
        let config = DetectorConfig::from_yaml_str(
            r"
suspicion:
  high_at: 7
",
        )
        .unwrap();
        assert_eq!(config.suspicion.high_at, 7);
        assert_eq!(config.suspicion.medium_at, 3);
        assert!(!config.library.keywords.is_empty());
    }

    #[test]
    fn overlay_replaces_lists_outright() {
        let config = DetectorConfig::from_yaml_str(
            r"
library:
  keywords: [boondoggle]
",
        )
        .unwrap();
        assert_eq!(config.library.keywords, vec!["boondoggle".to_string()]);
        assert!(!config.library.item_categories.is_empty());
    }

    #[test]
    fn empty_overlay_yields_defaults() {
        let config = DetectorConfig::from_yaml_str("").unwrap();
        let embedded = DetectorConfig::embedded().unwrap();
        assert_eq!(
            config.library.keywords.len(),
            embedded.library.keywords.len()
        );
    }

    #[test]
    fn overlay_with_wrong_type_is_rejected() {
        let result = DetectorConfig::from_yaml_str("limits:\n  max_span_bytes: many\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_path_reads_overlay() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"confidence:\n  item_base: 60\n").unwrap();

        let config = DetectorConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.confidence.item_base, 60);
        assert_eq!(config.confidence.per_indicator, 5);
    }

    #[test]
    fn load_from_missing_path_fails() {
        let result = DetectorConfig::load_from_path("/nonexistent/porkscan/patterns.yaml");
        assert!(result.is_err());
    }

    // ── validation ─────────────────────────────────────────────────

    #[test]
    fn validate_rejects_inverted_thresholds() {
        let mut config = DetectorConfig::embedded().unwrap();
        config.suspicion.medium_at = 9;
        assert!(matches!(
            config.validate(),
            Err(PorkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_span() {
        let mut config = DetectorConfig::embedded().unwrap();
        config.limits.max_span_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_span() {
        let mut config = DetectorConfig::embedded().unwrap();
        config.limits.max_span_bytes = MAX_SPAN_LIMIT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_tier() {
        let mut config = DetectorConfig::embedded().unwrap();
        config.suspicion.value_tiers[0].above = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_currency_patterns() {
        let mut config = DetectorConfig::embedded().unwrap();
        config.library.currency_patterns.clear();
        assert!(config.validate().is_err());
    }

    // ── merge_yaml ─────────────────────────────────────────────────

    #[test]
    fn merge_yaml_adds_new_keys() {
        let mut base: serde_yaml::Value = serde_yaml::from_str("a: 1").unwrap();
        let overlay: serde_yaml::Value = serde_yaml::from_str("b: 2").unwrap();
        merge_yaml(&mut base, overlay);
        assert_eq!(base["a"].as_i64(), Some(1));
        assert_eq!(base["b"].as_i64(), Some(2));
    }

    #[test]
    fn merge_yaml_null_overlay_is_noop() {
        let mut base: serde_yaml::Value = serde_yaml::from_str("a: 1").unwrap();
        merge_yaml(&mut base, serde_yaml::Value::Null);
        assert_eq!(base["a"].as_i64(), Some(1));
    }

    #[test]
    fn round_trips_through_yaml() {
        let config = DetectorConfig::embedded().unwrap();
        let yaml = config.to_yaml_string().unwrap();
        let reparsed = DetectorConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(reparsed.library.keywords, config.library.keywords);
    }
}
