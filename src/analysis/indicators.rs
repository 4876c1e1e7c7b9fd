//! Keyword and suspicious-pattern scanning.

use super::context::context_window;
use crate::data::{Indicator, IndicatorKind};
use crate::library::PatternLibrary;

/// Scans `text` for keyword and suspicious-pattern indicators.
///
/// Every occurrence of every keyword yields one indicator, followed by every
/// match of every suspicious pattern. Overlapping keywords ("hometown" and
/// "hometown project") both count.
pub fn scan_indicators(
    library: &PatternLibrary,
    text: &str,
    keyword_radius: usize,
) -> Vec<Indicator> {
    // ASCII folding keeps byte offsets aligned with the original text.
    let folded = text.to_ascii_lowercase();
    let mut indicators = Vec::new();

    for keyword in library.keywords() {
        for hit in keyword.regex().find_iter(&folded) {
            indicators.push(Indicator {
                kind: IndicatorKind::Keyword,
                label: keyword.phrase().to_string(),
                matched_text: text[hit.range()].to_string(),
                context: context_window(text, hit.start(), keyword_radius).to_string(),
            });
        }
    }

    for pattern in library.suspicious_patterns() {
        for hit in pattern.regex().find_iter(text) {
            indicators.push(Indicator {
                kind: IndicatorKind::Pattern,
                label: pattern.name().to_string(),
                matched_text: hit.as_str().to_string(),
                context: hit.as_str().to_string(),
            });
        }
    }

    indicators
}
