//! Pork item identification.

use regex::Regex;

use super::money::{format_dollars, total_amount};
use crate::config::SuspicionConfig;
use crate::data::PorkItem;
use crate::library::PatternLibrary;

/// Returned when no public-benefit term appears in an item.
pub const NO_JUSTIFICATION: &str = "No clear public benefit justification";

/// Turns every item-category match in `text` into a scored [`PorkItem`].
///
/// Matches without a parseable dollar figure are dropped. Categories are
/// independent, so one provision may produce several items.
pub fn identify_items(
    library: &PatternLibrary,
    suspicion: &SuspicionConfig,
    text: &str,
) -> Vec<PorkItem> {
    let mut items = Vec::new();

    for category in library.item_categories() {
        for hit in category.regex().find_iter(text) {
            let span = hit.as_str();
            let Some(monetary_value) = total_amount(library, span) else {
                continue;
            };

            let description = span.trim().to_string();
            let suspicion_score = suspicion.score(&description, monetary_value);

            items.push(PorkItem {
                amount: format_dollars(monetary_value),
                monetary_value,
                beneficiary: infer_beneficiary(library, span),
                justification: infer_justification(library, span),
                suspicion_level: suspicion.level(suspicion_score),
                suspicion_score,
                category: category.name().to_string(),
                description,
            });
        }
    }

    items
}

/// Tries each beneficiary strategy in order; the first capture wins.
pub fn infer_beneficiary(library: &PatternLibrary, span: &str) -> String {
    library
        .beneficiary_strategies()
        .iter()
        .find_map(|strategy| capture_beneficiary(strategy.regex(), span))
        .unwrap_or_else(|| library.beneficiary_fallback().to_string())
}

/// Returns the first non-empty capture group of the first match.
fn capture_beneficiary(regex: &Regex, span: &str) -> Option<String> {
    regex.captures_iter(span).find_map(|caps| {
        caps.iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str().trim())
            .find(|name| !name.is_empty())
            .map(str::to_string)
    })
}

/// Lists the public-benefit terms the span mentions.
pub fn infer_justification(library: &PatternLibrary, span: &str) -> String {
    let lowered = span.to_lowercase();
    let claimed: Vec<&str> = library
        .public_benefit_terms()
        .iter()
        .filter(|term| lowered.contains(term.as_str()))
        .map(String::as_str)
        .collect();

    if claimed.is_empty() {
        NO_JUSTIFICATION.to_string()
    } else {
        format!("Claimed: {}", claimed.join(", "))
    }
}
