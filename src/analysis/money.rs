//! Monetary amount extraction and display.

use std::ops::Range;

use regex::Match;

use super::context::context_window;
use crate::data::MonetaryAmount;
use crate::library::PatternLibrary;

/// Returns the multiplier for a magnitude word, or 1 for anything else.
pub fn magnitude_factor(word: &str) -> f64 {
    match word.to_ascii_lowercase().as_str() {
        "thousand" => 1e3,
        "million" | "mil" => 1e6,
        "billion" | "bil" => 1e9,
        _ => 1.0,
    }
}

/// Parses a numeral with optional thousands separators and applies the
/// magnitude word.
///
/// Returns `None` when the numeral does not parse or the result is not finite.
pub fn parse_amount(number: &str, magnitude: Option<&str>) -> Option<f64> {
    let digits: String = number.chars().filter(|c| *c != ',').collect();
    let base: f64 = digits.parse().ok()?;
    let value = base * magnitude.map_or(1.0, magnitude_factor);
    value.is_finite().then_some(value)
}

/// Yields every currency match with its parsed value.
///
/// Expressions run one after another, each left to right over the whole text.
fn currency_matches<'a>(
    library: &'a PatternLibrary,
    text: &'a str,
) -> impl Iterator<Item = (Match<'a>, f64)> + 'a {
    library.currency_patterns().iter().flat_map(move |pattern| {
        pattern.regex().captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let number = caps.name("number")?;
            let value = parse_amount(number.as_str(), caps.name("magnitude").map(|m| m.as_str()))?;
            Some((whole, value))
        })
    })
}

/// Extracts every dollar figure in `text` with a context snippet.
pub fn extract_amounts(
    library: &PatternLibrary,
    text: &str,
    context_radius: usize,
) -> Vec<MonetaryAmount> {
    currency_matches(library, text)
        .map(|(whole, value)| MonetaryAmount {
            raw_text: whole.as_str().to_string(),
            value,
            context_snippet: context_window(text, whole.start(), context_radius).to_string(),
        })
        .collect()
}

/// Sums the dollar figures in `text`; `None` when there are none.
///
/// A match overlapping one already counted is the same figure seen by another
/// expression ("$30 million dollars") and is skipped.
pub(crate) fn total_amount(library: &PatternLibrary, text: &str) -> Option<f64> {
    let mut counted: Vec<Range<usize>> = Vec::new();
    let mut total = None;

    for (whole, value) in currency_matches(library, text) {
        if counted
            .iter()
            .any(|seen| whole.start() < seen.end && seen.start < whole.end())
        {
            continue;
        }
        counted.push(whole.range());
        total = Some(total.unwrap_or(0.0) + value);
    }

    total
}

/// Formats a dollar value for display.
///
/// Billions and millions are abbreviated to one decimal ("$2.5B", "$50.0M");
/// smaller values are grouped by thousands with cents only when present.
pub fn format_dollars(value: f64) -> String {
    if value >= 1e9 {
        format!("${:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.1}M", value / 1e6)
    } else {
        let cents = (value * 100.0).round() as u64;
        let whole = group_thousands(cents / 100);
        match cents % 100 {
            0 => format!("${whole}"),
            fraction => format!("${whole}.{fraction:02}"),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
