//! Text report formatting for CLI commands.
//!
//! Pure functions so the rendered output can be unit tested without a
//! terminal.

use crate::analysis::format_dollars;
use crate::data::{CorpusSummary, DocumentReport, PorkItem, SuspicionLevel};
use crate::library::PatternLibrary;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Returns an ANSI-colored suspicion label with fixed-width padding.
pub(crate) fn format_level_label(level: SuspicionLevel) -> &'static str {
    match level {
        SuspicionLevel::High => "\x1b[31mHIGH\x1b[0m  ",
        SuspicionLevel::Medium => "\x1b[33mMEDIUM\x1b[0m",
        SuspicionLevel::Low => "\x1b[36mLOW\x1b[0m   ",
    }
}

/// Returns an icon for a document: a pig when pork was flagged.
pub(crate) fn document_icon(has_pork: bool) -> &'static str {
    if has_pork {
        "\u{1f437}"
    } else {
        "\u{2705}"
    }
}

/// Formats the heading line of one document.
pub(crate) fn format_document_line(report: &DocumentReport) -> String {
    let analysis = &report.analysis;
    let mut line = format!("{} {}", document_icon(analysis.has_pork), report.source);

    match (&report.bill_id, &report.title) {
        (Some(id), Some(title)) => line.push_str(&format!(" [{id}] \"{title}\"")),
        (Some(id), None) => line.push_str(&format!(" [{id}]")),
        (None, Some(title)) => line.push_str(&format!(" \"{title}\"")),
        (None, None) => {}
    }

    line.push_str(&format!(
        " - confidence {}%, {} indicators, {} items",
        analysis.confidence_score,
        analysis.indicator_count,
        analysis.pork_items.len()
    ));
    line
}

/// Formats one pork item as an indented two-line block.
pub(crate) fn format_item_lines(item: &PorkItem) -> String {
    format!(
        "   {} {} {} ({}, score {})\n      beneficiary: {}; {}\n      \"{}\"",
        format_level_label(item.suspicion_level),
        item.amount,
        item.category,
        item.suspicion_level,
        item.suspicion_score,
        item.beneficiary,
        item.justification,
        item.description,
    )
}

/// Formats the corpus summary block.
pub(crate) fn format_summary_text(summary: &CorpusSummary) -> String {
    format!(
        "{RULE}\n\
         Summary: {} documents analyzed, {} failed\n\
         \x20 {} with pork ({:.1}%)\n\
         \x20 {} items: {} high, {} medium, {} low\n\
         \x20 Flagged value: {}",
        summary.total_documents,
        summary.failed_documents,
        summary.documents_with_pork,
        summary.pork_percentage,
        summary.total_items,
        summary.high_items,
        summary.medium_items,
        summary.low_items,
        format_dollars(summary.total_pork_value),
    )
}

/// Formats the size of a compiled pattern library.
pub(crate) fn format_library_counts(library: &PatternLibrary) -> String {
    format!(
        "   {} currency patterns\n   {} keywords\n   {} suspicious patterns\n   \
         {} location indicators\n   {} item categories\n   {} beneficiary strategies\n   \
         {} public-benefit terms",
        library.currency_patterns().len(),
        library.keywords().len(),
        library.suspicious_patterns().len(),
        library.location_indicators().len(),
        library.item_categories().len(),
        library.beneficiary_strategies().len(),
        library.public_benefit_terms().len(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::data::AnalysisResult;
    use chrono::Utc;

    fn item(level: SuspicionLevel) -> PorkItem {
        PorkItem {
            description: "$50 million for the Hometown Memorial Stadium".to_string(),
            amount: "$50.0M".to_string(),
            monetary_value: 50_000_000.0,
            beneficiary: "Springfield".to_string(),
            justification: "No clear public benefit justification".to_string(),
            suspicion_level: level,
            suspicion_score: 8,
            category: "Stadium / arena".to_string(),
        }
    }

    fn report(bill_id: Option<&str>, title: Option<&str>, items: Vec<PorkItem>) -> DocumentReport {
        DocumentReport {
            source: "bills/hr1.json".to_string(),
            bill_id: bill_id.map(str::to_string),
            title: title.map(str::to_string),
            analysis: AnalysisResult {
                has_pork: !items.is_empty(),
                total_pork_value: items.iter().map(|i| i.monetary_value).sum(),
                pork_items: items,
                indicator_count: 4,
                amounts_detected: 1,
                confidence_score: 90,
                analyzed_at: Utc::now(),
            },
        }
    }

    // ── labels ─────────────────────────────────────────────────────

    #[test]
    fn level_labels_are_colored() {
        assert!(format_level_label(SuspicionLevel::High).contains("HIGH"));
        assert!(format_level_label(SuspicionLevel::Medium).contains("\x1b[33m"));
        assert!(format_level_label(SuspicionLevel::Low).starts_with("\x1b[36m"));
    }

    #[test]
    fn document_icons() {
        assert_eq!(document_icon(true), "\u{1f437}");
        assert_eq!(document_icon(false), "\u{2705}");
    }

    // ── document lines ─────────────────────────────────────────────

    #[test]
    fn document_line_with_id_and_title() {
        let line = format_document_line(&report(
            Some("118-hr-1"),
            Some("Stadium Act"),
            vec![item(SuspicionLevel::High)],
        ));
        assert_eq!(
            line,
            "\u{1f437} bills/hr1.json [118-hr-1] \"Stadium Act\" - confidence 90%, 4 indicators, 1 items"
        );
    }

    #[test]
    fn document_line_without_metadata() {
        let line = format_document_line(&report(None, None, vec![]));
        assert_eq!(
            line,
            "\u{2705} bills/hr1.json - confidence 90%, 4 indicators, 0 items"
        );
    }

    #[test]
    fn item_lines_include_scoring() {
        let text = format_item_lines(&item(SuspicionLevel::High));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("$50.0M Stadium / arena (High, score 8)"));
        assert_eq!(
            lines[1],
            "      beneficiary: Springfield; No clear public benefit justification"
        );
        assert_eq!(
            lines[2],
            "      \"$50 million for the Hometown Memorial Stadium\""
        );
    }

    // ── summary ────────────────────────────────────────────────────

    #[test]
    fn summary_text_snapshot() {
        let summary = CorpusSummary {
            total_documents: 4,
            documents_with_pork: 3,
            pork_percentage: 75.0,
            total_pork_value: 12_000_000.0,
            total_items: 5,
            high_items: 2,
            medium_items: 2,
            low_items: 1,
            failed_documents: 1,
        };

        insta::assert_snapshot!(format_summary_text(&summary), @r"
        ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        Summary: 4 documents analyzed, 1 failed
          3 with pork (75.0%)
          5 items: 2 high, 2 medium, 1 low
          Flagged value: $12.0M
        ");
    }

    #[test]
    fn library_counts_cover_every_group() {
        let library = crate::analysis::test_utils::default_library();
        let text = format_library_counts(library);
        assert_eq!(text.lines().count(), 7);
        assert!(text.contains(&format!("{} keywords", library.keywords().len())));
        assert!(text.contains("6 item categories"));
    }
}
