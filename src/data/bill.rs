//! Bill document input records.

use serde::{Deserialize, Serialize};

/// A legislative bill as supplied by the caller.
///
/// Field names accept both snake_case and the camelCase used by scraped bill
/// exports (`billId`, `fullText`, ...). Only `title`, `summary` and
/// `full_text` take part in analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillDocument {
    /// Identifier such as "118-hr-1234".
    #[serde(default, alias = "billId", skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    /// Congress number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congress: Option<u32>,
    /// Bill type, e.g. "hr" or "s".
    #[serde(default, alias = "billType", skip_serializing_if = "Option::is_none")]
    pub bill_type: Option<String>,
    /// Bill number within its type.
    #[serde(default, alias = "billNumber", skip_serializing_if = "Option::is_none")]
    pub bill_number: Option<u32>,
    /// Official or short title.
    #[serde(default)]
    pub title: String,
    /// Summary text.
    #[serde(default)]
    pub summary: String,
    /// Full bill text.
    #[serde(default, alias = "fullText")]
    pub full_text: String,
    /// Sponsor names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sponsors: Vec<String>,
}

impl BillDocument {
    /// Creates a document holding only full text.
    pub fn from_text(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            ..Self::default()
        }
    }

    /// Concatenates title, summary and full text with single spaces.
    ///
    /// Empty fields still contribute their separator.
    #[must_use]
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.title, self.summary, self.full_text)
    }
}
