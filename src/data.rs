//! Data model and serialization.

pub mod bill;
pub mod findings;
pub mod report;
pub mod yaml;

pub use bill::BillDocument;
pub use findings::{
    AnalysisResult, Indicator, IndicatorKind, MonetaryAmount, PorkItem, SuspicionLevel,
};
pub use report::{CorpusReport, CorpusSummary, DocumentReport, OutputFormat};
pub use yaml::{from_yaml, to_yaml};
