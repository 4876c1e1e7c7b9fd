//! # porkscan
//!
//! Flags pork-barrel spending language in legislative bill text.
//!
//! ## Features
//!
//! - Dollar amount extraction with magnitude words ("$2.5 billion")
//! - Keyword and pattern indicators with surrounding context
//! - Scored pork items with beneficiary and justification heuristics
//! - Keyword lists, patterns and weights configured in YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use porkscan::Analyzer;
//!
//! let analyzer = Analyzer::with_defaults().unwrap();
//! let result = analyzer.analyze(
//!     "This bill appropriates $50 million for the Hometown Memorial Stadium.",
//! );
//! assert!(result.has_pork);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod library;

pub use crate::analysis::{context_window, Analyzer};
pub use crate::cli::Cli;
pub use crate::config::DetectorConfig;
pub use crate::data::{AnalysisResult, BillDocument, Indicator, MonetaryAmount, PorkItem};
pub use crate::error::PorkError;
pub use crate::library::PatternLibrary;

/// The current version of porkscan.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
