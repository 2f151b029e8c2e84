//! Pattern-match rule evaluation.
//!
//! This module holds the crate's rule evaluator: a pure per-row classifier,
//! the [`PatternMatchAnalyzer`] that drives it over a DataFusion scan, and a
//! table of bundled patterns for common value formats.

mod classifier;
mod pattern_match;
pub mod patterns;

pub use classifier::{classify, matches_pattern, FilteredRowOutcome, RowClassification};
pub use pattern_match::{PatternMatchAnalyzer, PatternMatchState};
