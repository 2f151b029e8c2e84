//! Analyzer framework for computing data-quality metrics.
//!
//! Analyzers compute metrics in two phases: an intermediate state derived
//! from the data, and a final metric derived from the state. States merge by
//! an associative reduction, so partial results from data partitions combine
//! into the same answer as a single whole-dataset pass. The
//! [`AnalysisRunner`] executes a set of analyzers and collects their metrics
//! into an [`AnalyzerContext`] for the host framework.
//!
//! The concrete analyzer in this crate is
//! [`pattern::PatternMatchAnalyzer`], which measures the fraction of values
//! in a string column matching a regular expression.

pub mod context;
pub mod errors;
pub mod pattern;
pub mod runner;
pub mod traits;
pub mod types;

pub use context::{AnalysisMetadata, AnalyzerContext};
pub use errors::{AnalyzerError, AnalyzerResult};
pub use pattern::{FilteredRowOutcome, PatternMatchAnalyzer, PatternMatchState, RowClassification};
pub use runner::AnalysisRunner;
pub use traits::{Analyzer, AnalyzerState};
pub use types::MetricValue;
