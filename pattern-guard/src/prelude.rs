//! Prelude for commonly used types and traits in pattern-guard.

pub use crate::analyzers::pattern::{
    FilteredRowOutcome, PatternMatchAnalyzer, PatternMatchState, RowClassification,
};
pub use crate::analyzers::{
    AnalysisRunner, Analyzer, AnalyzerContext, AnalyzerError, AnalyzerResult, AnalyzerState,
    MetricValue,
};
pub use crate::core::{with_validation_context, ValidationContext};
pub use crate::logging::LogConfig;
