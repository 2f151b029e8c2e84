//! Context for storing analyzer computation results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::AnalyzerError;
use super::types::MetricValue;

/// Stores the results of analyzer computations.
///
/// The context is the hand-off point to the host framework: it holds every
/// computed metric keyed by `analyzer_name.column`, the errors recorded for
/// analyzers that failed, and metadata about the run. Contexts from separate
/// runs can be merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerContext {
    /// Stored metrics indexed by metric key.
    metrics: HashMap<String, MetricValue>,

    /// Metadata about the analysis run.
    metadata: AnalysisMetadata,

    /// Errors that occurred during analysis.
    errors: Vec<AnalysisError>,
}

impl AnalyzerContext {
    /// Creates a new empty analyzer context.
    pub fn new() -> Self {
        Self {
            metrics: HashMap::new(),
            metadata: AnalysisMetadata::new(),
            errors: Vec::new(),
        }
    }

    /// Creates a new context with the given dataset name.
    pub fn with_dataset(dataset_name: impl Into<String>) -> Self {
        Self {
            metrics: HashMap::new(),
            metadata: AnalysisMetadata::with_dataset(dataset_name),
            errors: Vec::new(),
        }
    }

    /// Stores a metric value with the given key.
    ///
    /// # Arguments
    ///
    /// * `key` - The metric key, typically in format "analyzer_name.column"
    /// * `value` - The metric value to store
    pub fn store_metric(&mut self, key: impl Into<String>, value: MetricValue) {
        self.metrics.insert(key.into(), value);
    }

    /// Retrieves a metric value by key.
    pub fn get_metric(&self, key: &str) -> Option<&MetricValue> {
        self.metrics.get(key)
    }

    /// Returns all stored metrics.
    pub fn all_metrics(&self) -> &HashMap<String, MetricValue> {
        &self.metrics
    }

    /// Returns the keys of metrics that are in the undefined state.
    ///
    /// Hosts typically render these as missing values rather than numbers.
    pub fn missing_metrics(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .metrics
            .iter()
            .filter(|(_, v)| v.is_missing())
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Records an error that occurred during analysis.
    pub fn record_error(&mut self, analyzer_name: impl Into<String>, error: AnalyzerError) {
        self.errors.push(AnalysisError {
            analyzer_name: analyzer_name.into(),
            error: error.to_string(),
        });
    }

    /// Returns all recorded errors.
    pub fn errors(&self) -> &[AnalysisError] {
        &self.errors
    }

    /// Checks if any errors occurred during analysis.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the analysis metadata.
    pub fn metadata(&self) -> &AnalysisMetadata {
        &self.metadata
    }

    /// Returns a mutable reference to the analysis metadata.
    pub fn metadata_mut(&mut self) -> &mut AnalysisMetadata {
        &mut self.metadata
    }

    /// Merges another context into this one.
    ///
    /// Metrics from the other context overwrite existing metrics with the
    /// same key.
    pub fn merge(&mut self, other: AnalyzerContext) {
        self.metrics.extend(other.metrics);
        self.errors.extend(other.errors);
        self.metadata.merge(other.metadata);
    }
}

impl Default for AnalyzerContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata about an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Name of the dataset being analyzed.
    pub dataset_name: Option<String>,

    /// Timestamp when the analysis started.
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,

    /// Timestamp when the analysis completed.
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
}

impl AnalysisMetadata {
    /// Creates new empty metadata.
    pub fn new() -> Self {
        Self {
            dataset_name: None,
            start_time: None,
            end_time: None,
        }
    }

    /// Creates metadata with a dataset name.
    pub fn with_dataset(name: impl Into<String>) -> Self {
        Self {
            dataset_name: Some(name.into()),
            start_time: None,
            end_time: None,
        }
    }

    /// Records the start time of the analysis.
    pub fn record_start(&mut self) {
        self.start_time = Some(chrono::Utc::now());
    }

    /// Records the end time of the analysis.
    pub fn record_end(&mut self) {
        self.end_time = Some(chrono::Utc::now());
    }

    /// Returns the duration of the analysis if both timestamps are recorded.
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    fn merge(&mut self, other: AnalysisMetadata) {
        if self.dataset_name.is_none() {
            self.dataset_name = other.dataset_name;
        }
        if self.start_time.is_none() {
            self.start_time = other.start_time;
        }
        if self.end_time.is_none() {
            self.end_time = other.end_time;
        }
    }
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Error information from analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisError {
    /// Name of the analyzer that produced the error.
    pub analyzer_name: String,

    /// Error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_retrieves_metrics() {
        let mut context = AnalyzerContext::with_dataset("orders");
        context.store_metric("pattern_match.email", MetricValue::Double(0.95));
        context.store_metric("pattern_match.sku", MetricValue::Missing);

        assert_eq!(
            context.get_metric("pattern_match.email"),
            Some(&MetricValue::Double(0.95))
        );
        assert_eq!(context.missing_metrics(), vec!["pattern_match.sku"]);
        assert_eq!(context.metadata().dataset_name.as_deref(), Some("orders"));
    }

    #[test]
    fn records_errors() {
        let mut context = AnalyzerContext::new();
        assert!(!context.has_errors());

        context.record_error(
            "pattern_match",
            AnalyzerError::invalid_config("Column 'missing' does not exist"),
        );
        assert!(context.has_errors());
        assert_eq!(context.errors().len(), 1);
        assert_eq!(context.errors()[0].analyzer_name, "pattern_match");
    }

    #[test]
    fn merge_prefers_existing_metadata() {
        let mut left = AnalyzerContext::with_dataset("left");
        let mut right = AnalyzerContext::with_dataset("right");
        right.store_metric("pattern_match.email", MetricValue::Double(1.0));

        left.merge(right);
        assert_eq!(left.metadata().dataset_name.as_deref(), Some("left"));
        assert!(left.get_metric("pattern_match.email").is_some());
    }
}
