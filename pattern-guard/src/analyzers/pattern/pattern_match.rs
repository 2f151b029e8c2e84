//! Pattern-match analyzer for measuring the fraction of values matching a
//! regular expression.

use std::hash::{Hash, Hasher};

use arrow::array::{Array, ArrayRef, BooleanArray, LargeStringArray, StringArray, StringViewArray};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use datafusion::arrow::datatypes::DataType;
use datafusion::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::analyzers::pattern::classifier::{classify, FilteredRowOutcome, RowClassification};
use crate::analyzers::{Analyzer, AnalyzerError, AnalyzerResult, AnalyzerState, MetricValue};
use crate::core::current_validation_context;

/// Analyzer that computes the fraction of values in a string column that
/// match a regular expression.
///
/// Only eligible rows count: a row must have a non-null value and pass the
/// optional SQL filter to appear in either counter. The metric is
/// `match_count / total_count`, or [`MetricValue::Missing`] when no row is
/// eligible.
///
/// Two analyzers are equal when their column, pattern text and filter text
/// agree, so structurally identical rules built independently deduplicate in
/// maps even though [`Regex`] itself has no value equality.
///
/// # Example
///
/// ```rust,ignore
/// use pattern_guard::analyzers::pattern::{patterns, PatternMatchAnalyzer};
/// use pattern_guard::analyzers::{Analyzer, MetricValue};
/// use datafusion::prelude::*;
///
/// # async fn example(ctx: &SessionContext) -> Result<(), Box<dyn std::error::Error>> {
/// let analyzer = PatternMatchAnalyzer::new("email", patterns::EMAIL.clone())
///     .with_filter("country = 'US'");
///
/// let state = analyzer.compute_state_from_data(ctx).await?;
/// let metric = analyzer.compute_metric_from_state(&state)?;
///
/// if let MetricValue::Double(fraction) = metric {
///     println!("Email validity: {:.2}%", fraction * 100.0);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PatternMatchAnalyzer {
    /// The column to analyze.
    column: String,
    /// The compiled pattern applied to each value.
    pattern: Regex,
    /// Optional SQL predicate restricting eligible rows.
    filter: Option<String>,
    /// Diagnostic treatment of filter-excluded rows.
    filtered_row_outcome: FilteredRowOutcome,
}

impl PatternMatchAnalyzer {
    /// Creates a new pattern-match analyzer for the specified column.
    pub fn new(column: impl Into<String>, pattern: Regex) -> Self {
        Self {
            column: column.into(),
            pattern,
            filter: None,
            filtered_row_outcome: FilteredRowOutcome::default(),
        }
    }

    /// Restricts the rule to rows satisfying a SQL boolean predicate.
    ///
    /// Rows failing the predicate are excluded from both counters; their
    /// diagnostic representation follows the configured
    /// [`FilteredRowOutcome`].
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets how filter-excluded rows appear in row-level output.
    pub fn with_filtered_row_outcome(mut self, outcome: FilteredRowOutcome) -> Self {
        self.filtered_row_outcome = outcome;
        self
    }

    /// Returns the column being analyzed.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the pattern text in its canonical form.
    pub fn pattern_text(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns the SQL filter predicate, if configured.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Returns the configured diagnostic policy for filter-excluded rows.
    pub fn filtered_row_outcome(&self) -> FilteredRowOutcome {
        self.filtered_row_outcome
    }

    /// Checks the rule's preconditions without scanning any rows.
    ///
    /// Fails with [`AnalyzerError::InvalidConfiguration`] when the target
    /// table is not registered, the column does not exist, the column is not
    /// string-typed, or the filter text is rejected.
    pub async fn validate(&self, ctx: &SessionContext) -> AnalyzerResult<()> {
        let validation_ctx = current_validation_context();
        self.validate_filter()?;
        self.validate_schema(ctx, validation_ctx.table_name()).await
    }

    /// Screens the filter text before it is embedded in a query.
    fn validate_filter(&self) -> AnalyzerResult<()> {
        let Some(filter) = &self.filter else {
            return Ok(());
        };
        let lower = filter.to_lowercase();

        // Disallow dangerous keywords
        let dangerous_keywords = [
            "drop", "delete", "insert", "update", "create", "alter", "grant", "revoke", "exec",
            "execute", "union", "select", "--", "/*", "*/",
        ];

        for keyword in &dangerous_keywords {
            if lower.contains(keyword) {
                return Err(AnalyzerError::invalid_config(format!(
                    "Filter contains forbidden keyword: {keyword}"
                )));
            }
        }

        Ok(())
    }

    /// Verifies the column exists and is string-typed.
    async fn validate_schema(&self, ctx: &SessionContext, table_name: &str) -> AnalyzerResult<()> {
        let df = ctx.table(table_name).await.map_err(|_| {
            AnalyzerError::invalid_config(format!("Table '{table_name}' is not registered"))
        })?;

        let schema = df.schema();
        let field = schema
            .fields()
            .iter()
            .find(|field| field.name() == &self.column)
            .ok_or_else(|| {
                AnalyzerError::invalid_config(format!(
                    "Column '{}' does not exist in table '{table_name}'",
                    self.column
                ))
            })?;

        match field.data_type() {
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Ok(()),
            other => Err(AnalyzerError::invalid_config(format!(
                "Column '{}' must be a string type to match patterns, found {other}",
                self.column
            ))),
        }
    }

    fn scan_sql(&self, table_name: &str) -> String {
        match &self.filter {
            Some(filter) => format!(
                "SELECT {} AS value, ({filter}) AS filter_pass FROM {table_name}",
                self.column
            ),
            None => format!("SELECT {} AS value FROM {table_name}", self.column),
        }
    }

    /// Projects the column (and filter verdict) and collects the batches.
    ///
    /// Validation runs first, so every failure up to query planning surfaces
    /// as a configuration error before a single row is read.
    async fn scan(&self, ctx: &SessionContext) -> AnalyzerResult<Vec<RecordBatch>> {
        let validation_ctx = current_validation_context();
        let table_name = validation_ctx.table_name();

        self.validate_filter()?;
        self.validate_schema(ctx, table_name).await?;

        let sql = self.scan_sql(table_name);
        let df = ctx.sql(&sql).await.map_err(|e| match &self.filter {
            Some(filter) => {
                AnalyzerError::invalid_config(format!("Invalid filter '{filter}': {e}"))
            }
            None => AnalyzerError::from(e),
        })?;

        Ok(df.collect().await?)
    }

    /// Classifies every row of a batch in row order.
    fn classify_batch(&self, batch: &RecordBatch) -> AnalyzerResult<Vec<RowClassification>> {
        let values = string_values(batch.column(0))?;
        let filter_passes = if self.filter.is_some() {
            let array = batch
                .column(1)
                .as_any()
                .downcast_ref::<BooleanArray>()
                .ok_or_else(|| {
                    AnalyzerError::invalid_data("Expected Boolean array for filter result")
                })?;
            Some(array)
        } else {
            None
        };

        let mut classifications = Vec::with_capacity(batch.num_rows());
        for (idx, value) in values.iter().enumerate() {
            // A filter evaluating to SQL NULL counts as not passing.
            let pass = filter_passes
                .map(|array| array.is_valid(idx) && array.value(idx))
                .unwrap_or(true);
            classifications.push(classify(*value, pass, &self.pattern));
        }
        Ok(classifications)
    }

    /// Produces the per-row diagnostic view of the scan, one entry per input
    /// row, aligned with row order.
    ///
    /// Filter-excluded rows are reported according to the configured
    /// [`FilteredRowOutcome`]; null values are always reported as `None`.
    /// The aggregation counters are unaffected by this view.
    #[instrument(skip(ctx), fields(analyzer = "pattern_match", column = %self.column))]
    pub async fn row_level_results(
        &self,
        ctx: &SessionContext,
    ) -> AnalyzerResult<Vec<Option<bool>>> {
        let batches = self.scan(ctx).await?;

        let mut results = Vec::new();
        for batch in &batches {
            for classification in self.classify_batch(batch)? {
                results.push(self.filtered_row_outcome.diagnostic(classification));
            }
        }
        Ok(results)
    }
}

impl PartialEq for PatternMatchAnalyzer {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column
            && self.pattern.as_str() == other.pattern.as_str()
            && self.filter == other.filter
    }
}

impl Eq for PatternMatchAnalyzer {}

/// Hashes the canonical configuration tuple, consistent with equality.
impl Hash for PatternMatchAnalyzer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.column.hash(state);
        self.pattern.as_str().hash(state);
        self.filter.hash(state);
    }
}

/// State for the pattern-match analyzer.
///
/// A pair of counters forming an associative, commutative reduction: partial
/// states computed on disjoint partitions merge by addition into the same
/// result as a single whole-dataset scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternMatchState {
    /// Number of eligible rows whose value matches the pattern.
    pub match_count: u64,
    /// Number of eligible rows (non-null value, filter passed).
    pub total_count: u64,
}

impl PatternMatchState {
    /// Creates a state from raw counters.
    pub fn new(match_count: u64, total_count: u64) -> Self {
        Self {
            match_count,
            total_count,
        }
    }

    /// Folds one row classification into the counters.
    pub fn record(&mut self, classification: RowClassification) {
        if classification.is_eligible() {
            self.total_count += 1;
            if classification.is_match() {
                self.match_count += 1;
            }
        }
    }

    /// The match fraction, or `None` when no row was eligible.
    pub fn metric_value(&self) -> Option<f64> {
        if self.total_count == 0 {
            None
        } else {
            Some(self.match_count as f64 / self.total_count as f64)
        }
    }
}

impl AnalyzerState for PatternMatchState {
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self> {
        let match_count = states.iter().map(|s| s.match_count).sum();
        let total_count = states.iter().map(|s| s.total_count).sum();

        Ok(PatternMatchState {
            match_count,
            total_count,
        })
    }

    fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

#[async_trait]
impl Analyzer for PatternMatchAnalyzer {
    type State = PatternMatchState;
    type Metric = MetricValue;

    #[instrument(skip(ctx), fields(analyzer = "pattern_match", column = %self.column))]
    async fn compute_state_from_data(&self, ctx: &SessionContext) -> AnalyzerResult<Self::State> {
        let batches = self.scan(ctx).await?;

        let mut state = PatternMatchState::default();
        for batch in &batches {
            for classification in self.classify_batch(batch)? {
                state.record(classification);
            }
        }
        Ok(state)
    }

    fn compute_metric_from_state(&self, state: &Self::State) -> AnalyzerResult<Self::Metric> {
        Ok(MetricValue::from(state.metric_value()))
    }

    fn name(&self) -> &str {
        "pattern_match"
    }

    fn description(&self) -> &str {
        "Computes the fraction of column values matching a regular expression"
    }

    fn metric_key(&self) -> String {
        format!("{}.{}", self.name(), self.column)
    }

    fn columns(&self) -> Vec<&str> {
        vec![&self.column]
    }
}

/// Reads a batch column as nullable string slices.
///
/// Accepts the three Arrow string encodings a validated column can arrive
/// in.
fn string_values(array: &ArrayRef) -> AnalyzerResult<Vec<Option<&str>>> {
    let any = array.as_any();
    if let Some(strings) = any.downcast_ref::<StringArray>() {
        Ok((0..strings.len())
            .map(|i| strings.is_valid(i).then(|| strings.value(i)))
            .collect())
    } else if let Some(strings) = any.downcast_ref::<LargeStringArray>() {
        Ok((0..strings.len())
            .map(|i| strings.is_valid(i).then(|| strings.value(i)))
            .collect())
    } else if let Some(strings) = any.downcast_ref::<StringViewArray>() {
        Ok((0..strings.len())
            .map(|i| strings.is_valid(i).then(|| strings.value(i)))
            .collect())
    } else {
        Err(AnalyzerError::invalid_data(format!(
            "Expected a string array for pattern matching, found {:?}",
            array.data_type()
        )))
    }
}
