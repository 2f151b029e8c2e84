//! Core analyzer traits.

use async_trait::async_trait;
use datafusion::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::errors::AnalyzerResult;
use super::types::MetricValue;

/// Core trait for analyzers that compute metrics from data.
///
/// Analyzers split their work into two phases: computing an intermediate
/// state from the data, and deriving the final metric from that state.
/// States from independent partitions can be merged, so an analyzer can run
/// incrementally or sharded across workers and combined afterwards.
///
/// # Type Parameters
///
/// * `State` - The state type that holds intermediate computation results
/// * `Metric` - The final metric type produced by this analyzer
///
/// # Example
///
/// ```rust,ignore
/// use pattern_guard::analyzers::{Analyzer, AnalyzerState, MetricValue};
/// use pattern_guard::analyzers::pattern::{patterns, PatternMatchAnalyzer};
/// use datafusion::prelude::*;
///
/// # async fn example(ctx: &SessionContext) -> Result<(), Box<dyn std::error::Error>> {
/// let analyzer = PatternMatchAnalyzer::new("email", patterns::EMAIL.clone());
/// let state = analyzer.compute_state_from_data(ctx).await?;
/// let metric = analyzer.compute_metric_from_state(&state)?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Analyzer: Send + Sync + Debug {
    /// The state type for incremental computation.
    type State: AnalyzerState;

    /// The metric type produced by this analyzer.
    type Metric: Into<MetricValue> + Send + Sync + Debug;

    /// Computes the state from the input data.
    ///
    /// Precondition checks (schema, configuration) run before any row is
    /// scanned; a failure there surfaces as a configuration error rather
    /// than a runtime data error.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The DataFusion session context with registered data tables
    async fn compute_state_from_data(&self, ctx: &SessionContext) -> AnalyzerResult<Self::State>;

    /// Computes the final metric from the accumulated state.
    fn compute_metric_from_state(&self, state: &Self::State) -> AnalyzerResult<Self::Metric>;

    /// Merges multiple states into a single state.
    ///
    /// Enables parallel computation by combining states computed from
    /// different data partitions.
    fn merge_states(&self, states: Vec<Self::State>) -> AnalyzerResult<Self::State> {
        Self::State::merge(states)
    }

    /// Returns the name of this analyzer.
    ///
    /// Used for identification in results and debugging.
    fn name(&self) -> &str;

    /// Returns a description of what this analyzer computes.
    fn description(&self) -> &str {
        ""
    }

    /// Returns the metric key for storing results.
    ///
    /// By default, this returns the analyzer name; column-based analyzers
    /// should override this to include the column name.
    fn metric_key(&self) -> String {
        self.name().to_string()
    }

    /// Returns the column(s) this analyzer operates on, if any.
    fn columns(&self) -> Vec<&str> {
        vec![]
    }
}

/// Trait for analyzer state that supports incremental computation.
///
/// States must be serializable so partial results can cross partition or
/// process boundaries before being merged.
pub trait AnalyzerState:
    Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>
{
    /// Merges multiple states into a single state.
    ///
    /// The reduction must be associative and commutative so that states
    /// computed independently on data partitions combine to the same result
    /// as a single whole-dataset computation.
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self>
    where
        Self: Sized;

    /// Returns whether this state represents an empty computation.
    ///
    /// Used to optimize away empty states during merging.
    fn is_empty(&self) -> bool {
        false
    }
}
