//! Orchestration layer for analyzer execution.

use datafusion::prelude::*;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::{AnalyzerContext, AnalyzerError, AnalyzerResult, MetricValue};

/// Type alias for a boxed analyzer execution function.
pub type AnalyzerExecution = Box<
    dyn Fn(&SessionContext) -> futures::future::BoxFuture<'_, AnalyzerResult<(String, MetricValue)>>
        + Send
        + Sync,
>;

/// Runs a set of analyzers against a session context and collects their
/// metrics into an [`AnalyzerContext`].
///
/// Each analyzer runs its full state-then-metric pipeline; failures are
/// recorded per analyzer and, by default, do not stop the remaining ones.
///
/// # Example
///
/// ```rust,ignore
/// use pattern_guard::analyzers::AnalysisRunner;
/// use pattern_guard::analyzers::pattern::{patterns, PatternMatchAnalyzer};
/// use datafusion::prelude::*;
///
/// # async fn example(ctx: &SessionContext) -> Result<(), Box<dyn std::error::Error>> {
/// let runner = AnalysisRunner::new()
///     .add(PatternMatchAnalyzer::new("email", patterns::EMAIL.clone()))
///     .add(PatternMatchAnalyzer::new("website", patterns::URL.clone()));
///
/// let context = runner.run(ctx).await?;
/// println!("Computed {} metrics", context.all_metrics().len());
/// # Ok(())
/// # }
/// ```
pub struct AnalysisRunner {
    /// Analyzer executions to run.
    executions: Vec<AnalyzerExecution>,
    /// Names of the analyzers for debugging.
    analyzer_names: Vec<String>,
    /// Whether to continue on analyzer failures.
    continue_on_error: bool,
}

impl Default for AnalysisRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRunner {
    /// Creates a new empty AnalysisRunner.
    pub fn new() -> Self {
        Self {
            executions: Vec::new(),
            analyzer_names: Vec::new(),
            continue_on_error: true,
        }
    }

    /// Adds an analyzer to the runner.
    #[allow(clippy::should_implement_trait)]
    pub fn add<A>(mut self, analyzer: A) -> Self
    where
        A: crate::analyzers::Analyzer + 'static,
        A::Metric: Into<MetricValue> + 'static,
    {
        use futures::FutureExt;

        let name = analyzer.name().to_string();
        self.analyzer_names.push(name.clone());

        let analyzer = Arc::new(analyzer);

        let execution: AnalyzerExecution = Box::new(move |ctx| {
            let analyzer = analyzer.clone();
            async move {
                let state = analyzer.compute_state_from_data(ctx).await?;
                let metric = analyzer.compute_metric_from_state(&state)?;
                Ok((analyzer.metric_key(), metric.into()))
            }
            .boxed()
        });

        self.executions.push(execution);
        self
    }

    /// Sets whether to continue execution when individual analyzers fail.
    ///
    /// Default is true (continue on error).
    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Executes all analyzers on the given data context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The DataFusion session context with registered data
    ///
    /// # Returns
    ///
    /// An AnalyzerContext containing all computed metrics and any errors
    #[instrument(skip(self, ctx), fields(analyzer_count = self.executions.len()))]
    pub async fn run(&self, ctx: &SessionContext) -> AnalyzerResult<AnalyzerContext> {
        info!("Starting analysis with {} analyzers", self.executions.len());

        let mut context = AnalyzerContext::new();
        context.metadata_mut().record_start();

        for (idx, execution) in self.executions.iter().enumerate() {
            let analyzer_name = &self.analyzer_names[idx];
            debug!("Executing analyzer: {}", analyzer_name);

            match execution(ctx).await {
                Ok((key, metric)) => {
                    debug!("Storing metric {} = {}", key, metric);
                    context.store_metric(&key, metric);
                }
                Err(e) => {
                    error!("Analyzer {} failed: {}", analyzer_name, e);
                    context.record_error(analyzer_name, e);

                    if !self.continue_on_error {
                        return Err(AnalyzerError::execution(format!(
                            "Analyzer {analyzer_name} failed"
                        )));
                    }
                }
            }
        }

        context.metadata_mut().record_end();

        if let Some(duration) = context.metadata().duration() {
            info!(
                "Analysis completed in {:.2}s",
                duration.num_milliseconds() as f64 / 1000.0
            );
        }

        Ok(context)
    }

    /// Returns the number of analyzers configured.
    pub fn analyzer_count(&self) -> usize {
        self.executions.len()
    }
}
