//! # Pattern Guard - Pattern-Match Data Quality Metrics for Rust
//!
//! Pattern Guard computes a focused data-quality metric: the fraction of
//! values in a string column that match a regular expression. It is a rule
//! evaluator designed to be embedded in a larger data-quality framework,
//! leveraging DataFusion for query execution while keeping the per-row
//! matching logic in pure Rust.
//!
//! ## Overview
//!
//! A rule names a column and a compiled pattern, optionally restricted by a
//! SQL row filter. Evaluating the rule classifies every row as a match, a
//! non-match, or excluded (null value or filtered out), and folds the
//! classifications into a pair of counters whose ratio is the metric. The
//! counters merge by addition, so partial results computed on disjoint data
//! partitions combine into exactly the whole-dataset answer.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pattern_guard::analyzers::pattern::{patterns, PatternMatchAnalyzer};
//! use pattern_guard::analyzers::{AnalysisRunner, MetricValue};
//! use datafusion::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a DataFusion context and register your table as "data"
//! let ctx = SessionContext::new();
//! // ... ctx.register_batch("data", batch)? ...
//!
//! let runner = AnalysisRunner::new()
//!     .add(PatternMatchAnalyzer::new("email", patterns::EMAIL.clone()))
//!     .add(
//!         PatternMatchAnalyzer::new("phone", patterns::US_PHONE_NUMBER.clone())
//!             .with_filter("country = 'US'"),
//!     );
//!
//! let results = runner.run(&ctx).await?;
//!
//! match results.get_metric("pattern_match.email") {
//!     Some(MetricValue::Double(fraction)) => {
//!         println!("{:.1}% of emails look valid", fraction * 100.0);
//!     }
//!     Some(MetricValue::Missing) => println!("no applicable rows"),
//!     _ => {}
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Behaviors
//!
//! - **Eligibility**: only rows with a non-null value that pass the filter
//!   count toward either counter; `match_count <= total_count` always holds.
//! - **Find semantics**: a value matches when the pattern finds a non-empty
//!   match anywhere in the string; anchor with `^`/`$` in the pattern for
//!   full-string matching.
//! - **Undefined metric**: zero eligible rows yields
//!   [`analyzers::MetricValue::Missing`], never `0.0` or a silent NaN.
//! - **Row-level diagnostics**: an optional per-row boolean/null view for
//!   auditing, with a configurable representation of filter-excluded rows
//!   ([`analyzers::pattern::FilteredRowOutcome`]).
//! - **Fail-fast validation**: missing columns, non-string columns and
//!   malformed filters are rejected before any row is scanned.
//!
//! ## Bundled Patterns
//!
//! [`analyzers::pattern::patterns`] ships compiled patterns for common
//! formats (email, URL, US SSN, US phone, credit card, US ZIP). They are
//! plain configuration data and carry no special behavior.

pub mod analyzers;
pub mod core;
pub mod logging;
pub mod prelude;
