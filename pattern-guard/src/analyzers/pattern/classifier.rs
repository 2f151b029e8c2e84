//! Per-row classification for pattern-match rules.
//!
//! The classifier is a pure function over a single row plus the immutable
//! rule configuration, so it can run concurrently across any number of
//! workers with no shared state. It feeds both the aggregation counters and
//! the per-row diagnostic output, which deliberately do not always agree:
//! filter exclusion is hard for aggregation but soft for diagnostics.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Outcome of classifying a single row against a pattern rule.
///
/// The two exclusion causes are kept apart because they behave differently
/// in diagnostic output: a null value is invisible under every policy, while
/// a filtered-out row can be reported as vacuously passing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClassification {
    /// Eligible row whose value contains a non-empty pattern match.
    Match,
    /// Eligible row with no non-empty pattern match.
    NoMatch,
    /// The column value is null; the row never counts toward any counter.
    NullValue,
    /// The row filter did not pass; excluded from the counters.
    FilteredOut,
}

impl RowClassification {
    /// Whether the row counts toward `total_count`.
    pub fn is_eligible(self) -> bool {
        matches!(self, RowClassification::Match | RowClassification::NoMatch)
    }

    /// Whether the row counts toward `match_count`.
    pub fn is_match(self) -> bool {
        matches!(self, RowClassification::Match)
    }
}

/// How filter-excluded rows appear in row-level diagnostic output.
///
/// Affects only the diagnostic view produced by
/// [`PatternMatchAnalyzer::row_level_results`](crate::analyzers::pattern::PatternMatchAnalyzer::row_level_results);
/// the aggregation counters are identical under both policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilteredRowOutcome {
    /// Filter-excluded rows produce no value, indistinguishable from nulls.
    #[default]
    AsNull,
    /// Filter-excluded rows are reported as passing.
    AsTrue,
}

impl FilteredRowOutcome {
    /// Maps a row classification to its diagnostic value.
    ///
    /// Null values stay `None` under either policy; only filter-caused
    /// exclusion is rewritten by [`FilteredRowOutcome::AsTrue`].
    pub fn diagnostic(self, classification: RowClassification) -> Option<bool> {
        match classification {
            RowClassification::Match => Some(true),
            RowClassification::NoMatch => Some(false),
            RowClassification::NullValue => None,
            RowClassification::FilteredOut => match self {
                FilteredRowOutcome::AsNull => None,
                FilteredRowOutcome::AsTrue => Some(true),
            },
        }
    }
}

/// True when `pattern` finds at least one non-empty match inside `value`.
///
/// Find semantics, not fullmatch: the pattern anchors only where it carries
/// `^`/`$` itself. Empty matches are ignored so patterns like `a*` do not
/// match every string vacuously.
pub fn matches_pattern(pattern: &Regex, value: &str) -> bool {
    pattern.find_iter(value).any(|m| !m.as_str().is_empty())
}

/// Classifies one row's column value.
///
/// A null value dominates the filter: it classifies as
/// [`RowClassification::NullValue`] whether or not the filter passed. A
/// filter that evaluated to SQL NULL must be passed in as `false`.
pub fn classify(value: Option<&str>, filter_pass: bool, pattern: &Regex) -> RowClassification {
    match value {
        None => RowClassification::NullValue,
        Some(_) if !filter_pass => RowClassification::FilteredOut,
        Some(v) if matches_pattern(pattern, v) => RowClassification::Match,
        Some(_) => RowClassification::NoMatch,
    }
}
