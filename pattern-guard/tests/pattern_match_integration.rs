//! Integration tests for the pattern-match analyzer against in-memory data.

use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use datafusion::prelude::*;
use regex::Regex;

use pattern_guard::analyzers::pattern::{patterns, FilteredRowOutcome, PatternMatchAnalyzer};
use pattern_guard::analyzers::{AnalysisRunner, Analyzer, AnalyzerError, MetricValue};
use pattern_guard::core::{with_validation_context, ValidationContext};

async fn context_with_values(values: Vec<Option<&str>>) -> SessionContext {
    let ctx = SessionContext::new();
    let schema = Arc::new(Schema::new(vec![Field::new("value", DataType::Utf8, true)]));
    let batch = RecordBatch::try_new(schema, vec![Arc::new(StringArray::from(values))]).unwrap();
    ctx.register_batch("data", batch).unwrap();
    ctx
}

fn assert_double(metric: &MetricValue, expected: f64) {
    let actual = metric.as_f64().expect("expected a numeric metric");
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn email_fraction_excludes_nulls() {
    let ctx = context_with_values(vec![
        Some("a1@b.com"),
        Some("not-an-email"),
        None,
        Some("c2@d.org"),
    ])
    .await;

    let analyzer = PatternMatchAnalyzer::new("value", patterns::EMAIL.clone());
    let state = analyzer.compute_state_from_data(&ctx).await.unwrap();

    assert_eq!(state.match_count, 2);
    assert_eq!(state.total_count, 3);

    let metric = analyzer.compute_metric_from_state(&state).unwrap();
    assert_double(&metric, 2.0 / 3.0);
}

#[tokio::test]
async fn filter_does_not_double_exclude_nulls() {
    let ctx = context_with_values(vec![
        Some("a1@b.com"),
        Some("not-an-email"),
        None,
        Some("c2@d.org"),
    ])
    .await;

    let analyzer = PatternMatchAnalyzer::new("value", patterns::EMAIL.clone())
        .with_filter("value IS NOT NULL");
    let state = analyzer.compute_state_from_data(&ctx).await.unwrap();

    assert_eq!(state.match_count, 2);
    assert_eq!(state.total_count, 3);
}

#[tokio::test]
async fn creditcard_with_length_filter() {
    let ctx = context_with_values(vec![Some("4111111111111111"), Some("not-a-card")]).await;

    let analyzer = PatternMatchAnalyzer::new("value", patterns::CREDITCARD.clone())
        .with_filter("length(value) > 5");
    let state = analyzer.compute_state_from_data(&ctx).await.unwrap();

    assert_eq!(state.match_count, 1);
    assert_eq!(state.total_count, 2);
}

#[tokio::test]
async fn filtered_row_outcome_changes_diagnostics_but_not_counters() {
    let pattern = Regex::new("x").unwrap();

    for (outcome, expected) in [
        (FilteredRowOutcome::AsNull, vec![Some(true), None]),
        (FilteredRowOutcome::AsTrue, vec![Some(true), Some(true)]),
    ] {
        let ctx = context_with_values(vec![Some("x"), Some("y")]).await;
        let analyzer = PatternMatchAnalyzer::new("value", pattern.clone())
            .with_filter("value = 'x'")
            .with_filtered_row_outcome(outcome);

        let state = analyzer.compute_state_from_data(&ctx).await.unwrap();
        assert_eq!(state.match_count, 1);
        assert_eq!(state.total_count, 1);

        let diagnostics = analyzer.row_level_results(&ctx).await.unwrap();
        assert_eq!(diagnostics, expected);
    }
}

#[tokio::test]
async fn null_rows_stay_null_in_diagnostics_under_both_policies() {
    for outcome in [FilteredRowOutcome::AsNull, FilteredRowOutcome::AsTrue] {
        let ctx = context_with_values(vec![Some("x"), None, Some("y")]).await;
        let analyzer = PatternMatchAnalyzer::new("value", Regex::new("x").unwrap())
            .with_filter("value = 'x'")
            .with_filtered_row_outcome(outcome);

        let diagnostics = analyzer.row_level_results(&ctx).await.unwrap();
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0], Some(true));
        assert_eq!(diagnostics[1], None);
    }
}

#[tokio::test]
async fn empty_dataset_reports_missing_metric() {
    let ctx = context_with_values(Vec::new()).await;

    let analyzer = PatternMatchAnalyzer::new("value", patterns::EMAIL.clone());
    let state = analyzer.compute_state_from_data(&ctx).await.unwrap();

    assert_eq!(state.total_count, 0);

    let metric = analyzer.compute_metric_from_state(&state).unwrap();
    assert!(metric.is_missing());
    assert_eq!(metric.as_f64(), None);
}

#[tokio::test]
async fn partition_states_merge_to_the_whole_dataset_result() {
    let whole = context_with_values(vec![
        Some("a1@b.com"),
        Some("not-an-email"),
        None,
        Some("c2@d.org"),
    ])
    .await;
    let left = context_with_values(vec![Some("a1@b.com"), Some("not-an-email")]).await;
    let right = context_with_values(vec![None, Some("c2@d.org")]).await;

    let analyzer = PatternMatchAnalyzer::new("value", patterns::EMAIL.clone());

    let whole_state = analyzer.compute_state_from_data(&whole).await.unwrap();
    let left_state = analyzer.compute_state_from_data(&left).await.unwrap();
    let right_state = analyzer.compute_state_from_data(&right).await.unwrap();

    let merged = analyzer
        .merge_states(vec![left_state, right_state])
        .unwrap();

    assert_eq!(merged.match_count, whole_state.match_count);
    assert_eq!(merged.total_count, whole_state.total_count);
}

#[tokio::test]
async fn runner_stores_metric_under_column_key() {
    let ctx = context_with_values(vec![Some("a1@b.com"), Some("c2@d.org")]).await;

    let runner = AnalysisRunner::new()
        .add(PatternMatchAnalyzer::new("value", patterns::EMAIL.clone()));
    let results = runner.run(&ctx).await.unwrap();

    assert!(!results.has_errors());
    let metric = results.get_metric("pattern_match.value").unwrap();
    assert_double(metric, 1.0);
}

#[tokio::test]
async fn runner_records_configuration_errors() {
    let ctx = context_with_values(vec![Some("a1@b.com")]).await;

    let runner = AnalysisRunner::new()
        .add(PatternMatchAnalyzer::new("no_such_column", patterns::EMAIL.clone()));
    let results = runner.run(&ctx).await.unwrap();

    assert!(results.has_errors());
    assert!(results.get_metric("pattern_match.no_such_column").is_none());
}

#[tokio::test]
async fn missing_column_fails_before_scanning() {
    let ctx = context_with_values(vec![Some("a1@b.com")]).await;
    let analyzer = PatternMatchAnalyzer::new("no_such_column", patterns::EMAIL.clone());

    let err = analyzer.validate(&ctx).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidConfiguration(_)));
}

#[tokio::test]
async fn non_string_column_fails_before_scanning() {
    let ctx = SessionContext::new();
    let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, false)]));
    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(Int64Array::from(vec![1, 2, 3]))],
    )
    .unwrap();
    ctx.register_batch("data", batch).unwrap();

    let analyzer = PatternMatchAnalyzer::new("id", patterns::EMAIL.clone());
    let err = analyzer.validate(&ctx).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidConfiguration(_)));
}

#[tokio::test]
async fn malformed_filter_is_a_configuration_error() {
    let ctx = context_with_values(vec![Some("a1@b.com")]).await;
    let analyzer = PatternMatchAnalyzer::new("value", patterns::EMAIL.clone())
        .with_filter("value ???");

    let err = analyzer.compute_state_from_data(&ctx).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidConfiguration(_)));
}

#[tokio::test]
async fn resolves_table_name_from_validation_context() {
    let ctx = SessionContext::new();
    let schema = Arc::new(Schema::new(vec![Field::new("value", DataType::Utf8, true)]));
    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(StringArray::from(vec![Some("a1@b.com"), None]))],
    )
    .unwrap();
    ctx.register_batch("customers", batch).unwrap();

    let analyzer = PatternMatchAnalyzer::new("value", patterns::EMAIL.clone());

    let state = with_validation_context(ValidationContext::new("customers"), async {
        analyzer.compute_state_from_data(&ctx).await
    })
    .await
    .unwrap();

    assert_eq!(state.match_count, 1);
    assert_eq!(state.total_count, 1);
}
