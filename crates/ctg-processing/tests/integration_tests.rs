//! Integration tests for the cleaning pipeline.
//!
//! These tests verify end-to-end behavior over a small CTG-shaped fixture
//! with controlled edge cases: a clean continuous column, a mostly-null
//! column, a column with one extreme value, and a categorical column with a
//! missing entry.

use ctg_processing::{
    CleaningError, ColumnClass, CompletenessReporter, OutlierClipper, OutlierMethod, Pipeline,
    PipelineConfig, QualityReport,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_sample() -> DataFrame {
    let path = fixtures_path().join("ctg_sample.csv");
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path))
        .expect("Failed to create CSV reader")
        .finish()
        .expect("Failed to read CSV file")
}

fn default_pipeline() -> Pipeline {
    Pipeline::builder().build().unwrap()
}

fn evidence_pipeline(use_knn: bool) -> Pipeline {
    Pipeline::builder()
        .config(
            PipelineConfig::builder()
                .use_knn(use_knn)
                .collect_evidence(true)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

// ============================================================================
// Full Pipeline: the four-column scenario
// ============================================================================

#[test]
fn test_null_column_dropped_and_good_column_kept() {
    let df = load_sample();
    let result = default_pipeline().process(&df).unwrap();

    let cleaned = &result.contract.cleaned;
    assert!(cleaned.column("col_nulls").is_err(), "56% null column must be dropped");
    assert!(cleaned.column("col_good").is_ok());
    assert_eq!(result.summary.dropped_columns, vec!["col_nulls".to_string()]);
}

#[test]
fn test_categorical_mode_imputation() {
    let df = load_sample();
    let result = default_pipeline().process(&df).unwrap();

    let col_cat = result.contract.cleaned.column("col_cat").unwrap();
    assert_eq!(col_cat.null_count(), 0);
    // "A" is the most frequent category (9 of 15 observed values)
    assert_eq!(col_cat.get(0).unwrap().to_string(), "\"A\"");
}

#[test]
fn test_outlier_clipped_not_removed() {
    let df = load_sample();
    let result = default_pipeline().process(&df).unwrap();

    let cleaned = &result.contract.cleaned;
    assert_eq!(cleaned.height(), 16, "clipping must not drop rows");

    let treated = cleaned
        .column("col_outlier")
        .unwrap()
        .get(15)
        .unwrap()
        .try_extract::<f64>()
        .unwrap();
    assert!(treated < 1000.0, "the outlier {} was not reduced", 1000.0);
    assert!(treated > 14.0, "the treated value is too low");
}

#[test]
fn test_scenario_classification() {
    let df = load_sample();
    let result = default_pipeline().process(&df).unwrap();

    let contract = &result.contract;
    assert!(contract.continuous_columns.contains(&"col_outlier".to_string()));
    assert!(contract.continuous_columns.contains(&"col_good".to_string()));
    assert!(contract.discrete_columns.contains(&"col_cat".to_string()));
}

#[test]
fn test_no_nulls_remain_after_cleaning() {
    let df = load_sample();
    for use_knn in [false, true] {
        let result = evidence_pipeline(use_knn).process(&df).unwrap();
        for col in result.contract.cleaned.get_columns() {
            assert_eq!(
                col.null_count(),
                0,
                "column {} still has nulls (use_knn={})",
                col.name(),
                use_knn
            );
        }
    }
}

// ============================================================================
// Evidence
// ============================================================================

#[test]
fn test_evidence_present_only_for_outlier_columns() {
    let df = load_sample();
    let result = evidence_pipeline(false).process(&df).unwrap();

    let evidence = &result.contract.evidence;
    assert!(evidence.contains_key("col_outlier"));
    assert!(!evidence.contains_key("col_good"));

    let ev = &evidence["col_outlier"];
    assert_eq!(ev.original.len(), 16);
    assert_eq!(ev.clipped.len(), 16);
    assert_eq!(ev.original[15], Some(1000.0));
    assert_eq!(ev.clipped[15], Some(ev.upper));
    assert!(ev.upper < 1000.0 && ev.upper > 14.0);
}

#[test]
fn test_stable_columns_complement_evidence() {
    let df = load_sample();
    let result = evidence_pipeline(false).process(&df).unwrap();

    let stable = result.contract.stable_columns();
    assert!(stable.contains(&"col_good".to_string()));
    assert!(!stable.contains(&"col_outlier".to_string()));
}

// ============================================================================
// Pipeline invariants
// ============================================================================

#[test]
fn test_row_preservation_through_all_stages() {
    let df = load_sample();
    let result = evidence_pipeline(true).process(&df).unwrap();

    assert_eq!(result.contract.cleaned.height(), df.height());
    assert_eq!(result.summary.rows, df.height());

    // col_good row 0 is untouched by every stage
    let original = df
        .column("col_good")
        .unwrap()
        .get(0)
        .unwrap()
        .try_extract::<f64>()
        .unwrap();
    let cleaned = result
        .contract
        .cleaned
        .column("col_good")
        .unwrap()
        .get(0)
        .unwrap()
        .try_extract::<f64>()
        .unwrap();
    assert_eq!(original, cleaned);
}

#[test]
fn test_processing_is_idempotent() {
    let df = load_sample();
    let pipeline = default_pipeline();

    let once = pipeline.process(&df).unwrap();
    let twice = pipeline.process(&once.contract.cleaned).unwrap();

    let a = once.contract.cleaned.column("col_outlier").unwrap();
    let b = twice.contract.cleaned.column("col_outlier").unwrap();
    let a = a.f64().unwrap();
    let b = b.f64().unwrap();
    for (x, y) in a.into_iter().zip(b.into_iter()) {
        assert_eq!(x, y);
    }
}

#[test]
fn test_classifications_agree_between_reporter_and_clipper() {
    let df = load_sample();
    let result = default_pipeline().process(&df).unwrap();
    let cleaned = &result.contract.cleaned;

    // The clipper with evidence on an untouched copy must consider exactly
    // the reporter's continuous columns as clip candidates.
    let reporter = CompletenessReporter::new(10);
    let records = reporter.analyze(cleaned).unwrap();

    let clipper = OutlierClipper::new(OutlierMethod::Iqr, 10);
    let mut steps = Vec::new();
    let (_, evidence) = clipper.clip_with_evidence(cleaned, &mut steps).unwrap();

    for name in evidence.keys() {
        let record = records.iter().find(|r| &r.name == name).unwrap();
        assert_eq!(record.class, ColumnClass::Continuous);
    }
}

#[test]
fn test_input_frame_never_mutated() {
    let df = load_sample();
    let _ = evidence_pipeline(true).process(&df).unwrap();

    assert_eq!(df.width(), 4);
    assert_eq!(df.column("col_nulls").unwrap().null_count(), 9);
    assert_eq!(
        df.column("col_outlier")
            .unwrap()
            .get(15)
            .unwrap()
            .try_extract::<i64>()
            .unwrap(),
        1000
    );
}

// ============================================================================
// Classification boundary
// ============================================================================

#[test]
fn test_ten_vs_eleven_unique_values() {
    // 20 rows so null filtering keeps everything; exactly 10 distinct values
    let ten: Vec<f64> = (0..20).map(|x| (x % 10) as f64).collect();
    let eleven: Vec<f64> = (0..20).map(|x| (x % 11) as f64).collect();
    let df = df!["ten" => ten, "eleven" => eleven].unwrap();

    let result = default_pipeline().process(&df).unwrap();
    assert_eq!(result.contract.discrete_columns, vec!["ten".to_string()]);
    assert_eq!(result.contract.continuous_columns, vec!["eleven".to_string()]);
}

// ============================================================================
// Error paths
// ============================================================================

#[test]
fn test_zero_row_frame_is_rejected() {
    let df = df!["x" => Vec::<f64>::new()].unwrap();
    let err = default_pipeline().process(&df).unwrap_err();
    assert_eq!(err.error_code(), "EMPTY_DATASET");
}

#[test]
fn test_unknown_method_string_is_rejected() {
    let err = "percentile".parse::<OutlierMethod>().unwrap_err();
    assert!(matches!(err, CleaningError::UnsupportedMethod(_)));
}

#[test]
fn test_out_of_range_threshold_is_rejected() {
    let result = PipelineConfig::builder().null_column_threshold(1.2).build();
    assert!(result.is_err());
}

// ============================================================================
// Quality report
// ============================================================================

#[test]
fn test_quality_report_round_trip() {
    let df = load_sample();
    let result = evidence_pipeline(false).process(&df).unwrap();

    let report = QualityReport::from_result(&result);
    let json = serde_json::to_string(&report).unwrap();
    let back: QualityReport = serde_json::from_str(&json).unwrap();

    assert_eq!(back.shape, (16, 3));
    assert_eq!(back.records.len(), 3);
    assert_eq!(back.dropped_columns, vec!["col_nulls".to_string()]);
    assert!(back.evidence.contains_key("col_outlier"));
}

#[test]
fn test_completeness_values_on_cleaned_frame() {
    let df = load_sample();
    let result = default_pipeline().process(&df).unwrap();

    for record in &result.report {
        assert_eq!(record.null_count, 0);
        assert_eq!(record.completeness, 100.0);
    }
}
