//! CTG Cleaning & Classification Pipeline
//!
//! Preprocessing library behind the cardiotocography exploration dashboard,
//! built with Rust and Polars.
//!
//! # Overview
//!
//! This library provides the data-facing half of the dashboard:
//!
//! - **Null-column filtering**: drop columns above a missing-value threshold
//! - **Missing-value imputation**: KNN or median for continuous columns,
//!   mode for discrete/categorical columns
//! - **Outlier clipping**: IQR or z-score bounds, clamping with optional
//!   before/after evidence per affected column
//! - **Completeness reporting**: per-column null counts, dispersion
//!   statistics and the continuous/discrete classification every widget
//!   selector is driven by
//!
//! The chart layer itself lives in the dashboard and only consumes the
//! [`DataContract`] produced here.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ctg_processing::{OutlierMethod, Pipeline, PipelineConfig};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .with_has_header(true)
//!     .try_into_reader_with_file_path(Some("data/CTG.csv".into()))?
//!     .finish()?;
//!
//! let result = Pipeline::builder()
//!     .config(
//!         PipelineConfig::builder()
//!             .null_column_threshold(0.2)
//!             .use_knn(true)
//!             .outlier_method(OutlierMethod::Iqr)
//!             .collect_evidence(true)
//!             .build()?,
//!     )
//!     .build()?
//!     .process(&df)?;
//!
//! for record in &result.report {
//!     println!("{}: {:.2}% complete ({})", record.name, record.completeness, record.class);
//! }
//! ```
//!
//! # Classification rule
//!
//! A column is **continuous** iff its dtype is numeric and it has more than
//! `class_threshold` (default 10) distinct non-null values; every other
//! column is **discrete**. The predicate lives in [`classify`] and is shared
//! by every component, so the reporter and the clipper can never disagree.

pub mod classify;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use classify::{DEFAULT_CLASS_THRESHOLD, classify_series, partition_columns};
pub use cleaner::NullColumnFilter;
pub use config::{ConfigValidationError, OutlierMethod, PipelineConfig, PipelineConfigBuilder};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::{KnnImputer, MissingValueImputer, StatisticalImputer};
pub use pipeline::{OutlierClipper, Pipeline, PipelineBuilder};
pub use quality::CompletenessReporter;
pub use reporting::{QualityReport, ReportGenerator};
pub use types::{
    CleaningSummary, ColumnClass, CompletenessRecord, DataContract, OutlierEvidence,
    PipelineResult,
};
