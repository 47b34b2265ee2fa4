//! Core data types shared across the cleaning pipeline.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Classification of a column for preprocessing purposes.
///
/// Continuous columns are eligible for median/KNN imputation and outlier
/// clipping; discrete columns (low-cardinality numeric included) are always
/// mode-imputed and never clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnClass {
    Continuous,
    Discrete,
}

impl ColumnClass {
    /// Lowercase label used in reports and the CLI table.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Discrete => "discrete",
        }
    }
}

impl std::fmt::Display for ColumnClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sentinel used in [`CompletenessRecord::dispersion`] for non-numeric columns.
pub const DISPERSION_NOT_APPLICABLE: &str = "N/A";

/// Per-column summary produced by the completeness reporter.
///
/// One record per column, in dataset column order. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessRecord {
    /// Column name.
    pub name: String,
    /// Number of missing entries.
    pub null_count: usize,
    /// Completeness percentage: 100 * (1 - nulls / rows), rounded to 2 decimals.
    pub completeness: f64,
    /// Declared dtype label (e.g. "Float64", "String").
    pub dtype: String,
    /// Compact dispersion statistics ("Min:a.aa, Max:b.bb, Std:c.cc"),
    /// or `"N/A"` for non-numeric columns.
    pub dispersion: String,
    /// Continuous/discrete classification.
    pub class: ColumnClass,
}

/// Diagnostic artifact for one clipped column.
///
/// Produced only for columns where at least one value fell outside the
/// computed bounds; downstream code relies on absent entries meaning
/// "no outliers detected".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierEvidence {
    /// Column the evidence describes.
    pub column: String,
    /// Column values before clipping, row-aligned.
    pub original: Vec<Option<f64>>,
    /// Column values after clipping, row-aligned.
    pub clipped: Vec<Option<f64>>,
    /// Lower clipping bound.
    pub lower: f64,
    /// Upper clipping bound.
    pub upper: f64,
}

impl OutlierEvidence {
    /// Number of values that were moved by the clip.
    pub fn outlier_count(&self) -> usize {
        self.original
            .iter()
            .flatten()
            .filter(|&&v| v < self.lower || v > self.upper)
            .count()
    }
}

/// The contract handed to the visualization layer.
///
/// The cleaned frame is row-aligned with the pipeline input; the column lists
/// are mutually exclusive and exhaustive over its columns, in frame order.
#[derive(Debug, Clone)]
pub struct DataContract {
    /// Cleaned dataset: same row count as the input, target columns null-free.
    pub cleaned: DataFrame,
    /// Columns classified continuous.
    pub continuous_columns: Vec<String>,
    /// Columns classified discrete.
    pub discrete_columns: Vec<String>,
    /// Before/after evidence for columns that had outliers, when requested.
    pub evidence: HashMap<String, OutlierEvidence>,
}

impl DataContract {
    /// First `n` rows of the cleaned frame, for dashboard preview tables.
    pub fn preview(&self, n: usize) -> DataFrame {
        self.cleaned.head(Some(n))
    }

    /// Continuous columns that produced no outlier evidence (stable
    /// distributions). The dashboard lists these separately.
    pub fn stable_columns(&self) -> Vec<String> {
        self.continuous_columns
            .iter()
            .filter(|name| !self.evidence.contains_key(*name))
            .cloned()
            .collect()
    }
}

/// Human-readable summary of what the pipeline did, for the dashboard shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    /// Number of rows processed (never changes across stages).
    pub rows: usize,
    /// Number of columns before cleaning.
    pub columns_before: usize,
    /// Number of columns after cleaning.
    pub columns_after: usize,
    /// Names of columns dropped by the null-column filter.
    pub dropped_columns: Vec<String>,

    /// Total missing cells filled by imputation.
    pub cells_imputed: usize,
    /// Total values moved by outlier clipping.
    pub values_clipped: usize,

    /// Warnings and notes generated during cleaning.
    pub warnings: Vec<String>,
}

impl CleaningSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the summary.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Percentage of columns removed by the null filter.
    pub fn columns_removed_percentage(&self) -> f64 {
        if self.columns_before == 0 {
            0.0
        } else {
            (self.dropped_columns.len() as f64 / self.columns_before as f64) * 100.0
        }
    }
}

/// Everything a pipeline run produces.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The data contract for the visualization layer.
    pub contract: DataContract,
    /// Per-column completeness records over the cleaned frame.
    pub report: Vec<CompletenessRecord>,
    /// Bookkeeping summary for the dashboard shell.
    pub summary: CleaningSummary,
    /// Human-readable log of what each stage did.
    pub processing_steps: Vec<String>,
}
