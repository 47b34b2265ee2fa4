//! Serializes pipeline output for the dashboard shell.
//!
//! The shell renders the quality report as its "Calidad & Outliers" tab and
//! reads the cleaned CSV back into its own table widgets; nothing here draws
//! a chart.

use crate::error::{CleaningError, Result};
use crate::types::{CompletenessRecord, OutlierEvidence, PipelineResult};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::PathBuf;
use tracing::info;

/// Everything the dashboard needs to render the quality view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// (rows, columns) of the cleaned frame.
    pub shape: (usize, usize),
    /// Per-column completeness records, in column order.
    pub records: Vec<CompletenessRecord>,
    /// Columns classified continuous.
    pub continuous_columns: Vec<String>,
    /// Columns classified discrete.
    pub discrete_columns: Vec<String>,
    /// Columns dropped by the null filter.
    pub dropped_columns: Vec<String>,
    /// Before/after evidence for clipped columns, when collected.
    pub evidence: HashMap<String, OutlierEvidence>,
    /// Human-readable log of what each stage did.
    pub processing_steps: Vec<String>,
    /// Warnings generated during cleaning.
    pub warnings: Vec<String>,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
}

impl QualityReport {
    /// Assemble the report from a pipeline run.
    pub fn from_result(result: &PipelineResult) -> Self {
        Self {
            shape: (
                result.contract.cleaned.height(),
                result.contract.cleaned.width(),
            ),
            records: result.report.clone(),
            continuous_columns: result.contract.continuous_columns.clone(),
            discrete_columns: result.contract.discrete_columns.clone(),
            dropped_columns: result.summary.dropped_columns.clone(),
            evidence: result.contract.evidence.clone(),
            processing_steps: result.processing_steps.clone(),
            warnings: result.summary.warnings.clone(),
            duration_ms: result.summary.duration_ms,
        }
    }
}

/// Writes pipeline output files into an output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: String,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>, output_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            output_name: output_name.into(),
        }
    }

    /// Serialize the report to pretty JSON.
    pub fn to_json(&self, report: &QualityReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Write the quality report as `<name>_report.json`, returning the path.
    pub fn write_report(&self, report: &QualityReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let report_path = self
            .output_dir
            .join(format!("{}_report.json", self.output_name));

        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Quality report saved: {}", report_path.display());
        Ok(report_path)
    }

    /// Write the cleaned frame as `<name>.csv`, returning the path.
    pub fn write_cleaned_csv(&self, df: &DataFrame) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let output_path = self.output_dir.join(format!("{}.csv", self.output_name));
        let mut file = File::create(&output_path)?;

        let mut df = df.clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)
            .map_err(|e| CleaningError::ReportGenerationFailed(e.to_string()))?;

        info!("Cleaned dataset saved: {}", output_path.display());
        Ok(output_path)
    }
}
