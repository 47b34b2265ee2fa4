//! Per-column completeness and classification records.

use crate::classify::classify_series;
use crate::error::{CleaningError, Result};
use crate::types::{CompletenessRecord, DISPERSION_NOT_APPLICABLE};
use crate::utils::{is_numeric_dtype, non_null_f64_values, sample_std};
use polars::prelude::*;

/// Produces one [`CompletenessRecord`] per column of a dataset snapshot.
pub struct CompletenessReporter {
    class_threshold: usize,
}

impl CompletenessReporter {
    pub fn new(class_threshold: usize) -> Self {
        Self { class_threshold }
    }

    /// Analyze the frame and return records in dataset column order.
    ///
    /// Fails on a zero-row frame: completeness percentages would divide by
    /// zero and must not silently propagate NaN.
    pub fn analyze(&self, df: &DataFrame) -> Result<Vec<CompletenessRecord>> {
        let rows = df.height();
        if rows == 0 {
            return Err(CleaningError::EmptyDataset);
        }

        let mut records = Vec::with_capacity(df.width());
        for col in df.get_columns() {
            let series = col.as_materialized_series();
            records.push(self.analyze_column(series, rows)?);
        }

        Ok(records)
    }

    fn analyze_column(&self, series: &Series, rows: usize) -> Result<CompletenessRecord> {
        let null_count = series.null_count();
        let completeness = 100.0 * (1.0 - null_count as f64 / rows as f64);
        let completeness = (completeness * 100.0).round() / 100.0;

        let dispersion = if is_numeric_dtype(series.dtype()) {
            let values = non_null_f64_values(series)?;
            match Self::dispersion_stats(&values) {
                Some((min, max, std)) => {
                    format!("Min:{:.2}, Max:{:.2}, Std:{:.2}", min, max, std)
                }
                None => DISPERSION_NOT_APPLICABLE.to_string(),
            }
        } else {
            DISPERSION_NOT_APPLICABLE.to_string()
        };

        Ok(CompletenessRecord {
            name: series.name().to_string(),
            null_count,
            completeness,
            dtype: format!("{:?}", series.dtype()),
            dispersion,
            class: classify_series(series, self.class_threshold)?,
        })
    }

    fn dispersion_stats(values: &[f64]) -> Option<(f64, f64, f64)> {
        if values.is_empty() {
            return None;
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max, sample_std(values)))
    }
}
