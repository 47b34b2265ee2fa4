//! Outlier detection and clipping for continuous columns.
//!
//! Bounds come from the column's current distribution (IQR or z-score);
//! out-of-range values are clamped to the nearest bound, never removed, so
//! row count and order always survive. Discrete columns are never touched,
//! even when numeric.

use crate::classify::classify_series;
use crate::config::OutlierMethod;
use crate::error::Result;
use crate::types::{ColumnClass, OutlierEvidence};
use crate::utils::{non_null_f64_values, percentile, sample_std};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Clamps continuous columns into method-derived bounds.
pub struct OutlierClipper {
    method: OutlierMethod,
    class_threshold: usize,
}

impl OutlierClipper {
    pub fn new(method: OutlierMethod, class_threshold: usize) -> Self {
        Self {
            method,
            class_threshold,
        }
    }

    /// Clip every continuous column and return the cleaned frame.
    pub fn clip(&self, df: &DataFrame, processing_steps: &mut Vec<String>) -> Result<DataFrame> {
        let (clipped, _, _) = self.clip_impl(df, false, processing_steps)?;
        Ok(clipped)
    }

    /// Clip every continuous column, additionally returning before/after
    /// evidence for each column that had at least one out-of-range value.
    ///
    /// Columns with zero outliers produce NO evidence entry; downstream code
    /// relies on that to tell "no outliers" apart from "had outliers".
    pub fn clip_with_evidence(
        &self,
        df: &DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<(DataFrame, HashMap<String, OutlierEvidence>)> {
        let (clipped, evidence, _) = self.clip_impl(df, true, processing_steps)?;
        Ok((clipped, evidence))
    }

    pub(crate) fn clip_impl(
        &self,
        df: &DataFrame,
        want_evidence: bool,
        processing_steps: &mut Vec<String>,
    ) -> Result<(DataFrame, HashMap<String, OutlierEvidence>, usize)> {
        let mut result = df.clone();
        let mut evidence = HashMap::new();
        let mut total_clipped = 0usize;

        let col_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for col_name in &col_names {
            let series = df.column(col_name)?.as_materialized_series().clone();
            if classify_series(&series, self.class_threshold)? != ColumnClass::Continuous {
                continue;
            }

            let values = non_null_f64_values(&series)?;
            let Some((lower, upper)) = self.compute_bounds(&values) else {
                continue;
            };

            let float_series = series.cast(&DataType::Float64)?;
            let f64_chunked = float_series.f64()?;

            let n_outliers = f64_chunked
                .into_iter()
                .flatten()
                .filter(|&v| v < lower || v > upper)
                .count();

            let clipped = f64_chunked.apply(|v| v.map(|val| val.clamp(lower, upper)));

            if want_evidence && n_outliers > 0 {
                evidence.insert(
                    col_name.clone(),
                    OutlierEvidence {
                        column: col_name.clone(),
                        original: f64_chunked.into_iter().collect(),
                        clipped: clipped.into_iter().collect(),
                        lower,
                        upper,
                    },
                );
            }

            result.replace(col_name, clipped.into_series())?;

            if n_outliers > 0 {
                total_clipped += n_outliers;
                processing_steps.push(format!(
                    "Clipped {} outliers in '{}' to [{:.2}, {:.2}] ({})",
                    n_outliers, col_name, lower, upper, self.method
                ));
                debug!(
                    "Clipped {} values in '{}' using {} bounds",
                    n_outliers, col_name, self.method
                );
            }
        }

        Ok((result, evidence, total_clipped))
    }

    /// Compute (lower, upper) bounds for one column's non-null values.
    ///
    /// Returns None for a column with no observed values. Zero variance under
    /// z-score (or zero IQR) collapses the bounds to a point; every differing
    /// value then counts as an outlier, which is accepted behavior.
    fn compute_bounds(&self, values: &[f64]) -> Option<(f64, f64)> {
        if values.is_empty() {
            return None;
        }

        match self.method {
            OutlierMethod::Iqr => {
                let q1 = percentile(values, 0.25)?;
                let q3 = percentile(values, 0.75)?;
                let iqr = q3 - q1;
                Some((q1 - 1.5 * iqr, q3 + 1.5 * iqr))
            }
            OutlierMethod::ZScore => {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                let std = sample_std(values);
                Some((mean - 3.0 * std, mean + 3.0 * std))
            }
        }
    }
}
