//! Null-column filtering.
//!
//! Drops columns whose fraction of missing values exceeds a caller-supplied
//! threshold. Columns are otherwise untouched; no row is ever removed.

use crate::error::{CleaningError, Result};
use polars::prelude::*;
use tracing::debug;

/// Drops columns that exceed a missing-value threshold.
pub struct NullColumnFilter;

impl NullColumnFilter {
    /// Return a new frame containing only the columns whose null fraction is
    /// at or below `threshold`, preserving column and row order.
    ///
    /// A threshold outside [0, 1] is a caller error and fails fast.
    pub fn drop_null_columns(df: &DataFrame, threshold: f64) -> Result<DataFrame> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CleaningError::InvalidConfig(format!(
                "null column threshold {} must be between 0.0 and 1.0",
                threshold
            )));
        }

        let height = df.height();
        if height == 0 {
            return Ok(df.clone());
        }

        let mut dropped: Vec<PlSmallStr> = Vec::new();
        for col in df.get_columns() {
            let null_fraction = col.null_count() as f64 / height as f64;
            if null_fraction > threshold {
                dropped.push(col.name().clone());
            }
        }

        if dropped.is_empty() {
            return Ok(df.clone());
        }

        debug!(
            "Dropping {} columns above {:.0}% null threshold: {:?}",
            dropped.len(),
            threshold * 100.0,
            dropped
        );

        Ok(df.drop_many(dropped))
    }

    /// Names of the columns `drop_null_columns` would remove, without
    /// building the filtered frame.
    pub fn columns_to_drop(df: &DataFrame, threshold: f64) -> Result<Vec<String>> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CleaningError::InvalidConfig(format!(
                "null column threshold {} must be between 0.0 and 1.0",
                threshold
            )));
        }

        let height = df.height();
        if height == 0 {
            return Ok(Vec::new());
        }

        Ok(df
            .get_columns()
            .iter()
            .filter(|col| col.null_count() as f64 / height as f64 > threshold)
            .map(|col| col.name().to_string())
            .collect())
    }
}
