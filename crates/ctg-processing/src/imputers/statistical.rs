//! Statistical imputation methods.
//!
//! Median fill for continuous columns and mode fill for discrete columns.

use crate::error::Result;
use crate::utils::{fill_numeric_nulls, fill_string_nulls, is_numeric_dtype, numeric_mode, string_mode};
use polars::prelude::*;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill a continuous column's missing values with its own median.
    ///
    /// A column with no non-null values has no median and is left unchanged.
    pub fn apply_median(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let nulls = series.null_count();
        if nulls == 0 {
            return Ok(0);
        }

        let Some(median_val) = series.median() else {
            // every value missing; nothing to impute with
            return Ok(0);
        };

        let filled = fill_numeric_nulls(&series, median_val)?;
        df.replace(col_name, filled)?;

        processing_steps.push(format!(
            "Filled {} missing values in '{}' with median: {:.2}",
            nulls, col_name, median_val
        ));

        Ok(nulls)
    }

    /// Fill a discrete column's missing values with its mode.
    ///
    /// Numeric discrete columns keep their dtype; ties are broken by the
    /// first-encountered value in column order. A column with no non-null
    /// values is left unchanged.
    pub fn apply_mode(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let nulls = series.null_count();
        if nulls == 0 {
            return Ok(0);
        }

        if is_numeric_dtype(series.dtype()) {
            let Some(mode_val) = numeric_mode(&series)? else {
                return Ok(0);
            };
            let filled = fill_numeric_nulls(&series, mode_val)?;
            // mode is always an observed value, so the original dtype fits
            let filled = filled.cast(series.dtype())?;
            df.replace(col_name, filled)?;

            processing_steps.push(format!(
                "Filled {} missing values in '{}' with mode: {}",
                nulls, col_name, mode_val
            ));
        } else {
            let Some(mode_val) = string_mode(&series) else {
                return Ok(0);
            };
            let filled = fill_string_nulls(&series, &mode_val)?;
            df.replace(col_name, filled)?;

            processing_steps.push(format!(
                "Filled {} missing values in '{}' with mode: '{}'",
                nulls, col_name, mode_val
            ));
        }

        Ok(nulls)
    }
}
