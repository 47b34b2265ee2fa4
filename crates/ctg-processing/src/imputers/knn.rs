//! K-nearest-neighbor imputation over the continuous feature subspace.
//!
//! Missing values are estimated from the rows most similar on the OTHER
//! continuous columns; discrete columns never participate, so integer-coded
//! categories cannot leak fractional values.

use crate::error::{CleaningError, Result};
use polars::prelude::*;
use tracing::debug;

pub struct KnnImputer {
    n_neighbors: usize,
}

impl KnnImputer {
    /// Create a new KNN imputer with the specified number of neighbors.
    pub fn new(n_neighbors: usize) -> Self {
        Self {
            n_neighbors: n_neighbors.max(1),
        }
    }

    /// Impute missing values in the given continuous columns, jointly.
    ///
    /// Neighbors are found with a null-aware Euclidean distance over the
    /// continuous subspace, skipping the column being imputed. The imputed
    /// value is the plain mean of the k nearest neighbours' values. With no
    /// candidate neighbour at all the column median is used; a column with
    /// no values anywhere is left unchanged. Row count and order are
    /// preserved.
    pub fn fit_transform(&self, df: &DataFrame, continuous_cols: &[String]) -> Result<DataFrame> {
        let mut result_df = df.clone();

        let cols_to_impute: Vec<String> = continuous_cols
            .iter()
            .filter(|col| {
                df.column(col)
                    .map(|series| series.null_count() > 0)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        if cols_to_impute.is_empty() {
            return Ok(result_df);
        }

        debug!(
            "KNN imputing {} of {} continuous columns",
            cols_to_impute.len(),
            continuous_cols.len()
        );

        let data_matrix = self.create_data_matrix(df, continuous_cols)?;
        let n_rows = df.height();
        let n_cols = continuous_cols.len();

        for col_name in &cols_to_impute {
            let col_idx = continuous_cols
                .iter()
                .position(|c| c == col_name)
                .ok_or_else(|| CleaningError::ColumnNotFound(col_name.clone()))?;

            let series = df.column(col_name)?.as_materialized_series().clone();
            if series.null_count() == series.len() {
                // no observed values; leave the column untouched
                continue;
            }
            let median_fallback = series.median();
            let null_mask = series.is_null();

            let mut imputed_values = Vec::with_capacity(n_rows);
            for row_idx in 0..n_rows {
                if null_mask.get(row_idx).unwrap_or(false) {
                    let estimate = self.impute_value(
                        &data_matrix,
                        row_idx,
                        col_idx,
                        n_rows,
                        n_cols,
                        &null_mask,
                    );
                    imputed_values.push(estimate.or(median_fallback));
                } else {
                    let val = series.get(row_idx)?;
                    imputed_values.push(Some(val.try_extract::<f64>()?));
                }
            }

            let imputed_series = Series::new(col_name.as_str().into(), imputed_values);
            result_df.replace(col_name, imputed_series)?;
        }

        Ok(result_df)
    }

    /// Materialize the continuous columns as an f64 matrix for distance
    /// calculations, keeping nulls as None.
    fn create_data_matrix(
        &self,
        df: &DataFrame,
        columns: &[String],
    ) -> Result<Vec<Vec<Option<f64>>>> {
        let n_rows = df.height();
        let n_cols = columns.len();
        let mut matrix = vec![vec![None; n_cols]; n_rows];

        for (col_idx, col_name) in columns.iter().enumerate() {
            let series = df.column(col_name)?;
            let float_series = series.cast(&DataType::Float64)?;
            let f64_series = float_series.f64()?;

            for (row_idx, row) in matrix.iter_mut().enumerate().take(n_rows) {
                row[col_idx] = f64_series.get(row_idx);
            }
        }

        Ok(matrix)
    }

    /// Estimate a single missing value from the k nearest candidate rows.
    ///
    /// Returns None when no candidate row has an observed target value.
    fn impute_value(
        &self,
        data_matrix: &[Vec<Option<f64>>],
        target_row: usize,
        target_col: usize,
        n_rows: usize,
        n_cols: usize,
        null_mask: &BooleanChunked,
    ) -> Option<f64> {
        // Candidate neighbours: rows with an observed value in the target column
        let candidate_rows: Vec<usize> = (0..n_rows)
            .filter(|&row| row != target_row && !null_mask.get(row).unwrap_or(true))
            .collect();

        if candidate_rows.is_empty() {
            return None;
        }

        let mut distances: Vec<(usize, f64)> = candidate_rows
            .iter()
            .map(|&candidate_row| {
                let distance = self.calculate_distance(
                    &data_matrix[target_row],
                    &data_matrix[candidate_row],
                    target_col,
                    n_cols,
                );
                (candidate_row, distance)
            })
            .collect();

        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        // Uniform mean over the k nearest (fewer when not enough candidates)
        let k = self.n_neighbors.min(distances.len());
        let mut sum = 0.0;
        let mut count = 0usize;
        for &(neighbor_row, _) in distances.iter().take(k) {
            if let Some(value) = data_matrix[neighbor_row][target_col] {
                sum += value;
                count += 1;
            }
        }

        if count > 0 { Some(sum / count as f64) } else { None }
    }

    /// Null-aware Euclidean distance between two rows, ignoring the target
    /// column. The squared difference is averaged over the coordinates both
    /// rows have observed, so rows with missing entries stay comparable.
    fn calculate_distance(
        &self,
        row1: &[Option<f64>],
        row2: &[Option<f64>],
        skip_col: usize,
        n_cols: usize,
    ) -> f64 {
        let mut sum_squared_diff = 0.0;
        let mut count = 0;

        for col_idx in 0..n_cols {
            if col_idx == skip_col {
                continue;
            }

            if let (Some(val1), Some(val2)) = (row1[col_idx], row2[col_idx]) {
                let diff = val1 - val2;
                sum_squared_diff += diff * diff;
                count += 1;
            }
        }

        if count > 0 {
            (sum_squared_diff / count as f64).sqrt()
        } else {
            f64::INFINITY // No common observed features
        }
    }
}
