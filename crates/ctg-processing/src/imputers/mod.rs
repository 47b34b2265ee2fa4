//! Imputation module for handling missing values.
//!
//! This module provides the imputation strategies:
//! - KNN imputation over the continuous subspace
//! - Statistical imputation (median, mode)
//!
//! plus [`MissingValueImputer`], which partitions columns with the shared
//! classifier and dispatches each group to the right strategy.

mod knn;
mod statistical;

pub use knn::KnnImputer;
pub use statistical::StatisticalImputer;

use crate::classify::partition_columns;
use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Fills missing values across a whole frame.
///
/// Columns are partitioned on the INPUT snapshot, so classification reflects
/// the data actually being imputed. Continuous columns get KNN (when enabled
/// and at least one continuous column exists) or their own median; discrete
/// columns always get their mode, so integer-coded categories never receive
/// fractional estimates.
pub struct MissingValueImputer {
    use_knn: bool,
    knn_neighbors: usize,
    class_threshold: usize,
}

impl MissingValueImputer {
    pub fn new(use_knn: bool, knn_neighbors: usize, class_threshold: usize) -> Self {
        Self {
            use_knn,
            knn_neighbors,
            class_threshold,
        }
    }

    /// Impute the frame, returning the filled copy and the number of cells
    /// that were filled. Columns with no observed value at all are left
    /// unchanged; rows are never added or removed.
    pub fn impute(
        &self,
        df: &DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<(DataFrame, usize)> {
        let (continuous, discrete) = partition_columns(df, self.class_threshold)?;
        debug!(
            "Imputing {} continuous and {} discrete columns",
            continuous.len(),
            discrete.len()
        );

        let mut result = df.clone();
        let mut cells_imputed = 0usize;

        if self.use_knn && !continuous.is_empty() {
            let nulls_before: usize = Self::null_cells(&result, &continuous);
            let imputer = KnnImputer::new(self.knn_neighbors);
            result = imputer.fit_transform(&result, &continuous)?;
            let nulls_after: usize = Self::null_cells(&result, &continuous);
            let filled = nulls_before.saturating_sub(nulls_after);
            if filled > 0 {
                cells_imputed += filled;
                processing_steps.push(format!(
                    "Filled {} missing values across {} continuous columns with KNN (k={})",
                    filled,
                    continuous.len(),
                    self.knn_neighbors
                ));
            }
        } else {
            for col_name in &continuous {
                cells_imputed +=
                    StatisticalImputer::apply_median(&mut result, col_name, processing_steps)?;
            }
        }

        for col_name in &discrete {
            cells_imputed +=
                StatisticalImputer::apply_mode(&mut result, col_name, processing_steps)?;
        }

        Ok((result, cells_imputed))
    }

    fn null_cells(df: &DataFrame, columns: &[String]) -> usize {
        columns
            .iter()
            .filter_map(|name| df.column(name).ok())
            .map(|col| col.null_count())
            .sum()
    }
}
