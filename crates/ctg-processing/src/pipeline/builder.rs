//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the cleaning workflow: null-column filtering, imputation,
//! outlier clipping, and the completeness report that feeds the dashboard.

use crate::cleaner::NullColumnFilter;
use crate::config::PipelineConfig;
use crate::error::{Result, ResultExt};
use crate::imputers::MissingValueImputer;
use crate::pipeline::outliers::OutlierClipper;
use crate::quality::{self, CompletenessReporter};
use crate::types::{CleaningSummary, DataContract, PipelineResult};
use polars::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// The main cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use ctg_processing::{OutlierMethod, Pipeline, PipelineConfig};
///
/// let result = Pipeline::builder()
///     .config(
///         PipelineConfig::builder()
///             .null_column_threshold(0.2)
///             .use_knn(true)
///             .collect_evidence(true)
///             .build()?,
///     )
///     .build()?
///     .process(&df)?;
///
/// println!("{} continuous columns", result.contract.continuous_columns.len());
/// ```
pub struct Pipeline {
    config: PipelineConfig,
}

// The dashboard shell runs the pipeline on a worker thread.
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full cleaning workflow over a dataset snapshot.
    ///
    /// The input frame is never mutated; every stage clones before changing
    /// anything. Row count and order are identical between input and output.
    pub fn process(&self, df: &DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();

        info!(
            "Starting cleaning pipeline on {} rows x {} columns",
            df.height(),
            df.width()
        );

        let mut summary = CleaningSummary::new();
        summary.rows = df.height();
        summary.columns_before = df.width();

        let mut processing_steps: Vec<String> = Vec::new();

        // Step 1: drop columns with too many missing values
        let dropped =
            NullColumnFilter::columns_to_drop(df, self.config.null_column_threshold)?;
        let filtered = NullColumnFilter::drop_null_columns(df, self.config.null_column_threshold)
            .context("While filtering null columns")?;
        if !dropped.is_empty() {
            processing_steps.push(format!(
                "Dropped {} columns above {:.0}% null threshold: {:?}",
                dropped.len(),
                self.config.null_column_threshold * 100.0,
                dropped
            ));
        }
        summary.dropped_columns = dropped;

        // Step 2: impute missing values
        let imputer = MissingValueImputer::new(
            self.config.use_knn,
            self.config.knn_neighbors,
            self.config.class_threshold,
        );
        let (imputed, cells_imputed) = imputer
            .impute(&filtered, &mut processing_steps)
            .context("While imputing missing values")?;
        summary.cells_imputed = cells_imputed;

        // Step 3: clip outliers on continuous columns
        let clipper = OutlierClipper::new(self.config.outlier_method, self.config.class_threshold);
        let (cleaned, evidence, values_clipped) = clipper
            .clip_impl(&imputed, self.config.collect_evidence, &mut processing_steps)
            .context("While clipping outliers")?;
        summary.values_clipped = values_clipped;

        // Step 4: completeness report over the cleaned snapshot; this is the
        // classification the dashboard and the column lists are built from
        let reporter = CompletenessReporter::new(self.config.class_threshold);
        let report = reporter
            .analyze(&cleaned)
            .context("While building the completeness report")?;

        let continuous_columns = quality::continuous_columns(&report);
        let discrete_columns = quality::discrete_columns(&report);
        debug!(
            "Classified {} continuous / {} discrete columns",
            continuous_columns.len(),
            discrete_columns.len()
        );

        for record in &report {
            if record.null_count > 0 {
                summary.add_warning(format!(
                    "Column '{}' still has {} missing values (no observed values to impute from)",
                    record.name, record.null_count
                ));
            }
        }
        if summary.columns_removed_percentage() > 30.0 {
            summary.add_warning(format!(
                "High feature loss: {:.1}% of columns were removed",
                summary.columns_removed_percentage()
            ));
        }

        summary.columns_after = cleaned.width();
        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Cleaning complete in {}ms: {} cells imputed, {} values clipped",
            summary.duration_ms, summary.cells_imputed, summary.values_clipped
        );

        Ok(PipelineResult {
            contract: DataContract {
                cleaned,
                continuous_columns,
                discrete_columns,
                evidence,
            },
            report,
            summary,
            processing_steps,
        })
    }
}

/// Builder for creating a [`Pipeline`] instance.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, crate::config::ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline { config })
    }
}
