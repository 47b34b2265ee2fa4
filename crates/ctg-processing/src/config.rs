//! Configuration types for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use crate::classify::DEFAULT_CLASS_THRESHOLD;
use crate::error::CleaningError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Strategy for computing outlier bounds on continuous columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutlierMethod {
    /// [Q1 - 1.5*IQR, Q3 + 1.5*IQR]
    #[default]
    Iqr,
    /// [mean - 3*std, mean + 3*std]
    ZScore,
}

impl OutlierMethod {
    /// Lowercase wire name, matching the dashboard's method selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iqr => "iqr",
            Self::ZScore => "z-score",
        }
    }
}

impl std::fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutlierMethod {
    type Err = CleaningError;

    /// Parse a method name. Anything outside {iqr, z-score} is rejected;
    /// there is deliberately no fallback value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iqr" => Ok(Self::Iqr),
            "z-score" | "zscore" => Ok(Self::ZScore),
            other => Err(CleaningError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Configuration for the cleaning pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use ctg_processing::{OutlierMethod, PipelineConfig};
///
/// let config = PipelineConfig::builder()
///     .null_column_threshold(0.2)
///     .use_knn(true)
///     .outlier_method(OutlierMethod::Iqr)
///     .collect_evidence(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum allowed null fraction before a column is dropped (0.0 - 1.0).
    /// Default: 0.2 (20%)
    pub null_column_threshold: f64,

    /// Continuous imputation strategy: KNN over the continuous subspace when
    /// true, per-column median otherwise. Discrete columns are mode-filled
    /// either way.
    /// Default: false
    pub use_knn: bool,

    /// Number of neighbors for KNN imputation.
    /// Default: 5
    pub knn_neighbors: usize,

    /// Bound computation strategy for outlier clipping.
    /// Default: Iqr
    pub outlier_method: OutlierMethod,

    /// Whether to record before/after evidence for clipped columns.
    /// Default: false
    pub collect_evidence: bool,

    /// Distinct-value cutoff for the continuous/discrete classification.
    /// Default: 10
    pub class_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            null_column_threshold: 0.2,
            use_knn: false,
            knn_neighbors: 5,
            outlier_method: OutlierMethod::default(),
            collect_evidence: false,
            class_threshold: DEFAULT_CLASS_THRESHOLD,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    ///
    /// Out-of-range values fail fast here rather than being clamped.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.null_column_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "null_column_threshold".to_string(),
                value: self.null_column_threshold,
            });
        }

        if self.knn_neighbors == 0 {
            return Err(ConfigValidationError::InvalidKnnNeighbors(
                self.knn_neighbors,
            ));
        }

        if self.class_threshold == 0 {
            return Err(ConfigValidationError::InvalidClassThreshold(
                self.class_threshold,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid KNN neighbors: {0} (must be at least 1)")]
    InvalidKnnNeighbors(usize),

    #[error("Invalid classification threshold: {0} (must be at least 1)")]
    InvalidClassThreshold(usize),
}

impl From<ConfigValidationError> for CleaningError {
    fn from(err: ConfigValidationError) -> Self {
        CleaningError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    null_column_threshold: Option<f64>,
    use_knn: Option<bool>,
    knn_neighbors: Option<usize>,
    outlier_method: Option<OutlierMethod>,
    collect_evidence: Option<bool>,
    class_threshold: Option<usize>,
}

impl PipelineConfigBuilder {
    /// Set the maximum allowed null fraction before a column is dropped.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.2 = 20%)
    pub fn null_column_threshold(mut self, threshold: f64) -> Self {
        self.null_column_threshold = Some(threshold);
        self
    }

    /// Use KNN imputation for continuous columns instead of the median.
    pub fn use_knn(mut self, use_knn: bool) -> Self {
        self.use_knn = Some(use_knn);
        self
    }

    /// Set the number of neighbors for KNN imputation.
    pub fn knn_neighbors(mut self, k: usize) -> Self {
        self.knn_neighbors = Some(k);
        self
    }

    /// Set the bound computation strategy for outlier clipping.
    pub fn outlier_method(mut self, method: OutlierMethod) -> Self {
        self.outlier_method = Some(method);
        self
    }

    /// Record before/after evidence for columns that had outliers.
    pub fn collect_evidence(mut self, collect: bool) -> Self {
        self.collect_evidence = Some(collect);
        self
    }

    /// Set the distinct-value cutoff for continuous classification.
    pub fn class_threshold(mut self, threshold: usize) -> Self {
        self.class_threshold = Some(threshold);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let config = PipelineConfig {
            null_column_threshold: self.null_column_threshold.unwrap_or(0.2),
            use_knn: self.use_knn.unwrap_or(false),
            knn_neighbors: self.knn_neighbors.unwrap_or(5),
            outlier_method: self.outlier_method.unwrap_or_default(),
            collect_evidence: self.collect_evidence.unwrap_or(false),
            class_threshold: self.class_threshold.unwrap_or(DEFAULT_CLASS_THRESHOLD),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.null_column_threshold, 0.2);
        assert!(!config.use_knn);
        assert_eq!(config.knn_neighbors, 5);
        assert_eq!(config.outlier_method, OutlierMethod::Iqr);
        assert!(!config.collect_evidence);
        assert_eq!(config.class_threshold, 10);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PipelineConfig::builder()
            .null_column_threshold(0.5)
            .use_knn(true)
            .knn_neighbors(3)
            .outlier_method(OutlierMethod::ZScore)
            .collect_evidence(true)
            .class_threshold(15)
            .build()
            .unwrap();

        assert_eq!(config.null_column_threshold, 0.5);
        assert!(config.use_knn);
        assert_eq!(config.knn_neighbors, 3);
        assert_eq!(config.outlier_method, OutlierMethod::ZScore);
        assert!(config.collect_evidence);
        assert_eq!(config.class_threshold, 15);
    }

    #[test]
    fn test_validation_threshold_above_one() {
        let result = PipelineConfig::builder().null_column_threshold(1.5).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold { .. }
        ));
    }

    #[test]
    fn test_validation_negative_threshold() {
        let result = PipelineConfig::builder()
            .null_column_threshold(-0.1)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_zero_knn_neighbors() {
        let result = PipelineConfig::builder().knn_neighbors(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidKnnNeighbors(0)
        ));
    }

    #[test]
    fn test_validation_zero_class_threshold() {
        let result = PipelineConfig::builder().class_threshold(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidClassThreshold(0)
        ));
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("iqr".parse::<OutlierMethod>().unwrap(), OutlierMethod::Iqr);
        assert_eq!(
            "z-score".parse::<OutlierMethod>().unwrap(),
            OutlierMethod::ZScore
        );
        assert_eq!(
            "Z-Score".parse::<OutlierMethod>().unwrap(),
            OutlierMethod::ZScore
        );
    }

    #[test]
    fn test_method_from_str_rejects_unknown() {
        let err = "median".parse::<OutlierMethod>().unwrap_err();
        assert!(matches!(err, CleaningError::UnsupportedMethod(_)));
        assert!(err.to_string().contains("median"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = PipelineConfig::builder()
            .outlier_method(OutlierMethod::ZScore)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("z-score"));

        let deserialized: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.outlier_method, OutlierMethod::ZScore);
    }
}
