//! The shared continuous/discrete column predicate.
//!
//! Every component that needs to know whether a column is continuous (the
//! completeness reporter, the imputer, the outlier clipper) calls
//! [`classify_series`] with the same threshold, so the answer can never drift
//! between call sites.

use crate::types::ColumnClass;
use crate::utils::is_numeric_dtype;
use polars::prelude::*;

/// Default distinct-value cutoff: a numeric column needs MORE than this many
/// distinct non-null values to count as continuous.
pub const DEFAULT_CLASS_THRESHOLD: usize = 10;

/// Classify a column as continuous or discrete.
///
/// A column is continuous iff its dtype is numeric AND it has strictly more
/// than `threshold` distinct non-null values. Low-cardinality numeric columns
/// (integer-coded categories, ordinal scores) are intentionally discrete so
/// they never receive median/KNN imputation or outlier clipping.
pub fn classify_series(series: &Series, threshold: usize) -> PolarsResult<ColumnClass> {
    if !is_numeric_dtype(series.dtype()) {
        return Ok(ColumnClass::Discrete);
    }
    // n_unique on the raw series counts null as a distinct value; the rule
    // is over non-null values only.
    let distinct = series.drop_nulls().n_unique()?;
    if distinct > threshold {
        Ok(ColumnClass::Continuous)
    } else {
        Ok(ColumnClass::Discrete)
    }
}

/// Partition a DataFrame's column names into (continuous, discrete) lists,
/// preserving frame column order.
pub fn partition_columns(
    df: &DataFrame,
    threshold: usize,
) -> PolarsResult<(Vec<String>, Vec<String>)> {
    let mut continuous = Vec::new();
    let mut discrete = Vec::new();

    for col in df.get_columns() {
        let series = col.as_materialized_series();
        match classify_series(series, threshold)? {
            ColumnClass::Continuous => continuous.push(series.name().to_string()),
            ColumnClass::Discrete => discrete.push(series.name().to_string()),
        }
    }

    Ok((continuous, discrete))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_above_threshold_is_continuous() {
        let values: Vec<f64> = (0..15).map(|x| x as f64).collect();
        let series = Series::new("val".into(), values);
        assert_eq!(
            classify_series(&series, DEFAULT_CLASS_THRESHOLD).unwrap(),
            ColumnClass::Continuous
        );
    }

    #[test]
    fn test_numeric_low_cardinality_is_discrete() {
        // Integer-coded category: repeated values 1/2/3
        let series = Series::new("code".into(), &[1i64, 2, 3, 1, 2, 3, 1, 2, 3]);
        assert_eq!(
            classify_series(&series, DEFAULT_CLASS_THRESHOLD).unwrap(),
            ColumnClass::Discrete
        );
    }

    #[test]
    fn test_string_is_discrete_regardless_of_cardinality() {
        let values: Vec<String> = (0..50).map(|x| format!("v{}", x)).collect();
        let series = Series::new("label".into(), values);
        assert_eq!(
            classify_series(&series, DEFAULT_CLASS_THRESHOLD).unwrap(),
            ColumnClass::Discrete
        );
    }

    #[test]
    fn test_threshold_boundary() {
        // Exactly 10 distinct values -> discrete; 11 -> continuous.
        let ten: Vec<f64> = (0..10).map(|x| x as f64).collect();
        let eleven: Vec<f64> = (0..11).map(|x| x as f64).collect();

        let s10 = Series::new("ten".into(), ten);
        let s11 = Series::new("eleven".into(), eleven);

        assert_eq!(classify_series(&s10, 10).unwrap(), ColumnClass::Discrete);
        assert_eq!(classify_series(&s11, 10).unwrap(), ColumnClass::Continuous);
    }

    #[test]
    fn test_nulls_do_not_count_as_distinct() {
        // 10 distinct values plus nulls must stay discrete at threshold 10.
        let mut values: Vec<Option<f64>> = (0..10).map(|x| Some(x as f64)).collect();
        values.push(None);
        values.push(None);
        let series = Series::new("val".into(), values);
        assert_eq!(classify_series(&series, 10).unwrap(), ColumnClass::Discrete);
    }

    #[test]
    fn test_partition_is_exclusive_and_exhaustive() {
        let df = df![
            "wide" => (0..20).map(|x| x as f64).collect::<Vec<f64>>(),
            "narrow" => (0..20).map(|x| (x % 3) as f64).collect::<Vec<f64>>(),
            "label" => (0..20).map(|x| format!("c{}", x % 2)).collect::<Vec<String>>(),
        ]
        .unwrap();

        let (continuous, discrete) = partition_columns(&df, 10).unwrap();
        assert_eq!(continuous, vec!["wide".to_string()]);
        assert_eq!(discrete, vec!["narrow".to_string(), "label".to_string()]);
        assert_eq!(continuous.len() + discrete.len(), df.width());
    }
}
