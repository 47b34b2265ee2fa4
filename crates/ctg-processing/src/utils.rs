//! Shared utilities for the cleaning pipeline.
//!
//! Helper functions used across multiple modules to reduce duplication and
//! keep numeric conventions (percentile interpolation, sample std, mode
//! tie-breaking) consistent everywhere.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Collect the non-null values of a numeric Series as f64, in row order.
pub fn non_null_f64_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().flatten().collect())
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Linear-interpolated percentile over already-collected values.
///
/// `q` is in [0, 1]. Interpolates between the two nearest order statistics,
/// the convention the outlier bounds were calibrated against. Returns None
/// for empty input.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = q * (sorted.len() - 1) as f64;
    let lower_idx = pos.floor() as usize;
    let upper_idx = pos.ceil() as usize;
    if lower_idx == upper_idx {
        return Some(sorted[lower_idx]);
    }
    let frac = pos - lower_idx as f64;
    Some(sorted[lower_idx] * (1.0 - frac) + sorted[upper_idx] * frac)
}

/// Sample standard deviation (n - 1 denominator) over collected values.
///
/// Returns 0.0 for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Calculate the mode of a numeric Series.
///
/// Ties are broken by the first-encountered value in column order. Returns
/// None if the column has no non-null values.
pub fn numeric_mode(series: &Series) -> PolarsResult<Option<f64>> {
    let values = non_null_f64_values(series)?;
    if values.is_empty() {
        return Ok(None);
    }

    let mut counts: std::collections::HashMap<u64, usize> = std::collections::HashMap::new();
    for val in &values {
        *counts.entry(val.to_bits()).or_insert(0) += 1;
    }

    // First-encountered wins on equal counts: only replace on strictly
    // greater count while scanning in row order.
    let mut best_val = values[0];
    let mut best_count = 0usize;
    let mut seen: std::collections::HashSet<u64> = std::collections::HashSet::new();
    for val in &values {
        if !seen.insert(val.to_bits()) {
            continue;
        }
        let count = counts[&val.to_bits()];
        if count > best_count {
            best_count = count;
            best_val = *val;
        }
    }

    Ok(Some(best_val))
}

/// Calculate the mode (most frequent value) of a string Series.
///
/// Ties are broken by the first-encountered value in column order.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let str_series = non_null.cast(&DataType::String).ok()?;
    let str_chunked = str_series.str().ok()?;

    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for val in str_chunked.into_iter().flatten() {
        let entry = counts.entry(val.to_string()).or_insert(0);
        if *entry == 0 {
            order.push(val.to_string());
        }
        *entry += 1;
    }

    let mut best: Option<(String, usize)> = None;
    for val in order {
        let count = counts[&val];
        match &best {
            Some((_, best_count)) if count <= *best_count => {}
            _ => best = Some((val, count)),
        }
    }

    best.map(|(val, _)| val)
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a numeric Series with a specific value.
///
/// The result is Float64; callers that need the original dtype cast back.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(val.try_extract::<f64>()?));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value.to_string()));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(format!("{}", val)));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

// =============================================================================
// Tests
// =============================================================================
