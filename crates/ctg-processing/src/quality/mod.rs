//! Data quality reporting.
//!
//! The completeness report is both a quality summary for the dashboard and
//! the source of the continuous/discrete column lists every other component
//! relies on.

mod completeness;

pub use completeness::CompletenessReporter;

use crate::types::{ColumnClass, CompletenessRecord};

/// Names of the continuous columns in a report, in record order.
pub fn continuous_columns(records: &[CompletenessRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.class == ColumnClass::Continuous)
        .map(|r| r.name.clone())
        .collect()
}

/// Names of the discrete columns in a report, in record order.
pub fn discrete_columns(records: &[CompletenessRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.class == ColumnClass::Discrete)
        .map(|r| r.name.clone())
        .collect()
}
