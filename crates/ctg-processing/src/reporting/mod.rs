//! Report generation for the dashboard shell.

mod generator;

pub use generator::{QualityReport, ReportGenerator};
