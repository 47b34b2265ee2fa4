//! CLI entry point for the cleaning pipeline.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use ctg_processing::{
    OutlierMethod, Pipeline, PipelineConfig, QualityReport, ReportGenerator,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// CLI-compatible outlier method enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutlierMethod {
    /// Bounds at Q1 - 1.5*IQR and Q3 + 1.5*IQR
    Iqr,
    /// Bounds at mean +/- 3 standard deviations
    ZScore,
}

impl From<CliOutlierMethod> for OutlierMethod {
    fn from(cli: CliOutlierMethod) -> Self {
        match cli {
            CliOutlierMethod::Iqr => OutlierMethod::Iqr,
            CliOutlierMethod::ZScore => OutlierMethod::ZScore,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Cleaning and classification pipeline for CTG datasets",
    long_about = "Cleans a cardiotocography CSV for the exploration dashboard.\n\n\
                  EXAMPLES:\n  \
                  # Clean with defaults (20% null threshold, median imputation, IQR clipping)\n  \
                  ctg-processing -i data/CTG.csv\n\n  \
                  # KNN imputation plus before/after outlier evidence\n  \
                  ctg-processing -i data/CTG.csv --knn --evidence\n\n  \
                  # z-score bounds and a custom output directory\n  \
                  ctg-processing -i data/CTG.csv --method z-score -o results/"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long)]
    input: String,

    /// Output directory for results
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Maximum allowed null fraction before a column is dropped (0.0 - 1.0)
    #[arg(long, default_value_t = 0.2)]
    null_threshold: f64,

    /// Impute continuous columns with KNN instead of the median
    #[arg(long)]
    knn: bool,

    /// Number of neighbors for KNN imputation
    #[arg(long, default_value_t = 5)]
    knn_neighbors: usize,

    /// Outlier bound computation method
    #[arg(long, value_enum, default_value_t = CliOutlierMethod::Iqr)]
    method: CliOutlierMethod,

    /// Record before/after evidence for clipped columns
    #[arg(long)]
    evidence: bool,

    /// Distinct-value cutoff for continuous classification
    #[arg(long, default_value_t = 10)]
    class_threshold: usize,

    /// Print the quality report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from {}", args.input);
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(args.input.clone().into()))
        .context("Failed to open CSV reader")?
        .finish()
        .context("Failed to read CSV file")?;

    let config = PipelineConfig::builder()
        .null_column_threshold(args.null_threshold)
        .use_knn(args.knn)
        .knn_neighbors(args.knn_neighbors)
        .outlier_method(args.method.into())
        .collect_evidence(args.evidence)
        .class_threshold(args.class_threshold)
        .build()
        .context("Invalid configuration")?;

    let result = Pipeline::builder()
        .config(config)
        .build()
        .context("Failed to build pipeline")?
        .process(&df)
        .context("Pipeline failed")?;

    let report = QualityReport::from_result(&result);

    let stem = Path::new(&args.input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    let generator = ReportGenerator::new(&args.output, format!("{}_clean", stem));
    generator.write_cleaned_csv(&result.contract.cleaned)?;
    generator.write_report(&report)?;

    if args.json {
        println!("{}", generator.to_json(&report)?);
    } else {
        print_report_table(&report);
    }

    Ok(())
}

fn print_report_table(report: &QualityReport) {
    println!(
        "\nCleaned {} rows x {} columns in {}ms",
        report.shape.0, report.shape.1, report.duration_ms
    );
    if !report.dropped_columns.is_empty() {
        println!("Dropped columns: {:?}", report.dropped_columns);
    }

    println!(
        "\n{:<28} {:>6} {:>12}  {:<10} {:<40}",
        "column", "nulls", "complete", "class", "dispersion"
    );
    for record in &report.records {
        println!(
            "{:<28} {:>6} {:>11.2}%  {:<10} {:<40}",
            record.name, record.null_count, record.completeness, record.class, record.dispersion
        );
    }

    if !report.evidence.is_empty() {
        println!("\nOutliers treated in {} columns:", report.evidence.len());
        let mut names: Vec<&String> = report.evidence.keys().collect();
        names.sort();
        for name in names {
            let ev = &report.evidence[name];
            println!(
                "  {} -> {} values clipped to [{:.2}, {:.2}]",
                name,
                ev.outlier_count(),
                ev.lower,
                ev.upper
            );
        }
    }

    for warning in &report.warnings {
        println!("WARNING: {}", warning);
    }
}
