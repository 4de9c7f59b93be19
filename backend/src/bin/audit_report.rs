//! Console audit report.
//!
//! Prints per-question averages, time outliers and frequently changed answers
//! for one audit CSV file.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin audit-report -- path/to/audit.csv
//! ```
//!
//! Thresholds and the zero-timestamp policy come from `audit.toml` (see
//! `AUDIT_CONFIG`).

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use audit_insights::services::{build_insights, AuditDataset, InsightsReport};
use audit_insights::AppConfig;

fn print_report(report: &InsightsReport) {
    println!("--AVERAGES--");
    for record in &report.field_time_averages {
        println!(
            "  Form Question Field: {}, Average Input Time: {:.3}s",
            record.category, record.value
        );
    }
    println!();

    println!("--OUTLIERS--");
    for outlier in &report.outliers {
        let direction = if outlier.deviation > 0.0 { "longer" } else { "shorter" };
        println!(
            " Submission {} took {:.3}s {} than the average on field {}",
            outlier.submission,
            outlier.deviation.abs(),
            direction,
            outlier.field
        );
    }
    println!();

    println!("--FREQUENT RESPONSE CHANGES--");
    for change in &report.frequent_changes {
        println!(
            " Submission {} changed their answer {} times on field {}",
            change.submission, change.changes, change.field
        );
    }
    println!();
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        bail!("Usage: {} <audit.csv>", args.first().map(String::as_str).unwrap_or("audit-report"));
    }
    let path = PathBuf::from(&args[1]);

    let config = AppConfig::load().context("Failed to load configuration")?;
    let dataset = AuditDataset::from_path(&path, config.metrics.zero_timestamp)
        .with_context(|| format!("Failed to load audit file {}", path.display()))?;

    let summary = dataset.summary();
    println!();
    println!("AUDIT RESULTS:");
    println!(
        "  {} events from {} submissions ({} rows skipped)",
        summary.included_events,
        summary.submission_count,
        summary.excluded_rows + summary.undecodable_rows
    );
    println!();

    print_report(&build_insights(&dataset, config.insight_thresholds()));

    Ok(())
}
