//! Aggregation pipeline and the analyses built on it.
//!
//! Data flows leaf-first through these modules:
//!
//! ```text
//! rows -> grouping -> reducer(metrics) -> aggregation -> charts -> presentation
//! ```
//!
//! [`dataset::AuditDataset`] owns the grouped events of one load and exposes
//! one entry point per chart; [`insights`] adds outlier and change reports.

pub mod aggregation;
pub mod charts;
pub mod dataset;
pub mod grouping;
pub mod insights;
pub mod metrics;
pub mod presentation;
pub mod reducer;

pub use aggregation::{average_by_field, field_averages, total_by_submission};
pub use charts::{build_chart, chart_options, ChartData, ChartKind, ChartOption};
pub use dataset::{AuditDataset, DatasetSummary};
pub use grouping::{group_events, normalize_field_id, normalize_submission_id};
pub use insights::{build_insights, InsightThresholds, InsightsReport};
pub use metrics::{total_change_count, total_response_time, Metric};
pub use presentation::{render_chart, ChartRenderer, VegaLiteRenderer};
pub use reducer::reduce_fields;
