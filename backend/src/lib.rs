//! # Audit Insights
//!
//! Analysis engine for form audit logs.
//!
//! An audit log records, for every submission of a form, when each question
//! was entered and left and whether its answer was changed. This crate turns
//! such a log into per-question and per-submission figures ready for bar
//! charts, and serves them to a web frontend over a small REST API.
//!
//! ## Features
//!
//! - **Data Loading**: Parse audit CSV exports with a one-shot in-memory read
//! - **Grouping**: Group events by submission and question, normalizing ids
//! - **Metrics**: Response time and answer-change counts per question
//! - **Aggregation**: Cross-submission averages and per-submission totals
//! - **Insights**: Slow/fast outliers and frequently changed answers
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! - [`models`]: Raw rows, normalized events and grouped mappings
//! - [`parsing`]: CSV decoding and file checksums
//! - [`services`]: The aggregation pipeline, charts and insights
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```no_run
//! use audit_insights::models::ZeroTimestamp;
//! use audit_insights::services::{build_chart, AuditDataset, ChartKind};
//! use std::path::Path;
//!
//! let dataset = AuditDataset::from_path(Path::new("audit.csv"), ZeroTimestamp::Origin)?;
//! let chart = build_chart(&dataset, ChartKind::PerFieldTime);
//! for record in &chart.records {
//!     println!("{}: {:.2}", record.category, record.value);
//! }
//! # Ok::<(), audit_insights::error::AuditError>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use config::AppConfig;
pub use error::{AuditError, AuditResult};
