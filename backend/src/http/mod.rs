//! HTTP server module for the audit backend.
//!
//! This module provides an axum-based HTTP server that exposes the analysis
//! pipeline as a REST API for the chart frontend.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - CSV upload, chart selection, insights                  │
//! │  - JSON serialization, CORS, compression, error handling  │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  AppState                                                 │
//! │  - The currently loaded AuditDataset, replaced per upload │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Grouping, metrics, aggregation, charts, insights       │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::{AppState, LoadedAudit};
