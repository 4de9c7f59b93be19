//! Domain types for audit analysis.
//!
//! - [`event`]: raw CSV rows and normalized events
//! - [`grouped`]: submission -> field mappings and aggregate records

pub mod event;
pub mod grouped;

pub use event::{AuditEvent, AuditRow, ZeroTimestamp};
pub use grouped::{AggregateRecord, FieldEvents, FieldValues, GroupedEvents, SubmissionFieldMetric};
