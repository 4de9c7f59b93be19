//! The loaded audit dataset and the pipeline entry point behind each chart.
//!
//! An [`AuditDataset`] is built once per file load and owned by the caller.
//! Loading another file builds a new dataset; nothing is merged or updated in
//! place.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{AuditError, AuditResult};
use crate::models::{AggregateRecord, AuditRow, GroupedEvents, SubmissionFieldMetric, ZeroTimestamp};
use crate::parsing::{calculate_checksum, parse_audit_reader, ParsedAudit};
use crate::services::aggregation::{average_by_field, total_by_submission};
use crate::services::grouping::group_events;
use crate::services::metrics::Metric;
use crate::services::reducer::reduce_fields;

/// Bookkeeping about one load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// SHA-256 of the file contents, when loaded from a file
    pub checksum: Option<String>,
    pub loaded_at: DateTime<Utc>,
    pub zero_timestamp: ZeroTimestamp,
    pub total_rows: usize,
    pub included_events: usize,
    /// Decoded rows without a usable submission or field id
    pub excluded_rows: usize,
    pub undecodable_rows: usize,
    pub submission_count: usize,
    pub field_count: usize,
}

/// Grouped audit events of one file plus the queries run against them.
#[derive(Debug, Clone)]
pub struct AuditDataset {
    grouped: GroupedEvents,
    summary: DatasetSummary,
}

impl AuditDataset {
    /// Build a dataset from already decoded rows.
    pub fn from_rows(rows: &[AuditRow], zero_timestamp: ZeroTimestamp) -> Self {
        Self::build(rows, 0, None, zero_timestamp)
    }

    /// Build a dataset from a parse result.
    pub fn from_parsed(
        parsed: &ParsedAudit,
        checksum: Option<String>,
        zero_timestamp: ZeroTimestamp,
    ) -> Self {
        Self::build(&parsed.rows, parsed.undecodable_rows, checksum, zero_timestamp)
    }

    /// Parse raw CSV bytes and build a dataset.
    pub fn from_csv_bytes(content: &[u8], zero_timestamp: ZeroTimestamp) -> AuditResult<Self> {
        let parsed = parse_audit_reader(content)?;
        Ok(Self::from_parsed(
            &parsed,
            Some(calculate_checksum(content)),
            zero_timestamp,
        ))
    }

    pub fn from_csv_str(content: &str, zero_timestamp: ZeroTimestamp) -> AuditResult<Self> {
        Self::from_csv_bytes(content.as_bytes(), zero_timestamp)
    }

    /// Read a whole audit file into memory and build a dataset from it.
    pub fn from_path(path: &Path, zero_timestamp: ZeroTimestamp) -> AuditResult<Self> {
        let content = fs::read(path).map_err(|e| AuditError::io(path, e))?;
        let dataset = Self::from_csv_bytes(&content, zero_timestamp)?;
        info!(
            "Loaded {}: {} events across {} submissions",
            path.display(),
            dataset.summary.included_events,
            dataset.summary.submission_count
        );
        Ok(dataset)
    }

    fn build(
        rows: &[AuditRow],
        undecodable_rows: usize,
        checksum: Option<String>,
        zero_timestamp: ZeroTimestamp,
    ) -> Self {
        let grouped = group_events(rows);
        let included_events = grouped.event_count();

        let summary = DatasetSummary {
            checksum,
            loaded_at: Utc::now(),
            zero_timestamp,
            total_rows: rows.len() + undecodable_rows,
            included_events,
            excluded_rows: rows.len() - included_events,
            undecodable_rows,
            submission_count: grouped.submission_count(),
            field_count: grouped.field_ids().len(),
        };

        Self { grouped, summary }
    }

    pub fn grouped(&self) -> &GroupedEvents {
        &self.grouped
    }

    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    pub fn zero_timestamp(&self) -> ZeroTimestamp {
        self.summary.zero_timestamp
    }

    pub fn is_empty(&self) -> bool {
        self.grouped.is_empty()
    }

    /// Reduce every submission/field pair with one of the built-in metrics.
    pub fn metric(&self, metric: Metric) -> SubmissionFieldMetric {
        reduce_fields(&self.grouped, metric.reducer(self.zero_timestamp()))
    }

    /// Seconds spent per submission and field.
    pub fn response_times(&self) -> SubmissionFieldMetric {
        self.metric(Metric::ResponseTime)
    }

    /// Answer changes per submission and field.
    pub fn change_counts(&self) -> SubmissionFieldMetric {
        self.metric(Metric::ChangeCount)
    }

    /// Average time spent per field.
    pub fn average_field_time(&self) -> Vec<AggregateRecord> {
        average_by_field(&self.response_times())
    }

    /// Average number of answer changes per field.
    pub fn average_field_changes(&self) -> Vec<AggregateRecord> {
        average_by_field(&self.change_counts())
    }

    /// Total time spent per submission.
    pub fn submission_time_totals(&self) -> Vec<AggregateRecord> {
        total_by_submission(&self.response_times())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "instanceID,event,node,start,end,old-value,new-value\n\
        uuid:S1,form start,,500,,,\n\
        uuid:S1,question,/data/Q1,1000,3000,,a\n\
        uuid:S1,question,/data/Q2,3000,4500,,b\n\
        uuid:S1,question,/data/Q1,5000,6000,a,c\n\
        uuid:S2,question,/data/Q1,1000,5000,,z\n\
        ,question,/data/Q1,1000,5000,,z\n";

    #[test]
    fn test_summary_counts() {
        let dataset = AuditDataset::from_csv_str(SAMPLE, ZeroTimestamp::Absent).unwrap();
        let summary = dataset.summary();

        assert_eq!(summary.total_rows, 6);
        assert_eq!(summary.included_events, 4);
        assert_eq!(summary.excluded_rows, 2);
        assert_eq!(summary.undecodable_rows, 0);
        assert_eq!(summary.submission_count, 2);
        assert_eq!(summary.field_count, 2);
        assert_eq!(summary.checksum, Some(calculate_checksum(SAMPLE)));
    }

    #[test]
    fn test_chart_queries() {
        let dataset = AuditDataset::from_csv_str(SAMPLE, ZeroTimestamp::Absent).unwrap();

        // S1/Q1 = 2 + 1 = 3 s, S2/Q1 = 4 s, S1/Q2 = 1.5 s
        let times = dataset.average_field_time();
        assert_eq!(times.len(), 2);
        assert_eq!(times[0].category, "Q1");
        assert!((times[0].value - 3.5).abs() < 1e-9);
        assert_eq!(times[1].category, "Q2");
        assert!((times[1].value - 1.5).abs() < 1e-9);

        let changes = dataset.average_field_changes();
        assert_eq!(changes[0], AggregateRecord::new("Q1", 0.5));
        assert_eq!(changes[1], AggregateRecord::new("Q2", 0.0));

        let totals = dataset.submission_time_totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, "S1");
        assert!((totals[0].value - 4.5).abs() < 1e-9);
        assert_eq!(totals[1].category, "S2");
        assert!((totals[1].value - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_rows_has_no_checksum() {
        let dataset = AuditDataset::from_rows(
            &[AuditRow::new("uuid:S1", "/data/Q1")],
            ZeroTimestamp::Absent,
        );
        assert_eq!(dataset.summary().checksum, None);
        assert_eq!(dataset.zero_timestamp(), ZeroTimestamp::Absent);
        assert!(!dataset.is_empty());
    }
}
