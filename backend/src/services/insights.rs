//! Outlier and frequent-change detection on top of the per-field metrics.

use serde::{Deserialize, Serialize};

use crate::models::{AggregateRecord, SubmissionFieldMetric};
use crate::services::aggregation::field_averages;
use crate::services::dataset::AuditDataset;

/// Limits that decide what gets reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsightThresholds {
    /// Seconds a submission may deviate from a field's average before it is flagged
    pub time_outlier_secs: f64,
    /// Minimum number of changes on a field that gets reported
    pub min_changes: u32,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            time_outlier_secs: 4.0,
            min_changes: 2,
        }
    }
}

/// A submission whose time on a field is far from the field's average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOutlier {
    pub submission: String,
    pub field: String,
    pub value: f64,
    pub field_average: f64,
    /// `value - field_average`; positive means slower than average
    pub deviation: f64,
}

/// A submission that changed its answer to a field repeatedly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentChange {
    pub submission: String,
    pub field: String,
    pub changes: u32,
}

/// Everything the insights view shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub thresholds: InsightThresholds,
    pub field_time_averages: Vec<AggregateRecord>,
    pub outliers: Vec<TimeOutlier>,
    pub frequent_changes: Vec<FrequentChange>,
}

/// Pairs whose value differs from the field average by more than `threshold`.
pub fn find_time_outliers(times: &SubmissionFieldMetric, threshold: f64) -> Vec<TimeOutlier> {
    let averages = field_averages(times);

    times
        .entries()
        .filter_map(|(submission, field, value)| {
            let field_average = *averages.get(field)?;
            let deviation = value - field_average;
            (deviation.abs() > threshold).then(|| TimeOutlier {
                submission: submission.to_string(),
                field: field.to_string(),
                value,
                field_average,
                deviation,
            })
        })
        .collect()
}

/// Pairs with at least `min_changes` answer changes.
pub fn find_frequent_changes(
    changes: &SubmissionFieldMetric,
    min_changes: u32,
) -> Vec<FrequentChange> {
    changes
        .entries()
        .filter(|&(_, _, count)| count >= f64::from(min_changes))
        .map(|(submission, field, count)| FrequentChange {
            submission: submission.to_string(),
            field: field.to_string(),
            changes: count as u32,
        })
        .collect()
}

/// Build the full insights report for a dataset.
pub fn build_insights(dataset: &AuditDataset, thresholds: InsightThresholds) -> InsightsReport {
    let times = dataset.response_times();
    let changes = dataset.change_counts();

    InsightsReport {
        thresholds,
        field_time_averages: field_averages(&times)
            .into_iter()
            .map(|(field, average)| AggregateRecord::new(field, average))
            .collect(),
        outliers: find_time_outliers(&times, thresholds.time_outlier_secs),
        frequent_changes: find_frequent_changes(&changes, thresholds.min_changes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditRow, ZeroTimestamp};

    #[test]
    fn test_find_time_outliers() {
        let times: SubmissionFieldMetric = vec![
            ("S1", "Q1", 2.0),
            ("S2", "Q1", 2.0),
            ("S3", "Q1", 14.0),
            ("S1", "Q2", 1.0),
        ]
        .into_iter()
        .collect();

        // Q1 average is 6 s: S3 is 8 s slower, S1 and S2 are 4 s faster
        let outliers = find_time_outliers(&times, 4.0);

        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].submission, "S3");
        assert_eq!(outliers[0].field, "Q1");
        assert_eq!(outliers[0].field_average, 6.0);
        assert_eq!(outliers[0].deviation, 8.0);

        let faster = find_time_outliers(&times, 3.5);
        assert_eq!(faster.len(), 3);
        assert!(faster.iter().any(|o| o.submission == "S1" && o.deviation < 0.0));
    }

    #[test]
    fn test_single_submission_is_never_an_outlier() {
        let times: SubmissionFieldMetric = vec![("S1", "Q1", 120.0)].into_iter().collect();
        assert!(find_time_outliers(&times, 0.0).is_empty());
    }

    #[test]
    fn test_find_frequent_changes() {
        let changes: SubmissionFieldMetric = vec![
            ("S1", "Q1", 2.0),
            ("S1", "Q2", 1.0),
            ("S2", "Q1", 5.0),
        ]
        .into_iter()
        .collect();

        let frequent = find_frequent_changes(&changes, 2);

        assert_eq!(
            frequent,
            vec![
                FrequentChange {
                    submission: "S1".to_string(),
                    field: "Q1".to_string(),
                    changes: 2,
                },
                FrequentChange {
                    submission: "S2".to_string(),
                    field: "Q1".to_string(),
                    changes: 5,
                },
            ]
        );
    }

    #[test]
    fn test_build_insights() {
        let mut rows = vec![
            AuditRow::new("uuid:S1", "/data/Q1").with_times(1000.0, 2000.0),
            AuditRow::new("uuid:S2", "/data/Q1").with_times(1000.0, 2000.0),
            AuditRow::new("uuid:S3", "/data/Q1").with_times(1000.0, 12000.0),
            AuditRow::new("uuid:S4", "/data/Q1").with_times(1000.0, 2000.0),
        ];
        for value in ["a", "b"] {
            rows.push(
                AuditRow::new("uuid:S2", "/data/Q1")
                    .with_times(2000.0, 2000.0)
                    .with_old_value(value),
            );
        }
        let dataset = AuditDataset::from_rows(&rows, ZeroTimestamp::Absent);

        // Q1 average is 3.5 s: only S3 (11 s) is more than 4 s away
        let report = build_insights(&dataset, InsightThresholds::default());

        assert_eq!(report.field_time_averages.len(), 1);
        assert_eq!(report.outliers.len(), 1);
        assert_eq!(report.outliers[0].submission, "S3");
        assert_eq!(report.frequent_changes.len(), 1);
        assert_eq!(report.frequent_changes[0].submission, "S2");
        assert_eq!(report.frequent_changes[0].changes, 2);
    }
}
