//! Cross-submission aggregation of per-field metrics.

use indexmap::IndexMap;

use crate::models::{AggregateRecord, SubmissionFieldMetric};

/// Average value of every field across the submissions that contain it.
///
/// A submission without a given field does not count towards that field's
/// denominator. Fields appear in first-encountered order (submissions, then
/// fields within each submission).
pub fn field_averages(metric: &SubmissionFieldMetric) -> IndexMap<String, f64> {
    let mut totals: IndexMap<&str, (f64, usize)> = IndexMap::new();

    for (_, field, value) in metric.entries() {
        let entry = totals.entry(field).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    // count >= 1 for every key: a key is only created together with a value
    totals
        .into_iter()
        .map(|(field, (sum, count))| (field.to_string(), sum / count as f64))
        .collect()
}

/// Per-field averages as chart records.
pub fn average_by_field(metric: &SubmissionFieldMetric) -> Vec<AggregateRecord> {
    field_averages(metric)
        .into_iter()
        .map(|(field, average)| AggregateRecord::new(field, average))
        .collect()
}

/// Sum of every submission's field values, one record per submission.
pub fn total_by_submission(metric: &SubmissionFieldMetric) -> Vec<AggregateRecord> {
    metric
        .iter()
        .map(|(submission, fields)| AggregateRecord::new(submission.as_str(), fields.values().sum()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(entries: &[(&str, &str, f64)]) -> SubmissionFieldMetric {
        entries.iter().map(|&(s, f, v)| (s, f, v)).collect()
    }

    #[test]
    fn test_average_by_field_uses_containing_submissions_only() {
        let values = metric(&[
            ("S1", "Q1", 2.0),
            ("S1", "Q2", 6.0),
            ("S2", "Q1", 4.0),
        ]);

        let averages = average_by_field(&values);

        assert_eq!(
            averages,
            vec![AggregateRecord::new("Q1", 3.0), AggregateRecord::new("Q2", 6.0)]
        );
    }

    #[test]
    fn test_average_by_field_order_follows_encounter() {
        let values = metric(&[
            ("S1", "Q3", 1.0),
            ("S2", "Q1", 1.0),
            ("S2", "Q3", 1.0),
            ("S3", "Q2", 1.0),
        ]);

        let categories: Vec<_> = average_by_field(&values)
            .into_iter()
            .map(|r| r.category)
            .collect();
        assert_eq!(categories, vec!["Q3", "Q1", "Q2"]);
    }

    #[test]
    fn test_total_by_submission() {
        let values = metric(&[("S1", "Q1", 2.0), ("S1", "Q2", 1.5), ("S2", "Q1", 4.0)]);

        assert_eq!(
            total_by_submission(&values),
            vec![AggregateRecord::new("S1", 3.5), AggregateRecord::new("S2", 4.0)]
        );
    }

    #[test]
    fn test_empty_metric_produces_no_records() {
        let empty = SubmissionFieldMetric::new();
        assert!(average_by_field(&empty).is_empty());
        assert!(total_by_submission(&empty).is_empty());
        assert!(field_averages(&empty).is_empty());
    }
}
