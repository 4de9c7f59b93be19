//! Reduction of grouped events into one scalar per submission/field pair.

use crate::models::{AuditEvent, GroupedEvents, SubmissionFieldMetric};

/// Apply `metric` to every field's event list.
///
/// The output has exactly the submission/field keys of `grouped`, in the same
/// order.
pub fn reduce_fields<F>(grouped: &GroupedEvents, metric: F) -> SubmissionFieldMetric
where
    F: Fn(&[AuditEvent]) -> f64,
{
    let mut reduced = SubmissionFieldMetric::new();
    for (submission_id, fields) in grouped.iter() {
        for (field_id, events) in fields {
            reduced.insert(submission_id.as_str(), field_id.as_str(), metric(events));
        }
    }
    reduced
}
