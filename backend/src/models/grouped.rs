//! Nested submission -> field mappings produced by the aggregation pipeline.
//!
//! All mappings keep first-encountered order so that the record lists handed
//! to charts are reproducible for a given file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::event::AuditEvent;

/// Events of one submission, keyed by field id.
pub type FieldEvents = IndexMap<String, Vec<AuditEvent>>;

/// Metric values of one submission, keyed by field id.
pub type FieldValues = IndexMap<String, f64>;

/// Audit events grouped by submission, then by field, in file row order.
///
/// A submission/field key only exists once at least one event for it was added.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupedEvents {
    submissions: IndexMap<String, FieldEvents>,
}

impl GroupedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event under its own submission and field ids.
    pub(crate) fn push(&mut self, event: AuditEvent) {
        self.submissions
            .entry(event.submission_id.clone())
            .or_default()
            .entry(event.field_id.clone())
            .or_default()
            .push(event);
    }

    pub fn get(&self, submission_id: &str) -> Option<&FieldEvents> {
        self.submissions.get(submission_id)
    }

    pub fn events(&self, submission_id: &str, field_id: &str) -> Option<&[AuditEvent]> {
        self.get(submission_id)
            .and_then(|fields| fields.get(field_id))
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldEvents)> {
        self.submissions.iter()
    }

    pub fn submission_ids(&self) -> impl Iterator<Item = &str> {
        self.submissions.keys().map(String::as_str)
    }

    /// Distinct field ids across all submissions, in first-encountered order.
    pub fn field_ids(&self) -> Vec<&str> {
        let mut seen = indexmap::IndexSet::new();
        for fields in self.submissions.values() {
            seen.extend(fields.keys().map(String::as_str));
        }
        seen.into_iter().collect()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.len()
    }

    pub fn event_count(&self) -> usize {
        self.submissions
            .values()
            .flat_map(|fields| fields.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

/// One scalar per submission/field pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionFieldMetric {
    submissions: IndexMap<String, FieldValues>,
}

impl SubmissionFieldMetric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value, replacing any previous value for the same pair.
    pub fn insert(
        &mut self,
        submission_id: impl Into<String>,
        field_id: impl Into<String>,
        value: f64,
    ) {
        self.submissions
            .entry(submission_id.into())
            .or_default()
            .insert(field_id.into(), value);
    }

    pub fn get(&self, submission_id: &str, field_id: &str) -> Option<f64> {
        self.submissions
            .get(submission_id)
            .and_then(|fields| fields.get(field_id))
            .copied()
    }

    pub fn fields(&self, submission_id: &str) -> Option<&FieldValues> {
        self.submissions.get(submission_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValues)> {
        self.submissions.iter()
    }

    /// Flattened `(submission, field, value)` triples in encounter order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.submissions.iter().flat_map(|(submission, fields)| {
            fields
                .iter()
                .map(move |(field, value)| (submission.as_str(), field.as_str(), *value))
        })
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

impl<S, F> FromIterator<(S, F, f64)> for SubmissionFieldMetric
where
    S: Into<String>,
    F: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, F, f64)>>(iter: I) -> Self {
        let mut metric = SubmissionFieldMetric::new();
        for (submission, field, value) in iter {
            metric.insert(submission, field, value);
        }
        metric
    }
}

/// A `{category, value}` pair: the only shape handed to chart renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub category: String,
    pub value: f64,
}

impl AggregateRecord {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}
