//! Raw audit rows and normalized audit events.

use qtty::time::Milliseconds;
use serde::{Deserialize, Serialize};

/// How a timestamp of exactly `0` is read.
///
/// Audit exports use an empty cell for "no timestamp", so `0` is read as a real
/// point in time by default. `Absent` is for collectors that write `0` for a
/// missing timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroTimestamp {
    Absent,
    #[default]
    Origin,
}

impl ZeroTimestamp {
    /// Apply the policy to a raw timestamp. Non-finite values are always absent.
    pub fn read(self, raw: Option<f64>) -> Option<f64> {
        match raw {
            Some(value) if !value.is_finite() => None,
            Some(value) if value == 0.0 && self == ZeroTimestamp::Absent => None,
            other => other,
        }
    }
}

/// One row of an audit CSV as decoded from the file, before normalization.
///
/// Every column is optional so that header, footer and partial rows still decode;
/// the grouper decides which rows are usable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuditRow {
    #[serde(rename = "instanceID", default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub start: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub end: Option<f64>,
    #[serde(rename = "old-value", default)]
    pub old_value: Option<String>,
    #[serde(rename = "new-value", default)]
    pub new_value: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

impl AuditRow {
    pub fn new(instance_id: impl Into<String>, node: impl Into<String>) -> Self {
        Self {
            instance_id: Some(instance_id.into()),
            node: Some(node.into()),
            ..Default::default()
        }
    }

    pub fn with_times(mut self, start: f64, end: f64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_old_value(mut self, old_value: impl Into<String>) -> Self {
        self.old_value = Some(old_value.into());
        self
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }
}

/// A single field interaction belonging to one submission.
///
/// `submission_id` and `field_id` are always normalized and non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEvent {
    pub submission_id: String,
    pub field_id: String,
    pub event_type: Option<String>,
    /// Start timestamp in milliseconds
    pub start: Option<f64>,
    /// End timestamp in milliseconds
    pub end: Option<f64>,
    pub previous_value: Option<String>,
    pub new_value: Option<String>,
    pub user: Option<String>,
}

impl AuditEvent {
    /// Time between start and end, if both timestamps are usable under `zero`.
    pub fn elapsed(&self, zero: ZeroTimestamp) -> Option<Milliseconds> {
        let start = zero.read(self.start)?;
        let end = zero.read(self.end)?;
        Some(Milliseconds::new(end - start))
    }

    /// Whether this event replaced an earlier answer.
    pub fn is_change(&self) -> bool {
        self.previous_value
            .as_deref()
            .is_some_and(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: Option<f64>, end: Option<f64>, previous: Option<&str>) -> AuditEvent {
        AuditEvent {
            submission_id: "S1".to_string(),
            field_id: "Q1".to_string(),
            event_type: None,
            start,
            end,
            previous_value: previous.map(str::to_string),
            new_value: None,
            user: None,
        }
    }

    #[test]
    fn test_zero_timestamp_policies() {
        assert_eq!(ZeroTimestamp::Absent.read(Some(0.0)), None);
        assert_eq!(ZeroTimestamp::Origin.read(Some(0.0)), Some(0.0));
        assert_eq!(ZeroTimestamp::Absent.read(Some(12.5)), Some(12.5));
        assert_eq!(ZeroTimestamp::Origin.read(None), None);
        assert_eq!(ZeroTimestamp::Origin.read(Some(f64::NAN)), None);
    }

    #[test]
    fn test_elapsed_requires_both_timestamps() {
        let complete = event(Some(1000.0), Some(2500.0), None);
        assert_eq!(
            complete.elapsed(ZeroTimestamp::Absent).map(|ms| ms.value()),
            Some(1500.0)
        );

        assert!(event(Some(1000.0), None, None)
            .elapsed(ZeroTimestamp::Absent)
            .is_none());
        assert!(event(Some(0.0), Some(2000.0), None)
            .elapsed(ZeroTimestamp::Absent)
            .is_none());
        assert_eq!(
            event(Some(0.0), Some(2000.0), None)
                .elapsed(ZeroTimestamp::Origin)
                .map(|ms| ms.value()),
            Some(2000.0)
        );
    }

    #[test]
    fn test_is_change() {
        assert!(!event(None, None, None).is_change());
        assert!(!event(None, None, Some("")).is_change());
        assert!(event(None, None, Some("a")).is_change());
    }

    #[test]
    fn test_zero_is_a_real_timestamp_by_default() {
        assert_eq!(ZeroTimestamp::default(), ZeroTimestamp::Origin);
        assert_eq!(
            event(Some(0.0), Some(2000.0), None)
                .elapsed(ZeroTimestamp::default())
                .map(|ms| ms.value()),
            Some(2000.0)
        );
    }

    #[test]
    fn test_zero_timestamp_serde() {
        let json = serde_json::to_string(&ZeroTimestamp::Origin).unwrap();
        assert_eq!(json, "\"origin\"");
        let parsed: ZeroTimestamp = serde_json::from_str("\"absent\"").unwrap();
        assert_eq!(parsed, ZeroTimestamp::Absent);
    }
}
