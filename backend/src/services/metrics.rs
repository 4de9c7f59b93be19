//! Metric functions reducing one field's events to a number.
//!
//! Each function is pure and returns `0.0` for an empty event list.

use qtty::time::{Milliseconds, Second, Seconds};
use serde::{Deserialize, Serialize};

use crate::models::{AuditEvent, ZeroTimestamp};

/// Total time spent on a field, summed over events with both timestamps.
pub fn response_time(events: &[AuditEvent], zero: ZeroTimestamp) -> Seconds {
    events
        .iter()
        .filter_map(|event| event.elapsed(zero))
        .fold(Milliseconds::new(0.0), |total, elapsed| total + elapsed)
        .to::<Second>()
}

/// Total response time in seconds under the default timestamp reading.
pub fn total_response_time(events: &[AuditEvent]) -> f64 {
    response_time(events, ZeroTimestamp::default()).value()
}

/// Number of times an answer was changed after it was first given.
pub fn total_change_count(events: &[AuditEvent]) -> f64 {
    events.iter().filter(|event| event.is_change()).count() as f64
}

/// The built-in metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Seconds between start and end, summed
    ResponseTime,
    /// Events carrying a previous value
    ChangeCount,
}

impl Metric {
    pub fn evaluate(self, events: &[AuditEvent], zero: ZeroTimestamp) -> f64 {
        match self {
            Metric::ResponseTime => response_time(events, zero).value(),
            Metric::ChangeCount => total_change_count(events),
        }
    }

    /// The metric as a plain function value, ready for the reducer.
    pub fn reducer(self, zero: ZeroTimestamp) -> impl Fn(&[AuditEvent]) -> f64 {
        move |events| self.evaluate(events, zero)
    }
}
