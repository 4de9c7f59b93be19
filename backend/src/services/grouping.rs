//! Grouping of raw audit rows by submission and field.

use log::debug;

use crate::models::{AuditEvent, AuditRow, GroupedEvents};

/// Strip a URN-style prefix from a submission id (`uuid:abc` -> `abc`).
///
/// Keeps the part after the last `:`, so the result never contains a `:` and
/// normalizing twice is a no-op. An id without a `:` is returned unchanged.
pub fn normalize_submission_id(raw: &str) -> &str {
    last_segment(raw, ':')
}

/// Strip the path from a field id (`/data/group/Q1` -> `Q1`).
pub fn normalize_field_id(raw: &str) -> &str {
    last_segment(raw, '/')
}

fn last_segment(raw: &str, delimiter: char) -> &str {
    raw.rsplit(delimiter).next().unwrap_or(raw)
}

/// Turn a row into an event, or `None` when either identifier is missing or
/// empty after normalization.
pub fn normalize_row(row: &AuditRow) -> Option<AuditEvent> {
    let submission_id = row.instance_id.as_deref().map(normalize_submission_id)?;
    let field_id = row.node.as_deref().map(normalize_field_id)?;

    if submission_id.is_empty() || field_id.is_empty() {
        return None;
    }

    Some(AuditEvent {
        submission_id: submission_id.to_string(),
        field_id: field_id.to_string(),
        event_type: row.event.clone(),
        start: row.start,
        end: row.end,
        previous_value: row.old_value.clone(),
        new_value: row.new_value.clone(),
        user: row.user.clone(),
    })
}

/// Group rows into submission -> field -> events, preserving row order.
///
/// Rows without a usable submission or field id are dropped silently; header,
/// footer and form-level rows (e.g. `form start`) are expected in audit logs.
pub fn group_events(rows: &[AuditRow]) -> GroupedEvents {
    let mut grouped = GroupedEvents::new();
    let mut excluded = 0usize;

    for row in rows {
        match normalize_row(row) {
            Some(event) => grouped.push(event),
            None => excluded += 1,
        }
    }

    debug!(
        "Grouped {} events into {} submissions ({} rows excluded)",
        rows.len() - excluded,
        grouped.submission_count(),
        excluded
    );

    grouped
}
