//! Chart selection: the chart kinds offered to the frontend and the records
//! behind each one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuditError;
use crate::models::AggregateRecord;
use crate::services::dataset::AuditDataset;

/// The charts that can be drawn from a loaded audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    PerFieldTime,
    PerFieldChanges,
    PerSubmissionTime,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::PerFieldTime,
        ChartKind::PerFieldChanges,
        ChartKind::PerSubmissionTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::PerFieldTime => "per-field-time",
            ChartKind::PerFieldChanges => "per-field-changes",
            ChartKind::PerSubmissionTime => "per-submission-time",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::PerFieldTime => "Average Time Spent Responding Per Question",
            ChartKind::PerFieldChanges => "Average Number of Response Changes Per Question",
            ChartKind::PerSubmissionTime => "Total Time Spent Per Submission",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChartKind::PerFieldTime => {
                "Average number of seconds enumerators spent on each question, across the submissions that reached it."
            }
            ChartKind::PerFieldChanges => {
                "Average number of times an answer was changed after it was first entered, per question."
            }
            ChartKind::PerSubmissionTime => {
                "Total number of seconds spent answering questions in each submission."
            }
        }
    }

    /// Element id the chart is rendered into.
    pub fn container_key(&self) -> &'static str {
        match self {
            ChartKind::PerFieldTime => "average-question-time",
            ChartKind::PerFieldChanges => "average-question-changes",
            ChartKind::PerSubmissionTime => "submission-time",
        }
    }

    pub fn category_label(&self) -> &'static str {
        match self {
            ChartKind::PerFieldTime | ChartKind::PerFieldChanges => "Question",
            ChartKind::PerSubmissionTime => "Submission",
        }
    }

    pub fn value_label(&self) -> &'static str {
        match self {
            ChartKind::PerFieldTime => "Average Response Time (s)",
            ChartKind::PerFieldChanges => "Average Response Changes",
            ChartKind::PerSubmissionTime => "Total Response Time (s)",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AuditError::UnknownChart(s.to_string()))
    }
}

/// Entry of the chart selection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOption {
    pub kind: ChartKind,
    pub title: String,
    pub description: String,
}

/// Records and labels for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    pub container_key: String,
    pub category_label: String,
    pub value_label: String,
    pub records: Vec<AggregateRecord>,
}

/// Every chart kind with its description, in display order.
pub fn chart_options() -> Vec<ChartOption> {
    ChartKind::ALL
        .into_iter()
        .map(|kind| ChartOption {
            kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
        })
        .collect()
}

/// Run the query behind `kind` against a loaded dataset.
pub fn build_chart(dataset: &AuditDataset, kind: ChartKind) -> ChartData {
    let records = match kind {
        ChartKind::PerFieldTime => dataset.average_field_time(),
        ChartKind::PerFieldChanges => dataset.average_field_changes(),
        ChartKind::PerSubmissionTime => dataset.submission_time_totals(),
    };

    ChartData {
        kind,
        title: kind.title().to_string(),
        container_key: kind.container_key().to_string(),
        category_label: kind.category_label().to_string(),
        value_label: kind.value_label().to_string(),
        records,
    }
}
