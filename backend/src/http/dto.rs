//! Data Transfer Objects for the HTTP API.
//!
//! Chart, insight and summary types already derive Serialize and are
//! re-exported from the service layer.

use serde::{Deserialize, Serialize};

pub use crate::services::charts::{ChartData, ChartOption};
pub use crate::services::dataset::DatasetSummary;
pub use crate::services::insights::{InsightThresholds, InsightsReport};

use super::state::LoadedAudit;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub dataset_loaded: bool,
}

/// Response describing the loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetResponse {
    pub dataset_id: String,
    #[serde(flatten)]
    pub summary: DatasetSummary,
}

impl From<&LoadedAudit> for DatasetResponse {
    fn from(loaded: &LoadedAudit) -> Self {
        Self {
            dataset_id: loaded.id.to_string(),
            summary: loaded.dataset.summary().clone(),
        }
    }
}

/// Available chart kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartListResponse {
    pub charts: Vec<ChartOption>,
    pub total: usize,
}

/// Query parameters for the insights endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InsightsQuery {
    /// Seconds of deviation from a field average that count as an outlier
    #[serde(default)]
    pub time_threshold: Option<f64>,
    /// Minimum answer changes that get reported
    #[serde(default)]
    pub change_threshold: Option<u32>,
}

impl InsightsQuery {
    /// Overlay the query on the configured thresholds.
    pub fn thresholds(&self, defaults: InsightThresholds) -> Result<InsightThresholds, String> {
        let time_outlier_secs = self.time_threshold.unwrap_or(defaults.time_outlier_secs);
        if !time_outlier_secs.is_finite() || time_outlier_secs < 0.0 {
            return Err("time_threshold must be a non-negative number".to_string());
        }

        Ok(InsightThresholds {
            time_outlier_secs,
            min_changes: self.change_threshold.unwrap_or(defaults.min_changes),
        })
    }
}
