//! Application state for the HTTP server.

use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::services::dataset::AuditDataset;

/// A dataset together with the id it was published under.
#[derive(Debug, Clone)]
pub struct LoadedAudit {
    pub id: Uuid,
    pub dataset: Arc<AuditDataset>,
}

/// Shared application state passed to all handlers.
///
/// Holds at most one dataset. An upload swaps in a complete new dataset;
/// handlers clone the `Arc` and never observe a half-replaced one.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    current: Arc<RwLock<Option<LoadedAudit>>>,
}

impl AppState {
    /// Create a new application state with no dataset loaded.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Publish a freshly built dataset, dropping the previous one.
    pub fn replace_dataset(&self, dataset: AuditDataset) -> LoadedAudit {
        let loaded = LoadedAudit {
            id: Uuid::new_v4(),
            dataset: Arc::new(dataset),
        };
        *self.current.write() = Some(loaded.clone());
        loaded
    }

    pub fn current_dataset(&self) -> Option<LoadedAudit> {
        self.current.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditRow, ZeroTimestamp};

    #[test]
    fn test_replace_dataset_swaps_wholesale() {
        let state = AppState::new(AppConfig::default());
        assert!(state.current_dataset().is_none());

        let first = state.replace_dataset(AuditDataset::from_rows(
            &[AuditRow::new("uuid:S1", "/data/Q1")],
            ZeroTimestamp::Absent,
        ));
        let snapshot = state.current_dataset().unwrap();
        assert_eq!(snapshot.id, first.id);

        let second = state.replace_dataset(AuditDataset::from_rows(
            &[AuditRow::new("uuid:S9", "/data/Q9")],
            ZeroTimestamp::Absent,
        ));
        let current = state.current_dataset().unwrap();
        assert_eq!(current.id, second.id);
        assert_ne!(first.id, second.id);
        assert!(current.dataset.grouped().get("S1").is_none());

        // Earlier snapshots keep the dataset they were taken from
        assert!(snapshot.dataset.grouped().get("S1").is_some());
    }
}
