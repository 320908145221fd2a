use serde::Serialize;

use crate::catalog::Catalog;
use crate::services::progress::ProgressStore;

/// Percentage of the catalog the completed count covers, rounded half-up.
/// A zero-module catalog is 0%, never a division error.
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * completed as f64 / total as f64).round() as u32
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub completion_rate: u32,
}

pub fn summarize(progress: &ProgressStore, catalog: &Catalog) -> ProgressSummary {
    let completed = progress.completed_count();
    let total = catalog.game_count();
    ProgressSummary {
        completed,
        total,
        completion_rate: completion_rate(completed, total),
    }
}
