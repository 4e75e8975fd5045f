use super::metrics::FinancialMetrics;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One immutable, published view of the dashboard.
///
/// Snapshots are handed out as `Arc<FinancialSnapshot>`; a refresh never edits one in
/// place, it publishes a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSnapshot {
    pub metrics: FinancialMetrics,
    /// A refresh is in progress.
    pub loading: bool,
    pub generated_at: DateTime<Utc>,
    /// Number of successful refreshes so far. `0` is the placeholder shown before the
    /// first one completes.
    pub revision: u64,
    /// `false` when the expense read failed and expenses were counted as zero.
    pub expenses_available: bool,
}

impl FinancialSnapshot {
    /// All-zero snapshot shown until the first refresh lands.
    pub fn placeholder() -> Self {
        Self {
            metrics: FinancialMetrics::default(),
            loading: true,
            generated_at: Utc::now(),
            revision: 0,
            expenses_available: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.revision == 0
    }

    pub(crate) fn with_loading(&self, loading: bool) -> Self {
        Self {
            loading,
            ..self.clone()
        }
    }
}
