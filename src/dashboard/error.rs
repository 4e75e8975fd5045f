//! Error types for the dashboard engine.

use crate::framework::Collection;
use std::time::Duration;
use thiserror::Error;

/// A full read of one collection failed.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Failed to read {collection}: {reason}")]
pub struct SourceReadError {
    pub collection: Collection,
    pub reason: String,
}

impl SourceReadError {
    pub fn new(collection: Collection, reason: impl Into<String>) -> Self {
        Self {
            collection,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced to callers of [`DashboardHandle`](super::DashboardHandle).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DashboardError {
    /// The engine is no longer accepting commands.
    #[error("Dashboard engine stopped")]
    EngineStopped,

    /// The engine went away before answering.
    #[error("Dashboard engine dropped response channel")]
    EngineDropped,

    /// A required read failed; the previous snapshot was kept.
    #[error(transparent)]
    Source(#[from] SourceReadError),

    /// The reads did not finish in time; the previous snapshot was kept.
    #[error("Refresh timed out after {0:?}")]
    TimedOut(Duration),
}
