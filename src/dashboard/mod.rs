//! # Financial Aggregation Engine
//!
//! Turns the inventory, sales and expense collections into one [`FinancialSnapshot`] and
//! keeps it current as the collections change.
//!
//! ```rust,ignore
//! let source = StoreSource::new(inventory, sales, expenses);
//! let (dashboard, engine) = DashboardEngine::spawn(source, &config);
//!
//! let first = dashboard.wait_for_revision(1).await?;
//! println!("Net profit: {}", format_cfa(first.metrics.net_profit));
//! ```
//!
//! ## Structure
//!
//! - [`metrics`] - The pure metric derivation
//! - [`snapshot`] - The published [`FinancialSnapshot`]
//! - [`source`] - [`DashboardSource`] and its store-backed implementation
//! - [`engine`] - [`DashboardEngine`] and [`DashboardHandle`]
//! - [`currency`] - [`format_cfa`]

pub mod currency;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod snapshot;
pub mod source;

pub use currency::format_cfa;
pub use engine::{DashboardCommand, DashboardEngine, DashboardHandle};
pub use error::{DashboardError, SourceReadError};
pub use metrics::{compute, FinancialMetrics, MANAGER_SHARE_RATE};
pub use snapshot::FinancialSnapshot;
pub use source::{DashboardSource, StoreSource};
