//! # Typed Clients
//!
//! Each collection gets a thin wrapper over its [`CollectionClient`](crate::framework::CollectionClient)
//! that speaks the collection's own error type and hides action/result pairing:
//!
//! ```rust,ignore
//! // Generic client: action in, enum out, StoreError on failure
//! let r = inner.perform_action(id, InventoryAction::DecrementStock(2)).await?;
//!
//! // Typed client: plain values in and out, InventoryError on failure
//! let remaining = inventory.decrement_stock(id, 2).await?;
//! ```
//!
//! Shared reads (`get`, `list`, `delete`, `subscribe`) come from [`RecordClient`].

pub mod expense_client;
pub mod inventory_client;
pub mod record_client;
pub mod sales_client;

pub use expense_client::ExpenseClient;
pub use inventory_client::InventoryClient;
pub use record_client::RecordClient;
pub use sales_client::SalesClient;
