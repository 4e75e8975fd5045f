//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the collection actors and the dashboard engine.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them when they start running:
//!
//! ```rust,ignore
//! let (inventory_actor, inventory) = inventory_actor::new(&config);
//! let (sales_actor, sales) = sales_actor::new(&config);
//!
//! tokio::spawn(inventory_actor.run(()));
//! // Recording a sale decrements stock, so sales get an inventory client
//! tokio::spawn(sales_actor.run(InventoryClient::new(inventory.clone())));
//! ```
//!
//! The dashboard engine is wired the same way: it is handed a [`StoreSource`] built from
//! clones of the three clients.
//!
//! ## Graceful Shutdown
//!
//! 1. **Stop the engine** - its change subscriptions are cancelled
//! 2. **Drop the clients** - each actor sees its mailbox close
//! 3. **Await the actors** - dependents first (sales hold an inventory client)
//!
//! The dependency graph is acyclic (engine → collections, sales → inventory), so
//! dropping clients is enough to stop every actor.
//!
//! [`StoreSource`]: crate::dashboard::StoreSource

pub mod system;
pub mod tracing;

pub use system::*;
pub use tracing::*;
