//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG` (default `info`). Module paths are hidden; records carry a `collection`
//! field instead.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle, mutations, published snapshots
//! RUST_LOG=debug cargo run    # plus payloads, reads and change notifications
//! ```
//!
//! ## Workflow Trace Example
//!
//! Recording one sale with the dashboard running, at `info`:
//!
//! ```text
//! INFO Action ok collection="inventory_items" id=item_1
//! INFO Created collection="sale_records" id=sale_1 size=1
//! INFO Snapshot published revision=3 items=1 sales=1 expenses=0 net_profit=30.0
//! ```
//!
//! At `debug` the same flow also shows the decrement, the notifications and the reads:
//!
//! ```text
//! DEBUG Create collection="sale_records" params=SaleRecordCreate { item_id: ItemId(1), quantity_sold: 2, .. }
//! DEBUG Action collection="inventory_items" id=item_1 action=DecrementStock(2)
//! DEBUG Change received collection=inventory_items kind=Update
//! DEBUG Refresh started revision=2
//! DEBUG Change received collection=sale_records kind=Insert
//! DEBUG List collection="sale_records" count=1
//! ```
//!
//! The second notification arrives while the first refresh is in flight, so it schedules
//! a single follow-up refresh rather than a second concurrent one.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Calling it again is a no-op.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
