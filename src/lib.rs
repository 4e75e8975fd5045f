//! # Noora
//!
//! > **Inventory, sales and expense tracking with a live financial dashboard.**
//!
//! The heart of the crate is the **Financial Aggregation Engine** ([`dashboard`]): it
//! reads every inventory item, sale and expense, derives the dashboard figures (stock per
//! category, revenue today and this month, cost of sold stock, net profit, the manager's
//! share, ...) and publishes them as one immutable snapshot. Whenever any of the three
//! collections changes, it recomputes.
//!
//! ## Design
//!
//! ### Actors all the way down
//! Each collection lives in a [`CollectionActor<T>`](framework::CollectionActor): one Tokio
//! task, one mailbox, no locks. The engine is an actor too. It owns the published snapshot
//! and serialises refreshes, so overlapping change notifications collapse into a single
//! follow-up refresh and snapshots never regress.
//!
//! ### Explicit wiring
//! There is no global store client. Clients are created with their actors and handed to
//! whoever needs them: the sales collection gets an inventory client as its run context,
//! the engine gets a [`StoreSource`](dashboard::StoreSource) built from all three.
//!
//! ### Change feeds instead of callbacks
//! Every successful mutation publishes an opaque "something changed" event on its
//! collection's broadcast feed. Subscribers hold a
//! [`ChangeSubscription`](framework::ChangeSubscription) and cancel it explicitly (or drop
//! it) when done.
//!
//! ### Typed errors per layer
//! [`StoreError`](framework::StoreError) at the store, one error enum per collection at the
//! client layer, [`DashboardError`](dashboard::DashboardError) at the engine. None of them
//! ever reaches [`DashboardHandle::snapshot`](dashboard::DashboardHandle::snapshot).
//!
//! ## Module Tour
//!
//! - [`framework`] - Generic collection actor, client, change feed and mocks
//! - [`model`] - Records and their create / update payloads
//! - [`inventory_actor`], [`sales_actor`], [`expense_actor`] - Record hooks and errors
//! - [`clients`] - Typed clients over the generic one
//! - [`dashboard`] - Metrics, snapshot, source and engine
//! - [`lifecycle`] - [`NooraSystem`](lifecycle::NooraSystem) and tracing setup
//! - [`config`] - Buffer sizes and refresh timeout
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod dashboard;
pub mod expense_actor;
pub mod framework;
pub mod inventory_actor;
pub mod lifecycle;
pub mod model;
pub mod sales_actor;
