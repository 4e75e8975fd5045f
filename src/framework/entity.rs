//! The contract a record type fulfils to live in a [`CollectionActor`](super::CollectionActor).

use super::changes::Collection;
use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any stored record must implement to be managed by a `CollectionActor`.
///
/// # Architecture Note
/// By defining one contract that inventory items, sales and expenses all satisfy, the
/// collection actor (mailbox loop, change feed, error mapping) is written *once*.
///
/// Associated types keep the payloads apart: an `InventoryItem` collection only accepts
/// `InventoryItemCreate`, and the compiler rejects anything else.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can call other collections. The `Context` type is
/// injected into every hook when the actor starts (`run(context)`), which is how a sale
/// reaches the inventory collection to decrement stock.
#[async_trait]
pub trait StoreRecord: Clone + Debug + Send + Sync + 'static {
    /// Which collection this record type lives in. Used to tag change notifications.
    const COLLECTION: Collection;

    /// The unique identifier for this record.
    /// Must be convertible from u32 for store-side id allocation, and ordered so `List`
    /// returns records in a stable order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new record.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing record.
    type Update: Send + Sync + Debug;

    /// Record-specific operations beyond CRUD (e.g., `DecrementStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor at start. Use `()` if none.
    type Context: Send + Sync;

    /// One error enum per record type, covering every hook.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the record from the allocated id and the create payload.
    /// Called synchronously before `on_create`; this is where payload validation lives.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed. Returning an error vetoes the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Whether a successful action changed the record (and must be announced on the feed).
    fn is_mutation(_action: &Self::Action) -> bool {
        true
    }
}
