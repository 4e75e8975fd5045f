//! # Change Feed
//!
//! Every collection actor owns a [`ChangeFeed`]. After each successful mutation the actor
//! publishes a [`ChangeEvent`] on it, and any number of consumers can hold a
//! [`ChangeSubscription`] to be told that "something changed".
//!
//! The event is deliberately opaque: it names the collection and the kind of mutation, never
//! the record itself. Consumers that need data re-read the collection.
//!
//! ## Lag
//!
//! The feed is a bounded `tokio::sync::broadcast` channel. A slow subscriber that falls behind
//! does not get an error; it receives a single [`ChangeKind::Resync`] event, which is still a
//! valid "something changed" signal.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

/// The three collections the store exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    InventoryItems,
    SaleRecords,
    ExpenseRecords,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::InventoryItems,
        Collection::SaleRecords,
        Collection::ExpenseRecords,
    ];

    /// Name of the collection as the backing store knows it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::InventoryItems => "inventory_items",
            Collection::SaleRecords => "sale_records",
            Collection::ExpenseRecords => "expense_records",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
    /// The subscriber missed notifications; some change of unknown kind happened.
    Resync,
}

/// An opaque "something changed" notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
}

/// Publishing side of a collection's change notifications.
#[derive(Clone)]
pub struct ChangeFeed {
    collection: Collection,
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(collection: Collection, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { collection, sender }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Publishes a change. Returns the number of subscribers that will see it.
    pub fn publish(&self, kind: ChangeKind) -> usize {
        let event = ChangeEvent {
            collection: self.collection,
            kind,
        };
        // No subscribers is not an error: nobody is watching yet.
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription {
            collection: self.collection,
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Receiving side of a collection's change notifications.
///
/// Dropping the subscription (or calling [`cancel`](ChangeSubscription::cancel)) unsubscribes.
pub struct ChangeSubscription {
    collection: Collection,
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl ChangeSubscription {
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Waits for the next change.
    ///
    /// Returns `None` once the feed is closed (every publisher has gone away).
    pub async fn changed(&mut self) -> Option<ChangeEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(RecvError::Lagged(missed)) => {
                debug!(collection = %self.collection, missed, "Subscriber lagged");
                Some(ChangeEvent {
                    collection: self.collection,
                    kind: ChangeKind::Resync,
                })
            }
            Err(RecvError::Closed) => None,
        }
    }

    /// Unsubscribes explicitly.
    pub fn cancel(self) {
        debug!(collection = %self.collection, "Subscription cancelled");
    }
}
