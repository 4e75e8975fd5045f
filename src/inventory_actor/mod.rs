//! # Inventory Collection
//!
//! Stock items with two custom actions beyond CRUD:
//!
//! ```rust,ignore
//! // Read the units on hand (no change notification)
//! let on_hand = inventory.check_stock(item_id).await?;
//!
//! // Take units out of stock; fails when fewer are available
//! let remaining = inventory.decrement_stock(item_id, 2).await?;
//! ```
//!
//! `DecrementStock` is what the sales collection calls while recording a sale.
//!
//! ## Structure
//!
//! - [`entity`] - [`StoreRecord`](crate::framework::StoreRecord) implementation for
//!   [`InventoryItem`]
//! - [`error`] - [`InventoryError`]
//! - [`actions`] - [`InventoryAction`] and [`InventoryActionResult`]
//! - [`new()`] - Factory for the actor and its client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::config::NooraConfig;
use crate::framework::{CollectionActor, CollectionClient};
use crate::model::InventoryItem;

/// Creates the inventory actor and its client.
pub fn new(config: &NooraConfig) -> (CollectionActor<InventoryItem>, CollectionClient<InventoryItem>) {
    CollectionActor::new(config.store_buffer, config.change_feed_capacity)
}
