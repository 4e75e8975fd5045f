//! Error types for the inventory collection.

use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// The requested item was not found.
    #[error("Item not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the units on hand.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The quantity is outside the accepted range.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// A field failed validation.
    #[error("Invalid item: {0}")]
    Validation(String),

    /// The store could not be reached or answered unexpectedly.
    #[error("Store communication error: {0}")]
    StoreCommunication(String),
}

impl From<String> for InventoryError {
    fn from(msg: String) -> Self {
        InventoryError::StoreCommunication(msg)
    }
}
