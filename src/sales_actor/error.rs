//! Error types for the sales collection.

use thiserror::Error;

/// Errors that can occur while recording or reading sales.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SaleError {
    #[error("Sale not found: {0}")]
    NotFound(String),

    /// The referenced inventory item does not exist.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Invalid sale: {0}")]
    Validation(String),

    /// Sales cannot be updated or deleted once recorded.
    #[error("Sale {0} is immutable")]
    Immutable(String),

    #[error("Store communication error: {0}")]
    StoreCommunication(String),
}

impl From<String> for SaleError {
    fn from(msg: String) -> Self {
        SaleError::StoreCommunication(msg)
    }
}
