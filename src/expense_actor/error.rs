//! Error types for the expense collection.

use thiserror::Error;

/// Errors that can occur during expense operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExpenseError {
    #[error("Expense not found: {0}")]
    NotFound(String),

    #[error("Invalid expense: {0}")]
    Validation(String),

    #[error("Store communication error: {0}")]
    StoreCommunication(String),
}

impl From<String> for ExpenseError {
    fn from(msg: String) -> Self {
        ExpenseError::StoreCommunication(msg)
    }
}
