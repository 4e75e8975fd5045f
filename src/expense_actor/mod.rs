//! # Expense Collection
//!
//! Operating expenses with full CRUD. Amounts must be at least 0.01; the expense
//! date defaults to today's local date.

pub mod entity;
pub mod error;

pub use error::*;

use crate::config::NooraConfig;
use crate::framework::{CollectionActor, CollectionClient};
use crate::model::ExpenseRecord;

/// Creates the expense actor and its client.
pub fn new(config: &NooraConfig) -> (CollectionActor<ExpenseRecord>, CollectionClient<ExpenseRecord>) {
    CollectionActor::new(config.store_buffer, config.change_feed_capacity)
}
