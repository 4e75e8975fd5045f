//! # Sales Collection
//!
//! Sales are recorded once and never change. Recording a sale reaches into the
//! inventory collection (injected as the actor's context) to take the sold units out
//! of stock; if that fails, no sale is stored.
//!
//! ```rust,ignore
//! let (sales_actor, sales_client) = sales_actor::new(&config);
//! tokio::spawn(sales_actor.run(inventory_client.clone()));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::config::NooraConfig;
use crate::framework::{CollectionActor, CollectionClient};
use crate::model::SaleRecord;

/// Creates the sales actor and its client.
///
/// The inventory client is supplied later, through `run(context)`.
pub fn new(config: &NooraConfig) -> (CollectionActor<SaleRecord>, CollectionClient<SaleRecord>) {
    CollectionActor::new(config.store_buffer, config.change_feed_capacity)
}
