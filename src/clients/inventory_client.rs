//! # Inventory Client
//!
//! High-level API for the inventory collection.

use crate::clients::record_client::RecordClient;
use crate::framework::{CollectionClient, StoreError};
use crate::inventory_actor::{InventoryAction, InventoryActionResult, InventoryError};
use crate::model::{InventoryItem, InventoryItemCreate, InventoryItemUpdate, ItemId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the inventory collection.
#[derive(Clone)]
pub struct InventoryClient {
    inner: CollectionClient<InventoryItem>,
}

impl InventoryClient {
    pub fn new(inner: CollectionClient<InventoryItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn add_item(&self, params: InventoryItemCreate) -> Result<ItemId, InventoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: ItemId,
        update: InventoryItemUpdate,
    ) -> Result<InventoryItem, InventoryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Units currently on hand.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ItemId) -> Result<u32, InventoryError> {
        match self
            .inner
            .perform_action(id, InventoryAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            InventoryActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Removes `quantity` units and returns what is left.
    #[instrument(skip(self))]
    pub async fn decrement_stock(&self, id: ItemId, quantity: u32) -> Result<u32, InventoryError> {
        debug!(quantity, "Decrementing stock");
        match self
            .inner
            .perform_action(id, InventoryAction::DecrementStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            InventoryActionResult::DecrementStock { remaining } => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: InventoryActionResult) -> InventoryError {
    InventoryError::StoreCommunication(format!("unexpected action result: {result:?}"))
}

#[async_trait]
impl RecordClient<InventoryItem> for InventoryClient {
    type Error = InventoryError;

    fn inner(&self) -> &CollectionClient<InventoryItem> {
        &self.inner
    }

    fn map_error(e: StoreError) -> InventoryError {
        match e.into_record_error::<InventoryError>() {
            Ok(e) => e,
            Err(StoreError::NotFound(id)) => InventoryError::NotFound(id),
            Err(other) => InventoryError::StoreCommunication(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_check_stock_returns_level() {
        let (client, mut receiver) = create_mock_client::<InventoryItem>(10);
        let inventory = InventoryClient::new(client);

        let task = tokio::spawn(async move { inventory.check_stock(ItemId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ItemId(1));
        assert_eq!(action, InventoryAction::CheckStock);
        responder.send(Ok(InventoryActionResult::CheckStock(42))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_decrement_stock_surfaces_insufficient_stock() {
        let (client, mut receiver) = create_mock_client::<InventoryItem>(10);
        let inventory = InventoryClient::new(client);

        let task = tokio::spawn(async move { inventory.decrement_stock(ItemId(3), 100).await });

        let (_, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(action, InventoryAction::DecrementStock(100));
        responder
            .send(Err(StoreError::RecordError(Box::new(
                InventoryError::InsufficientStock {
                    requested: 100,
                    available: 4,
                },
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(InventoryError::InsufficientStock {
                requested: 100,
                available: 4
            })
        );
    }

    #[tokio::test]
    async fn test_store_errors_are_mapped() {
        let mut mock = MockClient::<InventoryItem>::new();
        mock.expect_action(ItemId(9))
            .return_err(StoreError::NotFound("item_9".into()));
        mock.expect_list().return_err(StoreError::StoreClosed);
        let inventory = InventoryClient::new(mock.client());

        assert_eq!(
            inventory.check_stock(ItemId(9)).await,
            Err(InventoryError::NotFound("item_9".into()))
        );
        assert!(matches!(
            inventory.list().await,
            Err(InventoryError::StoreCommunication(_))
        ));
        mock.verify();
    }
}
