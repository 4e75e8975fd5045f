//! # Sales Client
//!
//! High-level API for the sales collection. Stock is decremented by the sales
//! collection itself while recording, so callers only submit the sale.

use crate::clients::record_client::RecordClient;
use crate::framework::{CollectionClient, StoreError};
use crate::model::{SaleId, SaleRecord, SaleRecordCreate};
use crate::sales_actor::SaleError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the sales collection.
#[derive(Clone)]
pub struct SalesClient {
    inner: CollectionClient<SaleRecord>,
}

impl SalesClient {
    pub fn new(inner: CollectionClient<SaleRecord>) -> Self {
        Self { inner }
    }

    /// Records a sale, taking the sold units out of stock.
    #[instrument(skip(self))]
    pub async fn record_sale(&self, params: SaleRecordCreate) -> Result<SaleId, SaleError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl RecordClient<SaleRecord> for SalesClient {
    type Error = SaleError;

    fn inner(&self) -> &CollectionClient<SaleRecord> {
        &self.inner
    }

    fn map_error(e: StoreError) -> SaleError {
        match e.into_record_error::<SaleError>() {
            Ok(e) => e,
            Err(StoreError::NotFound(id)) => SaleError::NotFound(id),
            Err(other) => SaleError::StoreCommunication(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_create};
    use crate::model::ItemId;

    #[tokio::test]
    async fn test_record_sale_forwards_payload() {
        let (client, mut receiver) = create_mock_client::<SaleRecord>(10);
        let sales = SalesClient::new(client);

        let task = tokio::spawn(async move {
            sales
                .record_sale(SaleRecordCreate {
                    item_id: ItemId(2),
                    quantity_sold: 3,
                    sale_price: 15.0,
                    sold_at: None,
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver).await.unwrap();
        assert_eq!(params.item_id, ItemId(2));
        assert_eq!(params.quantity_sold, 3);
        responder.send(Ok(SaleId(1))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), SaleId(1));
    }

    #[tokio::test]
    async fn test_record_sale_unknown_item() {
        let (client, mut receiver) = create_mock_client::<SaleRecord>(10);
        let sales = SalesClient::new(client);

        let task = tokio::spawn(async move {
            sales
                .record_sale(SaleRecordCreate {
                    item_id: ItemId(7),
                    quantity_sold: 1,
                    sale_price: 5.0,
                    sold_at: None,
                })
                .await
        });

        let (_, responder) = expect_create(&mut receiver).await.unwrap();
        responder
            .send(Err(StoreError::RecordError(Box::new(SaleError::UnknownItem(
                "item_7".into(),
            )))))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(SaleError::UnknownItem("item_7".into())));
    }
}
