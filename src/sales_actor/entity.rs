//! [`StoreRecord`] implementation for [`SaleRecord`].

use super::error::SaleError;
use crate::clients::InventoryClient;
use crate::framework::{Collection, StoreRecord};
use crate::inventory_actor::InventoryError;
use crate::model::{check_amount, SaleId, SaleRecord, SaleRecordCreate, MAX_QUANTITY};
use async_trait::async_trait;
use chrono::Utc;
use std::convert::Infallible;
use tracing::debug;

#[async_trait]
impl StoreRecord for SaleRecord {
    const COLLECTION: Collection = Collection::SaleRecords;
    type Id = SaleId;
    type Create = SaleRecordCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = InventoryClient;
    type Error = SaleError;

    fn from_create_params(id: SaleId, params: SaleRecordCreate) -> Result<Self, SaleError> {
        if params.quantity_sold == 0 || params.quantity_sold > MAX_QUANTITY {
            return Err(SaleError::InvalidQuantity(params.quantity_sold));
        }
        check_amount("sale price", params.sale_price, 0.0).map_err(SaleError::Validation)?;

        Ok(Self {
            id,
            item_id: params.item_id,
            quantity_sold: params.quantity_sold,
            sale_price: params.sale_price,
            sold_at: params.sold_at.unwrap_or_else(Utc::now),
        })
    }

    /// Takes the sold units out of stock before the sale is stored.
    async fn on_create(&mut self, inventory: &InventoryClient) -> Result<(), SaleError> {
        let item_id = self.item_id;
        let remaining = inventory
            .decrement_stock(item_id, self.quantity_sold)
            .await
            .map_err(|e| match e {
                InventoryError::NotFound(_) => SaleError::UnknownItem(item_id.to_string()),
                InventoryError::InsufficientStock {
                    requested,
                    available,
                } => SaleError::InsufficientStock {
                    requested,
                    available,
                },
                InventoryError::InvalidQuantity(q) => SaleError::InvalidQuantity(q),
                other => SaleError::StoreCommunication(other.to_string()),
            })?;
        debug!(item = %item_id, remaining, "Stock decremented for sale");
        Ok(())
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &InventoryClient) -> Result<(), SaleError> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &InventoryClient) -> Result<(), SaleError> {
        Err(SaleError::Immutable(self.id.to_string()))
    }

    async fn handle_action(
        &mut self,
        action: Infallible,
        _ctx: &InventoryClient,
    ) -> Result<(), SaleError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    fn params(quantity_sold: u32, sale_price: f64) -> SaleRecordCreate {
        SaleRecordCreate {
            item_id: ItemId(1),
            quantity_sold,
            sale_price,
            sold_at: None,
        }
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        assert_eq!(
            SaleRecord::from_create_params(SaleId(1), params(0, 10.0)),
            Err(SaleError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_price_out_of_range_is_rejected() {
        assert!(matches!(
            SaleRecord::from_create_params(SaleId(1), params(1, -2.0)),
            Err(SaleError::Validation(_))
        ));
        assert!(matches!(
            SaleRecord::from_create_params(SaleId(1), params(1, 12_000.0)),
            Err(SaleError::Validation(_))
        ));
    }

    #[test]
    fn test_timestamp_defaults_to_now() {
        let before = Utc::now();
        let sale = SaleRecord::from_create_params(SaleId(1), params(2, 10.0)).unwrap();
        assert!(sale.sold_at >= before);
        assert_eq!(sale.revenue(), 20.0);
    }
}
