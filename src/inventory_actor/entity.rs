//! [`StoreRecord`] implementation for [`InventoryItem`].

use super::actions::{InventoryAction, InventoryActionResult};
use super::error::InventoryError;
use crate::framework::{Collection, StoreRecord};
use crate::model::{
    check_amount, check_text, InventoryItem, InventoryItemCreate, InventoryItemUpdate, ItemId,
    MAX_NAME_LEN, MAX_QUANTITY,
};
use async_trait::async_trait;

fn validate(item: &InventoryItem) -> Result<(), InventoryError> {
    check_text("name", &item.name, MAX_NAME_LEN).map_err(InventoryError::Validation)?;
    check_amount("purchase price", item.purchase_price, 0.0).map_err(InventoryError::Validation)?;
    check_amount("selling price", item.selling_price, 0.0).map_err(InventoryError::Validation)?;
    if item.quantity > MAX_QUANTITY {
        return Err(InventoryError::InvalidQuantity(item.quantity));
    }
    Ok(())
}

#[async_trait]
impl StoreRecord for InventoryItem {
    const COLLECTION: Collection = Collection::InventoryItems;
    type Id = ItemId;
    type Create = InventoryItemCreate;
    type Update = InventoryItemUpdate;
    type Action = InventoryAction;
    type ActionResult = InventoryActionResult;
    type Context = ();
    type Error = InventoryError;

    fn from_create_params(id: ItemId, params: InventoryItemCreate) -> Result<Self, InventoryError> {
        let item = Self {
            id,
            name: params.name.trim().to_string(),
            category: params.category,
            purchase_price: params.purchase_price,
            selling_price: params.selling_price,
            quantity: params.quantity,
        };
        validate(&item)?;
        Ok(item)
    }

    async fn on_update(
        &mut self,
        update: InventoryItemUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), InventoryError> {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.purchase_price {
            self.purchase_price = price;
        }
        if let Some(price) = update.selling_price {
            self.selling_price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        validate(self)
    }

    async fn handle_action(
        &mut self,
        action: InventoryAction,
        _ctx: &Self::Context,
    ) -> Result<InventoryActionResult, InventoryError> {
        match action {
            InventoryAction::CheckStock => Ok(InventoryActionResult::CheckStock(self.quantity)),
            InventoryAction::DecrementStock(0) => Err(InventoryError::InvalidQuantity(0)),
            InventoryAction::DecrementStock(requested) => {
                if requested > self.quantity {
                    return Err(InventoryError::InsufficientStock {
                        requested,
                        available: self.quantity,
                    });
                }
                self.quantity -= requested;
                Ok(InventoryActionResult::DecrementStock {
                    remaining: self.quantity,
                })
            }
        }
    }

    fn is_mutation(action: &InventoryAction) -> bool {
        matches!(action, InventoryAction::DecrementStock(_))
    }
}
