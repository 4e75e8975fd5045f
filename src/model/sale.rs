use super::inventory::{Category, InventoryItem, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Type-safe identifier for sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SaleId(pub u32);

impl From<u32> for SaleId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sale_{}", self.0)
    }
}

/// One recorded sale. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,
    pub item_id: ItemId,
    pub quantity_sold: u32,
    /// Unit price actually charged; may differ from the item's listed price.
    pub sale_price: f64,
    pub sold_at: DateTime<Utc>,
}

impl SaleRecord {
    pub fn revenue(&self) -> f64 {
        self.sale_price * f64::from(self.quantity_sold)
    }
}

/// Payload for recording a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecordCreate {
    pub item_id: ItemId,
    pub quantity_sold: u32,
    pub sale_price: f64,
    /// Defaults to the moment the store accepts the sale.
    pub sold_at: Option<DateTime<Utc>>,
}

/// The referenced item as it looks *now*, attached to a sale when sales are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub name: String,
    pub category: Category,
    pub purchase_price: f64,
}

impl From<&InventoryItem> for ItemSnapshot {
    fn from(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category,
            purchase_price: item.purchase_price,
        }
    }
}

/// A sale joined with its item's current state.
///
/// `item` is `None` when the item has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleWithItem {
    pub sale: SaleRecord,
    pub item: Option<ItemSnapshot>,
}

impl SaleWithItem {
    pub fn revenue(&self) -> f64 {
        self.sale.revenue()
    }

    /// Cost of the sold units at the item's *current* purchase price.
    /// Zero when the item no longer exists.
    pub fn cost_of_goods(&self) -> f64 {
        self.item
            .as_ref()
            .map_or(0.0, |item| item.purchase_price * f64::from(self.sale.quantity_sold))
    }
}
