//! Stock held for sale.
//!
//! [`InventoryItem`] implements [`StoreRecord`](crate::framework::StoreRecord); see
//! [`inventory_actor`](crate::inventory_actor) for the hooks and custom actions.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Longest accepted item name, in characters.
pub const MAX_NAME_LEN: usize = 100;
/// Largest quantity a single item may hold.
pub const MAX_QUANTITY: u32 = 9999;

/// Type-safe identifier for inventory items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// The fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Eyewear,
    Rings,
    Necklaces,
    Sets,
    Bracelets,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Eyewear,
        Category::Rings,
        Category::Necklaces,
        Category::Sets,
        Category::Bracelets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Eyewear => "eyewear",
            Category::Rings => "rings",
            Category::Necklaces => "necklaces",
            Category::Sets => "sets",
            Category::Bracelets => "bracelets",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    /// Unit cost paid to the supplier.
    pub purchase_price: f64,
    /// Listed unit price.
    pub selling_price: f64,
    /// Units on hand.
    pub quantity: u32,
}

impl InventoryItem {
    /// Value of the units on hand at purchase cost.
    pub fn stock_cost(&self) -> f64 {
        self.purchase_price * f64::from(self.quantity)
    }

    /// Value of the units on hand at the listed selling price.
    pub fn stock_value(&self) -> f64 {
        self.selling_price * f64::from(self.quantity)
    }
}

/// Payload for adding an item to stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub category: Category,
    pub purchase_price: f64,
    pub selling_price: f64,
    pub quantity: u32,
}

/// Partial update of an item. `None` fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub purchase_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub quantity: Option<u32>,
}
