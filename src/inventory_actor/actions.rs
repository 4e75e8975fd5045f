//! Custom actions for the inventory collection.

/// Stock operations beyond CRUD.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryAction {
    /// Reads the units on hand without changing them.
    CheckStock,
    /// Removes units from stock.
    ///
    /// # Errors
    /// Fails if the amount is zero or exceeds the units on hand.
    DecrementStock(u32),
}

/// Results of [`InventoryAction`]s; variants match 1:1.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryActionResult {
    CheckStock(u32),
    DecrementStock { remaining: u32 },
}
