//! Where the engine gets its data from.
//!
//! [`DashboardSource`] is the whole contract between the engine and the store: three full
//! reads and a change subscription per collection. [`StoreSource`] implements it over the
//! typed clients; tests implement it directly to script reads.

use super::error::SourceReadError;
use crate::clients::{ExpenseClient, InventoryClient, RecordClient, SalesClient};
use crate::framework::{ChangeSubscription, Collection};
use crate::model::{ExpenseRecord, InventoryItem, ItemSnapshot, SaleWithItem};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Read access to the three collections the dashboard is derived from.
#[async_trait]
pub trait DashboardSource: Send + Sync + 'static {
    async fn list_inventory_items(&self) -> Result<Vec<InventoryItem>, SourceReadError>;

    /// Every sale, joined with its item's current name, category and purchase price.
    async fn list_sale_records(&self) -> Result<Vec<SaleWithItem>, SourceReadError>;

    async fn list_expense_records(&self) -> Result<Vec<ExpenseRecord>, SourceReadError>;

    /// Starts listening for changes to `collection`.
    fn subscribe(&self, collection: Collection) -> ChangeSubscription;
}

/// [`DashboardSource`] backed by the in-memory store.
#[derive(Clone)]
pub struct StoreSource {
    inventory: InventoryClient,
    sales: SalesClient,
    expenses: ExpenseClient,
}

impl StoreSource {
    pub fn new(inventory: InventoryClient, sales: SalesClient, expenses: ExpenseClient) -> Self {
        Self {
            inventory,
            sales,
            expenses,
        }
    }
}

#[async_trait]
impl DashboardSource for StoreSource {
    #[instrument(skip(self))]
    async fn list_inventory_items(&self) -> Result<Vec<InventoryItem>, SourceReadError> {
        self.inventory
            .list()
            .await
            .map_err(|e| SourceReadError::new(Collection::InventoryItems, e.to_string()))
    }

    #[instrument(skip(self))]
    async fn list_sale_records(&self) -> Result<Vec<SaleWithItem>, SourceReadError> {
        let (sales, items) = tokio::join!(self.sales.list(), self.inventory.list());
        let sales = sales.map_err(|e| SourceReadError::new(Collection::SaleRecords, e.to_string()))?;
        let items = items.map_err(|e| {
            SourceReadError::new(Collection::SaleRecords, format!("item join failed: {e}"))
        })?;

        let by_id: BTreeMap<_, _> = items
            .iter()
            .map(|item| (item.id, ItemSnapshot::from(item)))
            .collect();
        let joined: Vec<SaleWithItem> = sales
            .into_iter()
            .map(|sale| SaleWithItem {
                item: by_id.get(&sale.item_id).cloned(),
                sale,
            })
            .collect();

        let orphans = joined.iter().filter(|s| s.item.is_none()).count();
        debug!(count = joined.len(), orphans, "Sales joined with items");
        Ok(joined)
    }

    #[instrument(skip(self))]
    async fn list_expense_records(&self) -> Result<Vec<ExpenseRecord>, SourceReadError> {
        self.expenses
            .list()
            .await
            .map_err(|e| SourceReadError::new(Collection::ExpenseRecords, e.to_string()))
    }

    fn subscribe(&self, collection: Collection) -> ChangeSubscription {
        match collection {
            Collection::InventoryItems => self.inventory.subscribe(),
            Collection::SaleRecords => self.sales.subscribe(),
            Collection::ExpenseRecords => self.expenses.subscribe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::framework::{ChangeKind, StoreError};
    use crate::model::{Category, ItemId, SaleId, SaleRecord};
    use chrono::Utc;

    fn ring(id: u32) -> InventoryItem {
        InventoryItem {
            id: ItemId(id),
            name: "Silver ring".into(),
            category: Category::Rings,
            purchase_price: 10.0,
            selling_price: 25.0,
            quantity: 3,
        }
    }

    fn sale_of(id: u32, item: u32) -> SaleRecord {
        SaleRecord {
            id: SaleId(id),
            item_id: ItemId(item),
            quantity_sold: 1,
            sale_price: 25.0,
            sold_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sales_are_joined_with_current_items() {
        let mut inventory = MockClient::<InventoryItem>::new();
        let mut sales = MockClient::<SaleRecord>::new();
        let expenses = MockClient::<ExpenseRecord>::new();

        sales.expect_list().return_ok(vec![sale_of(1, 1), sale_of(2, 8)]);
        inventory.expect_list().return_ok(vec![ring(1)]);

        let source = StoreSource::new(
            InventoryClient::new(inventory.client()),
            SalesClient::new(sales.client()),
            ExpenseClient::new(expenses.client()),
        );
        let joined = source.list_sale_records().await.unwrap();

        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].item.as_ref().unwrap().purchase_price, 10.0);
        assert_eq!(joined[1].item, None);
        assert_eq!(joined[1].cost_of_goods(), 0.0);
        inventory.verify();
        sales.verify();
    }

    #[tokio::test]
    async fn test_read_failures_name_the_collection() {
        let inventory = MockClient::<InventoryItem>::new();
        let sales = MockClient::<SaleRecord>::new();
        let mut expenses = MockClient::<ExpenseRecord>::new();
        expenses
            .expect_list()
            .return_err(StoreError::PermissionDenied("expense_records".into()));

        let source = StoreSource::new(
            InventoryClient::new(inventory.client()),
            SalesClient::new(sales.client()),
            ExpenseClient::new(expenses.client()),
        );
        let err = source.list_expense_records().await.unwrap_err();

        assert_eq!(err.collection, Collection::ExpenseRecords);
        assert!(err.reason.contains("Permission denied"));
    }

    #[tokio::test]
    async fn test_subscribe_routes_to_the_collection_feed() {
        let inventory = MockClient::<InventoryItem>::new();
        let sales = MockClient::<SaleRecord>::new();
        let expenses = MockClient::<ExpenseRecord>::new();
        let source = StoreSource::new(
            InventoryClient::new(inventory.client()),
            SalesClient::new(sales.client()),
            ExpenseClient::new(expenses.client()),
        );

        let mut subscription = source.subscribe(Collection::SaleRecords);
        assert_eq!(subscription.collection(), Collection::SaleRecords);
        sales.notify(ChangeKind::Insert);

        let event = subscription.changed().await.unwrap();
        assert_eq!(event.collection, Collection::SaleRecords);
        assert_eq!(event.kind, ChangeKind::Insert);
    }
}
