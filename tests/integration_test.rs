use noora::clients::{ExpenseClient, InventoryClient, RecordClient, SalesClient};
use noora::config::NooraConfig;
use noora::dashboard::{DashboardEngine, DashboardHandle, FinancialSnapshot, StoreSource};
use noora::framework::mock::MockClient;
use noora::framework::StoreError;
use noora::inventory_actor::InventoryError;
use noora::lifecycle::NooraSystem;
use noora::model::{
    Category, ExpenseCategory, ExpenseCreate, ExpenseRecord, InventoryItemCreate,
    InventoryItemUpdate, SaleRecordCreate,
};
use noora::sales_actor::SaleError;
use std::sync::Arc;
use std::time::Duration;

/// Waits for a published, settled snapshot matching `ready`.
async fn settled(
    dashboard: &DashboardHandle,
    ready: impl Fn(&FinancialSnapshot) -> bool,
) -> Arc<FinancialSnapshot> {
    let mut snapshots = dashboard.watch();
    tokio::time::timeout(Duration::from_secs(5), async move {
        let snapshot = snapshots
            .wait_for(|s| !s.loading && ready(&**s))
            .await
            .expect("engine stopped");
        Arc::clone(&*snapshot)
    })
    .await
    .expect("timed out waiting for snapshot")
}

fn bracelet() -> InventoryItemCreate {
    InventoryItemCreate {
        name: "Gold bangle".to_string(),
        category: Category::Bracelets,
        purchase_price: 10.0,
        selling_price: 25.0,
        quantity: 4,
    }
}

/// Full end-to-end test with all real actors: every mutation reaches the dashboard
/// through the change feeds, without explicit refresh requests.
#[tokio::test]
async fn test_dashboard_follows_the_store() {
    let system = NooraSystem::new(NooraConfig::default());

    // Empty store
    let empty = system
        .dashboard
        .wait_for_revision(1)
        .await
        .expect("engine stopped");
    assert_eq!(empty.metrics.total_revenue, 0.0);
    assert_eq!(empty.metrics.stock_by_category.len(), 5);
    assert!(empty.metrics.stock_by_category.values().all(|&q| q == 0));

    // One item, no sales
    let item_id = system
        .inventory
        .add_item(bracelet())
        .await
        .expect("Failed to add item");
    let stocked = settled(&system.dashboard, |s| s.metrics.total_purchase_cost == 40.0).await;
    assert_eq!(stocked.metrics.potential_revenue_from_stock, 100.0);
    assert_eq!(stocked.metrics.total_invested, 40.0);
    assert_eq!(stocked.metrics.net_profit, 0.0);
    assert_eq!(stocked.metrics.forecast_total_revenue, 100.0);
    let invested_before = stocked.metrics.total_invested_cumulative;

    // A sale and an expense
    system
        .sales
        .record_sale(SaleRecordCreate {
            item_id,
            quantity_sold: 2,
            sale_price: 25.0,
            sold_at: None,
        })
        .await
        .expect("Failed to record sale");
    system
        .expenses
        .add_expense(ExpenseCreate {
            description: "Stall fee".to_string(),
            amount: 5.0,
            expense_date: None,
            category: ExpenseCategory::Fees,
        })
        .await
        .expect("Failed to add expense");

    let trading = settled(&system.dashboard, |s| {
        s.metrics.total_revenue == 50.0 && s.metrics.total_expenses == 5.0
    })
    .await;
    assert_eq!(trading.metrics.cost_of_sold_stock, 20.0);
    assert_eq!(trading.metrics.net_profit, 25.0);
    assert_eq!(trading.metrics.manager_share, 6.25);
    assert_eq!(trading.metrics.daily_revenue, 50.0);
    assert_eq!(trading.metrics.monthly_revenue, 50.0);
    assert_eq!(trading.metrics.stock_by_category[&Category::Bracelets], 2);
    assert_eq!(trading.metrics.total_purchase_cost, 20.0);
    // Selling stock moves cost from on-hand to sold; only the expense is new.
    assert_eq!(
        trading.metrics.total_invested_cumulative,
        invested_before + 5.0
    );
    assert!(trading.revision > stocked.revision);

    // Stock was decremented by the sale
    let on_hand = system
        .inventory
        .check_stock(item_id)
        .await
        .expect("Failed to check stock");
    assert_eq!(on_hand, 2);

    // Overselling is rejected and leaves stock alone
    let oversell = system
        .sales
        .record_sale(SaleRecordCreate {
            item_id,
            quantity_sold: 5,
            sale_price: 25.0,
            sold_at: None,
        })
        .await;
    assert_eq!(
        oversell,
        Err(SaleError::InsufficientStock {
            requested: 5,
            available: 2
        })
    );
    assert_eq!(system.inventory.check_stock(item_id).await.unwrap(), 2);

    // Sales are immutable
    let sales = system.sales.list().await.unwrap();
    assert_eq!(sales.len(), 1);
    assert!(matches!(
        system.sales.delete(sales[0].id).await,
        Err(SaleError::Immutable(_))
    ));

    system.shutdown().await.expect("Shutdown failed");
}

/// Cost of sold stock is taken at the item's current purchase price, and a sale whose
/// item is gone still counts as revenue.
#[tokio::test]
async fn test_cost_of_sold_stock_tracks_current_items() {
    let system = NooraSystem::new(NooraConfig::default());

    let item_id = system.inventory.add_item(bracelet()).await.unwrap();
    system
        .sales
        .record_sale(SaleRecordCreate {
            item_id,
            quantity_sold: 4,
            sale_price: 30.0,
            sold_at: None,
        })
        .await
        .unwrap();
    let sold = settled(&system.dashboard, |s| s.metrics.total_revenue == 120.0).await;
    assert_eq!(sold.metrics.cost_of_sold_stock, 40.0);

    system
        .inventory
        .update_item(
            item_id,
            InventoryItemUpdate {
                purchase_price: Some(12.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let repriced = settled(&system.dashboard, |s| s.metrics.cost_of_sold_stock == 48.0).await;
    assert_eq!(repriced.metrics.net_profit, 72.0);

    system.inventory.delete(item_id).await.unwrap();
    let orphaned = settled(&system.dashboard, |s| s.metrics.cost_of_sold_stock == 0.0).await;
    assert_eq!(orphaned.metrics.total_revenue, 120.0);
    assert_eq!(orphaned.metrics.net_profit, 120.0);
    assert_eq!(orphaned.metrics.manager_share, 30.0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_records_are_rejected() {
    let system = NooraSystem::new(NooraConfig::default());

    let nameless = system
        .inventory
        .add_item(InventoryItemCreate {
            name: "  ".to_string(),
            ..bracelet()
        })
        .await;
    assert!(matches!(nameless, Err(InventoryError::Validation(_))));

    let free = system
        .expenses
        .add_expense(ExpenseCreate {
            description: "Nothing".to_string(),
            amount: 0.0,
            expense_date: None,
            category: ExpenseCategory::Other,
        })
        .await;
    assert!(free.is_err());

    assert!(system.inventory.list().await.unwrap().is_empty());
    assert!(system.expenses.list().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

/// Real inventory and sales actors, expense reads denied by a mock.
#[tokio::test]
async fn test_denied_expense_read_still_produces_a_snapshot() {
    let config = NooraConfig::default();
    let (inventory_actor, inventory_client) = noora::inventory_actor::new(&config);
    let (sales_actor, sales_client) = noora::sales_actor::new(&config);
    let inventory = InventoryClient::new(inventory_client);
    let sales = SalesClient::new(sales_client);
    let inventory_handle = tokio::spawn(inventory_actor.run(()));
    let sales_handle = tokio::spawn(sales_actor.run(inventory.clone()));

    let mut expenses_mock = MockClient::<ExpenseRecord>::new();
    expenses_mock
        .expect_list()
        .return_err(StoreError::PermissionDenied("expense_records".into()));

    let item_id = inventory.add_item(bracelet()).await.unwrap();
    sales
        .record_sale(SaleRecordCreate {
            item_id,
            quantity_sold: 2,
            sale_price: 25.0,
            sold_at: None,
        })
        .await
        .unwrap();

    let source = StoreSource::new(
        inventory.clone(),
        sales.clone(),
        ExpenseClient::new(expenses_mock.client()),
    );
    let (dashboard, engine) = DashboardEngine::spawn(source, &config);

    let snapshot = dashboard.wait_for_revision(1).await.unwrap();
    assert!(!snapshot.expenses_available);
    assert_eq!(snapshot.metrics.total_expenses, 0.0);
    assert_eq!(snapshot.metrics.total_revenue, 50.0);
    assert_eq!(snapshot.metrics.cost_of_sold_stock, 20.0);
    assert_eq!(snapshot.metrics.total_purchase_cost, 20.0);
    assert_eq!(snapshot.metrics.net_profit, 30.0);
    expenses_mock.verify();

    dashboard.shutdown().await.unwrap();
    engine.await.unwrap();

    drop(sales);
    sales_handle.await.unwrap();
    drop(inventory);
    inventory_handle.await.unwrap();
}
