use noora::clients::{InventoryClient, RecordClient, SalesClient};
use noora::config::NooraConfig;
use noora::framework::mock::MockClient;
use noora::framework::StoreError;
use noora::inventory_actor::{InventoryActionResult, InventoryError};
use noora::model::{InventoryItem, ItemId, SaleId, SaleRecordCreate};
use noora::sales_actor::SaleError;

fn sale(item: u32, quantity_sold: u32) -> SaleRecordCreate {
    SaleRecordCreate {
        item_id: ItemId(item),
        quantity_sold,
        sale_price: 25.0,
        sold_at: None,
    }
}

/// Real sales actor, mocked inventory: recording a sale decrements stock first.
#[tokio::test]
async fn test_sale_decrements_stock_then_is_stored() {
    let mut inventory_mock = MockClient::<InventoryItem>::new();
    inventory_mock
        .expect_action(ItemId(1))
        .return_ok(InventoryActionResult::DecrementStock { remaining: 2 });

    let (sales_actor, sales_client) = noora::sales_actor::new(&NooraConfig::default());
    let sales = SalesClient::new(sales_client);
    let handle = tokio::spawn(sales_actor.run(InventoryClient::new(inventory_mock.client())));

    let id = sales.record_sale(sale(1, 2)).await.expect("sale should be recorded");
    assert_eq!(id, SaleId(1));

    let stored = sales.get(id).await.unwrap().expect("sale not found");
    assert_eq!(stored.item_id, ItemId(1));
    assert_eq!(stored.quantity_sold, 2);
    assert_eq!(stored.revenue(), 50.0);

    inventory_mock.verify();

    drop(sales);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_sale_of_unknown_item_is_rejected() {
    let mut inventory_mock = MockClient::<InventoryItem>::new();
    inventory_mock
        .expect_action(ItemId(9))
        .return_err(StoreError::NotFound("item_9".into()));

    let (sales_actor, sales_client) = noora::sales_actor::new(&NooraConfig::default());
    let sales = SalesClient::new(sales_client);
    let handle = tokio::spawn(sales_actor.run(InventoryClient::new(inventory_mock.client())));

    let result = sales.record_sale(sale(9, 1)).await;
    assert_eq!(result, Err(SaleError::UnknownItem("item_9".into())));
    assert!(sales.list().await.unwrap().is_empty(), "No sale should be stored");

    inventory_mock.verify();
    drop(sales);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_sale_beyond_stock_is_rejected() {
    let mut inventory_mock = MockClient::<InventoryItem>::new();
    inventory_mock
        .expect_action(ItemId(1))
        .return_err(StoreError::RecordError(Box::new(
            InventoryError::InsufficientStock {
                requested: 5,
                available: 3,
            },
        )));

    let (sales_actor, sales_client) = noora::sales_actor::new(&NooraConfig::default());
    let sales = SalesClient::new(sales_client);
    let handle = tokio::spawn(sales_actor.run(InventoryClient::new(inventory_mock.client())));

    let result = sales.record_sale(sale(1, 5)).await;
    assert_eq!(
        result,
        Err(SaleError::InsufficientStock {
            requested: 5,
            available: 3
        })
    );

    // A rejected sale doesn't consume an id.
    inventory_mock
        .expect_action(ItemId(1))
        .return_ok(InventoryActionResult::DecrementStock { remaining: 0 });
    assert_eq!(sales.record_sale(sale(1, 3)).await, Ok(SaleId(1)));

    inventory_mock.verify();
    drop(sales);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_invalid_sale_never_reaches_inventory() {
    // No expectations are queued, so an inventory call would surface as a
    // communication error rather than InvalidQuantity.
    let inventory_mock = MockClient::<InventoryItem>::new();

    let (sales_actor, sales_client) = noora::sales_actor::new(&NooraConfig::default());
    let sales = SalesClient::new(sales_client);
    let handle = tokio::spawn(sales_actor.run(InventoryClient::new(inventory_mock.client())));

    assert_eq!(
        sales.record_sale(sale(1, 0)).await,
        Err(SaleError::InvalidQuantity(0))
    );

    inventory_mock.verify();
    drop(sales);
    handle.await.unwrap();
}
