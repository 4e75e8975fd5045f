use noora::config::NooraConfig;
use noora::dashboard::format_cfa;
use noora::lifecycle::{setup_tracing, NooraSystem};
use noora::model::{
    Category, ExpenseCategory, ExpenseCreate, InventoryItemCreate, SaleRecordCreate,
};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = NooraConfig::from_env()?;
    let system = NooraSystem::new(config);

    let span = tracing::info_span!("stocking");
    let (necklace, bracelet) = async {
        let necklace = system
            .inventory
            .add_item(InventoryItemCreate {
                name: "Pearl necklace".to_string(),
                category: Category::Necklaces,
                purchase_price: 4500.0,
                selling_price: 9000.0,
                quantity: 6,
            })
            .await?;
        let bracelet = system
            .inventory
            .add_item(InventoryItemCreate {
                name: "Gold bangle".to_string(),
                category: Category::Bracelets,
                purchase_price: 2000.0,
                selling_price: 3500.0,
                quantity: 10,
            })
            .await?;
        Ok::<_, noora::inventory_actor::InventoryError>((necklace, bracelet))
    }
    .instrument(span)
    .await?;

    info!(%necklace, %bracelet, "Inventory stocked");

    let span = tracing::info_span!("selling");
    async {
        system
            .sales
            .record_sale(SaleRecordCreate {
                item_id: necklace,
                quantity_sold: 2,
                sale_price: 8500.0,
                sold_at: None,
            })
            .await?;
        system
            .sales
            .record_sale(SaleRecordCreate {
                item_id: bracelet,
                quantity_sold: 3,
                sale_price: 3500.0,
                sold_at: None,
            })
            .await?;

        // More than is on hand: rejected, stock untouched.
        if let Err(e) = system
            .sales
            .record_sale(SaleRecordCreate {
                item_id: necklace,
                quantity_sold: 50,
                sale_price: 8500.0,
                sold_at: None,
            })
            .await
        {
            warn!(error = %e, "Sale rejected");
        }
        Ok::<_, noora::sales_actor::SaleError>(())
    }
    .instrument(span)
    .await?;

    system
        .expenses
        .add_expense(ExpenseCreate {
            description: "Market stall fee".to_string(),
            amount: 1500.0,
            expense_date: None,
            category: ExpenseCategory::Fees,
        })
        .await?;

    // Every mutation above triggers a refresh; ask for one more and wait for it so the
    // snapshot reflects all of them.
    let snapshot = system.dashboard.refresh().await?;
    let metrics = &snapshot.metrics;

    info!(revision = snapshot.revision, "Dashboard ready");
    for (category, units) in &metrics.stock_by_category {
        info!(%category, units, "Stock");
    }
    info!(revenue = %format_cfa(metrics.total_revenue), today = %format_cfa(metrics.daily_revenue), "Revenue");
    info!(cost_of_sold_stock = %format_cfa(metrics.cost_of_sold_stock), expenses = %format_cfa(metrics.total_expenses), "Costs");
    info!(net_profit = %format_cfa(metrics.net_profit), manager_share = %format_cfa(metrics.manager_share), "Profit");
    info!(
        invested = %format_cfa(metrics.total_invested_cumulative),
        forecast = %format_cfa(metrics.forecast_total_revenue),
        "Outlook"
    );

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
