use crate::clients::{ExpenseClient, InventoryClient, SalesClient};
use crate::config::NooraConfig;
use crate::dashboard::{DashboardEngine, DashboardHandle, StoreSource};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("{task} task failed: {source}")]
    TaskFailed {
        task: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// The running Noora system: three collections and the dashboard engine.
///
/// # Example
///
/// ```ignore
/// let system = NooraSystem::new(NooraConfig::default());
///
/// let ring = system.inventory.add_item(params).await?;
/// system.sales.record_sale(sale).await?;
///
/// let snapshot = system.dashboard.snapshot();
///
/// system.shutdown().await?;
/// ```
pub struct NooraSystem {
    pub inventory: InventoryClient,
    pub sales: SalesClient,
    pub expenses: ExpenseClient,
    pub dashboard: DashboardHandle,

    engine: JoinHandle<()>,
    /// Collection actors, in shutdown order.
    actors: Vec<(&'static str, JoinHandle<()>)>,
}

impl NooraSystem {
    /// Starts every actor and the dashboard engine.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: NooraConfig) -> Self {
        let (inventory_actor, inventory_client) = crate::inventory_actor::new(&config);
        let (sales_actor, sales_client) = crate::sales_actor::new(&config);
        let (expense_actor, expense_client) = crate::expense_actor::new(&config);

        let inventory = InventoryClient::new(inventory_client);
        let sales = SalesClient::new(sales_client);
        let expenses = ExpenseClient::new(expense_client);

        let inventory_handle = tokio::spawn(inventory_actor.run(()));
        let sales_handle = tokio::spawn(sales_actor.run(inventory.clone()));
        let expense_handle = tokio::spawn(expense_actor.run(()));

        let source = StoreSource::new(inventory.clone(), sales.clone(), expenses.clone());
        let (dashboard, engine) = DashboardEngine::spawn(source, &config);

        info!(?config, "Noora system started");

        Self {
            inventory,
            sales,
            expenses,
            dashboard,
            engine,
            actors: vec![
                ("sales", sales_handle),
                ("expenses", expense_handle),
                ("inventory", inventory_handle),
            ],
        }
    }

    /// Stops the engine, then every collection actor.
    ///
    /// Clones of the clients or of the dashboard handle held elsewhere keep their actor
    /// alive; drop them before calling this.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // The engine stops on Shutdown even if other handles exist.
        let _ = self.dashboard.shutdown().await;
        drop(self.dashboard);
        join("dashboard", self.engine).await?;

        drop(self.sales);
        drop(self.expenses);
        drop(self.inventory);

        for (task, handle) in self.actors {
            join(task, handle).await?;
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

async fn join(task: &'static str, handle: JoinHandle<()>) -> Result<(), SystemError> {
    handle.await.map_err(|source| {
        error!(task, error = %source, "Task failed");
        SystemError::TaskFailed { task, source }
    })
}
