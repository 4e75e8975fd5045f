use super::error::DashboardError;
use super::metrics::compute;
use super::snapshot::FinancialSnapshot;
use super::source::DashboardSource;
use crate::config::NooraConfig;
use crate::framework::{ChangeEvent, ChangeSubscription, Collection};
use crate::model::{ExpenseRecord, InventoryItem, SaleWithItem};
use chrono::{Local, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

type Responder = oneshot::Sender<Result<Arc<FinancialSnapshot>, DashboardError>>;
type RefreshFuture = Pin<Box<dyn Future<Output = Result<Reads, DashboardError>> + Send>>;

/// Commands accepted by the engine's mailbox.
#[derive(Debug)]
pub enum DashboardCommand {
    /// Recompute now. The responder, if any, gets the outcome of a refresh that started
    /// after the command arrived.
    Refresh { respond_to: Option<Responder> },
    Shutdown,
}

/// Everything one refresh read.
struct Reads {
    items: Vec<InventoryItem>,
    sales: Vec<SaleWithItem>,
    /// `None` when the expense read failed and was absorbed.
    expenses: Option<Vec<ExpenseRecord>>,
}

/// Issues the three reads concurrently and waits for all of them.
///
/// Item and sale failures fail the read; an expense failure is logged and replaced
/// by an empty set.
async fn read_all<S: DashboardSource>(source: &S) -> Result<Reads, DashboardError> {
    let (items, sales, expenses) = tokio::join!(
        source.list_inventory_items(),
        source.list_sale_records(),
        source.list_expense_records(),
    );
    let items = items?;
    let sales = sales?;
    let expenses = match expenses {
        Ok(expenses) => Some(expenses),
        Err(e) => {
            warn!(collection = %e.collection, error = %e, "Expense read failed, counting no expenses");
            None
        }
    };
    Ok(Reads {
        items,
        sales,
        expenses,
    })
}

async fn next_change(slot: &mut Option<ChangeSubscription>) -> Option<ChangeEvent> {
    match slot {
        Some(subscription) => subscription.changed().await,
        None => std::future::pending().await,
    }
}

async fn in_flight(refresh: &mut Option<RefreshFuture>) -> Result<Reads, DashboardError> {
    match refresh {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}

/// The Financial Aggregation Engine.
///
/// # Architecture Note
/// The engine is an actor like the collections it reads from: it owns its state, runs on
/// its own Tokio task and is driven by a mailbox of [`DashboardCommand`]s. On top of the
/// mailbox it listens to the change feed of all three collections.
///
/// **Coalescing**: at most one refresh is in flight. Triggers that arrive meanwhile
/// (change notifications or refresh commands, any number of them) schedule exactly one
/// follow-up refresh, started once the current one completes. Refreshes therefore
/// complete in the order they started and published revisions only grow.
///
/// **Publication**: snapshots are published on a `watch` channel as
/// `Arc<FinancialSnapshot>`. Readers always see a whole snapshot, never a partial one.
///
/// **Failure policy**: if the item or sale read fails, the previous snapshot stays
/// published (with `loading` cleared). An expense read failure only zeroes the expenses.
pub struct DashboardEngine<S: DashboardSource> {
    source: Arc<S>,
    receiver: mpsc::Receiver<DashboardCommand>,
    snapshots: watch::Sender<Arc<FinancialSnapshot>>,
    refresh_timeout: Option<Duration>,
    revision: u64,
    refresh: Option<RefreshFuture>,
    rerun: bool,
    /// Answered when the in-flight refresh completes.
    waiting: Vec<Responder>,
    /// Answered when the follow-up refresh completes.
    queued: Vec<Responder>,
}

impl<S: DashboardSource> DashboardEngine<S> {
    /// Creates the engine and a handle to it. Nothing is read until [`run`](Self::run).
    pub fn new(source: S, config: &NooraConfig) -> (Self, DashboardHandle) {
        let (sender, receiver) = mpsc::channel(config.dashboard_buffer);
        let (snapshots, snapshot_rx) = watch::channel(Arc::new(FinancialSnapshot::placeholder()));
        let engine = Self {
            source: Arc::new(source),
            receiver,
            snapshots,
            refresh_timeout: config.refresh_timeout,
            revision: 0,
            refresh: None,
            rerun: false,
            waiting: Vec::new(),
            queued: Vec::new(),
        };
        let handle = DashboardHandle {
            sender,
            snapshots: snapshot_rx,
        };
        (engine, handle)
    }

    /// Creates the engine and runs it on a new task.
    pub fn spawn(source: S, config: &NooraConfig) -> (DashboardHandle, JoinHandle<()>) {
        let (engine, handle) = Self::new(source, config);
        (handle, tokio::spawn(engine.run()))
    }

    /// Subscribes to all three collections, refreshes once, then refreshes on every
    /// change until shut down or until every [`DashboardHandle`] is dropped.
    pub async fn run(mut self) {
        let mut inventory = Some(self.source.subscribe(Collection::InventoryItems));
        let mut sales = Some(self.source.subscribe(Collection::SaleRecords));
        let mut expenses = Some(self.source.subscribe(Collection::ExpenseRecords));
        info!("Dashboard engine started");

        self.request_refresh(None);

        loop {
            tokio::select! {
                outcome = in_flight(&mut self.refresh) => self.complete_refresh(outcome),
                command = self.receiver.recv() => match command {
                    Some(DashboardCommand::Refresh { respond_to }) => {
                        debug!("Refresh requested");
                        self.request_refresh(respond_to);
                    }
                    Some(DashboardCommand::Shutdown) => {
                        info!("Shutdown requested");
                        break;
                    }
                    None => break,
                },
                event = next_change(&mut inventory) => self.on_change(event, &mut inventory),
                event = next_change(&mut sales) => self.on_change(event, &mut sales),
                event = next_change(&mut expenses) => self.on_change(event, &mut expenses),
            }
        }

        for subscription in [inventory, sales, expenses].into_iter().flatten() {
            subscription.cancel();
        }
        for responder in self.waiting.drain(..).chain(self.queued.drain(..)) {
            let _ = responder.send(Err(DashboardError::EngineStopped));
        }
        info!(revision = self.revision, "Dashboard engine stopped");
    }

    fn on_change(&mut self, event: Option<ChangeEvent>, slot: &mut Option<ChangeSubscription>) {
        match event {
            Some(event) => {
                debug!(collection = %event.collection, kind = ?event.kind, "Change received");
                self.request_refresh(None);
            }
            None => {
                if let Some(subscription) = slot.take() {
                    warn!(collection = %subscription.collection(), "Change feed closed");
                }
            }
        }
    }

    fn request_refresh(&mut self, respond_to: Option<Responder>) {
        if self.refresh.is_some() {
            self.rerun = true;
            self.queued.extend(respond_to);
        } else {
            self.waiting.extend(respond_to);
            self.start_refresh();
        }
    }

    fn start_refresh(&mut self) {
        debug!(revision = self.revision, "Refresh started");
        let source = Arc::clone(&self.source);
        let limit = self.refresh_timeout;
        let refresh: RefreshFuture = Box::pin(async move {
            match limit {
                Some(limit) => tokio::time::timeout(limit, read_all(source.as_ref()))
                    .await
                    .unwrap_or(Err(DashboardError::TimedOut(limit))),
                None => read_all(source.as_ref()).await,
            }
        });
        self.refresh = Some(refresh);
        self.snapshots.send_if_modified(|current| {
            if current.loading {
                return false;
            }
            *current = Arc::new(current.with_loading(true));
            true
        });
    }

    fn complete_refresh(&mut self, outcome: Result<Reads, DashboardError>) {
        self.refresh = None;

        let result = match outcome {
            Ok(reads) => {
                self.revision += 1;
                let expenses_available = reads.expenses.is_some();
                let expenses = reads.expenses.unwrap_or_default();
                let snapshot = Arc::new(FinancialSnapshot {
                    metrics: compute(&reads.items, &reads.sales, &expenses, &Local::now()),
                    loading: false,
                    generated_at: Utc::now(),
                    revision: self.revision,
                    expenses_available,
                });
                info!(
                    revision = self.revision,
                    items = reads.items.len(),
                    sales = reads.sales.len(),
                    expenses = expenses.len(),
                    net_profit = snapshot.metrics.net_profit,
                    "Snapshot published"
                );
                self.snapshots.send_replace(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(e) => {
                error!(error = %e, revision = self.revision, "Refresh aborted, keeping previous snapshot");
                self.snapshots.send_if_modified(|current| {
                    if !current.loading {
                        return false;
                    }
                    *current = Arc::new(current.with_loading(false));
                    true
                });
                Err(e)
            }
        };

        for responder in self.waiting.drain(..) {
            let _ = responder.send(result.clone());
        }

        if std::mem::take(&mut self.rerun) {
            self.waiting = std::mem::take(&mut self.queued);
            self.start_refresh();
        }
    }
}

/// ## DashboardHandle
///
/// The UI side of the engine. Cheap to clone; the engine stops once every clone is
/// dropped.
///
/// ```rust,ignore
/// let snapshot = handle.snapshot();            // never blocks, never fails
/// println!("{}", format_cfa(snapshot.metrics.net_profit));
///
/// handle.force_refresh()?;                     // fire and forget
/// let fresh = handle.refresh().await?;         // wait for the outcome
/// ```
#[derive(Clone)]
pub struct DashboardHandle {
    sender: mpsc::Sender<DashboardCommand>,
    snapshots: watch::Receiver<Arc<FinancialSnapshot>>,
}

impl DashboardHandle {
    /// The latest published snapshot.
    pub fn snapshot(&self) -> Arc<FinancialSnapshot> {
        Arc::clone(&*self.snapshots.borrow())
    }

    pub fn is_loading(&self) -> bool {
        self.snapshots.borrow().loading
    }

    /// Asks for a refresh without waiting for it.
    ///
    /// A full mailbox already holds a pending refresh, so the request is dropped then.
    pub fn force_refresh(&self) -> Result<(), DashboardError> {
        match self
            .sender
            .try_send(DashboardCommand::Refresh { respond_to: None })
        {
            Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => Ok(()),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(DashboardError::EngineStopped),
        }
    }

    /// Asks for a refresh and waits for its outcome.
    pub async fn refresh(&self) -> Result<Arc<FinancialSnapshot>, DashboardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DashboardCommand::Refresh {
                respond_to: Some(respond_to),
            })
            .await
            .map_err(|_| DashboardError::EngineStopped)?;
        response.await.map_err(|_| DashboardError::EngineDropped)?
    }

    /// A receiver that is notified whenever a snapshot is published.
    pub fn watch(&self) -> watch::Receiver<Arc<FinancialSnapshot>> {
        self.snapshots.clone()
    }

    /// Waits until a snapshot with at least `revision` is published.
    pub async fn wait_for_revision(
        &self,
        revision: u64,
    ) -> Result<Arc<FinancialSnapshot>, DashboardError> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|s| s.revision >= revision)
            .await
            .map_err(|_| DashboardError::EngineStopped)?;
        Ok(Arc::clone(&*snapshot))
    }

    /// Stops the engine, cancelling its change subscriptions.
    pub async fn shutdown(&self) -> Result<(), DashboardError> {
        self.sender
            .send(DashboardCommand::Shutdown)
            .await
            .map_err(|_| DashboardError::EngineStopped)
    }
}
