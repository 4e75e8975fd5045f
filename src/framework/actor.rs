use super::changes::{ChangeFeed, ChangeKind};
use super::client::CollectionClient;
use super::entity::StoreRecord;
use super::error::StoreError;
use super::message::StoreRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns one collection of records.
///
/// # Architecture Note
/// This struct is the "server" half of a collection. It owns the records (`store`), the
/// receiver end of the mailbox, and the collection's [`ChangeFeed`].
///
/// **Concurrency Model**:
/// Each collection processes its mailbox *sequentially*, so the `store` needs no
/// `Mutex`. A `List` therefore always sees a state between two mutations, never half
/// of one.
///
/// **Change notifications**:
/// Every *successful* Create, Update, Delete and mutating Action publishes one
/// [`ChangeEvent`](super::ChangeEvent). Failed operations publish nothing.
///
/// # Usage Pattern
///
/// 1. **Create**: `CollectionActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
pub struct CollectionActor<T: StoreRecord> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: BTreeMap<T::Id, T>,
    feed: ChangeFeed,
    next_id: u32,
}

impl<T: StoreRecord> CollectionActor<T> {
    /// Creates a new `CollectionActor` and its associated `CollectionClient`.
    ///
    /// * `buffer_size` - mailbox capacity. When full, client calls wait for space.
    /// * `feed_capacity` - how many change notifications a subscriber may fall behind
    ///   before it is told to resync.
    pub fn new(buffer_size: usize, feed_capacity: usize) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let feed = ChangeFeed::new(T::COLLECTION, feed_capacity);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            feed: feed.clone(),
            next_id: 1,
        };
        let client = CollectionClient::new(sender, feed);
        (actor, client)
    }

    /// Runs the mailbox loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every record hook. It is supplied here rather than in `new()`
    /// so collections can depend on each other's clients without construction cycles.
    pub async fn run(mut self, context: T::Context) {
        let collection = T::COLLECTION.as_str();
        info!(collection, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(collection, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut record) => {
                            if let Err(e) = record.on_create(&context).await {
                                warn!(collection, error = %e, "on_create failed");
                                let _ = respond_to.send(Err(StoreError::RecordError(Box::new(e))));
                                continue;
                            }
                            // Ids are only consumed by records that were actually stored.
                            self.next_id += 1;
                            self.store.insert(id.clone(), record);
                            info!(collection, %id, size = self.store.len(), "Created");
                            self.feed.publish(ChangeKind::Insert);
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(collection, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::RecordError(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.store.get(&id).cloned();
                    let found = record.is_some();
                    debug!(collection, %id, found, "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::List { respond_to } => {
                    let records: Vec<T> = self.store.values().cloned().collect();
                    debug!(collection, count = records.len(), "List");
                    let _ = respond_to.send(Ok(records));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(collection, %id, ?update, "Update");
                    let Some(record) = self.store.get_mut(&id) else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    // Work on a copy so a rejected update leaves the stored record untouched.
                    let mut updated = record.clone();
                    if let Err(e) = updated.on_update(update, &context).await {
                        warn!(collection, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::RecordError(Box::new(e))));
                        continue;
                    }
                    *record = updated.clone();
                    info!(collection, %id, "Updated");
                    self.feed.publish(ChangeKind::Update);
                    let _ = respond_to.send(Ok(updated));
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(collection, %id, "Delete");
                    let Some(record) = self.store.get(&id) else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = record.on_delete(&context).await {
                        warn!(collection, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::RecordError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(collection, %id, size = self.store.len(), "Deleted");
                    self.feed.publish(ChangeKind::Delete);
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(collection, %id, ?action, "Action");
                    let Some(record) = self.store.get_mut(&id) else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mutates = T::is_mutation(&action);
                    let result = record
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| StoreError::RecordError(Box::new(e)));
                    match &result {
                        Ok(_) => {
                            info!(collection, %id, "Action ok");
                            if mutates {
                                self.feed.publish(ChangeKind::Update);
                            }
                        }
                        Err(e) => warn!(collection, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(collection, size = self.store.len(), "Shutdown");
    }
}
