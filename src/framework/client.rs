use super::changes::{ChangeFeed, ChangeSubscription};
use super::entity::StoreRecord;
use super::error::StoreError;
use super::message::StoreRequest;
use tokio::sync::{mpsc, oneshot};

/// ## CollectionClient
///
/// Async, type-safe handle to a [`CollectionActor`](super::CollectionActor). Requests travel
/// over the actor's mpsc mailbox and answers come back on a oneshot channel.
///
/// The client also carries the collection's [`ChangeFeed`], so anyone holding a client can
/// subscribe to change notifications. Cloning is cheap.
#[derive(Clone)]
pub struct CollectionClient<T: StoreRecord> {
    sender: mpsc::Sender<StoreRequest<T>>,
    feed: ChangeFeed,
}

impl<T: StoreRecord> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>, feed: ChangeFeed) -> Self {
        Self { sender, feed }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError> {
        self.request(|respond_to| StoreRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    /// Reads the whole collection, ordered by id.
    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| StoreRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Subscribes to this collection's change notifications.
    pub fn subscribe(&self) -> ChangeSubscription {
        self.feed.subscribe()
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }
}
