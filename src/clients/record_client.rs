//! # RecordClient Trait
//!
//! Common interface for the typed clients, adding default `get`, `list`, `delete` and
//! `subscribe` on top of a generic [`CollectionClient`].

use crate::framework::{ChangeSubscription, CollectionClient, StoreError, StoreRecord};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the standard operations.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl RecordClient<ExpenseRecord> for ExpenseClient {
///     type Error = ExpenseError;
///
///     fn inner(&self) -> &CollectionClient<ExpenseRecord> {
///         &self.inner
///     }
///
///     fn map_error(e: StoreError) -> ExpenseError {
///         ExpenseError::StoreCommunication(e.to_string())
///     }
/// }
///
/// // get(), list(), delete() and subscribe() are provided automatically
/// let all = expenses.list().await?;
/// ```
#[async_trait]
pub trait RecordClient<T: StoreRecord>: Send + Sync {
    /// The collection-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map store errors to the collection's error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Read every record in the collection, ordered by id.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Subscribe to the collection's change notifications.
    fn subscribe(&self) -> ChangeSubscription {
        self.inner().subscribe()
    }
}
