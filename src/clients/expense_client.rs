//! # Expense Client
//!
//! High-level API for the expense collection.

use crate::clients::record_client::RecordClient;
use crate::expense_actor::ExpenseError;
use crate::framework::{CollectionClient, StoreError};
use crate::model::{ExpenseCreate, ExpenseId, ExpenseRecord, ExpenseUpdate};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the expense collection.
#[derive(Clone)]
pub struct ExpenseClient {
    inner: CollectionClient<ExpenseRecord>,
}

impl ExpenseClient {
    pub fn new(inner: CollectionClient<ExpenseRecord>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn add_expense(&self, params: ExpenseCreate) -> Result<ExpenseId, ExpenseError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_expense(
        &self,
        id: ExpenseId,
        update: ExpenseUpdate,
    ) -> Result<ExpenseRecord, ExpenseError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl RecordClient<ExpenseRecord> for ExpenseClient {
    type Error = ExpenseError;

    fn inner(&self) -> &CollectionClient<ExpenseRecord> {
        &self.inner
    }

    fn map_error(e: StoreError) -> ExpenseError {
        match e.into_record_error::<ExpenseError>() {
            Ok(e) => e,
            Err(StoreError::NotFound(id)) => ExpenseError::NotFound(id),
            Err(other) => ExpenseError::StoreCommunication(other.to_string()),
        }
    }
}
