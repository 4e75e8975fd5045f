//! # Mock Collections
//!
//! Testing code that talks to a collection doesn't require a real
//! [`CollectionActor`](super::CollectionActor). A mock collection hands out an ordinary
//! [`CollectionClient`] whose requests land somewhere the test controls.
//!
//! Two styles are available:
//!
//! - **Fluent** ([`MockClient`]): queue expectations up front, each with its canned answer,
//!   then call [`MockClient::verify`] at the end. Best for "the collaborator answers X" tests.
//! - **Manual** ([`create_mock_client`] + [`expect_list`] and friends): receive each request
//!   yourself and reply on its responder. Best when the test must inspect the payload or
//!   control *when* the answer arrives.
//!
//! ## Simulating failures
//!
//! The main reason to mock is to produce errors a healthy in-memory store never produces,
//! such as a permission-gated read:
//!
//! ```rust,ignore
//! let mut expenses = MockClient::<ExpenseRecord>::new();
//! expenses
//!     .expect_list()
//!     .return_err(StoreError::PermissionDenied("expense_records".into()));
//! ```
//!
//! ## Change notifications
//!
//! Mocks own a real [`ChangeFeed`](super::ChangeFeed); [`MockClient::notify`] publishes on
//! it, so subscription-driven code can be exercised without any actor.

use super::changes::{ChangeFeed, ChangeKind};
use super::client::CollectionClient;
use super::entity::StoreRecord;
use super::error::StoreError;
use super::message::StoreRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the answer to give it.
enum Expectation<T: StoreRecord> {
    Get {
        response: Result<Option<T>, StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    Action {
        response: Result<T::ActionResult, StoreError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock collection with expectation tracking.
///
/// Expectations are consumed in order. A request that doesn't match the next expectation
/// panics the mock's task, which drops the responder: the caller sees
/// [`StoreError::StoreDropped`] and [`verify`](MockClient::verify) reports the leftover.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<InventoryItem>::new();
/// mock.expect_get(ItemId(1)).return_ok(Some(item));
/// mock.expect_list().return_ok(vec![]);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: StoreRecord> {
    client: CollectionClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreRecord> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreRecord> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let feed = ChangeFeed::new(T::COLLECTION, 64);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                match (request, expectation) {
                    (StoreRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: CollectionClient::new(sender, feed),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    /// Publishes a change notification as if the collection had been mutated.
    pub fn notify(&self, kind: ChangeKind) -> usize {
        self.client.feed().publish(kind)
    }

    /// Expects a `get` operation. The id is documentation only; requests match by order.
    pub fn expect_get(&mut self, _id: T::Id) -> Expect<T, Option<T>> {
        Expect::new(self.expectations.clone(), |response| Expectation::Get { response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> Expect<T, Vec<T>> {
        Expect::new(self.expectations.clone(), |response| Expectation::List { response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> Expect<T, T::Id> {
        Expect::new(self.expectations.clone(), |response| Expectation::Create { response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, _id: T::Id) -> Expect<T, T::ActionResult> {
        Expect::new(self.expectations.clone(), |response| Expectation::Action { response })
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        self.expectations.lock().expect("mock expectations poisoned").len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder finishing one expectation with its answer.
pub struct Expect<T: StoreRecord, R> {
    expectations: Expectations<T>,
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
}

impl<T: StoreRecord, R> Expect<T, R> {
    fn new(expectations: Expectations<T>, wrap: fn(Result<R, StoreError>) -> Expectation<T>) -> Self {
        Self { expectations, wrap }
    }

    /// Answers the request successfully.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answers the request with an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back((self.wrap)(response));
    }
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a client whose requests arrive on the returned receiver.
///
/// The test plays the collection: pull each request with one of the `expect_*` helpers
/// below, inspect it, and answer on its responder whenever it likes. This makes it easy to
/// hold a read "in flight" while something else happens.
pub fn create_mock_client<T: StoreRecord>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let feed = ChangeFeed::new(T::COLLECTION, 64);
    (CollectionClient::new(sender, feed), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, StoreError>>> {
    match receiver.recv().await {
        Some(StoreRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: StoreRecord>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
