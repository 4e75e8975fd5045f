//! In-memory record store built on sequential collection actors.
//!
//! This module plays the part of the hosted backend: one actor per collection, a uniform
//! CRUD + `List` + `Action` request set, and a realtime change feed per collection.
//!
//! # Main Components
//!
//! - [`StoreRecord`] - Trait that record types implement to be stored
//! - [`CollectionActor`] - Actor owning one collection
//! - [`CollectionClient`] - Cloneable async handle to a collection
//! - [`ChangeFeed`] / [`ChangeSubscription`] - "something changed" notifications
//! - [`StoreError`] - Store-level errors
//!
//! # Testing
//!
//! See [`mock`] for collections that answer from a script instead of a real actor.

pub mod actor;
pub mod changes;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::CollectionActor;
pub use changes::{ChangeEvent, ChangeFeed, ChangeKind, ChangeSubscription, Collection};
pub use client::CollectionClient;
pub use entity::StoreRecord;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
