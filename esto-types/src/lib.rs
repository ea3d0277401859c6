//! Shared vocabulary types for the Esto event store.
//!
//! This crate holds the types that the server, the storage adapters and the
//! client all agree on. Keeping them here lets `esto-client` talk to
//! `esto-server` without depending on it, and lets storage adapters live in
//! their own crates.
//!
//! # Overview
//!
//! - Identity and labels: `EntityId`, `EntityType`, `EventName`, `EventData`
//! - Stored shapes: `NewEvent`, `Record`, `RecordId`, `Index`, `RecordLink`, `Timestamp`
//! - Storage contract: the `Storage` trait and `StorageError`
//! - Wire messages for the two remote procedures: `StoreRequest`, `StoreReply`,
//!   `ReadRequest`, `ReadEventList`, `Event`, `ErrorBody`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod entity;
mod errors;
mod index;
mod record;
mod storage;
pub mod wire;

pub use entity::{
    EntityId, EntityType, EntityTypeError, EventData, EventName, EventNameError,
};
pub use errors::{StorageError, StorageResult};
pub use index::{Index, RecordLink};
pub use record::{NewEvent, Record, RecordId, Timestamp};
pub use storage::Storage;
pub use wire::{ErrorBody, Event, ReadEventList, ReadRequest, StoreReply, StoreRequest};

/// Returns the version of the Esto crates.
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
