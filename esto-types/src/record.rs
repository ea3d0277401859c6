//! Stored event records and their binary encoding.

use crate::entity::{EntityId, EntityType, EventData, EventName};
use crate::errors::{StorageError, StorageResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a single stored record.
///
/// Record ids are UUIDv7, so ids generated later sort after ids generated
/// earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new time-ordered record id.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC instant attached to record links and records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp from a UTC `DateTime`.
    pub const fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Creates a timestamp representing the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the underlying `DateTime`.
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(datetime)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event as submitted by a writer, before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    /// The entity this event belongs to
    pub entity_id: EntityId,
    /// Kind of the entity
    pub entity_type: EntityType,
    /// What happened
    pub event_name: EventName,
    /// JSON payload text
    pub event_data: EventData,
}

/// A single stored event record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Key of this record in the data table
    pub record_id: RecordId,
    /// When the record was appended; equal to the timestamp of its index link
    pub timestamp: Timestamp,
    /// The entity this record belongs to, i.e. the key of the index that links here
    pub entity_id: EntityId,
    /// Kind of the entity
    pub entity_type: EntityType,
    /// Name of the event
    pub event_name: EventName,
    /// The event data itself, as JSON text
    pub event_data: EventData,
}

impl Record {
    /// Builds the stored form of `event` under the given id and timestamp.
    pub fn new(record_id: RecordId, timestamp: Timestamp, event: NewEvent) -> Self {
        let NewEvent {
            entity_id,
            entity_type,
            event_name,
            event_data,
        } = event;

        Self {
            record_id,
            timestamp,
            entity_id,
            entity_type,
            event_name,
            event_data,
        }
    }

    /// Encodes the record for the data table.
    pub fn encode(&self) -> StorageResult<Vec<u8>> {
        encode("record", self)
    }

    /// Decodes a record read from the data table.
    pub fn decode(bytes: &[u8]) -> StorageResult<Self> {
        decode("record", bytes)
    }
}

pub(crate) fn encode<T: Serialize>(what: &'static str, value: &T) -> StorageResult<Vec<u8>> {
    bincode::serde::encode_to_vec(value, bincode::config::standard()).map_err(|error| {
        StorageError::Encode {
            what,
            detail: error.to_string(),
        }
    })
}

pub(crate) fn decode<T: DeserializeOwned>(what: &'static str, bytes: &[u8]) -> StorageResult<T> {
    bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .map(|(value, _)| value)
        .map_err(|error| StorageError::Decode {
            what,
            detail: error.to_string(),
        })
}
