//! Messages exchanged by the two remote procedures.
//!
//! Both procedures are JSON bodies POSTed to fixed paths:
//!
//! | procedure | path | request | reply |
//! |---|---|---|---|
//! | store record | [`STORE_RECORD_PATH`] | [`StoreRequest`] | [`StoreReply`] |
//! | read record | [`READ_RECORD_PATH`] | [`ReadRequest`] | [`ReadEventList`] |
//!
//! Failed calls answer with a non-success status and an [`ErrorBody`].

use crate::entity::{EntityId, EntityType, EventData, EventName};
use crate::record::{NewEvent, Record, RecordId, Timestamp};
use serde::{Deserialize, Serialize};

/// Path of the store-record procedure.
pub const STORE_RECORD_PATH: &str = "/esto/store_record";

/// Path of the read-record procedure.
pub const READ_RECORD_PATH: &str = "/esto/read_record";

/// Request to store one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRequest {
    /// The entity the event belongs to
    pub entity_id: EntityId,
    /// Kind of the entity
    pub entity_type: EntityType,
    /// What happened
    pub event_name: EventName,
    /// Payload, already serialized to JSON text
    pub event_data: EventData,
}

impl StoreRequest {
    /// Builds a request, serializing `data` to JSON text.
    pub fn new<D: Serialize + ?Sized>(
        entity_id: EntityId,
        entity_type: EntityType,
        event_name: EventName,
        data: &D,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            entity_id,
            entity_type,
            event_name,
            event_data: EventData::from_value(data)?,
        })
    }
}

impl From<StoreRequest> for NewEvent {
    fn from(request: StoreRequest) -> Self {
        Self {
            entity_id: request.entity_id,
            entity_type: request.entity_type,
            event_name: request.event_name,
            event_data: request.event_data,
        }
    }
}

/// Reply to a store request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreReply {
    /// Human-readable status, e.g. `Event ThingDoneToMyThing!`
    pub message: String,
}

/// Request for every event of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadRequest {
    /// The entity to read
    pub entity_id: EntityId,
}

/// A stored event as returned to readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Id of the stored record
    pub record_id: RecordId,
    /// When the event was stored
    pub timestamp: Timestamp,
    /// The entity the event belongs to
    pub entity_id: EntityId,
    /// Kind of the entity
    pub entity_type: EntityType,
    /// What happened
    pub event_name: EventName,
    /// Payload as JSON text
    pub event_data: EventData,
}

impl From<Record> for Event {
    fn from(record: Record) -> Self {
        Self {
            record_id: record.record_id,
            timestamp: record.timestamp,
            entity_id: record.entity_id,
            entity_type: record.entity_type,
            event_name: record.event_name,
            event_data: record.event_data,
        }
    }
}

/// Reply to a read request: the entity's events in the order they were stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadEventList {
    /// Events, oldest first
    pub events: Vec<Event>,
}

impl ReadEventList {
    /// Collects stored records into a reply.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            events: records.into_iter().map(Event::from).collect(),
        }
    }
}

/// Body of a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// What went wrong
    pub error: String,
}
