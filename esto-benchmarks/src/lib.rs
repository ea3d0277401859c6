//! Esto Benchmarks
//!
//! Criterion benchmarks for the in-memory storage engine and for client
//! calls against a live in-process service.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use esto_types::{EntityId, EntityType, EventData, EventName, NewEvent};

/// Builds the event every benchmark writes.
pub fn sample_event(entity_id: EntityId, seq: usize) -> NewEvent {
    NewEvent {
        entity_id,
        entity_type: EntityType::try_new("MyThing").expect("valid entity type"),
        event_name: EventName::try_new("ThingDoneToMyThing").expect("valid event name"),
        event_data: EventData::from_value(&serde_json::json!({ "a": 1, "b": 2, "seq": seq }))
            .expect("json payload serializes"),
    }
}
