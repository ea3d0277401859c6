//! In-memory storage engine for the Esto event store
//!
//! This crate provides an in-memory implementation of the `Storage` trait
//! from `esto-types`. It keeps the same two-table layout a persistent engine
//! would: an index table keyed by entity id and a data table keyed by record
//! id, both holding encoded bytes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashMap;
use std::sync::Arc;

use esto_types::{
    EntityId, Index, NewEvent, Record, RecordId, Storage, StorageError, StorageResult,
};
use parking_lot::RwLock;
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct Tables {
    // Entity id -> encoded record links
    indexes: HashMap<EntityId, Vec<u8>>,
    // Record id -> encoded record
    data: HashMap<RecordId, Vec<u8>>,
}

/// Thread-safe in-memory storage engine
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStorage {
    /// Create a new empty storage engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities that have at least one record
    pub fn entity_count(&self) -> usize {
        self.tables.read().indexes.len()
    }

    /// Total number of stored records across all entities
    pub fn record_count(&self) -> usize {
        self.tables.read().data.len()
    }
}

impl Storage for InMemoryStorage {
    #[instrument(skip(self, event), fields(entity_id = %event.entity_id, event_name = %event.event_name))]
    async fn append(&self, event: NewEvent) -> StorageResult<Record> {
        let entity_id = event.entity_id;
        let mut tables = self.tables.write();

        let mut index = match tables.indexes.get(&entity_id) {
            Some(bytes) => Index::decode(entity_id, bytes)?,
            None => Index::new(entity_id),
        };

        let record_id = RecordId::new();
        let timestamp = index.append(record_id);
        let record = Record::new(record_id, timestamp, event);

        // Encode both rows before touching either table
        let record_bytes = record.encode()?;
        let index_bytes = index.encode()?;

        tables.data.insert(record_id, record_bytes);
        tables.indexes.insert(entity_id, index_bytes);

        debug!(%record_id, links = index.len(), "appended record");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn read(&self, entity_id: EntityId) -> StorageResult<Vec<Record>> {
        let tables = self.tables.read();

        let Some(bytes) = tables.indexes.get(&entity_id) else {
            debug!("no index for entity");
            return Ok(Vec::new());
        };
        let index = Index::decode(entity_id, bytes)?;

        let records = index
            .links()
            .iter()
            .map(|link| {
                let bytes =
                    tables
                        .data
                        .get(&link.record_id)
                        .ok_or(StorageError::MissingRecord {
                            entity_id,
                            record_id: link.record_id,
                        })?;
                Record::decode(bytes)
            })
            .collect::<StorageResult<Vec<_>>>()?;

        debug!(records = records.len(), "read entity");
        Ok(records)
    }
}
