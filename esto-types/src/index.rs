//! Per-entity index of record links.
//!
//! An index holds the id of the entity it covers and the ordered list of
//! links to that entity's records. Each link points at a record in the data
//! table. Links are kept in the order the events were received, and their
//! timestamps never decrease.
//!
//! Only the links are encoded; the entity id is the key the index is stored
//! under, so it is supplied again on decode.
//!
//! ```
//! use esto_types::{EntityId, Index, RecordId};
//!
//! let mut index = Index::new(EntityId::generate());
//! index.append(RecordId::new());
//!
//! let bytes = index.encode().unwrap();
//! let decoded = Index::decode(index.entity_id(), &bytes).unwrap();
//! assert_eq!(decoded, index);
//! ```

use crate::entity::EntityId;
use crate::errors::StorageResult;
use crate::record::{self, RecordId, Timestamp};
use serde::{Deserialize, Serialize};

/// A record id paired with the time it was linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLink {
    /// Key of the record in the data table
    pub record_id: RecordId,
    /// When the link was appended
    pub timestamp: Timestamp,
}

/// The ordered record links of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    entity_id: EntityId,
    links: Vec<RecordLink>,
}

impl Index {
    /// Creates an empty index for `entity_id`.
    pub const fn new(entity_id: EntityId) -> Self {
        Self {
            entity_id,
            links: Vec::new(),
        }
    }

    /// The entity this index covers.
    pub const fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// Appends a link to `record_id` stamped with the current time and
    /// returns the timestamp that was used.
    pub fn append(&mut self, record_id: RecordId) -> Timestamp {
        self.append_at(record_id, Timestamp::now())
    }

    /// Appends a link stamped with `timestamp`, clamped so it is never
    /// earlier than the previous link.
    pub fn append_at(&mut self, record_id: RecordId, timestamp: Timestamp) -> Timestamp {
        let timestamp = self
            .links
            .last()
            .map_or(timestamp, |last| last.timestamp.max(timestamp));

        self.links.push(RecordLink {
            record_id,
            timestamp,
        });
        timestamp
    }

    /// Links in the order they were appended.
    pub fn links(&self) -> &[RecordLink] {
        &self.links
    }

    /// Number of linked records.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the index has no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Encodes the links for the index table.
    pub fn encode(&self) -> StorageResult<Vec<u8>> {
        record::encode("index", &self.links)
    }

    /// Rebuilds the index stored under `entity_id`.
    pub fn decode(entity_id: EntityId, bytes: &[u8]) -> StorageResult<Self> {
        Ok(Self {
            entity_id,
            links: record::decode("index", bytes)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StorageError;
    use chrono::{Duration, Utc};

    #[test]
    fn empty_index_survives_encoding() {
        let index = Index::new(EntityId::generate());
        let decoded = Index::decode(index.entity_id(), &index.encode().unwrap()).unwrap();

        assert!(decoded.is_empty());
        assert_eq!(decoded, index);
    }

    #[test]
    fn index_with_links_survives_encoding() {
        let mut index = Index::new(EntityId::generate());
        index.append(RecordId::new());
        index.append(RecordId::new());

        let decoded = Index::decode(index.entity_id(), &index.encode().unwrap()).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.links(), index.links());
    }

    #[test]
    fn links_keep_append_order() {
        let mut index = Index::new(EntityId::generate());
        let ids: Vec<RecordId> = (0..5).map(|_| RecordId::new()).collect();
        for id in &ids {
            index.append(*id);
        }

        let linked: Vec<RecordId> = index.links().iter().map(|l| l.record_id).collect();
        assert_eq!(linked, ids);
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut index = Index::new(EntityId::generate());
        let now = Utc::now();

        let first = index.append_at(RecordId::new(), Timestamp::new(now));
        let second = index.append_at(RecordId::new(), Timestamp::new(now - Duration::seconds(5)));
        let third = index.append_at(RecordId::new(), Timestamp::new(now + Duration::seconds(1)));

        assert_eq!(second, first);
        assert!(third > second);
        assert!(index
            .links()
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }

    #[test]
    fn garbage_fails_to_decode() {
        let error = Index::decode(EntityId::generate(), &[0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(error, StorageError::Decode { what: "index", .. }));
    }
}
