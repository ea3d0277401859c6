//! Error types for the storage layer.

use crate::entity::EntityId;
use crate::record::RecordId;
use thiserror::Error;

/// Errors returned by [`Storage`](crate::Storage) implementations.
///
/// - **Encode**: a value could not be turned into its stored bytes; nothing was written
/// - **Decode**: stored bytes could not be read back, which means the table is corrupt
/// - **MissingRecord**: an index points at a record that is not in the data table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    /// Encoding a value for storage failed.
    #[error("failed to encode {what}: {detail}")]
    Encode {
        /// Which kind of value was being encoded
        what: &'static str,
        /// Encoder message
        detail: String,
    },

    /// Decoding stored bytes failed.
    #[error("failed to decode {what}: {detail}")]
    Decode {
        /// Which kind of value was being decoded
        what: &'static str,
        /// Decoder message
        detail: String,
    },

    /// The index of an entity references a record the data table does not hold.
    #[error("index for entity {entity_id} references missing record {record_id}")]
    MissingRecord {
        /// Entity whose index holds the dangling link
        entity_id: EntityId,
        /// The record id that could not be found
        record_id: RecordId,
    },
}

/// Convenience alias for storage results.
pub type StorageResult<T> = Result<T, StorageError>;
