use crate::entity::EntityId;
use crate::errors::StorageError;
use crate::record::{NewEvent, Record};
use std::future::Future;

/// Contract for storage engines backing the event store.
///
/// An engine keeps two tables: an index table mapping each entity id to its
/// ordered [`Index`](crate::Index) of record links, and a data table mapping
/// record ids to encoded [`Record`]s.
///
/// Implementations include:
/// - `esto-memory`: in-memory engine used by the server and in tests
pub trait Storage {
    /// Append an event to its entity.
    ///
    /// Within a single transaction the engine must:
    /// 1. create a new record id
    /// 2. append a link to the entity's index, stamped with a timestamp no
    ///    earlier than the previous link
    /// 3. write the encoded record to the data table under the new id
    /// 4. write the updated index back to the index table
    ///
    /// If any step fails nothing is written.
    ///
    /// # Returns
    ///
    /// * `Ok(Record)` - The record as stored, with its id and timestamp
    /// * `Err(StorageError)` - If encoding fails
    fn append(
        &self,
        event: NewEvent,
    ) -> impl Future<Output = Result<Record, StorageError>> + Send;

    /// Read every record of an entity in the order they were appended.
    ///
    /// An entity that has never been written reads as an empty list.
    fn read(
        &self,
        entity_id: EntityId,
    ) -> impl Future<Output = Result<Vec<Record>, StorageError>> + Send;
}
