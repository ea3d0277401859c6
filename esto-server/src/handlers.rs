use std::sync::Arc;

use axum::{Json, extract::State};
use esto_types::{ReadEventList, ReadRequest, Storage, StoreReply, StoreRequest};
use tracing::{debug, info};

use crate::error::ApiError;

/// Store one event and acknowledge it by name.
pub(crate) async fn store_record<S>(
    State(storage): State<Arc<S>>,
    Json(request): Json<StoreRequest>,
) -> Result<Json<StoreReply>, ApiError>
where
    S: Storage + Send + Sync + 'static,
{
    debug!(?request, "store request");

    let record = storage.append(request.into()).await?;
    info!(
        record_id = %record.record_id,
        entity_id = %record.entity_id,
        event_name = %record.event_name,
        "stored record"
    );

    Ok(Json(StoreReply {
        message: format!("Event {}!", record.event_name),
    }))
}

/// Return every event of an entity, oldest first.
pub(crate) async fn read_record<S>(
    State(storage): State<Arc<S>>,
    Json(request): Json<ReadRequest>,
) -> Result<Json<ReadEventList>, ApiError>
where
    S: Storage + Send + Sync + 'static,
{
    debug!(entity_id = %request.entity_id, "read request");

    let records = storage.read(request.entity_id).await?;
    Ok(Json(ReadEventList::from_records(records)))
}
