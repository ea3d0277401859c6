use esto_types::wire::{READ_RECORD_PATH, STORE_RECORD_PATH};
use esto_types::{
    EntityId, EntityType, ErrorBody, Event, EventName, ReadEventList, ReadRequest, StoreReply,
    StoreRequest,
};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{ClientError, ClientResult};

/// Handle for invoking the Esto procedures over one channel.
///
/// The underlying connection pool is opened lazily on the first call, so
/// [`Client::connect`] only validates the endpoint. Calls are issued as
/// given: no validation beyond the message types, no retries, no timeouts.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    store_url: Url,
    read_url: Url,
}

impl Client {
    /// Open a channel to the service at `endpoint`, e.g. `http://localhost:50051`.
    ///
    /// Any path in `endpoint` is treated as a prefix of the procedure paths.
    pub fn connect(endpoint: &str) -> ClientResult<Self> {
        let invalid = |detail: String| ClientError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            detail,
        };

        let mut base = Url::parse(endpoint).map_err(|error| invalid(error.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        // Procedure paths are joined relative to the endpoint so a path
        // prefix such as `/gateway` is kept.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let store_url = base
            .join(STORE_RECORD_PATH.trim_start_matches('/'))
            .map_err(|error| invalid(error.to_string()))?;
        let read_url = base
            .join(READ_RECORD_PATH.trim_start_matches('/'))
            .map_err(|error| invalid(error.to_string()))?;

        let http = reqwest::Client::builder().build()?;

        debug!(%base, "opened channel");
        Ok(Self {
            http,
            store_url,
            read_url,
        })
    }

    /// Issue the store-record call.
    #[instrument(skip_all, fields(entity_id = %request.entity_id, event_name = %request.event_name))]
    pub async fn store(&self, request: &StoreRequest) -> ClientResult<StoreReply> {
        self.call(&self.store_url, request).await
    }

    /// Store one event, serializing `event_data` to JSON text, and return
    /// the status message of the reply.
    pub async fn write<D>(
        &self,
        entity_id: EntityId,
        entity_type: EntityType,
        event_name: EventName,
        event_data: &D,
    ) -> ClientResult<String>
    where
        D: Serialize + ?Sized,
    {
        let request = StoreRequest::new(entity_id, entity_type, event_name, event_data)?;
        let reply = self.store(&request).await?;
        Ok(reply.message)
    }

    /// Issue the read-record call.
    #[instrument(skip(self))]
    pub async fn read_record(&self, entity_id: EntityId) -> ClientResult<ReadEventList> {
        self.call(&self.read_url, &ReadRequest { entity_id }).await
    }

    /// Events of `entity_id` as a lazy stream.
    ///
    /// Nothing is sent until the stream is first polled; the read-record
    /// call is then issued once and its events are yielded oldest first.
    /// Calling `read` again starts a fresh read.
    pub fn read(&self, entity_id: EntityId) -> BoxStream<'_, ClientResult<Event>> {
        stream::once(self.read_record(entity_id))
            .map_ok(|list| stream::iter(list.events.into_iter().map(Ok::<Event, ClientError>)))
            .try_flatten()
            .boxed()
    }

    async fn call<Req, Rep>(&self, url: &Url, request: &Req) -> ClientResult<Rep>
    where
        Req: Serialize + ?Sized,
        Rep: DeserializeOwned,
    {
        let response = self.http.post(url.clone()).json(request).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Rep>().await?);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&text).map_or(text, |body| body.error);
        debug!(%status, %message, "call rejected");
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
