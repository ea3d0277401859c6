//! Write benchmark driver.
//!
//! Issues the same store call a fixed number of times, one after another,
//! and measures the wall-clock time of the whole batch.

use std::fmt;
use std::time::{Duration, Instant};

use esto_types::{EntityId, EntityType, Event, EventName};
use futures::TryStreamExt;
use serde_json::{Value, json};
use tracing::info;
use uuid::uuid;

use crate::client::Client;
use crate::error::ClientResult;

/// Entity written to when none is given.
pub const DEFAULT_ENTITY_ID: EntityId =
    EntityId::new(uuid!("95C6D7EF-58E1-4C32-A1C6-7A11CB63C759"));

/// Number of writes issued when no count is given.
pub const DEFAULT_REQUEST_COUNT: usize = 499;

/// Entity type written when none is given.
pub const DEFAULT_ENTITY_TYPE: &str = "MyThing";

/// Event name written when none is given.
pub const DEFAULT_EVENT_NAME: &str = "ThingDoneToMyThing";

/// What the driver writes and how often.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    /// Number of sequential writes (default: 499)
    pub count: usize,
    /// Entity every write targets
    pub entity_id: EntityId,
    /// Entity type of every write (default: `MyThing`)
    pub entity_type: EntityType,
    /// Event name of every write (default: `ThingDoneToMyThing`)
    pub event_name: EventName,
    /// Payload of every write (default: `{"a": 1, "b": 2}`)
    pub event_data: Value,
    /// Read the entity back after the batch and count its events
    pub read_back: bool,
}

impl BenchmarkConfig {
    /// Configuration writing `entity_type` / `event_name` events, with
    /// every other setting at its default.
    pub fn new(entity_type: EntityType, event_name: EventName) -> Self {
        Self {
            count: DEFAULT_REQUEST_COUNT,
            entity_id: DEFAULT_ENTITY_ID,
            entity_type,
            event_name,
            event_data: json!({ "a": 1, "b": 2 }),
            read_back: false,
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new(
            EntityType::try_new(DEFAULT_ENTITY_TYPE)
                .expect("default entity type should always be a valid label"),
            EventName::try_new(DEFAULT_EVENT_NAME)
                .expect("default event name should always be a valid label"),
        )
    }
}

/// Outcome of one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkReport {
    /// Writes issued
    pub requests: usize,
    /// Wall-clock time of the write batch
    pub elapsed: Duration,
    /// Events returned by the read-back, if one was requested
    pub events_read: Option<usize>,
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elapsed.as_secs_f64())
    }
}

/// Issue `config.count` writes through `client` and time them.
///
/// Stops at the first failed call and returns its error.
pub async fn run(client: &Client, config: &BenchmarkConfig) -> ClientResult<BenchmarkReport> {
    let start = Instant::now();
    for _ in 0..config.count {
        client
            .write(
                config.entity_id,
                config.entity_type.clone(),
                config.event_name.clone(),
                &config.event_data,
            )
            .await?;
    }
    let elapsed = start.elapsed();
    info!(requests = config.count, ?elapsed, "write batch complete");

    let events_read = if config.read_back {
        let events: Vec<Event> = client.read(config.entity_id).try_collect().await?;
        Some(events.len())
    } else {
        None
    };

    Ok(BenchmarkReport {
        requests: config.count,
        elapsed,
        events_read,
    })
}
