//! Client for the Esto event store.
//!
//! [`Client`] wraps the two remote procedures of the service: `write` stores
//! one event and returns the service's status message, `read` streams every
//! event of an entity back. The [`bench`] module drives a batch of writes and
//! times it.
//!
//! ```no_run
//! use esto_client::Client;
//! use esto_types::{EntityId, EntityType, EventName};
//! use futures::TryStreamExt;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::connect("http://localhost:50051")?;
//! let entity_id: EntityId = "95C6D7EF-58E1-4C32-A1C6-7A11CB63C759".parse()?;
//!
//! let message = client
//!     .write(
//!         entity_id,
//!         EntityType::try_new("MyThing")?,
//!         EventName::try_new("ThingDoneToMyThing")?,
//!         &json!({ "a": 1, "b": 2 }),
//!     )
//!     .await?;
//! println!("{message}");
//!
//! let events: Vec<_> = client.read(entity_id).try_collect().await?;
//! println!("{} events", events.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bench;
mod client;
mod error;

pub use client::Client;
pub use error::{ClientError, ClientResult};
