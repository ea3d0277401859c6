//! Network service for the Esto event store.
//!
//! The service exposes two remote procedures as JSON over HTTP POST:
//! store-record appends one event to its entity, and read-record returns
//! every event of an entity in the order it was stored. Message shapes and
//! paths live in [`esto_types::wire`].
//!
//! ```no_run
//! use esto_memory::InMemoryStorage;
//! use esto_server::{ServerConfig, run};
//!
//! # async fn example() -> Result<(), esto_server::ServerError> {
//! run(ServerConfig::default(), InMemoryStorage::new()).await
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::{Router, routing::post};
use esto_types::Storage;
use esto_types::wire::{READ_RECORD_PATH, STORE_RECORD_PATH};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use config::{DEFAULT_PORT, ServerConfig};
pub use error::{ApiError, ServerError};

/// Build the router serving both procedures from `storage`.
pub fn router<S>(storage: S) -> Router
where
    S: Storage + Send + Sync + 'static,
{
    Router::new()
        .route(STORE_RECORD_PATH, post(handlers::store_record::<S>))
        .route(READ_RECORD_PATH, post(handlers::read_record::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(storage))
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<S, F>(listener: TcpListener, storage: S, shutdown: F) -> Result<(), ServerError>
where
    S: Storage + Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(storage))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}

/// Bind `config.listen_addr` and serve until Ctrl-C.
pub async fn run<S>(config: ServerConfig, storage: S) -> Result<(), ServerError>
where
    S: Storage + Send + Sync + 'static,
{
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.listen_addr,
            source,
        })?;

    info!(
        version = esto_types::get_version(),
        addr = %config.listen_addr,
        "esto listening"
    );

    serve(listener, storage, shutdown_signal()).await?;

    info!("esto stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
