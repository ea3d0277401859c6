//! Integration tests for Esto
//!
//! This crate runs the real service on an ephemeral port and drives it with
//! the real client. The helpers here are shared by the tests in `tests/`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::net::SocketAddr;

use esto_client::Client;
use esto_memory::InMemoryStorage;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::debug;

/// A service running in the background for the lifetime of the value.
///
/// Dropping it shuts the service down.
#[derive(Debug)]
pub struct TestService {
    /// Address the service listens on
    pub addr: SocketAddr,
    /// Client connected to the service
    pub client: Client,
    /// Storage behind the service, for inspecting what was written
    pub storage: InMemoryStorage,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestService {
    /// Start a service over fresh in-memory storage on `127.0.0.1:0`.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener has an address");
        let storage = InMemoryStorage::new();
        let (shutdown, signal) = oneshot::channel::<()>();

        let served = storage.clone();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = signal.await;
            };
            if let Err(error) = esto_server::serve(listener, served, shutdown).await {
                debug!(%error, "test service stopped with error");
            }
        });

        let client = Client::connect(&format!("http://{addr}")).expect("valid endpoint");
        Self {
            addr,
            client,
            storage,
            shutdown: Some(shutdown),
        }
    }

    /// Base URL of the service.
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
