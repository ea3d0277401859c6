use std::net::{Ipv6Addr, SocketAddr};

/// Default port of the Esto service.
pub const DEFAULT_PORT: u16 = 50051;

/// Configuration for the Esto service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on (default: `[::1]:50051`)
    pub listen_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv6Addr::LOCALHOST, DEFAULT_PORT)),
        }
    }
}
