//! Server configuration.

use std::net::SocketAddr;
use serde::Deserialize;

/// Port used when no configuration is given.
pub const DEFAULT_PORT: u16 = 42069;

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The initial size of each connection's read buffer.
    pub read_buffer_size: usize,
    /// The size a read buffer may grow to before the request is rejected.
    pub max_buffer_size: usize,
}

impl ServerConfig {
    /// Configuration listening on all interfaces at `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            ..Self::default()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            read_buffer_size: 8192,
            max_buffer_size: 64 * 1024,
        }
    }
}
