//! HTTP server implementation for wirehttp-rs.
//!
//! Accepts TCP connections, parses one request per connection and hands it
//! to a [`Handler`] together with a [`ResponseWriter`](crate::ResponseWriter)
//! bound to that connection.

mod config;
mod error;
mod handler;
mod http_server;

// Re-export public items
pub use config::{ServerConfig, DEFAULT_PORT};
pub use error::Error;
pub use handler::{Handler, HandlerError, HandlerFuture};
pub use http_server::{serve, HttpServer};
