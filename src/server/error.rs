//! Error types for the HTTP server.

use std::net::SocketAddr;
use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::response::Error as ResponseError;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// The listening socket could not be bound.
    #[error("Failed to start server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// Error writing the response.
    #[error("Response error: {0}")]
    ResponseError(#[from] ResponseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The server was already closed.
    #[error("Server is already closed")]
    AlreadyClosed,

    /// The acceptance loop task failed.
    #[error("Acceptance loop failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}
