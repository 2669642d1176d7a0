//! Error types for the HTTP request parser.

use thiserror::Error;

use crate::headers::Error as HeaderError;

/// Errors that can occur during HTTP request parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// The request line does not consist of exactly three space-separated parts.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The method token is not all-uppercase.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The protocol version is not of the form `HTTP/<version>`.
    #[error("Invalid HTTP version format: {0}")]
    InvalidVersion(String),

    /// The protocol version is well-formed but not HTTP/1.1.
    #[error("Only HTTP/1.1 is supported, got HTTP/{0}")]
    UnsupportedVersion(String),

    /// A header field line is invalid.
    #[error("Error parsing headers: {0}")]
    Header(#[from] HeaderError),

    /// The Content-Length header is not a non-negative integer.
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),

    /// The stream ended before the declared body length was received.
    #[error("Incomplete body: expected {expected} bytes, got {received}")]
    IncompleteBody { expected: usize, received: usize },

    /// More input was fed to a request that is already fully parsed.
    #[error("Trying to read data in a done state")]
    AlreadyDone,

    /// The request line or a header line outgrew the read buffer limit.
    #[error("Request head exceeds {0} bytes")]
    RequestTooLarge(usize),

    /// A required header is missing from the request.
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// Error parsing JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error reading from the underlying stream.
    #[error("Error reading data: {0}")]
    IoError(#[from] std::io::Error),
}
