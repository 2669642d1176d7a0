//! HTTP request parser module.
//!
//! The parser is a resumable state machine: it consumes an arbitrarily
//! fragmented byte stream and produces a structurally validated HTTP/1.1
//! request.

mod request;
mod error;

// Re-export public items
pub use request::{ParseState, Request, RequestLine, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_BUFFER_SIZE};
pub use error::Error;

// Re-export the stream parsing functions
pub use request::{request_from_reader, request_from_reader_with_capacity};
