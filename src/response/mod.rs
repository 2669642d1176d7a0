//! HTTP response writing.
//!
//! [`ResponseWriter`] emits a response directly onto a connection, either
//! with a fixed-length body or with chunked transfer-encoding and
//! trailers. The header builders here produce the header sets for those
//! two framings; Content-Length and Transfer-Encoding never appear together.

mod status;
mod writer;
mod error;
mod tests;

// Re-export public items
pub use status::StatusCode;
pub use writer::{ResponseWriter, WriterState};
pub use error::Error;

use crate::headers::Headers;

/// Content type used by the header builders.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Headers for a response with a body of `content_length` bytes.
pub fn default_headers(content_length: usize) -> Headers {
    let mut headers = Headers::new();
    headers.set("content-length", content_length.to_string());
    headers.set("connection", "close");
    headers.set("content-type", DEFAULT_CONTENT_TYPE);
    headers
}

/// Headers for a response with a chunked body.
pub fn chunked_headers() -> Headers {
    let mut headers = Headers::new();
    headers.set("transfer-encoding", "chunked");
    headers.set("connection", "close");
    headers.set("content-type", DEFAULT_CONTENT_TYPE);
    headers
}
