//! HTTP/1.1 over raw byte streams.
//!
//! This library parses requests directly off the wire and writes responses
//! directly onto it, without any higher-level HTTP library.
//!
//! # Features
//!
//! - Incremental request parsing that tolerates arbitrarily fragmented input
//! - Case-insensitive headers that combine repeated fields
//! - An order-enforcing response writer with fixed-length and chunked bodies,
//!   including trailers
//! - A TCP server that serves each connection in its own task
//!
//! Only HTTP/1.1 is accepted, and every connection carries exactly one
//! request.
//!
//! # Examples
//!
//! ## Parsing
//!
//! ```
//! use wirehttp_rs::{ParseState, Request};
//!
//! let mut request = Request::new();
//! let data = b"POST /notes HTTP/1.1\r\nHost: example.com\r\nContent-Length: 5\r\n\r\nhello";
//!
//! // Feed a fragment, then the unconsumed rest together with the remaining bytes
//! let consumed = request.parse(&data[..30]).unwrap();
//! assert_eq!(request.state(), ParseState::ParsingHeaders);
//!
//! request.parse(&data[consumed..]).unwrap();
//! assert!(request.is_done());
//! assert_eq!(request.request_line.method, "POST");
//! assert_eq!(request.header("host"), Some("example.com"));
//! assert_eq!(request.body, b"hello");
//! ```
//!
//! ## Serving
//!
//! ```no_run
//! use wirehttp_rs::{serve, HandlerError, HandlerFuture, Request, ResponseWriter, StatusCode};
//! use wirehttp_rs::response::default_headers;
//!
//! async fn routes(w: &mut ResponseWriter<'_>, req: &Request) -> Result<(), HandlerError> {
//!     if req.request_line.request_target == "/teapot" {
//!         return Err(HandlerError::new(StatusCode(418), "short and stout"));
//!     }
//!     w.write_status_line(StatusCode::OK).await?;
//!     w.write_headers(&default_headers(2)).await?;
//!     w.write_body(b"ok").await?;
//!     Ok(())
//! }
//!
//! fn handler<'a>(w: &'a mut ResponseWriter<'_>, req: &'a Request) -> HandlerFuture<'a> {
//!     Box::pin(routes(w, req))
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), wirehttp_rs::ServerError> {
//! let mut server = serve(42069, handler).await?;
//! tokio::signal::ctrl_c().await?;
//! server.close().await?;
//! # Ok(())
//! # }
//! ```

// Export the header collection
pub mod headers;

// Export the parser module
pub mod parser;

// Export the response module
pub mod response;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use headers::Headers;
pub use parser::{Error as ParserError, ParseState, Request, RequestLine, request_from_reader};
pub use response::{Error as ResponseError, ResponseWriter, StatusCode, WriterState};
pub use server::{
    Error as ServerError, Handler, HandlerError, HandlerFuture, HttpServer, ServerConfig, serve,
};
