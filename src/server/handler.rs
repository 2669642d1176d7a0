//! The handler contract between the server and route logic.

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

use crate::parser::Request;
use crate::response::{default_headers, Error as ResponseError, ResponseWriter, StatusCode};

/// Type alias for the boxed future returned by a [`Handler`].
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<(), HandlerError>> + Send + 'a>>;

/// Route logic invoked once per parsed request.
///
/// On `Ok(())` the handler has driven the writer through a complete
/// response. On `Err` the server renders the [`HandlerError`] through the
/// same writer, which only succeeds if nothing was written yet.
///
/// Plain functions with the matching signature implement this trait:
///
/// ```
/// use wirehttp_rs::{HandlerError, HandlerFuture, Request, ResponseWriter, StatusCode};
/// use wirehttp_rs::response::default_headers;
///
/// async fn hello(w: &mut ResponseWriter<'_>, _req: &Request) -> Result<(), HandlerError> {
///     w.write_status_line(StatusCode::OK).await?;
///     w.write_headers(&default_headers(5)).await?;
///     w.write_body(b"hello").await?;
///     Ok(())
/// }
///
/// fn handler<'a>(w: &'a mut ResponseWriter<'_>, req: &'a Request) -> HandlerFuture<'a> {
///     Box::pin(hello(w, req))
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    fn handle<'a>(
        &'a self,
        writer: &'a mut ResponseWriter<'_>,
        request: &'a Request,
    ) -> HandlerFuture<'a>;
}

impl<F> Handler for F
where
    F: for<'a, 'b> Fn(&'a mut ResponseWriter<'b>, &'a Request) -> HandlerFuture<'a>
        + Send
        + Sync
        + 'static,
{
    fn handle<'a>(
        &'a self,
        writer: &'a mut ResponseWriter<'_>,
        request: &'a Request,
    ) -> HandlerFuture<'a> {
        self(writer, request)
    }
}

/// A request-level failure reported by a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct HandlerError {
    /// The status code to respond with.
    pub status: StatusCode,
    /// The plain-text response body.
    pub message: String,
}

impl HandlerError {
    /// Create an error that renders as `status` with `message` as the body.
    pub fn new(status: impl Into<StatusCode>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Write this error as a complete plain-text response.
    pub async fn write_to(&self, writer: &mut ResponseWriter<'_>) -> Result<(), ResponseError> {
        let body = self.message.as_bytes();
        writer.write_status_line(self.status).await?;
        writer.write_headers(&default_headers(body.len())).await?;
        writer.write_body(body).await?;
        writer.flush().await?;
        Ok(())
    }
}

// Lets handlers use `?` on writer calls.
impl From<ResponseError> for HandlerError {
    fn from(e: ResponseError) -> Self {
        HandlerError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}
