//! Order-enforcing HTTP response writer.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::headers::Headers;
use crate::response::error::Error;
use crate::response::status::StatusCode;

/// Where a [`ResponseWriter`] is in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Init,
    StatusWritten,
    HeadersWritten,
    BodyWritten,
    ChunkedWriting,
    ChunkedDone,
    TrailersWritten,
    TrailersDone,
}

/// Writes one HTTP/1.1 response onto a byte sink.
///
/// Operations must be called in wire order: status line, headers, then
/// either a plain body or chunks followed by the terminator and trailers.
/// A call out of order fails with [`Error::OutOfOrder`] without writing
/// anything, and the state only advances after a successful write.
pub struct ResponseWriter<'a> {
    sink: &'a mut (dyn AsyncWrite + Unpin + Send),
    state: WriterState,
}

impl<'a> ResponseWriter<'a> {
    /// Create a writer bound to `sink`.
    pub fn new(sink: &'a mut (dyn AsyncWrite + Unpin + Send)) -> Self {
        Self {
            sink,
            state: WriterState::Init,
        }
    }

    /// Current writer state.
    pub fn state(&self) -> WriterState {
        self.state
    }

    fn expect_state(&self, operation: &'static str, allowed: &[WriterState]) -> Result<(), Error> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(Error::OutOfOrder {
                operation,
                state: self.state,
            })
        }
    }

    /// Write the status line. Must be called first.
    pub async fn write_status_line(&mut self, status: StatusCode) -> Result<(), Error> {
        self.expect_state("write_status_line", &[WriterState::Init])?;
        self.sink.write_all(status.status_line().as_bytes()).await?;
        self.state = WriterState::StatusWritten;
        Ok(())
    }

    /// Write the header section, including the blank line that ends it.
    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), Error> {
        self.expect_state("write_headers", &[WriterState::StatusWritten])?;
        let mut bytes = headers.to_field_lines();
        bytes.extend_from_slice(b"\r\n");
        self.sink.write_all(&bytes).await?;
        self.state = WriterState::HeadersWritten;
        Ok(())
    }

    /// Write raw body bytes. Can be called multiple times.
    pub async fn write_body(&mut self, body: &[u8]) -> Result<usize, Error> {
        self.expect_state(
            "write_body",
            &[WriterState::HeadersWritten, WriterState::BodyWritten],
        )?;
        self.sink.write_all(body).await?;
        self.state = WriterState::BodyWritten;
        Ok(body.len())
    }

    /// Write one chunk of a chunked body: `<hex size>\r\n<data>\r\n`.
    ///
    /// An empty `chunk` would read as the terminating chunk on the wire;
    /// use [`ResponseWriter::write_chunked_body_done`] to end the body.
    pub async fn write_chunked_body(&mut self, chunk: &[u8]) -> Result<usize, Error> {
        self.expect_state(
            "write_chunked_body",
            &[WriterState::HeadersWritten, WriterState::ChunkedWriting],
        )?;
        let mut bytes = format!("{:x}\r\n", chunk.len()).into_bytes();
        bytes.extend_from_slice(chunk);
        bytes.extend_from_slice(b"\r\n");
        self.sink.write_all(&bytes).await?;
        self.state = WriterState::ChunkedWriting;
        Ok(chunk.len())
    }

    /// Write the terminating zero-size chunk.
    pub async fn write_chunked_body_done(&mut self) -> Result<(), Error> {
        self.expect_state("write_chunked_body_done", &[WriterState::ChunkedWriting])?;
        self.sink.write_all(b"0\r\n\r\n").await?;
        self.state = WriterState::ChunkedDone;
        Ok(())
    }

    /// Write trailer fields after the terminating chunk.
    pub async fn write_trailers(&mut self, trailers: &Headers) -> Result<(), Error> {
        self.expect_state("write_trailers", &[WriterState::ChunkedDone])?;
        self.sink.write_all(&trailers.to_field_lines()).await?;
        self.state = WriterState::TrailersWritten;
        Ok(())
    }

    /// Write the blank line that ends the trailer section.
    pub async fn write_trailers_done(&mut self) -> Result<(), Error> {
        self.expect_state("write_trailers_done", &[WriterState::TrailersWritten])?;
        self.sink.write_all(b"\r\n").await?;
        self.state = WriterState::TrailersDone;
        Ok(())
    }

    /// Flush any bytes buffered by the sink.
    pub async fn flush(&mut self) -> Result<(), Error> {
        self.sink.flush().await?;
        Ok(())
    }
}
