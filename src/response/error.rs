//! Error types for the response writer.

use thiserror::Error;

use crate::response::writer::WriterState;

/// Errors that can occur while writing a response.
#[derive(Debug, Error)]
pub enum Error {
    /// A writer operation was called in the wrong order.
    #[error("{operation} called out of order (writer state: {state:?})")]
    OutOfOrder {
        operation: &'static str,
        state: WriterState,
    },

    /// Error writing to the underlying stream.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
