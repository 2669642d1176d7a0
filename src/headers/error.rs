//! Error types for header field parsing.

use thiserror::Error;

/// Errors that can occur while parsing a header field line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The field line has no colon separating name and value.
    #[error("Invalid header format: no colon found")]
    MissingColon,

    /// The field name is followed by whitespace before the colon.
    #[error("Invalid header format: whitespace before colon")]
    WhitespaceBeforeColon,

    /// The field name contains embedded whitespace.
    #[error("Invalid header format: field name contains whitespace")]
    WhitespaceInName,

    /// The field name is empty.
    #[error("Invalid header format: empty field name")]
    EmptyName,

    /// The field name contains characters outside printable ASCII.
    #[error("Invalid header name: {0}")]
    InvalidName(String),

    /// The field value is not valid UTF-8.
    #[error("Invalid header value encoding")]
    InvalidValue,
}
