//! HTTP header field collection.
//!
//! Field names are case-insensitive and stored lowercased. A second field
//! line with the same name is folded into the existing value as
//! `"first, second"`; use [`Headers::replace`] to overwrite instead.
//!
//! # Examples
//!
//! ```
//! use wirehttp_rs::Headers;
//!
//! let mut headers = Headers::new();
//! headers.set("Accept", "text/html");
//! headers.set("accept", "application/json");
//! assert_eq!(headers.get("ACCEPT"), Some("text/html, application/json"));
//!
//! headers.replace("Accept", "*/*");
//! assert_eq!(headers.get("accept"), Some("*/*"));
//! ```

mod error;

use indexmap::IndexMap;
use serde::Serialize;

pub use error::Error;

/// Case-insensitive header storage, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Headers {
    fields: IndexMap<String, String>,
}

impl Headers {
    /// Create an empty header collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a single field line from the front of `data`.
    ///
    /// Returns the number of bytes consumed and whether the empty line that
    /// terminates the header section was reached. `(0, false)` means no
    /// complete line is buffered yet and more data is needed.
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), Error> {
        let Some(line_end) = find_crlf(data) else {
            return Ok((0, false));
        };

        // An empty line ends the header section
        if line_end == 0 {
            return Ok((2, true));
        }

        let line = &data[..line_end];
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(Error::MissingColon)?;
        let (raw_name, raw_value) = (&line[..colon], &line[colon + 1..]);

        if raw_name.last().is_some_and(u8::is_ascii_whitespace) {
            return Err(Error::WhitespaceBeforeColon);
        }

        let start = raw_name
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(raw_name.len());
        let name = &raw_name[start..];
        validate_name(name)?;

        let value = std::str::from_utf8(raw_value)
            .map_err(|_| Error::InvalidValue)?
            .trim();

        self.set(&String::from_utf8_lossy(name), value);
        Ok((line_end + 2, false))
    }

    /// Add a field, combining it with any existing value of the same name.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.get_mut(&name.to_ascii_lowercase()) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            None => {
                self.fields.insert(name.to_ascii_lowercase(), value);
            }
        }
    }

    /// Set a field, overwriting any existing value of the same name.
    pub fn replace(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Get the value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Remove a field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.shift_remove(&name.to_ascii_lowercase())
    }

    /// Whether a field with this name (any case) is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_ascii_lowercase())
    }

    /// Number of distinct field names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are stored.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize the fields as `name: value\r\n` lines.
    pub(crate) fn to_field_lines(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (name, value) in self.iter() {
            bytes.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }
        bytes
    }
}

/// Field names must be non-empty printable ASCII without whitespace.
fn validate_name(name: &[u8]) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if name.iter().any(u8::is_ascii_whitespace) {
        return Err(Error::WhitespaceInName);
    }
    if !name.iter().all(u8::is_ascii_graphic) {
        return Err(Error::InvalidName(String::from_utf8_lossy(name).into_owned()));
    }
    Ok(())
}

/// Position of the first CRLF in `data`, if any.
pub(crate) fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(2).position(|w| w == b"\r\n")
}
