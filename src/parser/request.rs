//! HTTP request representation and incremental parsing.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::headers::{find_crlf, Headers};
use crate::parser::error::Error;

/// Initial size of the read buffer used by [`request_from_reader`].
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Upper bound on the read buffer used by [`request_from_reader`].
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 64 * 1024;

/// The only protocol version this parser accepts.
const SUPPORTED_VERSION: &str = "1.1";

/// Progress of a [`Request`] through the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    Initialized,
    ParsingHeaders,
    ParsingBody,
    Done,
}

/// The first line of an HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestLine {
    /// The HTTP method, always uppercase (GET, POST, ...)
    pub method: String,
    /// The request target, as sent by the client
    pub request_target: String,
    /// The protocol version without the `HTTP/` prefix, always `1.1`
    pub http_version: String,
}

/// Represents an HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Request {
    /// The parsed request line
    pub request_line: RequestLine,
    /// The HTTP headers
    pub headers: Headers,
    /// The request body, exactly Content-Length bytes once parsing is done
    pub body: Vec<u8>,
    #[serde(skip)]
    state: ParseState,
}

impl Request {
    /// Create an empty request ready to be fed with [`Request::parse`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current parser state.
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Whether the request has been completely parsed.
    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The declared body length, if the request carries a Content-Length header.
    pub fn content_length(&self) -> Result<Option<usize>, Error> {
        self.headers
            .get("content-length")
            .map(|value| {
                value
                    .parse::<usize>()
                    .map_err(|_| Error::InvalidContentLength(value.to_string()))
            })
            .transpose()
    }

    /// Check if the request has a JSON body.
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }

    /// Parse the request body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }

        let json = serde_json::from_slice(&self.body)?;
        Ok(json)
    }

    /// Feed buffered bytes to the parser.
    ///
    /// Runs the state machine for as long as each step makes progress and
    /// returns the total number of bytes consumed. Bytes that were not
    /// consumed must be kept by the caller and passed again, followed by
    /// newly received data. Feeding a request that is already done is an
    /// error.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, Error> {
        if self.is_done() {
            return Err(Error::AlreadyDone);
        }

        let mut total = 0;
        while !self.is_done() {
            let n = self.parse_single(&data[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }

    /// Run one step of the state machine, returning the bytes consumed.
    fn parse_single(&mut self, data: &[u8]) -> Result<usize, Error> {
        match self.state {
            ParseState::Initialized => {
                let Some((request_line, n)) = parse_request_line(data)? else {
                    return Ok(0);
                };
                self.request_line = request_line;
                self.state = ParseState::ParsingHeaders;
                Ok(n)
            }
            ParseState::ParsingHeaders => {
                let (n, done) = self.headers.parse(data)?;
                if done {
                    self.state = ParseState::ParsingBody;
                }
                Ok(n)
            }
            ParseState::ParsingBody => {
                let Some(content_length) = self.content_length()? else {
                    self.state = ParseState::Done;
                    return Ok(0);
                };

                // Never take bytes past the declared length; they belong to the next message
                let remaining = content_length - self.body.len();
                let take = remaining.min(data.len());
                self.body.extend_from_slice(&data[..take]);

                if self.body.len() == content_length {
                    self.state = ParseState::Done;
                }
                Ok(take)
            }
            ParseState::Done => Err(Error::AlreadyDone),
        }
    }

    /// Apply the end-of-stream policy.
    ///
    /// A body that was declared but not fully received is an error. In any
    /// other state the request is accepted with whatever was parsed.
    fn finish(&mut self) -> Result<(), Error> {
        if self.state == ParseState::ParsingBody {
            if let Some(expected) = self.content_length()? {
                if self.body.len() < expected {
                    return Err(Error::IncompleteBody {
                        expected,
                        received: self.body.len(),
                    });
                }
            }
        }
        self.state = ParseState::Done;
        Ok(())
    }
}

/// Parse the request line at the front of `data`.
///
/// Returns `None` when no complete line is buffered yet.
fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, Error> {
    let Some(line_end) = find_crlf(data) else {
        return Ok(None);
    };

    let line = std::str::from_utf8(&data[..line_end])
        .map_err(|_| Error::MalformedRequestLine("Invalid UTF-8".to_string()))?;

    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
        return Err(Error::MalformedRequestLine(line.to_string()));
    }

    let method = parts[0];
    if method != method.to_uppercase() {
        return Err(Error::InvalidMethod(method.to_string()));
    }

    let version = match parts[2].split('/').collect::<Vec<_>>()[..] {
        ["HTTP", version] => version,
        _ => return Err(Error::InvalidVersion(parts[2].to_string())),
    };
    if version != SUPPORTED_VERSION {
        return Err(Error::UnsupportedVersion(version.to_string()));
    }

    let request_line = RequestLine {
        method: method.to_string(),
        request_target: parts[1].to_string(),
        http_version: version.to_string(),
    };
    Ok(Some((request_line, line_end + 2)))
}

/// Parse an HTTP request from an async byte stream.
pub async fn request_from_reader<R>(reader: &mut R) -> Result<Request, Error>
where
    R: AsyncRead + Unpin,
{
    request_from_reader_with_capacity(reader, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_BUFFER_SIZE).await
}

/// Parse an HTTP request from an async byte stream, starting with a read
/// buffer of `initial_capacity` bytes.
///
/// The buffer doubles whenever a read finds it full, up to `max_size` bytes.
/// Unconsumed bytes are shifted to the front between reads. Reading stops as
/// soon as the request is done, so bytes of a following message may remain
/// unread in `reader`.
///
/// A full buffer always holds one unfinished line, since body bytes are
/// consumed as they arrive. Hitting `max_size` therefore means the request
/// line or a header line is too long, and fails with
/// [`Error::RequestTooLarge`]. Bodies are not limited by `max_size`.
pub async fn request_from_reader_with_capacity<R>(
    reader: &mut R,
    initial_capacity: usize,
    max_size: usize,
) -> Result<Request, Error>
where
    R: AsyncRead + Unpin,
{
    let max_size = max_size.max(1);
    let mut buf = vec![0; initial_capacity.clamp(1, max_size)];
    let mut read_to = 0;
    let mut request = Request::new();

    while !request.is_done() {
        if read_to == buf.len() {
            if buf.len() >= max_size {
                return Err(Error::RequestTooLarge(max_size));
            }
            buf.resize((buf.len() * 2).min(max_size), 0);
        }

        let n = reader.read(&mut buf[read_to..]).await?;
        if n == 0 {
            request.finish()?;
            break;
        }
        read_to += n;

        let consumed = request.parse(&buf[..read_to])?;
        buf.copy_within(consumed..read_to, 0);
        read_to -= consumed;
    }

    Ok(request)
}
