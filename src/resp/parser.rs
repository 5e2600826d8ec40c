//! Incremental RESP parser.
//!
//! Bytes arrive in arbitrary chunks. The parser appends each chunk to a
//! retained buffer and runs a recursive-descent decode from the start of
//! that buffer. A decode has three outcomes:
//!
//! - a complete value: the reply callback is invoked and the consumed bytes
//!   are trimmed from the buffer
//! - incomplete data: nothing is delivered and the buffer is kept as-is, so
//!   the next chunk retries from the start
//! - a protocol error or an error reply: the buffer is discarded and the
//!   error is returned from [`Parser::parse`]

use super::error::DecodeError;
use super::types::{RespType, CR, CRLF, LF};
use super::value::Value;
use bytes::{Buf, Bytes, BytesMut};
use std::fmt;
use tracing::{debug, trace};

/// Default limit on nested arrays.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parser tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum array nesting depth. The outermost array is depth 1.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Callback receiving each fully decoded top-level value.
pub type ReplyCallback = Box<dyn FnMut(Value) + Send>;

/// Stateful decoder for one connection.
pub struct Parser {
    /// Bytes received but not yet consumed by a delivered value.
    buffer: BytesMut,
    config: ParserConfig,
    on_reply: ReplyCallback,
}

impl Parser {
    /// Create a parser with the default configuration.
    pub fn new<F>(on_reply: F) -> Self
    where
        F: FnMut(Value) + Send + 'static,
    {
        Self::with_config(ParserConfig::default(), on_reply)
    }

    pub fn with_config<F>(config: ParserConfig, on_reply: F) -> Self
    where
        F: FnMut(Value) + Send + 'static,
    {
        Parser {
            buffer: BytesMut::new(),
            config,
            on_reply: Box::new(on_reply),
        }
    }

    /// Append a chunk and attempt one top-level decode.
    ///
    /// Incomplete data is not an error: `Ok(())` is returned and the bytes
    /// stay buffered. Any other failure clears the buffer before returning.
    pub fn parse(&mut self, chunk: &[u8]) -> Result<(), DecodeError> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.buffer.extend_from_slice(chunk);
        trace!(chunk = chunk.len(), buffered = self.buffer.len(), "appended chunk");
        self.decode_next().map(|_| ())
    }

    /// Attempt one top-level decode of bytes already buffered.
    ///
    /// Returns `Ok(true)` if a value was delivered. Used to drain replies
    /// left behind when one chunk carried more than one value.
    pub fn parse_buffered(&mut self) -> Result<bool, DecodeError> {
        if self.buffer.is_empty() {
            return Ok(false);
        }
        self.decode_next()
    }

    /// Number of bytes retained and not yet delivered.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Discard all buffered bytes.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    fn decode_next(&mut self) -> Result<bool, DecodeError> {
        match decode(&self.buffer, self.config.max_depth) {
            Ok((value, consumed)) => {
                self.buffer.advance(consumed);
                trace!(consumed, remaining = self.buffer.len(), "decoded value");
                (self.on_reply)(value);
                Ok(true)
            }
            Err(DecodeError::Incomplete) => {
                trace!(buffered = self.buffer.len(), "incomplete, awaiting more bytes");
                Ok(false)
            }
            Err(e) => {
                debug!(error = %e, discarded = self.buffer.len(), "decode failed, resetting parser");
                self.reset();
                Err(e)
            }
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("buffered", &self.buffer.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Decode one value from the start of `buffer`.
///
/// Returns the value and the number of bytes it occupied.
pub fn decode(buffer: &[u8], max_depth: usize) -> Result<(Value, usize), DecodeError> {
    let mut cursor = Cursor {
        buffer,
        pos: 0,
        max_depth,
    };
    let value = cursor.read_value(0)?;
    Ok((value, cursor.pos))
}

/// Find CRLF at or after `from`, return position of \r
pub(crate) fn find_terminator(buffer: &[u8], from: usize) -> Option<usize> {
    (from..buffer.len().saturating_sub(1)).find(|&i| buffer[i] == CR && buffer[i + 1] == LF)
}

/// Read position over a borrowed buffer.
struct Cursor<'a> {
    buffer: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl Cursor<'_> {
    /// `depth` is the number of arrays enclosing this value.
    fn read_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let tag = *self.buffer.get(self.pos).ok_or(DecodeError::Incomplete)?;
        self.pos += 1;

        match RespType::from_tag(tag).ok_or(DecodeError::UnknownType(tag))? {
            RespType::SimpleString => self.read_simple_string(),
            RespType::Error => Err(self.read_error()),
            RespType::Integer => self.read_integer().map(Value::Integer),
            RespType::BulkString => self.read_bulk_string(),
            RespType::Array => self.read_array(depth + 1),
        }
    }

    /// Position of the next terminator, or incomplete if none is buffered yet.
    fn terminator(&self) -> Result<usize, DecodeError> {
        find_terminator(self.buffer, self.pos).ok_or(DecodeError::Incomplete)
    }

    /// +OK\r\n, keeping the CRLF in the text
    fn read_simple_string(&mut self) -> Result<Value, DecodeError> {
        let end = self.terminator()? + CRLF.len();
        let text = std::str::from_utf8(&self.buffer[self.pos..end])
            .map_err(|_| DecodeError::InvalidUtf8)?;
        self.pos = end;
        Ok(Value::Simple(text.to_string()))
    }

    /// -ERR message\r\n
    fn read_error(&mut self) -> DecodeError {
        let end = match self.terminator() {
            Ok(end) => end,
            Err(incomplete) => return incomplete,
        };
        let text = String::from_utf8_lossy(&self.buffer[self.pos..end]).into_owned();
        self.pos = end + CRLF.len();
        DecodeError::Remote(text)
    }

    /// :1000\r\n, also used for bulk lengths and array counts
    fn read_integer(&mut self) -> Result<i64, DecodeError> {
        let end = self.terminator()?;
        let raw = &self.buffer[self.pos..end];
        let n = std::str::from_utf8(raw)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| DecodeError::InvalidInteger(String::from_utf8_lossy(raw).into_owned()))?;
        self.pos = end + CRLF.len();
        Ok(n)
    }

    /// $5\r\nhello\r\n or $-1\r\n
    fn read_bulk_string(&mut self) -> Result<Value, DecodeError> {
        let len = match self.read_integer()? {
            -1 => return Ok(Value::Bulk(None)),
            len => usize::try_from(len).map_err(|_| DecodeError::InvalidLength(len))?,
        };

        let data_start = self.pos;
        let data_end = data_start.saturating_add(len);
        if data_end.saturating_add(CRLF.len()) > self.buffer.len() {
            return Err(DecodeError::Incomplete);
        }
        if &self.buffer[data_end..data_end + CRLF.len()] != CRLF {
            return Err(DecodeError::MissingTerminator);
        }

        let data = Bytes::copy_from_slice(&self.buffer[data_start..data_end]);
        self.pos = data_end + CRLF.len();
        Ok(Value::Bulk(Some(data)))
    }

    /// *2\r\n... or *-1\r\n; `depth` counts this array
    fn read_array(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth > self.max_depth {
            return Err(DecodeError::NestingTooDeep(depth));
        }

        let count = match self.read_integer()? {
            -1 => return Ok(Value::Array(None)),
            count => usize::try_from(count).map_err(|_| DecodeError::InvalidLength(count))?,
        };

        // every element takes at least 3 bytes, so cap the up-front allocation
        let mut values = Vec::with_capacity(count.min(self.buffer.len() - self.pos));
        while values.len() < count {
            if self.pos >= self.buffer.len() {
                return Err(DecodeError::Incomplete);
            }
            values.push(self.read_value(depth)?);
        }
        Ok(Value::Array(Some(values)))
    }
}
