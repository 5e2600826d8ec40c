//! Decoded RESP values.

use bytes::Bytes;
use std::fmt;

/// A fully decoded RESP value.
///
/// Error replies have no variant here: decoding one fails the parse with
/// [`DecodeError::Remote`](super::DecodeError::Remote) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Simple string: +OK\r\n
    ///
    /// The text keeps its trailing CRLF, so `+OK\r\n` decodes to `"OK\r\n"`.
    Simple(String),
    /// Integer: :1000\r\n
    Integer(i64),
    /// Bulk string: $5\r\nhello\r\n or $-1\r\n (null)
    Bulk(Option<Bytes>),
    /// Array: *2\r\n... or *-1\r\n (null)
    Array(Option<Vec<Value>>),
}

impl Value {
    pub fn simple<S: Into<String>>(s: S) -> Value {
        Value::Simple(s.into())
    }

    pub fn integer(n: i64) -> Value {
        Value::Integer(n)
    }

    pub fn bulk<B: Into<Bytes>>(data: B) -> Value {
        Value::Bulk(Some(data.into()))
    }

    /// Null bulk string.
    pub fn null() -> Value {
        Value::Bulk(None)
    }

    pub fn array(values: Vec<Value>) -> Value {
        Value::Array(Some(values))
    }

    /// Null array.
    pub fn null_array() -> Value {
        Value::Array(None)
    }

    /// True for the null bulk string and the null array.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Bulk(None) | Value::Array(None))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bulk(&self) -> Option<&Bytes> {
        match self {
            Value::Bulk(Some(data)) => Some(data),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(Some(values)) => Some(values),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Simple(s) => write!(f, "\"{}\"", s.escape_debug()),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Bulk(Some(data)) => write!(f, "\"{}\"", data.escape_ascii()),
            Value::Bulk(None) | Value::Array(None) => f.write_str("nil"),
            Value::Array(Some(values)) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}
