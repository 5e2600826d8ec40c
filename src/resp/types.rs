//! RESP type tags and wire constants.
//!
//! Every RESP value starts with a one-byte tag identifying its type:
//!
//! ```text
//! +  simple string   +OK\r\n
//! -  error           -ERR unknown command\r\n
//! :  integer         :1000\r\n
//! $  bulk string     $5\r\nhello\r\n
//! *  array           *2\r\n:1\r\n:2\r\n
//! ```

use std::fmt;

/// Carriage return.
pub const CR: u8 = b'\r';

/// Line feed.
pub const LF: u8 = b'\n';

/// Terminator closing every scalar token.
pub const CRLF: &[u8] = b"\r\n";

/// The five RESP2 value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RespType {
    SimpleString,
    Error,
    Integer,
    BulkString,
    Array,
}

impl RespType {
    /// Wire tag byte for this type.
    pub const fn tag(self) -> u8 {
        match self {
            RespType::SimpleString => b'+',
            RespType::Error => b'-',
            RespType::Integer => b':',
            RespType::BulkString => b'$',
            RespType::Array => b'*',
        }
    }

    /// Look up the type for a wire tag byte.
    pub const fn from_tag(tag: u8) -> Option<RespType> {
        match tag {
            b'+' => Some(RespType::SimpleString),
            b'-' => Some(RespType::Error),
            b':' => Some(RespType::Integer),
            b'$' => Some(RespType::BulkString),
            b'*' => Some(RespType::Array),
            _ => None,
        }
    }

    /// Wire tag as a character.
    pub const fn as_char(self) -> char {
        self.tag() as char
    }
}

impl fmt::Display for RespType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RespType::SimpleString => "simple string",
            RespType::Error => "error",
            RespType::Integer => "integer",
            RespType::BulkString => "bulk string",
            RespType::Array => "array",
        };
        write!(f, "{name} ({})", self.as_char())
    }
}
