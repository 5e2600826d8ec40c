//! RESP command encoder.
//!
//! Turns untyped command tokens into RESP wire bytes. Only the request-side
//! forms are produced: integers, bulk strings and arrays. Simple strings and
//! errors are reply-only and never emitted here.
//!
//! Tokens are classified before encoding: a token that is a base-10 integer
//! literal becomes `:<n>\r\n`, anything else becomes a bulk string.
//!
//! ```text
//! encode_line("SET counter 10")
//!   => *3\r\n$3\r\nSET\r\n$7\r\ncounter\r\n:10\r\n
//! ```

use super::types::{RespType, CRLF};
use bytes::BytesMut;

/// An untyped encoder input: a single token or a nested list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Token(String),
    List(Vec<Item>),
}

/// An [`Item`] after type inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified<'a> {
    Integer(i64),
    Text(&'a str),
    Array(&'a [Item]),
}

impl Item {
    /// Decide how this item goes on the wire.
    pub fn classify(&self) -> Classified<'_> {
        match self {
            Item::List(items) => Classified::Array(items),
            Item::Token(token) => match token.parse::<i64>() {
                Ok(n) => Classified::Integer(n),
                Err(_) => Classified::Text(token),
            },
        }
    }
}

impl From<&str> for Item {
    fn from(token: &str) -> Self {
        Item::Token(token.to_string())
    }
}

impl From<String> for Item {
    fn from(token: String) -> Self {
        Item::Token(token)
    }
}

impl From<i64> for Item {
    fn from(n: i64) -> Self {
        Item::Token(n.to_string())
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::List(items)
    }
}

/// Encode an integer: `:<n>\r\n`.
pub fn encode_integer(n: i64) -> BytesMut {
    let mut buf = BytesMut::new();
    put_integer(&mut buf, n);
    buf
}

/// Encode a non-null bulk string: `$<len>\r\n<data>\r\n`.
pub fn encode_string<B: AsRef<[u8]>>(data: B) -> BytesMut {
    let mut buf = BytesMut::new();
    put_string(&mut buf, data.as_ref());
    buf
}

/// Encode an array header followed by every item, in order.
pub fn encode_array<I: AsRef<[Item]>>(items: I) -> BytesMut {
    let mut buf = BytesMut::new();
    put_array(&mut buf, items.as_ref());
    buf
}

/// Encode a single item according to its classification.
pub fn encode_value(item: &Item) -> BytesMut {
    let mut buf = BytesMut::new();
    put_value(&mut buf, item);
    buf
}

/// Encode a command line as an array of its space-separated tokens.
///
/// Splits on every single space; there is no quoting or escaping, and
/// consecutive spaces produce empty bulk strings.
pub fn encode_line(line: &str) -> BytesMut {
    let items: Vec<Item> = line.split(' ').map(Item::from).collect();
    encode_array(items)
}

fn put_integer(buf: &mut BytesMut, n: i64) {
    buf.extend_from_slice(&[RespType::Integer.tag()]);
    buf.extend_from_slice(n.to_string().as_bytes());
    buf.extend_from_slice(CRLF);
}

fn put_string(buf: &mut BytesMut, data: &[u8]) {
    buf.extend_from_slice(&[RespType::BulkString.tag()]);
    buf.extend_from_slice(data.len().to_string().as_bytes());
    buf.extend_from_slice(CRLF);
    buf.extend_from_slice(data);
    buf.extend_from_slice(CRLF);
}

fn put_array(buf: &mut BytesMut, items: &[Item]) {
    buf.extend_from_slice(&[RespType::Array.tag()]);
    buf.extend_from_slice(items.len().to_string().as_bytes());
    buf.extend_from_slice(CRLF);
    for item in items {
        put_value(buf, item);
    }
}

fn put_value(buf: &mut BytesMut, item: &Item) {
    match item.classify() {
        Classified::Array(items) => put_array(buf, items),
        Classified::Integer(n) => put_integer(buf, n),
        Classified::Text(text) => put_string(buf, text.as_bytes()),
    }
}
