//! RESP (Redis Serialization Protocol) codec.
//!
//! - `types`: type tags and the CRLF terminator
//! - `encoder`: command tokens to wire bytes
//! - `parser`: incremental decoding of wire bytes into [`Value`]s

pub mod encoder;
pub mod error;
pub mod parser;
pub mod types;
pub mod value;

pub use encoder::{
    encode_array, encode_integer, encode_line, encode_string, encode_value, Classified, Item,
};
pub use error::DecodeError;
pub use parser::{decode, Parser, ParserConfig, ReplyCallback, DEFAULT_MAX_DEPTH};
pub use types::{RespType, CRLF};
pub use value::Value;
