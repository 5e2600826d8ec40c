//! resp-codec: an incremental RESP (Redis Serialization Protocol) codec.
//!
//! - [`resp::Parser`] decodes replies from byte chunks as they arrive off a
//!   stream, tolerating arbitrary fragmentation
//! - [`resp::encode_line`] and friends encode commands into RESP arrays
//! - [`stream`] adapts both to tokio `AsyncRead`/`AsyncWrite`
//!
//! ```no_run
//! use resp_codec::resp::{encode_line, Parser};
//!
//! let mut parser = Parser::new(|value| println!("{value}"));
//! parser.parse(b"*2\r\n$5\r\nhello\r\n:1").unwrap();
//! parser.parse(b"00\r\n").unwrap(); // prints ["hello", 100]
//!
//! let command = encode_line("SET greeting hello");
//! ```

pub mod config;
pub mod resp;
pub mod stream;

pub use resp::{DecodeError, Item, Parser, ParserConfig, Value};
