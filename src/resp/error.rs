//! Decode errors.

/// Error type for RESP decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Need more data to complete the current value.
    /// Not fatal: the parser keeps its buffer and retries on the next chunk.
    #[error("incomplete data")]
    Incomplete,

    /// Leading byte is not a RESP type tag.
    #[error("unrecognized message type: {:?}", tag_char(.0))]
    UnknownType(u8),

    /// The peer sent an error reply. Carries the text verbatim.
    #[error("{0}")]
    Remote(String),

    /// Integer, length or count text is not a base-10 integer.
    #[error("invalid integer: {0:?}")]
    InvalidInteger(String),

    /// Negative bulk string length or array count other than -1.
    #[error("invalid length: {0}")]
    InvalidLength(i64),

    /// Bulk payload not followed by CRLF.
    #[error("bulk string missing trailing CRLF")]
    MissingTerminator,

    /// Simple string text is not UTF-8.
    #[error("invalid UTF-8 in simple string")]
    InvalidUtf8,

    /// Arrays nested beyond the configured limit.
    #[error("nesting too deep: depth {0} exceeds limit")]
    NestingTooDeep(usize),
}

fn tag_char(tag: &u8) -> char {
    *tag as char
}

impl DecodeError {
    /// Returns true if this error only means more bytes are needed.
    #[inline]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, DecodeError::Incomplete)
    }
}
