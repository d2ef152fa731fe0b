//! Error types for the pkt-line framing layer.
//!
//! The taxonomy separates malformed length prefixes ([`FramingError`]),
//! streams that stop part-way through a packet ([`EofError`]), and transport
//! failures. [`CodecError`] wraps all three and is what packet sources yield.
//!
//! A stream that ends exactly on a packet boundary is not an error at this
//! layer; whether that ending is acceptable is decided by the request grammar.

use std::io;

use thiserror::Error;

use crate::packet::LENGTH_HEADER_SIZE;

/// Errors in the length prefix or size of a packet.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// The length prefix is not four ASCII hexadecimal digits.
    #[error("invalid length prefix \"{}\"", .prefix.escape_ascii())]
    InvalidLengthEncoding {
        /// Raw prefix bytes as received.
        prefix: [u8; LENGTH_HEADER_SIZE],
    },

    /// The length prefix uses a value with no meaning in request streams.
    #[error("reserved packet length {len:04x}")]
    ReservedLength {
        /// Decoded length value.
        len: usize,
    },

    /// The packet is longer than the configured maximum.
    #[error("packet exceeds max length: {size} > {max}")]
    OversizedFrame {
        /// Packet size, header included.
        size: usize,
        /// Maximum allowed packet size.
        max: usize,
    },
}

/// End of stream inside a packet.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EofError {
    /// The stream ended while the length prefix was being read.
    #[error("premature EOF during header: {bytes_received} of {header_size} header bytes")]
    MidHeader {
        /// Header bytes received before EOF.
        bytes_received: usize,
        /// Expected header size.
        header_size: usize,
    },

    /// The stream ended while the payload was being read.
    #[error("premature EOF: {bytes_received} bytes of {expected} byte payload received")]
    MidFrame {
        /// Payload bytes received before EOF.
        bytes_received: usize,
        /// Payload size announced by the header.
        expected: usize,
    },
}

/// Top-level framing layer error.
///
/// # Examples
///
/// ```
/// use pktwire::codec::{CodecError, FramingError};
///
/// let err = CodecError::Framing(FramingError::ReservedLength { len: 2 });
/// assert_eq!(err.error_type(), "framing");
/// assert_eq!(err.to_string(), "framing error: reserved packet length 0002");
/// ```
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed length prefix or oversized packet.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// Transport I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stream ended inside a packet.
    #[error("EOF: {0}")]
    Eof(#[from] EofError),
}

impl CodecError {
    /// Returns the error category as a string for logging.
    ///
    /// One of `"framing"`, `"io"`, or `"eof"`.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Framing(_) => "framing",
            Self::Io(_) => "io",
            Self::Eof(_) => "eof",
        }
    }

    /// Returns true if the stream stopped inside a packet.
    #[must_use]
    pub fn is_truncation(&self) -> bool { matches!(self, Self::Eof(_)) }
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Io(e) => e,
            CodecError::Framing(e) => io::Error::new(io::ErrorKind::InvalidData, e),
            CodecError::Eof(e) => io::Error::new(io::ErrorKind::UnexpectedEof, e),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
