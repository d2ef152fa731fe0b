//! Packet types for the pkt-line framing layer.
//!
//! Every unit on the wire is a packet: a flush marker, a delimiter marker, or
//! an opaque data payload. The framing prefixes each packet with four
//! lowercase hexadecimal digits giving the total packet length, header
//! included. Flush and delimiter use the reserved lengths `0000` and `0001`.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::FramingError;

/// Size of the hexadecimal length prefix in bytes.
pub const LENGTH_HEADER_SIZE: usize = 4;

/// Largest packet the protocol permits, header included.
pub const MAX_PACKET_LENGTH: usize = 65520;

/// Largest payload a single data packet can carry.
pub const MAX_PAYLOAD_LENGTH: usize = MAX_PACKET_LENGTH - LENGTH_HEADER_SIZE;

/// Wire encoding of a flush packet.
pub const FLUSH_PKT: &[u8; LENGTH_HEADER_SIZE] = b"0000";

/// Wire encoding of a delimiter packet.
pub const DELIM_PKT: &[u8; LENGTH_HEADER_SIZE] = b"0001";

pub(crate) const FLUSH_LEN: usize = 0;
pub(crate) const DELIM_LEN: usize = 1;

/// A single framed unit of the protocol.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use pktwire::packet::Packet;
///
/// let packet = Packet::Data(Bytes::from_static(b"hello\n"));
/// let wire = packet.encode_to_pkt_line().expect("payload fits");
/// assert_eq!(wire.as_ref(), b"000ahello\n");
/// assert_eq!(
///     Packet::Flush.encode_to_pkt_line().expect("flush").as_ref(),
///     b"0000"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Packet {
    /// End of a section or of the session.
    Flush,
    /// Boundary between the capability and argument sections of a request.
    Delimiter,
    /// Opaque payload, carried verbatim.
    Data(Bytes),
}

impl Packet {
    /// Encoded size of this packet, header included.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Flush | Self::Delimiter => LENGTH_HEADER_SIZE,
            Self::Data(payload) => LENGTH_HEADER_SIZE.saturating_add(payload.len()),
        }
    }

    /// Append the framed form of this packet to `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::OversizedFrame`] if the payload exceeds
    /// [`MAX_PAYLOAD_LENGTH`].
    pub fn encode_into(&self, dst: &mut BytesMut) -> Result<(), FramingError> {
        match self {
            Self::Flush => dst.put_slice(FLUSH_PKT),
            Self::Delimiter => dst.put_slice(DELIM_PKT),
            Self::Data(payload) => {
                let len = self.encoded_len();
                if len > MAX_PACKET_LENGTH {
                    return Err(FramingError::OversizedFrame {
                        size: len,
                        max: MAX_PACKET_LENGTH,
                    });
                }
                dst.reserve(len);
                dst.put_slice(&write_length_prefix(len));
                dst.put_slice(payload);
            }
        }
        Ok(())
    }

    /// Return the framed form of this packet as a standalone buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::OversizedFrame`] if the payload exceeds
    /// [`MAX_PAYLOAD_LENGTH`].
    pub fn encode_to_pkt_line(&self) -> Result<Bytes, FramingError> {
        let mut dst = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut dst)?;
        Ok(dst.freeze())
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flush => f.write_str("flush packet"),
            Self::Delimiter => f.write_str("delimiter packet"),
            Self::Data(payload) => write!(f, "data packet \"{}\"", payload.escape_ascii()),
        }
    }
}

/// Render `len` as a four digit lowercase hexadecimal prefix.
///
/// Callers must ensure `len` fits in 16 bits.
pub(crate) fn write_length_prefix(len: usize) -> [u8; LENGTH_HEADER_SIZE] {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut prefix = [b'0'; LENGTH_HEADER_SIZE];
    let mut rest = len;
    for slot in prefix.iter_mut().rev() {
        *slot = HEX[rest & 0xf];
        rest >>= 4;
    }
    prefix
}

/// Parse a four digit hexadecimal prefix.
///
/// Returns `None` unless every byte is an ASCII hex digit; signs and
/// whitespace are rejected.
pub(crate) fn read_length_prefix(prefix: [u8; LENGTH_HEADER_SIZE]) -> Option<usize> {
    prefix.iter().try_fold(0_usize, |acc, &byte| {
        let digit = char::from(byte).to_digit(16)?;
        Some((acc << 4) | digit as usize)
    })
}
