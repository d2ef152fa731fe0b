//! pkt-line framing codec.
//!
//! [`PktLineCodec`] splits a byte stream into [`Packet`]s and frames outgoing
//! packets. It implements the `tokio_util` codec traits so it can drive both
//! the blocking [`PacketScanner`](crate::scanner::PacketScanner) and any
//! `Framed` transport a caller builds around it.
//!
//! # Wire format
//!
//! ```text
//! [length: 4 hex digits, header included][payload: length - 4 bytes]
//!
//! 0000 flush
//! 0001 delimiter
//! 0002, 0003 reserved
//! 0004.. data
//! ```
//!
//! # Error Handling
//!
//! Decoding failures are reported as [`CodecError`]; see the [`error`]
//! module for the taxonomy.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::{
    packet::{
        DELIM_LEN,
        FLUSH_LEN,
        LENGTH_HEADER_SIZE,
        MAX_PACKET_LENGTH,
        Packet,
        read_length_prefix,
    },
    request::Chunk,
};

pub mod error;

pub use error::{CodecError, EofError, FramingError};

/// Smallest maximum packet length a codec can be configured with.
///
/// Configured lengths are clamped to at least this value so that short
/// protocol lines always fit.
pub const MIN_PACKET_LENGTH: usize = 8;

pub(crate) fn clamp_packet_length(value: usize) -> usize {
    value.clamp(MIN_PACKET_LENGTH, MAX_PACKET_LENGTH)
}

/// Codec for pkt-line framed streams.
///
/// # Examples
///
/// ```
/// use bytes::BytesMut;
/// use pktwire::{codec::PktLineCodec, packet::Packet};
/// use tokio_util::codec::Decoder;
///
/// let mut codec = PktLineCodec::default();
/// let mut buf = BytesMut::from(&b"0009done\n0000"[..]);
///
/// let first = codec.decode(&mut buf).expect("valid packet");
/// assert!(matches!(first, Some(Packet::Data(ref line)) if line.as_ref() == b"done\n"));
/// assert_eq!(codec.decode(&mut buf).expect("valid packet"), Some(Packet::Flush));
/// assert_eq!(codec.decode(&mut buf).expect("empty buffer"), None);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PktLineCodec {
    max_packet_length: usize,
}

impl PktLineCodec {
    /// Construct a codec accepting packets up to `max_packet_length` bytes,
    /// header included.
    ///
    /// The value is clamped to `MIN_PACKET_LENGTH..=MAX_PACKET_LENGTH`.
    #[must_use]
    pub fn new(max_packet_length: usize) -> Self {
        Self {
            max_packet_length: clamp_packet_length(max_packet_length),
        }
    }

    /// Return the maximum packet length accepted by this codec.
    #[must_use]
    pub fn max_packet_length(&self) -> usize { self.max_packet_length }

    fn check_size(&self, size: usize) -> Result<(), FramingError> {
        if size > self.max_packet_length {
            return Err(FramingError::OversizedFrame {
                size,
                max: self.max_packet_length,
            });
        }
        Ok(())
    }
}

impl Default for PktLineCodec {
    fn default() -> Self {
        Self {
            max_packet_length: MAX_PACKET_LENGTH,
        }
    }
}

fn peek_header(src: &BytesMut) -> Option<[u8; LENGTH_HEADER_SIZE]> {
    src.get(..LENGTH_HEADER_SIZE)
        .and_then(|slice| <[u8; LENGTH_HEADER_SIZE]>::try_from(slice).ok())
}

impl Decoder for PktLineCodec {
    type Item = Packet;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(header) = peek_header(src) else {
            return Ok(None);
        };
        let len = read_length_prefix(header)
            .ok_or(FramingError::InvalidLengthEncoding { prefix: header })?;

        match len {
            FLUSH_LEN => {
                src.advance(LENGTH_HEADER_SIZE);
                Ok(Some(Packet::Flush))
            }
            DELIM_LEN => {
                src.advance(LENGTH_HEADER_SIZE);
                Ok(Some(Packet::Delimiter))
            }
            len if len < LENGTH_HEADER_SIZE => Err(FramingError::ReservedLength { len }.into()),
            len => {
                self.check_size(len)?;
                if src.len() < len {
                    src.reserve(len - src.len());
                    return Ok(None);
                }
                let mut packet = src.split_to(len);
                packet.advance(LENGTH_HEADER_SIZE);
                Ok(Some(Packet::Data(packet.freeze())))
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Clean close: nothing left at a packet boundary
        if src.is_empty() {
            return Ok(None);
        }
        match self.decode(src)? {
            Some(packet) => Ok(Some(packet)),
            None => Err(build_eof_error(src)),
        }
    }
}

/// Describe where inside a packet the stream stopped.
///
/// - [`EofError::MidHeader`]: fewer than four bytes of length prefix.
/// - [`EofError::MidFrame`]: a complete prefix with a truncated payload.
fn build_eof_error(src: &BytesMut) -> CodecError {
    let bytes_received = src.len();
    let expected = peek_header(src).and_then(read_length_prefix);

    match expected {
        Some(len) => EofError::MidFrame {
            bytes_received: bytes_received.saturating_sub(LENGTH_HEADER_SIZE),
            expected: len.saturating_sub(LENGTH_HEADER_SIZE),
        }
        .into(),
        None => EofError::MidHeader {
            bytes_received,
            header_size: LENGTH_HEADER_SIZE,
        }
        .into(),
    }
}

impl Encoder<Packet> for PktLineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Packet, dst: &mut BytesMut) -> Result<(), Self::Error> {
        <Self as Encoder<&Packet>>::encode(self, &item, dst)
    }
}

impl Encoder<&Packet> for PktLineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &Packet, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.check_size(item.encoded_len())?;
        item.encode_into(dst)?;
        Ok(())
    }
}

impl Encoder<&Chunk> for PktLineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &Chunk, dst: &mut BytesMut) -> Result<(), Self::Error> {
        <Self as Encoder<&Packet>>::encode(self, &item.to_packet(), dst)
    }
}
