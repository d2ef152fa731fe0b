//! Blocking packet source over [`std::io::Read`].
//!
//! [`PacketScanner`] reads from any reader into a reusable buffer and splits
//! it into [`Packet`]s with a [`PktLineCodec`]. It is the usual packet source
//! for a [`RequestDecoder`](crate::request::RequestDecoder).

use std::io::{self, Read};

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::{
    codec::{CodecError, PktLineCodec},
    packet::Packet,
};

/// Number of bytes requested from the reader per read call by default.
pub const DEFAULT_READ_SIZE: usize = 8 * 1024;

/// Iterator of packets read from a blocking reader.
///
/// Yields `Some(Ok(packet))` per packet, `None` at a clean end of input, and
/// `Some(Err(_))` once for a read or framing failure, after which the scanner
/// is exhausted. Data payloads are split from the read buffer without
/// copying.
///
/// # Examples
///
/// ```
/// use pktwire::{packet::Packet, scanner::PacketScanner};
///
/// let mut scanner = PacketScanner::new(&b"00010000"[..]);
/// assert!(matches!(scanner.next(), Some(Ok(Packet::Delimiter))));
/// assert!(matches!(scanner.next(), Some(Ok(Packet::Flush))));
/// assert!(scanner.next().is_none());
/// ```
#[derive(Debug)]
pub struct PacketScanner<R> {
    reader: R,
    codec: PktLineCodec,
    buffer: BytesMut,
    scratch: Box<[u8]>,
    eof: bool,
    done: bool,
}

impl<R: Read> PacketScanner<R> {
    /// Scan `reader` with the default codec.
    #[must_use]
    pub fn new(reader: R) -> Self { Self::with_codec(reader, PktLineCodec::default()) }

    /// Scan `reader`, splitting packets with `codec`.
    #[must_use]
    pub fn with_codec(reader: R, codec: PktLineCodec) -> Self {
        Self {
            reader,
            codec,
            buffer: BytesMut::new(),
            scratch: vec![0; DEFAULT_READ_SIZE].into_boxed_slice(),
            eof: false,
            done: false,
        }
    }

    /// Set how many bytes are requested from the reader per read call.
    ///
    /// Zero is treated as one.
    #[must_use]
    pub fn with_read_size(mut self, read_size: usize) -> Self {
        self.scratch = vec![0; read_size.max(1)].into_boxed_slice();
        self
    }

    /// Read once into the scratch block and append what arrived.
    ///
    /// The scratch block is zeroed only when allocated.
    fn fill_buffer(&mut self) -> io::Result<usize> {
        let n = self.reader.read(&mut self.scratch)?;
        let filled = self.scratch.get(..n).unwrap_or_default();
        self.buffer.extend_from_slice(filled);
        Ok(n)
    }

    fn next_packet(&mut self) -> Result<Option<Packet>, CodecError> {
        loop {
            if self.eof {
                return self.codec.decode_eof(&mut self.buffer);
            }
            if let Some(packet) = self.codec.decode(&mut self.buffer)? {
                return Ok(Some(packet));
            }
            match self.fill_buffer() {
                Ok(0) => self.eof = true,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R> PacketScanner<R> {
    /// Borrow the underlying reader.
    #[must_use]
    pub fn get_ref(&self) -> &R { &self.reader }

    /// Consume the scanner and return the underlying reader.
    ///
    /// Bytes already read but not yet decoded are discarded.
    #[must_use]
    pub fn into_inner(self) -> R { self.reader }
}

impl<R: Read> Iterator for PacketScanner<R> {
    type Item = Result<Packet, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_packet();
        match &result {
            Ok(Some(packet)) => tracing::trace!(%packet, "scanned packet"),
            Ok(None) => self.done = true,
            Err(e) => {
                tracing::debug!(error = %e, error_type = e.error_type(), "packet scan failed");
                self.done = true;
            }
        }
        result.transpose()
    }
}

impl<R: Read> std::iter::FusedIterator for PacketScanner<R> {}
