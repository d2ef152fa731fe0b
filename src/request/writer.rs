//! Re-emit request chunks onto a byte sink.

use std::io::{self, Write};

use bytes::BytesMut;
use tokio_util::codec::Encoder;

use super::chunk::Chunk;
use crate::codec::{CodecError, PktLineCodec};

/// Writes [`Chunk`]s as pkt-line framed packets.
///
/// This is the encoding half of a proxy: chunks read from a
/// [`RequestDecoder`](super::RequestDecoder), possibly rewritten, are framed
/// and passed to the inner writer.
///
/// # Examples
///
/// ```
/// use pktwire::request::{Chunk, RequestWriter};
///
/// let mut writer = RequestWriter::new(Vec::new());
/// writer
///     .write_chunk(&Chunk::command("fetch"))
///     .expect("write to Vec");
/// writer
///     .write_chunk(&Chunk::EndCapabilities)
///     .expect("write to Vec");
/// assert_eq!(writer.into_inner(), b"0012command=fetch\n0001");
/// ```
#[derive(Debug)]
pub struct RequestWriter<W> {
    inner: W,
    codec: PktLineCodec,
    scratch: BytesMut,
}

impl<W: Write> RequestWriter<W> {
    /// Wrap `inner` with the default codec.
    #[must_use]
    pub fn new(inner: W) -> Self { Self::with_codec(inner, PktLineCodec::default()) }

    /// Wrap `inner`, framing packets with `codec`.
    #[must_use]
    pub fn with_codec(inner: W, codec: PktLineCodec) -> Self {
        Self {
            inner,
            codec,
            scratch: BytesMut::new(),
        }
    }

    /// Frame `chunk` and write it to the inner writer.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Framing`] if the chunk does not fit in one
    /// packet, or [`CodecError::Io`] if the inner writer fails.
    pub fn write_chunk(&mut self, chunk: &Chunk) -> Result<(), CodecError> {
        self.scratch.clear();
        self.codec.encode(chunk, &mut self.scratch)?;
        self.inner.write_all(&self.scratch)?;
        tracing::trace!(%chunk, len = self.scratch.len(), "wrote request chunk");
        Ok(())
    }

    /// Flush the inner writer.
    ///
    /// # Errors
    ///
    /// Propagates the inner writer's error.
    pub fn flush(&mut self) -> io::Result<()> { self.inner.flush() }
}

impl<W> RequestWriter<W> {
    /// Borrow the inner writer.
    #[must_use]
    pub fn get_ref(&self) -> &W { &self.inner }

    /// Consume the writer and return the inner sink.
    #[must_use]
    pub fn into_inner(self) -> W { self.inner }
}
