//! Drain a request stream into owned chunks.

use std::io::Read;

use pktwire::{Chunk, PacketScanner, PktLineCodec, RequestDecoder, RequestError};

/// Decode `wire` with the default codec.
///
/// Returns every chunk produced before the decoder stopped, along with the
/// error that stopped it, if any.
#[must_use]
pub fn decode_all(wire: &[u8]) -> (Vec<Chunk>, Option<RequestError>) {
    decode_all_with_codec(wire, PktLineCodec::default())
}

/// Decode `wire` with a caller-supplied codec.
#[must_use]
pub fn decode_all_with_codec(
    wire: &[u8],
    codec: PktLineCodec,
) -> (Vec<Chunk>, Option<RequestError>) {
    decode_all_from(PacketScanner::with_codec(wire, codec))
}

/// Decode every chunk a scanner over any reader yields.
#[must_use]
pub fn decode_all_from<R: Read>(scanner: PacketScanner<R>) -> (Vec<Chunk>, Option<RequestError>) {
    let mut decoder = RequestDecoder::new(scanner);
    let mut chunks = Vec::new();
    while decoder.advance() {
        chunks.extend(decoder.chunk().cloned());
    }
    (chunks, decoder.into_error())
}
