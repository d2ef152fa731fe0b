//! Pull-based decoder turning packets into request chunks.

use super::{
    chunk::Chunk,
    error::{RequestError, SyntaxError},
    state::RequestState,
};
use crate::{codec::CodecError, packet::Packet};

/// Reads a protocol-v2 request stream one chunk at a time.
///
/// The decoder pulls packets from any iterator of
/// `Result<Packet, CodecError>`, usually a
/// [`PacketScanner`](crate::scanner::PacketScanner). Each successful
/// [`advance`](Self::advance) consumes exactly one packet and exposes one
/// [`Chunk`]. Requests may be pipelined: after [`Chunk::EndArguments`] the
/// grammar starts over with the next command.
///
/// The first error freezes the decoder. End of input between requests is a
/// clean finish and records no error.
///
/// # Examples
///
/// ```
/// use pktwire::{
///     request::{Chunk, RequestDecoder},
///     scanner::PacketScanner,
/// };
///
/// let wire = b"0014command=ls-refs\n00010000".as_slice();
/// let mut decoder = RequestDecoder::new(PacketScanner::new(wire));
///
/// let mut chunks = Vec::new();
/// while decoder.advance() {
///     chunks.extend(decoder.chunk().cloned());
/// }
/// assert!(decoder.last_error().is_none());
/// assert_eq!(
///     chunks,
///     vec![
///         Chunk::command("ls-refs"),
///         Chunk::EndCapabilities,
///         Chunk::EndArguments,
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct RequestDecoder<S> {
    source: S,
    state: RequestState,
    err: Option<RequestError>,
    current: Option<Chunk>,
}

impl<S> RequestDecoder<S>
where
    S: Iterator<Item = Result<Packet, CodecError>>,
{
    /// Bind a decoder to a packet source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RequestState::Begin,
            err: None,
            current: None,
        }
    }

    /// Pull one packet and decode it.
    ///
    /// Returns `false` once the stream has ended or an error was recorded;
    /// consult [`last_error`](Self::last_error) to tell the two apart. Calls
    /// after that keep returning `false` without touching the source.
    pub fn advance(&mut self) -> bool {
        if self.err.is_some() || self.state == RequestState::End {
            return false;
        }
        self.current = None;

        let packet = match self.source.next() {
            Some(Ok(packet)) => packet,
            Some(Err(err)) => {
                self.fail(err.into());
                return false;
            }
            None if self.state.is_mid_request() => {
                self.fail(SyntaxError::EarlyEof { state: self.state }.into());
                return false;
            }
            None => {
                tracing::debug!("request stream ended cleanly");
                self.state = RequestState::End;
                return false;
            }
        };

        match self.state.transition(packet) {
            Ok((next, chunk)) => {
                tracing::trace!(from = %self.state, to = %next, %chunk, "decoded request chunk");
                self.state = next;
                self.current = Some(chunk);
                true
            }
            Err(err) => {
                self.fail(err.into());
                false
            }
        }
    }

    /// Advance and return the new chunk.
    ///
    /// `Ok(None)` signals a clean end of stream.
    ///
    /// # Errors
    ///
    /// Returns the recorded error once decoding has failed.
    pub fn try_next(&mut self) -> Result<Option<&Chunk>, &RequestError> {
        if self.advance() {
            return Ok(self.current.as_ref());
        }
        match &self.err {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }

    fn fail(&mut self, err: RequestError) {
        tracing::debug!(state = %self.state, error = %err, "request decoding failed");
        self.err = Some(err);
    }
}

impl<S> RequestDecoder<S> {
    /// Chunk produced by the most recent successful
    /// [`advance`](Self::advance).
    ///
    /// `None` before the first call and after any call that returned
    /// `false`.
    #[must_use]
    pub fn chunk(&self) -> Option<&Chunk> { self.current.as_ref() }

    /// First error encountered, or `None` if decoding is still going or
    /// ended cleanly.
    #[must_use]
    pub fn last_error(&self) -> Option<&RequestError> { self.err.as_ref() }

    /// Current grammar state.
    #[must_use]
    pub fn state(&self) -> RequestState { self.state }

    /// Consume the decoder and return its recorded error, if any.
    #[must_use]
    pub fn into_error(self) -> Option<RequestError> { self.err }

    /// Consume the decoder and return the packet source.
    #[must_use]
    pub fn into_inner(self) -> S { self.source }
}
