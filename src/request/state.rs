//! Request grammar state machine.
//!
//! [`RequestState::transition`] is the whole grammar: a total function over
//! `(state, packet)` pairs. Every pair not listed is a syntax error.

use std::fmt;

use bytes::Bytes;

use super::{
    chunk::{COMMAND_PREFIX, Chunk},
    error::SyntaxError,
};
use crate::packet::Packet;

/// Position of the decoder within the request grammar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RequestState {
    /// Expecting a command line or the session-ending flush.
    #[default]
    Begin,
    /// Reading capability lines until the delimiter.
    ScanCapabilities,
    /// Reading argument payloads until the flush.
    ScanArguments,
    /// Session over; no further packets are read.
    End,
}

impl RequestState {
    /// Apply `packet` to this state.
    ///
    /// Returns the next state together with the chunk the packet produces.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnexpectedPacket`] when the state does not
    /// accept the packet.
    pub fn transition(self, packet: Packet) -> Result<(Self, Chunk), SyntaxError> {
        match (self, packet) {
            (Self::Begin, Packet::Flush) => Ok((Self::End, Chunk::EndOfStream)),
            (Self::Begin, Packet::Data(line)) if line.starts_with(COMMAND_PREFIX) => {
                let name = strip_newline(line.slice(COMMAND_PREFIX.len()..));
                Ok((Self::ScanCapabilities, Chunk::Command(name)))
            }
            (Self::ScanCapabilities, Packet::Delimiter) => {
                Ok((Self::ScanArguments, Chunk::EndCapabilities))
            }
            (Self::ScanCapabilities, Packet::Data(line)) => {
                Ok((self, Chunk::Capability(strip_newline(line))))
            }
            (Self::ScanArguments, Packet::Flush) => Ok((Self::Begin, Chunk::EndArguments)),
            (Self::ScanArguments, Packet::Data(payload)) => Ok((self, Chunk::Argument(payload))),
            (state, packet) => Err(SyntaxError::UnexpectedPacket {
                state,
                packet: packet.to_string(),
            }),
        }
    }

    /// Returns true if a request is partially read in this state.
    #[must_use]
    pub fn is_mid_request(self) -> bool {
        matches!(self, Self::ScanCapabilities | Self::ScanArguments)
    }
}

/// Drop one trailing newline, leaving the rest of the line untouched.
fn strip_newline(mut line: Bytes) -> Bytes {
    if line.ends_with(b"\n") {
        line.truncate(line.len() - 1);
    }
    line
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Begin => "expecting a command",
            Self::ScanCapabilities => "scanning capabilities",
            Self::ScanArguments => "scanning arguments",
            Self::End => "at end of stream",
        })
    }
}
