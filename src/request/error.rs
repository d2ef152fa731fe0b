//! Errors raised while decoding a request stream.

use thiserror::Error;

use super::state::RequestState;
use crate::codec::CodecError;

/// Grammar violations in a request stream.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    /// A packet arrived that the current state does not accept.
    #[error("unexpected {packet} while {state}")]
    UnexpectedPacket {
        /// State the decoder was in.
        state: RequestState,
        /// Rendering of the offending packet.
        packet: String,
    },

    /// The stream ended before the request was complete.
    #[error("early end of stream while {state}")]
    EarlyEof {
        /// State the decoder was in.
        state: RequestState,
    },
}

impl SyntaxError {
    /// State in which the violation was detected.
    #[must_use]
    pub fn state(&self) -> RequestState {
        match self {
            Self::UnexpectedPacket { state, .. } | Self::EarlyEof { state } => *state,
        }
    }
}

/// Reasons a [`RequestDecoder`](super::RequestDecoder) stopped early.
///
/// # Examples
///
/// ```
/// use pktwire::request::{RequestError, RequestState, SyntaxError};
///
/// let err = RequestError::from(SyntaxError::EarlyEof {
///     state: RequestState::ScanCapabilities,
/// });
/// assert!(err.is_syntax());
/// assert_eq!(
///     err.to_string(),
///     "syntax error: early end of stream while scanning capabilities"
/// );
/// ```
#[derive(Debug, Error)]
pub enum RequestError {
    /// The packet sequence does not follow the request grammar.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// The packet source failed; the error is passed through unchanged.
    #[error(transparent)]
    Source(#[from] CodecError),
}

impl RequestError {
    /// Returns true for grammar violations.
    #[must_use]
    pub fn is_syntax(&self) -> bool { matches!(self, Self::Syntax(_)) }

    /// Borrow the grammar violation, if this is one.
    #[must_use]
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(err) => Some(err),
            Self::Source(_) => None,
        }
    }
}
