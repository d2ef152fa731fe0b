//! Protocol-v2 request grammar.
//!
//! A request stream is a sequence of packets read by a
//! [`RequestDecoder`] and turned into [`Chunk`]s:
//!
//! ```text
//! command=<name>\n        -> Chunk::Command
//! <capability>\n          -> Chunk::Capability   (zero or more)
//! delimiter               -> Chunk::EndCapabilities
//! <argument>              -> Chunk::Argument     (zero or more)
//! flush                   -> Chunk::EndArguments
//! ```
//!
//! Requests may follow each other on the same stream. A flush where a command
//! is expected yields [`Chunk::EndOfStream`] and ends the session.
//!
//! The inverse direction is [`Chunk::to_packet`] for a single chunk and
//! [`RequestWriter`] for a whole stream.

mod chunk;
mod decoder;
mod error;
mod state;
mod writer;

pub use chunk::{COMMAND_PREFIX, Chunk};
pub use decoder::RequestDecoder;
pub use error::{RequestError, SyntaxError};
pub use state::RequestState;
pub use writer::RequestWriter;
