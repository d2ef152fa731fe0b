#![doc(html_root_url = "https://docs.rs/pktwire/latest")]
//! Public API for the `pktwire` library.
//!
//! This crate decodes and re-encodes protocol-v2 requests carried over
//! pkt-line framing. Packets are read by a [`PacketScanner`], interpreted by
//! the [`RequestDecoder`] state machine into [`Chunk`]s, and turned back into
//! packets with [`Chunk::to_packet`] or a [`RequestWriter`].
//!
//! ```
//! use pktwire::{Chunk, PacketScanner, RequestDecoder};
//!
//! let wire = b"0014command=ls-refs\n0013agent=git/2.30\n000100000000".as_slice();
//! let mut decoder = RequestDecoder::new(PacketScanner::new(wire));
//!
//! while let Ok(Some(chunk)) = decoder.try_next() {
//!     if let Chunk::Capability(capability) = chunk {
//!         assert_eq!(capability, "agent=git/2.30");
//!     }
//! }
//! assert!(decoder.last_error().is_none());
//! ```

pub mod codec;
pub mod packet;
pub mod request;
pub mod scanner;

pub use codec::{CodecError, PktLineCodec};
pub use packet::Packet;
pub use request::{Chunk, RequestDecoder, RequestError, RequestState, RequestWriter, SyntaxError};
pub use scanner::PacketScanner;
