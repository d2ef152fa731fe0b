//! Test helpers for exercising `pktwire` decoders and writers.
//!
//! The wire builders in [`wire`] write pkt-line headers by hand rather than
//! through the library encoder, so they can describe malformed streams the
//! encoder would refuse to produce.
//!
//! ```rust
//! use pktwire::request::Chunk;
//! use pktwire_testing::{decode_all, request_wire};
//!
//! let wire = request_wire("ls-refs", &["agent=git/2.30"], &[b"peel"]);
//! let (chunks, err) = decode_all(&wire);
//! assert!(err.is_none());
//! assert_eq!(chunks.first(), Some(&Chunk::command("ls-refs")));
//! ```

pub mod decode;
pub mod fixtures;
pub mod readers;
pub mod wire;

pub use decode::{decode_all, decode_all_from, decode_all_with_codec};
pub use fixtures::{ls_refs_chunks, ls_refs_wire};
pub use readers::{ChunkedReader, FailingReader};
pub use wire::{data_pkt, delim_pkt, flush_pkt, raw_pkt, request_wire, truncated};
