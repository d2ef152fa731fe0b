//! `rstest` fixtures describing a typical `ls-refs` request.

use bytes::Bytes;
use pktwire::Chunk;
use rstest::fixture;

use crate::wire::request_wire;

/// Wire bytes of an `ls-refs` request with two capabilities and arguments.
#[fixture]
pub fn ls_refs_wire() -> Vec<u8> {
    request_wire(
        "ls-refs",
        &["agent=git/2.30", "object-format=sha1"],
        &[b"peel", b"symrefs", b"ref-prefix refs/heads/"],
    )
}

/// Chunks [`ls_refs_wire`] decodes to.
#[fixture]
pub fn ls_refs_chunks() -> Vec<Chunk> {
    vec![
        Chunk::command("ls-refs"),
        Chunk::capability("agent=git/2.30"),
        Chunk::capability("object-format=sha1"),
        Chunk::EndCapabilities,
        Chunk::Argument(Bytes::from_static(b"peel")),
        Chunk::Argument(Bytes::from_static(b"symrefs")),
        Chunk::Argument(Bytes::from_static(b"ref-prefix refs/heads/")),
        Chunk::EndArguments,
    ]
}
