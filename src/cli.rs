//! Command line interface for the `pktwire` binary.
//!
//! Kept free of library types so the build script can render a man page
//! from it.

use clap::Parser;

/// Command line arguments for the `pktwire` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pktwire",
    version,
    about = "Decode a protocol-v2 request stream read from stdin",
    long_about = "Decode a protocol-v2 request stream read from stdin.\n\n\
                  Each pkt-line packet is decoded into a request chunk. By default one \
                  line is printed per chunk; with --canonical the chunks are framed \
                  again and written to stdout. The exit status is non-zero if the \
                  stream is malformed, truncated or cannot be read."
)]
pub struct Cli {
    /// Re-encode the decoded chunks to stdout instead of listing them.
    #[arg(long)]
    pub canonical: bool,

    /// Largest packet accepted, length header included.
    #[arg(long, value_name = "BYTES")]
    pub max_packet_length: Option<usize>,
}
