//! Semantic request fragments and their packet encoding.

use std::fmt;

use bytes::Bytes;

use crate::{codec::FramingError, packet::Packet};

/// Prefix identifying the command line that opens a request.
pub const COMMAND_PREFIX: &[u8] = b"command=";

/// One semantic fragment of a protocol-v2 request.
///
/// The decoder emits exactly one chunk per packet. A well-formed request is
/// `Command, Capability*, EndCapabilities, Argument*, EndArguments`; a flush
/// where a command was expected yields [`Chunk::EndOfStream`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Chunk {
    /// Command name, without the `command=` prefix or trailing newline.
    ///
    /// The bytes are not checked for UTF-8; see [`Chunk::text`].
    Command(Bytes),
    /// One capability line, without its trailing newline.
    Capability(Bytes),
    /// Delimiter closing the capability section.
    EndCapabilities,
    /// Argument payload, exactly as received.
    ///
    /// Decoded payloads share the scanner's read buffer without copying.
    /// The buffer is reference counted, so the payload stays valid after the
    /// decoder advances.
    Argument(Bytes),
    /// Flush closing the argument section and the request.
    EndArguments,
    /// Flush received where a command was expected; the session is over.
    EndOfStream,
}

impl Chunk {
    /// Build a [`Chunk::Command`] from a name without prefix or newline.
    #[must_use]
    pub fn command(name: impl Into<Bytes>) -> Self { Self::Command(name.into()) }

    /// Build a [`Chunk::Capability`] from a line without its newline.
    #[must_use]
    pub fn capability(line: impl Into<Bytes>) -> Self { Self::Capability(line.into()) }

    /// Command or capability line as text.
    ///
    /// Returns `None` for other chunks and for lines that are not UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use pktwire::request::Chunk;
    ///
    /// assert_eq!(Chunk::command("fetch").text(), Some("fetch"));
    /// assert_eq!(Chunk::capability(&b"caf\xe9"[..]).text(), None);
    /// assert_eq!(Chunk::EndCapabilities.text(), None);
    /// ```
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Command(line) | Self::Capability(line) => std::str::from_utf8(line).ok(),
            _ => None,
        }
    }

    /// Return the packet that decodes to this chunk.
    ///
    /// Command and capability text are re-emitted with a single trailing
    /// newline, so the result can differ from the original wire bytes when
    /// the sender omitted it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::Bytes;
    /// use pktwire::{packet::Packet, request::Chunk};
    ///
    /// assert_eq!(
    ///     Chunk::capability("agent=git/2.30").to_packet(),
    ///     Packet::Data(Bytes::from_static(b"agent=git/2.30\n"))
    /// );
    /// assert_eq!(Chunk::EndCapabilities.to_packet(), Packet::Delimiter);
    /// ```
    #[must_use]
    pub fn to_packet(&self) -> Packet {
        match self {
            Self::Command(name) => Packet::Data(text_line(COMMAND_PREFIX, name)),
            Self::Capability(text) => Packet::Data(text_line(b"", text)),
            Self::EndCapabilities => Packet::Delimiter,
            Self::Argument(payload) => Packet::Data(payload.clone()),
            Self::EndArguments | Self::EndOfStream => Packet::Flush,
        }
    }

    /// Serialize the chunk as framed packet bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pktwire::request::Chunk;
    ///
    /// let wire = Chunk::command("ls-refs")
    ///     .encode_to_pkt_line()
    ///     .expect("command fits in one packet");
    /// assert_eq!(wire.as_ref(), b"0014command=ls-refs\n");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::OversizedFrame`] when a hand-built chunk
    /// carries more text or payload than one packet can hold. Chunks produced
    /// by the decoder always fit.
    pub fn encode_to_pkt_line(&self) -> Result<Bytes, FramingError> {
        self.to_packet().encode_to_pkt_line()
    }

    /// Returns true if this chunk ends a request or the session.
    #[must_use]
    pub fn is_terminal(&self) -> bool { matches!(self, Self::EndArguments | Self::EndOfStream) }
}

fn text_line(prefix: &[u8], text: &[u8]) -> Bytes {
    let mut line = Vec::with_capacity(prefix.len() + text.len() + 1);
    line.extend_from_slice(prefix);
    line.extend_from_slice(text);
    line.push(b'\n');
    Bytes::from(line)
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(name) => write!(f, "command {}", name.escape_ascii()),
            Self::Capability(line) => write!(f, "capability {}", line.escape_ascii()),
            Self::EndCapabilities => f.write_str("end-capabilities"),
            Self::Argument(payload) => write!(f, "argument \"{}\"", payload.escape_ascii()),
            Self::EndArguments => f.write_str("end-arguments"),
            Self::EndOfStream => f.write_str("end-of-stream"),
        }
    }
}
