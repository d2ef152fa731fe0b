//! Raw pkt-line byte builders.

/// Frame `payload` as one data packet, header included.
///
/// # Panics
///
/// Panics if the framed packet would not fit the four-digit length header.
///
/// # Examples
///
/// ```rust
/// use pktwire_testing::data_pkt;
///
/// assert_eq!(data_pkt(b"hi\n"), b"0007hi\n");
/// ```
#[must_use]
pub fn data_pkt(payload: &[u8]) -> Vec<u8> {
    let len = payload.len() + 4;
    assert!(len <= 0xffff, "payload of {} bytes cannot be framed", payload.len());
    let mut out = format!("{len:04x}").into_bytes();
    out.extend_from_slice(payload);
    out
}

/// Return a flush packet.
#[must_use]
pub fn flush_pkt() -> Vec<u8> { b"0000".to_vec() }

/// Return a delimiter packet.
#[must_use]
pub fn delim_pkt() -> Vec<u8> { b"0001".to_vec() }

/// Write an arbitrary `header` followed by `body`.
///
/// Useful for reserved lengths, bad hex digits and headers that disagree
/// with the body.
///
/// ```rust
/// use pktwire_testing::raw_pkt;
///
/// assert_eq!(raw_pkt(*b"zz00", b""), b"zz00");
/// ```
#[must_use]
pub fn raw_pkt(header: [u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = header.to_vec();
    out.extend_from_slice(body);
    out
}

/// Build the wire bytes of one complete request.
///
/// Command and capability lines get a trailing newline; arguments are framed
/// verbatim.
///
/// ```rust
/// use pktwire_testing::request_wire;
///
/// let wire = request_wire("fetch", &[], &[b"done"]);
/// assert_eq!(wire, b"0012command=fetch\n00010008done0000");
/// ```
#[must_use]
pub fn request_wire(command: &str, capabilities: &[&str], arguments: &[&[u8]]) -> Vec<u8> {
    let mut out = data_pkt(format!("command={command}\n").as_bytes());
    for capability in capabilities {
        out.extend(data_pkt(format!("{capability}\n").as_bytes()));
    }
    out.extend(delim_pkt());
    for argument in arguments {
        out.extend(data_pkt(argument));
    }
    out.extend(flush_pkt());
    out
}

/// Drop the last `n` bytes of `wire`.
#[must_use]
pub fn truncated(wire: &[u8], n: usize) -> Vec<u8> {
    wire[..wire.len().saturating_sub(n)].to_vec()
}
