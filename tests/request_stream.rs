//! End-to-end decoding of request streams read from byte sources.

use std::io;

use bytes::Bytes;
use pktwire::{
    Chunk,
    CodecError,
    PacketScanner,
    PktLineCodec,
    RequestDecoder,
    RequestError,
    RequestState,
    SyntaxError,
    codec::{EofError, FramingError},
};
use pktwire_testing::{
    ChunkedReader,
    FailingReader,
    data_pkt,
    decode_all,
    decode_all_from,
    decode_all_with_codec,
    delim_pkt,
    flush_pkt,
    ls_refs_chunks,
    ls_refs_wire,
    raw_pkt,
    request_wire,
    truncated,
};
use rstest::rstest;

fn syntax(err: Option<RequestError>) -> SyntaxError {
    match err {
        Some(RequestError::Syntax(err)) => err,
        other => panic!("expected syntax error, got {other:?}"),
    }
}

fn source(err: Option<RequestError>) -> CodecError {
    match err {
        Some(RequestError::Source(err)) => err,
        other => panic!("expected source error, got {other:?}"),
    }
}

#[rstest]
#[case::whole(usize::MAX)]
#[case::byte_by_byte(1)]
#[case::header_sized(4)]
#[case::odd(5)]
fn decodes_request_across_read_boundaries(
    ls_refs_wire: Vec<u8>,
    ls_refs_chunks: Vec<Chunk>,
    #[case] step: usize,
) {
    let scanner = PacketScanner::new(ChunkedReader::new(ls_refs_wire, step));
    let (chunks, err) = decode_all_from(scanner);
    assert!(err.is_none(), "unexpected error: {err:?}");
    assert_eq!(chunks, ls_refs_chunks);
}

#[test]
fn pipelined_requests_end_with_flush() {
    let mut wire = request_wire("ls-refs", &[], &[]);
    wire.extend(request_wire("fetch", &["agent=git/2.30"], &[b"want 1234", b"done"]));
    wire.extend(flush_pkt());

    let (chunks, err) = decode_all(&wire);

    assert!(err.is_none(), "unexpected error: {err:?}");
    assert_eq!(
        chunks,
        vec![
            Chunk::command("ls-refs"),
            Chunk::EndCapabilities,
            Chunk::EndArguments,
            Chunk::command("fetch"),
            Chunk::capability("agent=git/2.30"),
            Chunk::EndCapabilities,
            Chunk::Argument(Bytes::from_static(b"want 1234")),
            Chunk::Argument(Bytes::from_static(b"done")),
            Chunk::EndArguments,
            Chunk::EndOfStream,
        ]
    );
}

#[test]
fn bytes_after_end_of_stream_are_not_read() {
    let mut wire = flush_pkt();
    wire.extend(b"garbage that is not a packet");
    let mut decoder = RequestDecoder::new(PacketScanner::new(wire.as_slice()));

    assert_eq!(decoder.try_next().ok().flatten(), Some(&Chunk::EndOfStream));
    assert!(!decoder.advance());
    assert!(decoder.last_error().is_none());
    assert_eq!(decoder.state(), RequestState::End);
}

#[test]
fn end_of_input_after_complete_request_is_clean() {
    let (chunks, err) = decode_all(&request_wire("ls-refs", &[], &[]));
    assert!(err.is_none());
    assert_eq!(chunks.last(), Some(&Chunk::EndArguments));
}

#[rstest]
#[case::in_capabilities(data_pkt(b"command=fetch\n"), RequestState::ScanCapabilities)]
#[case::in_arguments(
    [data_pkt(b"command=fetch\n"), delim_pkt(), data_pkt(b"done")].concat(),
    RequestState::ScanArguments
)]
fn end_of_input_mid_request_is_early_eof(#[case] wire: Vec<u8>, #[case] state: RequestState) {
    let (_, err) = decode_all(&wire);
    assert_eq!(syntax(err), SyntaxError::EarlyEof { state });
}

#[test]
fn truncated_packet_reports_codec_eof() {
    let wire = truncated(&request_wire("fetch", &[], &[b"want 1234"]), 7);
    let (chunks, err) = decode_all(&wire);

    assert_eq!(chunks.len(), 2);
    match source(err) {
        CodecError::Eof(EofError::MidFrame { bytes_received, expected }) => {
            assert_eq!((bytes_received, expected), (6, 9));
        }
        other => panic!("expected mid-frame EOF, got {other:?}"),
    }
}

#[rstest]
#[case::argument_first(data_pkt(b"peel"), "expecting a command")]
#[case::delimiter_first(delim_pkt(), "expecting a command")]
#[case::flush_in_capabilities(
    [data_pkt(b"command=fetch\n"), flush_pkt()].concat(),
    "scanning capabilities"
)]
#[case::delimiter_in_arguments(
    [data_pkt(b"command=fetch\n"), delim_pkt(), delim_pkt()].concat(),
    "scanning arguments"
)]
fn unexpected_packets_are_syntax_errors(#[case] wire: Vec<u8>, #[case] state: &str) {
    let (_, err) = decode_all(&wire);
    let err = syntax(err);
    assert!(matches!(err, SyntaxError::UnexpectedPacket { .. }));
    assert!(
        err.to_string().ends_with(state),
        "message {err} should name the state"
    );
}

#[rstest]
#[case::reserved(raw_pkt(*b"0002", b""), FramingError::ReservedLength { len: 2 })]
#[case::bad_hex(raw_pkt(*b"00g4", b""), FramingError::InvalidLengthEncoding { prefix: *b"00g4" })]
fn malformed_headers_are_framing_errors(#[case] wire: Vec<u8>, #[case] expected: FramingError) {
    let (chunks, err) = decode_all(&wire);
    assert!(chunks.is_empty());
    match source(err) {
        CodecError::Framing(err) => assert_eq!(err, expected),
        other => panic!("expected framing error, got {other:?}"),
    }
}

#[test]
fn codec_limit_rejects_long_arguments() {
    let wire = request_wire("fetch", &[], &[&[b'x'; 64]]);
    let (chunks, err) = decode_all_with_codec(&wire, PktLineCodec::new(32));

    assert_eq!(chunks.len(), 2);
    assert!(matches!(
        source(err),
        CodecError::Framing(FramingError::OversizedFrame { size: 68, max: 32 })
    ));
}

#[test]
fn read_failure_surfaces_as_io_error() {
    let wire = data_pkt(b"command=fetch\n");
    let scanner = PacketScanner::new(FailingReader::new(wire, io::ErrorKind::ConnectionReset));
    let (chunks, err) = decode_all_from(scanner);

    assert_eq!(chunks, vec![Chunk::command("fetch")]);
    match source(err) {
        CodecError::Io(err) => assert_eq!(err.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn arguments_are_passed_through_untouched() {
    let payloads: [&[u8]; 4] = [b"", b"\n", b"trailing newline\n", &[0, 0xff, b'\n', 0x80]];
    let wire = request_wire("fetch", &[], &payloads);

    let (chunks, err) = decode_all(&wire);

    assert!(err.is_none());
    let arguments: Vec<&[u8]> = chunks
        .iter()
        .filter_map(|chunk| match chunk {
            Chunk::Argument(payload) => Some(payload.as_ref()),
            _ => None,
        })
        .collect();
    assert_eq!(arguments, payloads);
}

#[test]
fn missing_newline_on_command_is_accepted() {
    let wire = [data_pkt(b"command=ls-refs"), data_pkt(b"agent=x"), delim_pkt(), flush_pkt()].concat();
    let (chunks, err) = decode_all(&wire);

    assert!(err.is_none());
    assert_eq!(chunks[0], Chunk::command("ls-refs"));
    assert_eq!(chunks[1], Chunk::capability("agent=x"));
}

#[test]
fn arguments_outlive_the_decoder() {
    let wire = request_wire("fetch", &[], &[b"want 1234"]);
    let argument = {
        let mut decoder = RequestDecoder::new(PacketScanner::new(wire.as_slice()));
        let mut kept = None;
        while decoder.advance() {
            if let Some(Chunk::Argument(payload)) = decoder.chunk() {
                kept = Some(payload.clone());
            }
        }
        kept
    };
    assert_eq!(argument.as_deref(), Some(&b"want 1234"[..]));
}

#[test]
fn non_utf8_capability_lines_are_decoded_verbatim() {
    let wire = [
        data_pkt(b"command=ls-refs\n"),
        data_pkt(b"agent=caf\xe9\n"),
        delim_pkt(),
        flush_pkt(),
    ]
    .concat();

    let (chunks, err) = decode_all(&wire);

    assert!(err.is_none(), "unexpected error: {err:?}");
    assert_eq!(
        chunks,
        vec![
            Chunk::command("ls-refs"),
            Chunk::capability(&b"agent=caf\xe9"[..]),
            Chunk::EndCapabilities,
            Chunk::EndArguments,
        ]
    );
}
