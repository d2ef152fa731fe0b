//! Coverage for the wire builders and scripted readers.

use std::io::{self, Read};

use pktwire::Chunk;
use pktwire_testing::{
    ChunkedReader,
    FailingReader,
    data_pkt,
    decode_all,
    ls_refs_chunks,
    ls_refs_wire,
    raw_pkt,
    truncated,
};
use rstest::rstest;

#[rstest]
fn ls_refs_fixture_decodes_to_expected_chunks(ls_refs_wire: Vec<u8>, ls_refs_chunks: Vec<Chunk>) {
    let (chunks, err) = decode_all(&ls_refs_wire);
    assert!(err.is_none(), "unexpected error: {err:?}");
    assert_eq!(chunks, ls_refs_chunks);
}

#[test]
fn data_pkt_counts_header_in_length() {
    assert_eq!(data_pkt(b""), b"0004");
    assert_eq!(data_pkt(b"a\n"), b"0006a\n");
}

#[test]
fn raw_pkt_and_truncated_build_malformed_input() {
    assert_eq!(raw_pkt(*b"0002", b"x"), b"0002x");
    assert_eq!(truncated(b"0006a\n", 2), b"0006");
    assert_eq!(truncated(b"00", 5), b"");
}

#[test]
fn chunked_reader_limits_each_read() {
    let mut reader = ChunkedReader::new(b"abcdef".to_vec(), 4);
    let mut buf = [0u8; 16];
    assert_eq!(reader.read(&mut buf).expect("read"), 4);
    assert_eq!(reader.read(&mut buf).expect("read"), 2);
    assert_eq!(reader.read(&mut buf).expect("read"), 0);
}

#[test]
fn failing_reader_errors_after_data() {
    let mut reader = FailingReader::new(b"0000".to_vec(), io::ErrorKind::BrokenPipe);
    let mut buf = [0u8; 8];
    assert_eq!(reader.read(&mut buf).expect("read"), 4);
    let err = reader.read(&mut buf).expect_err("second read fails");
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}
