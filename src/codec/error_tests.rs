//! Unit tests for framing layer error types.

use std::io;

use super::{CodecError, EofError, FramingError};

#[test]
fn invalid_prefix_display_escapes_bytes() {
    let err = FramingError::InvalidLengthEncoding { prefix: *b"0g\n1" };
    assert_eq!(err.to_string(), "invalid length prefix \"0g\\n1\"");
}

#[test]
fn reserved_length_display_uses_wire_form() {
    let err = FramingError::ReservedLength { len: 3 };
    assert!(err.to_string().contains("0003"));
}

#[test]
fn oversized_display_includes_limits() {
    let err = FramingError::OversizedFrame {
        size: 70000,
        max: 65520,
    };
    let display = err.to_string();
    assert!(display.contains("70000"));
    assert!(display.contains("65520"));
}

#[test]
fn eof_display_includes_byte_counts() {
    let err = EofError::MidFrame {
        bytes_received: 3,
        expected: 12,
    };
    let display = err.to_string();
    assert!(display.contains('3'));
    assert!(display.contains("12"));
}

#[test]
fn codec_error_converts_to_io_error_with_correct_kind() {
    let io_err: io::Error = CodecError::Framing(FramingError::ReservedLength { len: 2 }).into();
    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);

    let io_err: io::Error = CodecError::Eof(EofError::MidHeader {
        bytes_received: 1,
        header_size: 4,
    })
    .into();
    assert_eq!(io_err.kind(), io::ErrorKind::UnexpectedEof);

    let io_err: io::Error = CodecError::Io(io::Error::from(io::ErrorKind::BrokenPipe)).into();
    assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn error_type_returns_correct_category() {
    assert_eq!(
        CodecError::Framing(FramingError::ReservedLength { len: 2 }).error_type(),
        "framing"
    );
    assert_eq!(CodecError::Io(io::Error::other("test")).error_type(), "io");
    assert_eq!(
        CodecError::Eof(EofError::MidHeader {
            bytes_received: 2,
            header_size: 4,
        })
        .error_type(),
        "eof"
    );
}

#[test]
fn only_eof_errors_are_truncations() {
    let eof = CodecError::Eof(EofError::MidFrame {
        bytes_received: 0,
        expected: 1,
    });
    assert!(eof.is_truncation());
    assert!(!CodecError::Io(io::Error::other("reset")).is_truncation());
}
