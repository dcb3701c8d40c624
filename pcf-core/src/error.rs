//! Error types for PCF decoding

use crate::toc::TableType;
use thiserror::Error;

/// Errors surfaced while opening a font or looking up a glyph.
///
/// Malformed input is a permanent condition: no operation is retried, and
/// there is no partial-success state — a table either decodes fully or the
/// open/lookup call fails outright.
#[derive(Error, Debug)]
pub enum PcfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing required table: {0:?}")]
    MissingRequiredTable(TableType),

    #[error("glyph index out of range: {index} of {count}")]
    OutOfRange { index: usize, count: usize },

    #[error("invalid bitmap offsets for glyph {index}: [{start}, {end})")]
    InvalidOffsets { index: usize, start: u32, end: u32 },

    #[error("codepoint U+{0:04X} is not mapped by this font")]
    UnmappedCodepoint(u32),
}

/// Result type for PCF operations.
pub type Result<T> = std::result::Result<T, PcfError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_error_display() {
        let err = PcfError::OutOfRange { index: 7, count: 4 };
        assert_eq!(err.to_string(), "glyph index out of range: 7 of 4");

        let err = PcfError::UnmappedCodepoint(0x4E2D);
        assert_eq!(err.to_string(), "codepoint U+4E2D is not mapped by this font");

        let err = PcfError::MissingRequiredTable(TableType::BDF_ENCODINGS);
        assert!(err.to_string().contains("BDF_ENCODINGS"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::UnexpectedEof, "short read");
        let err = PcfError::from(io_error);

        match err {
            PcfError::Io(ref inner) => assert_eq!(inner.kind(), ErrorKind::UnexpectedEof),
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_invalid_offsets_display() {
        let err = PcfError::InvalidOffsets {
            index: 2,
            start: 40,
            end: 32,
        };
        let msg = err.to_string();
        assert!(msg.contains("glyph 2"));
        assert!(msg.contains("[40, 32)"));
    }
}
