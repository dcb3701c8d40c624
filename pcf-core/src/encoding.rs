//! Encoding table decoder
//!
//! Maps character codes to glyph indices through a dense 2D index over the
//! rectangle `[min_byte1..=max_byte1] x [min_char_or_byte2..=max_char_or_byte2]`.
//! Single-byte fonts declare a degenerate byte1 range of `[0, 0]` and address
//! the one row directly. A cell holding `0xFFFF` means the code has no glyph.
//!
//! Lookups are bounds-checked against the declared rectangle and the sentinel
//! is reported, not returned: anything outside the rectangle, and any code the
//! font maps to the sentinel, is a [`PcfError::UnmappedCodepoint`].

use crate::error::{PcfError, Result};
use crate::reader::StreamReader;
use crate::toc::TableDescriptor;
use std::io::{Read, Seek};
use tracing::{debug, trace};

/// Glyph-index sentinel meaning "no glyph for this code".
pub const NO_GLYPH: u16 = 0xFFFF;

/// Decoded encoding table: the code rectangle and the full glyph index array.
#[derive(Debug, Clone)]
pub struct EncodingTable {
    /// In-body format word, read without the swap convention.
    format: u32,
    min_char_or_byte2: i16,
    max_char_or_byte2: i16,
    min_byte1: i16,
    max_byte1: i16,
    default_char: i16,
    index: Vec<u16>,
}

impl EncodingTable {
    /// Decode the whole table at `descriptor.offset`, index array included.
    pub fn decode<R: Read + Seek>(
        reader: &mut StreamReader<R>,
        descriptor: TableDescriptor,
    ) -> Result<Self> {
        reader.seek_to(descriptor.offset as u64)?;
        let format = reader.read_u32_raw()?;
        let min_char_or_byte2 = reader.read_i16_be()?;
        let max_char_or_byte2 = reader.read_i16_be()?;
        let min_byte1 = reader.read_i16_be()?;
        let max_byte1 = reader.read_i16_be()?;
        let default_char = reader.read_i16_be()?;

        let cols = (max_char_or_byte2 as i64 - min_char_or_byte2 as i64 + 1).max(0);
        let rows = (max_byte1 as i64 - min_byte1 as i64 + 1).max(0);
        let size = (cols * rows) as usize;
        let index = reader.read_u16_be_array(size)?;

        debug!(
            min_char_or_byte2,
            max_char_or_byte2, min_byte1, max_byte1, size, "decoded encoding table"
        );

        Ok(EncodingTable {
            format,
            min_char_or_byte2,
            max_char_or_byte2,
            min_byte1,
            max_byte1,
            default_char,
            index,
        })
    }

    /// In-body format word.
    pub fn format(&self) -> u32 {
        self.format
    }

    /// Declared code rectangle as
    /// `(min_char_or_byte2, max_char_or_byte2, min_byte1, max_byte1)`.
    pub fn code_range(&self) -> (i16, i16, i16, i16) {
        (
            self.min_char_or_byte2,
            self.max_char_or_byte2,
            self.min_byte1,
            self.max_byte1,
        )
    }

    /// The font's declared substitute character code.
    ///
    /// Exposed for callers that want a fallback; lookup never substitutes it
    /// silently.
    pub fn default_char(&self) -> i16 {
        self.default_char
    }

    /// Whether the table addresses codes by a single byte.
    pub fn is_single_byte(&self) -> bool {
        self.min_byte1 == 0 && self.max_byte1 == 0
    }

    fn columns(&self) -> i32 {
        self.max_char_or_byte2 as i32 - self.min_char_or_byte2 as i32 + 1
    }

    /// Map a character code to its glyph index.
    pub fn lookup(&self, code: u32) -> Result<u16> {
        let b1 = (code & 0xFF) as i32;
        let b2 = (code >> 8) as i32;

        let in_rect = b1 >= self.min_char_or_byte2 as i32
            && b1 <= self.max_char_or_byte2 as i32
            && b2 >= self.min_byte1 as i32
            && b2 <= self.max_byte1 as i32;
        if !in_rect {
            return Err(PcfError::UnmappedCodepoint(code));
        }

        let offset = if b2 == 0 {
            b1 - self.min_char_or_byte2 as i32
        } else {
            (b2 - self.min_byte1 as i32) * self.columns() + (b1 - self.min_char_or_byte2 as i32)
        };

        let glyph = self.index[offset as usize];
        trace!(code, b1, b2, offset, glyph, "encoding lookup");

        if glyph == NO_GLYPH {
            return Err(PcfError::UnmappedCodepoint(code));
        }
        Ok(glyph)
    }
}
