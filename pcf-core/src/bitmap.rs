//! Bitmap table decoder
//!
//! All glyph rasters live back-to-back in one blob after the table directory.
//! The directory holds a per-glyph byte offset into the blob plus four
//! alternative blob totals, one per glyph-row padding convention. A glyph's
//! bytes span from its offset to the next glyph's offset; this layer hands
//! back the raw bytes and the padded row width, nothing more — bit order and
//! rasterization are the caller's business.

use crate::error::{PcfError, Result};
use crate::reader::StreamReader;
use crate::toc::TableDescriptor;
use std::io::{Read, Seek};
use tracing::debug;

/// Decoded bitmap table directory: blob offsets and padded totals.
/// Glyph bytes stay in the stream until asked for.
#[derive(Debug, Clone)]
pub struct BitmapTable {
    descriptor: TableDescriptor,
    /// In-body format word, read without the swap convention.
    format: u32,
    offsets: Vec<u32>,
    /// Total blob size under 1/2/4/8-byte row padding, in that order. The
    /// descriptor's low format bits select which one applies; recorded here,
    /// not selected.
    bitmap_sizes: [u32; 4],
}

impl BitmapTable {
    /// Decode the table directory at `descriptor.offset`.
    pub fn decode<R: Read + Seek>(
        reader: &mut StreamReader<R>,
        descriptor: TableDescriptor,
    ) -> Result<Self> {
        reader.seek_to(descriptor.offset as u64)?;
        let format = reader.read_u32_raw()?;
        let count = reader.read_u32_be()? as usize;
        let offsets = reader.read_u32_be_array(count)?;
        let sizes = reader.read_u32_be_array(4)?;
        let bitmap_sizes = [sizes[0], sizes[1], sizes[2], sizes[3]];

        debug!(
            count,
            ?bitmap_sizes,
            pad_unit = descriptor.format.glyph_pad_unit(),
            "decoded bitmap table"
        );

        Ok(BitmapTable {
            descriptor,
            format,
            offsets,
            bitmap_sizes,
        })
    }

    /// Number of glyphs in the offset array.
    pub fn count(&self) -> usize {
        self.offsets.len()
    }

    /// In-body format word.
    pub fn format(&self) -> u32 {
        self.format
    }

    /// The four padded blob totals recorded in the directory.
    pub fn bitmap_sizes(&self) -> [u32; 4] {
        self.bitmap_sizes
    }

    /// Row width in bytes for a glyph of `char_width` pixels, padded to the
    /// unit the descriptor's format selects.
    pub fn row_bytes(&self, char_width: i16) -> usize {
        let pad = self.descriptor.format.glyph_pad_unit() as usize;
        let bytes = (char_width.max(0) as usize).div_ceil(8);
        bytes.div_ceil(pad) * pad
    }

    /// Read the raw bitmap bytes for one glyph index.
    ///
    /// A glyph's extent needs the following offset, so the last entry of the
    /// offset array is not addressable; asking for it is `OutOfRange`.
    pub fn data_for<R: Read + Seek>(
        &self,
        reader: &mut StreamReader<R>,
        index: usize,
    ) -> Result<Vec<u8>> {
        let count = self.offsets.len();
        if index + 1 >= count {
            return Err(PcfError::OutOfRange { index, count });
        }

        let start = self.offsets[index];
        let end = self.offsets[index + 1];
        if end < start {
            return Err(PcfError::InvalidOffsets { index, start, end });
        }

        // format word + count, offset array, four size fields
        let blob_base = self.descriptor.offset as u64 + 8 + 4 * count as u64 + 16;
        reader.seek_to(blob_base + start as u64)?;
        reader.read_bytes((end - start) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::{FormatFlags, TableType};
    use std::io::Cursor;

    fn descriptor(format: u32, offset: u32) -> TableDescriptor {
        TableDescriptor {
            table_type: TableType::BITMAPS,
            format: FormatFlags::from_bits_retain(format),
            size: 0,
            offset,
        }
    }

    fn bitmap_table(offsets: &[u32], sizes: [u32; 4], blob: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u32.to_le_bytes()); // in-body format, raw
        bytes.extend_from_slice(&(offsets.len() as u32).to_be_bytes());
        for off in offsets {
            bytes.extend_from_slice(&off.to_be_bytes());
        }
        for size in sizes {
            bytes.extend_from_slice(&size.to_be_bytes());
        }
        bytes.extend_from_slice(blob);
        bytes
    }

    #[test]
    fn test_data_for_returns_offset_pair_range() {
        let blob = [0xFF, 0x00, 0xFF, 0x00, 0xAA, 0xBB];
        let bytes = bitmap_table(&[0, 4, 6], [6, 6, 8, 8], &blob);
        let mut reader = StreamReader::new(Cursor::new(bytes));
        let table = BitmapTable::decode(&mut reader, descriptor(0, 0)).unwrap();

        assert_eq!(table.count(), 3);
        assert_eq!(
            table.data_for(&mut reader, 0).unwrap(),
            vec![0xFF, 0x00, 0xFF, 0x00]
        );
        assert_eq!(table.data_for(&mut reader, 1).unwrap(), vec![0xAA, 0xBB]);
    }

    #[test]
    fn test_ranges_are_adjacent_and_non_overlapping() {
        let blob: Vec<u8> = (0..12).collect();
        let offsets = [0u32, 2, 7, 12];
        let bytes = bitmap_table(&offsets, [12; 4], &blob);
        let mut reader = StreamReader::new(Cursor::new(bytes));
        let table = BitmapTable::decode(&mut reader, descriptor(0, 0)).unwrap();

        let mut reassembled = Vec::new();
        for i in 0..offsets.len() - 1 {
            let data = table.data_for(&mut reader, i).unwrap();
            assert_eq!(data.len(), (offsets[i + 1] - offsets[i]) as usize);
            reassembled.extend_from_slice(&data);
        }
        assert_eq!(reassembled, blob);
    }

    #[test]
    fn test_last_index_needs_a_following_offset() {
        let bytes = bitmap_table(&[0, 4], [4; 4], &[0xFF, 0x00, 0xFF, 0x00]);
        let mut reader = StreamReader::new(Cursor::new(bytes));
        let table = BitmapTable::decode(&mut reader, descriptor(0, 0)).unwrap();

        match table.data_for(&mut reader, 1) {
            Err(PcfError::OutOfRange { index: 1, count: 2 }) => {}
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_decreasing_offsets_are_invalid() {
        let bytes = bitmap_table(&[4, 0, 8], [8; 4], &[0; 8]);
        let mut reader = StreamReader::new(Cursor::new(bytes));
        let table = BitmapTable::decode(&mut reader, descriptor(0, 0)).unwrap();

        match table.data_for(&mut reader, 0) {
            Err(PcfError::InvalidOffsets {
                index: 0,
                start: 4,
                end: 0,
            }) => {}
            other => panic!("expected InvalidOffsets, got {other:?}"),
        }
    }

    #[test]
    fn test_blob_base_accounts_for_directory_and_table_offset() {
        // Table body placed at a non-zero offset in the stream.
        let blob = [0xDE, 0xAD];
        let mut bytes = vec![0u8; 10];
        bytes.extend_from_slice(&bitmap_table(&[0, 2], [2; 4], &blob));
        let mut reader = StreamReader::new(Cursor::new(bytes));
        let table = BitmapTable::decode(&mut reader, descriptor(0, 10)).unwrap();

        assert_eq!(table.data_for(&mut reader, 0).unwrap(), vec![0xDE, 0xAD]);
    }

    #[test]
    fn test_row_bytes_derivation() {
        let bytes = bitmap_table(&[0, 1], [1; 4], &[0]);
        let mut reader = StreamReader::new(Cursor::new(bytes.clone()));

        // pad unit 1: plain ceil(width / 8)
        let table = BitmapTable::decode(&mut reader, descriptor(0, 0)).unwrap();
        assert_eq!(table.row_bytes(0), 0);
        assert_eq!(table.row_bytes(7), 1);
        assert_eq!(table.row_bytes(13), 2);

        // pad unit 4: rounded up to a 4-byte boundary
        let mut reader = StreamReader::new(Cursor::new(bytes));
        let table = BitmapTable::decode(&mut reader, descriptor(2, 0)).unwrap();
        assert_eq!(table.row_bytes(13), 4);
        assert_eq!(table.row_bytes(33), 8);
    }
}
