//! Table-of-contents scanner
//!
//! A PCF file opens with a 4-byte magic tag and a table count, followed by one
//! descriptor per sub-table. The scanner collects the descriptors, keeps the
//! three tables lookup needs (metrics, bitmaps, BDF encodings) and discards
//! the rest.

use crate::error::{PcfError, Result};
use crate::reader::StreamReader;
use bitflags::bitflags;
use std::io::{Read, Seek};
use tracing::debug;

/// Magic tag at offset 0 of every PCF file.
pub const MAGIC: [u8; 4] = *b"\x01fcp";

bitflags! {
    /// Sub-table type tags from the table of contents.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TableType: u32 {
        const PROPERTIES       = 1 << 0;
        const ACCELERATORS     = 1 << 1;
        const METRICS          = 1 << 2;
        const BITMAPS          = 1 << 3;
        const INK_METRICS      = 1 << 4;
        const BDF_ENCODINGS    = 1 << 5;
        const SWIDTHS          = 1 << 6;
        const GLYPH_NAMES      = 1 << 7;
        const BDF_ACCELERATORS = 1 << 8;
    }
}

bitflags! {
    /// Per-table format word.
    ///
    /// Bit 0x100 is table-type-dependent: it means compressed metrics in a
    /// metrics table and inkbound accelerators in an accelerator table. The
    /// low two bits are not flags at all but the glyph-row padding exponent,
    /// exposed through [`FormatFlags::glyph_pad_unit`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FormatFlags: u32 {
        const COMPRESSED_METRICS = 0x100;
        const ACCEL_W_INKBOUNDS  = 0x100;
        const INKBOUNDS          = 0x200;
        const GLYPH_PAD          = 0x3;
    }
}

impl FormatFlags {
    /// Glyph-row padding unit in bytes (1, 2, 4 or 8), selected by the low
    /// two bits of the format word.
    pub fn glyph_pad_unit(&self) -> u32 {
        1 << (self.bits() & 0x3)
    }
}

/// File header read once at stream start.
///
/// The magic tag is read in stream order and the table count without the swap
/// convention applied to every other integer in the file — both quirks of the
/// format, preserved exactly. Magic validity is exposed but not enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: [u8; 4],
    pub table_count: u32,
}

impl FileHeader {
    /// Whether the magic tag matches the PCF signature.
    pub fn magic_matches(&self) -> bool {
        self.magic == MAGIC
    }
}

/// One table-of-contents entry: immutable metadata locating a sub-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDescriptor {
    pub table_type: TableType,
    pub format: FormatFlags,
    pub size: u32,
    /// Absolute byte offset of the table body in the stream.
    pub offset: u32,
}

/// The descriptors glyph lookup depends on.
#[derive(Debug, Clone)]
pub struct TableDirectory {
    pub header: FileHeader,
    pub metrics: TableDescriptor,
    pub bitmaps: TableDescriptor,
    pub encodings: TableDescriptor,
}

/// Scan the header and table of contents from the start of the stream.
///
/// Fails with [`PcfError::MissingRequiredTable`] if any of the metrics,
/// bitmaps or BDF encodings tables is absent, before any table body is read.
pub fn scan<R: Read + Seek>(reader: &mut StreamReader<R>) -> Result<TableDirectory> {
    reader.seek_to(0)?;
    let magic = reader.read_tag()?;
    let table_count = reader.read_u32_raw()?;
    let header = FileHeader { magic, table_count };

    debug!(table_count, "scanning PCF table of contents");

    let mut metrics = None;
    let mut bitmaps = None;
    let mut encodings = None;

    for _ in 0..table_count {
        let descriptor = TableDescriptor {
            table_type: TableType::from_bits_retain(reader.read_u32_be()?),
            format: FormatFlags::from_bits_retain(reader.read_u32_be()?),
            size: reader.read_u32_be()?,
            offset: reader.read_u32_be()?,
        };
        if descriptor.table_type == TableType::METRICS {
            metrics = Some(descriptor);
        } else if descriptor.table_type == TableType::BITMAPS {
            bitmaps = Some(descriptor);
        } else if descriptor.table_type == TableType::BDF_ENCODINGS {
            encodings = Some(descriptor);
        }
    }

    let metrics = metrics.ok_or(PcfError::MissingRequiredTable(TableType::METRICS))?;
    let bitmaps = bitmaps.ok_or(PcfError::MissingRequiredTable(TableType::BITMAPS))?;
    let encodings = encodings.ok_or(PcfError::MissingRequiredTable(TableType::BDF_ENCODINGS))?;

    Ok(TableDirectory {
        header,
        metrics,
        bitmaps,
        encodings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn descriptor_bytes(table_type: u32, format: u32, size: u32, offset: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&table_type.to_be_bytes());
        out.extend_from_slice(&format.to_be_bytes());
        out.extend_from_slice(&size.to_be_bytes());
        out.extend_from_slice(&offset.to_be_bytes());
        out
    }

    fn toc_bytes(descriptors: &[(u32, u32, u32, u32)]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&(descriptors.len() as u32).to_le_bytes());
        for &(t, f, s, o) in descriptors {
            out.extend_from_slice(&descriptor_bytes(t, f, s, o));
        }
        out
    }

    #[test]
    fn test_scan_retains_the_three_required_tables() {
        let bytes = toc_bytes(&[
            (TableType::PROPERTIES.bits(), 0, 10, 100),
            (TableType::METRICS.bits(), 0x100, 20, 200),
            (TableType::BITMAPS.bits(), 2, 30, 300),
            (TableType::SWIDTHS.bits(), 0, 40, 400),
            (TableType::BDF_ENCODINGS.bits(), 0, 50, 500),
        ]);
        let mut reader = StreamReader::new(Cursor::new(bytes));

        let dir = scan(&mut reader).unwrap();
        assert_eq!(dir.header.table_count, 5);
        assert!(dir.header.magic_matches());
        assert_eq!(dir.metrics.offset, 200);
        assert!(dir.metrics.format.contains(FormatFlags::COMPRESSED_METRICS));
        assert_eq!(dir.bitmaps.offset, 300);
        assert_eq!(dir.bitmaps.format.glyph_pad_unit(), 4);
        assert_eq!(dir.encodings.offset, 500);
    }

    #[test]
    fn test_scan_missing_encodings_fails() {
        let bytes = toc_bytes(&[
            (TableType::METRICS.bits(), 0, 20, 200),
            (TableType::BITMAPS.bits(), 0, 30, 300),
        ]);
        let mut reader = StreamReader::new(Cursor::new(bytes));

        match scan(&mut reader) {
            Err(PcfError::MissingRequiredTable(t)) => assert_eq!(t, TableType::BDF_ENCODINGS),
            other => panic!("expected MissingRequiredTable, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_zero_tables_fails_with_missing_table() {
        let bytes = toc_bytes(&[]);
        let mut reader = StreamReader::new(Cursor::new(bytes));

        match scan(&mut reader) {
            Err(PcfError::MissingRequiredTable(t)) => assert_eq!(t, TableType::METRICS),
            other => panic!("expected MissingRequiredTable, got {other:?}"),
        }
    }

    #[test]
    fn test_table_count_is_not_swapped() {
        // Count 2 stored in stream order, not big-endian.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&[2, 0, 0, 0]);
        bytes.extend_from_slice(&descriptor_bytes(TableType::METRICS.bits(), 0, 0, 0));
        bytes.extend_from_slice(&descriptor_bytes(TableType::BITMAPS.bits(), 0, 0, 0));
        let mut reader = StreamReader::new(Cursor::new(bytes));

        // Two descriptors parse; the scan then fails on the missing encodings
        // table rather than on a bogus count.
        match scan(&mut reader) {
            Err(PcfError::MissingRequiredTable(t)) => assert_eq!(t, TableType::BDF_ENCODINGS),
            other => panic!("expected MissingRequiredTable, got {other:?}"),
        }
    }

    #[test]
    fn test_glyph_pad_units() {
        for (bits, unit) in [(0u32, 1u32), (1, 2), (2, 4), (3, 8)] {
            assert_eq!(FormatFlags::from_bits_retain(bits).glyph_pad_unit(), unit);
        }
    }
}
