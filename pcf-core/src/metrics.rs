//! Metric table decoder
//!
//! Per-glyph spacing metrics come in two layouts selected by the descriptor's
//! `COMPRESSED_METRICS` flag: a compact 5-byte form that biases each signed
//! field into an unsigned byte, and a full 12-byte form of six swapped i16s.
//! Entries are decoded on demand per glyph index, never cached.

use crate::error::{PcfError, Result};
use crate::reader::StreamReader;
use crate::toc::{FormatFlags, TableDescriptor};
use std::io::{Read, Seek};
use tracing::debug;

/// Bias applied to every field of a compressed metric entry.
const COMPRESSED_BIAS: i16 = 0x80;

/// Spacing metrics for one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricEntry {
    pub left_side_bearing: i16,
    pub right_side_bearing: i16,
    pub char_width: i16,
    pub char_ascent: i16,
    pub char_descent: i16,
    /// Only present in the uncompressed layout; zero otherwise.
    pub char_attributes: i16,
}

/// Decoded metric table directory: the entry layout and glyph count.
/// Entry bodies stay in the stream until asked for.
#[derive(Debug, Clone)]
pub struct MetricTable {
    descriptor: TableDescriptor,
    /// In-body format word, read without the swap convention. Kept for
    /// introspection; layout selection uses the descriptor's format word.
    format: u32,
    count: usize,
}

impl MetricTable {
    /// Decode the table directory at `descriptor.offset`.
    pub fn decode<R: Read + Seek>(
        reader: &mut StreamReader<R>,
        descriptor: TableDescriptor,
    ) -> Result<Self> {
        reader.seek_to(descriptor.offset as u64)?;
        let format = reader.read_u32_raw()?;
        let count = if descriptor.format.contains(FormatFlags::COMPRESSED_METRICS) {
            reader.read_u16_be()? as usize
        } else {
            reader.read_u32_be()? as usize
        };

        debug!(
            count,
            compressed = descriptor.format.contains(FormatFlags::COMPRESSED_METRICS),
            "decoded metrics table"
        );

        Ok(MetricTable {
            descriptor,
            format,
            count,
        })
    }

    /// Number of metric entries.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether entries use the compact 5-byte layout.
    pub fn is_compressed(&self) -> bool {
        self.descriptor
            .format
            .contains(FormatFlags::COMPRESSED_METRICS)
    }

    /// In-body format word.
    pub fn format(&self) -> u32 {
        self.format
    }

    /// Read the metric entry for one glyph index.
    pub fn entry_at<R: Read + Seek>(
        &self,
        reader: &mut StreamReader<R>,
        index: usize,
    ) -> Result<MetricEntry> {
        if index >= self.count {
            return Err(PcfError::OutOfRange {
                index,
                count: self.count,
            });
        }

        let base = self.descriptor.offset as u64;
        if self.is_compressed() {
            // format word (4) + u16 count (2), then 5 bytes per entry
            reader.seek_to(base + 6 + index as u64 * 5)?;
            let b = reader.read_bytes(5)?;
            Ok(MetricEntry {
                left_side_bearing: b[0] as i16 - COMPRESSED_BIAS,
                right_side_bearing: b[1] as i16 - COMPRESSED_BIAS,
                char_width: b[2] as i16 - COMPRESSED_BIAS,
                char_ascent: b[3] as i16 - COMPRESSED_BIAS,
                char_descent: b[4] as i16 - COMPRESSED_BIAS,
                char_attributes: 0,
            })
        } else {
            // format word (4) + u32 count (4), then 6 swapped i16 per entry
            reader.seek_to(base + 8 + index as u64 * 12)?;
            Ok(MetricEntry {
                left_side_bearing: reader.read_i16_be()?,
                right_side_bearing: reader.read_i16_be()?,
                char_width: reader.read_i16_be()?,
                char_ascent: reader.read_i16_be()?,
                char_descent: reader.read_i16_be()?,
                char_attributes: reader.read_i16_be()?,
            })
        }
    }
}
