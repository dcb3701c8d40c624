//! High-level PCF font API
//!
//! [`PcfFont`] composes the table-of-contents scan with the three sub-table
//! decoders and answers "given a character, what are its bitmap bytes and
//! metrics". Only the table directories are materialized at open time; glyph
//! bytes and metric entries are read from the stream on demand.
//!
//! The font exclusively owns its stream for the handle's lifetime, and the
//! stream position is shared mutable state manipulated by seek-then-read:
//! lookups take `&mut self` and a handle is not usable from multiple threads
//! without external synchronization. I/O is synchronous and blocking; a
//! stalled stream stalls the caller.

use crate::bitmap::BitmapTable;
use crate::encoding::EncodingTable;
use crate::error::Result;
use crate::metrics::{MetricEntry, MetricTable};
use crate::reader::StreamReader;
use crate::toc::{self, FileHeader};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;

/// How the row byte-width of a returned glyph is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowWidth {
    /// Derive from the glyph's `char_width` and the bitmap table's padding
    /// unit. The correct interpretation of the format.
    #[default]
    Derived,
    /// Report a fixed byte width regardless of metrics. Compatibility mode
    /// for callers that hardcode their raster stride.
    Fixed(usize),
}

/// Decode-time options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    pub row_width: RowWidth,
}

/// One glyph's raster bytes and spacing metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Raw bitmap bytes, rows back-to-back, bit order as stored in the file.
    pub bytes: Vec<u8>,
    /// Byte width of one raster row.
    pub row_bytes: usize,
    pub metrics: MetricEntry,
}

impl Glyph {
    /// Iterate the raster one padded row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes.chunks(self.row_bytes.max(1))
    }
}

/// An opened PCF font.
pub struct PcfFont<R: Read + Seek> {
    reader: StreamReader<R>,
    header: FileHeader,
    metrics: MetricTable,
    bitmap: BitmapTable,
    encoding: EncodingTable,
    options: DecodeOptions,
}

impl PcfFont<File> {
    /// Open a PCF font file from a path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> PcfFont<R> {
    /// Open a font from any seekable byte source.
    pub fn from_reader(inner: R) -> Result<Self> {
        Self::with_options(inner, DecodeOptions::default())
    }

    /// Open a font with explicit decode options.
    pub fn with_options(inner: R, options: DecodeOptions) -> Result<Self> {
        let mut reader = StreamReader::new(inner);
        let dir = toc::scan(&mut reader)?;

        let metrics = MetricTable::decode(&mut reader, dir.metrics)?;
        let bitmap = BitmapTable::decode(&mut reader, dir.bitmaps)?;
        let encoding = EncodingTable::decode(&mut reader, dir.encodings)?;

        debug!(
            glyphs = bitmap.count(),
            metrics = metrics.count(),
            "opened PCF font"
        );

        Ok(PcfFont {
            reader,
            header: dir.header,
            metrics,
            bitmap,
            encoding,
            options,
        })
    }

    /// The file header as read from the stream.
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Number of glyphs in the bitmap table.
    pub fn glyph_count(&self) -> usize {
        self.bitmap.count()
    }

    /// The decoded encoding table.
    pub fn encoding(&self) -> &EncodingTable {
        &self.encoding
    }

    /// The decoded metric table directory.
    pub fn metrics(&self) -> &MetricTable {
        &self.metrics
    }

    /// The decoded bitmap table directory.
    pub fn bitmap(&self) -> &BitmapTable {
        &self.bitmap
    }

    /// Map a character to its glyph index without touching glyph data.
    pub fn glyph_index(&self, ch: char) -> Result<u16> {
        self.encoding.lookup(ch as u32)
    }

    /// Look up the glyph for a character: bitmap bytes plus metrics.
    pub fn glyph(&mut self, ch: char) -> Result<Glyph> {
        self.glyph_for_code(ch as u32)
    }

    /// Look up the glyph for a raw character code.
    pub fn glyph_for_code(&mut self, code: u32) -> Result<Glyph> {
        let index = self.encoding.lookup(code)? as usize;
        let metrics = self.metrics.entry_at(&mut self.reader, index)?;
        let bytes = self.bitmap.data_for(&mut self.reader, index)?;
        let row_bytes = match self.options.row_width {
            RowWidth::Derived => self.bitmap.row_bytes(metrics.char_width),
            RowWidth::Fixed(n) => n,
        };

        Ok(Glyph {
            bytes,
            row_bytes,
            metrics,
        })
    }
}
