//! # pcf-font
//!
//! A pure Rust decoder for the Portable Compiled Font (PCF) binary format —
//! the table-of-contents-indexed container used by bitmap font renderers.
//!
//! The crate decodes the three sub-tables glyph lookup depends on (metrics,
//! bitmaps, BDF encodings) and exposes per-glyph raster bytes and spacing
//! metrics. Opening a font reads only the table directories; glyph data is
//! fetched from the stream on demand.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pcf_font::PcfFont;
//!
//! # fn main() -> pcf_font::Result<()> {
//! let mut font = PcfFont::open("wenquanyi_13px.pcf")?;
//!
//! let glyph = font.glyph('A')?;
//! println!(
//!     "{}x{} advance, {} bytes per row",
//!     glyph.metrics.char_width,
//!     glyph.metrics.char_ascent + glyph.metrics.char_descent,
//!     glyph.row_bytes,
//! );
//!
//! for row in glyph.rows() {
//!     for byte in row {
//!         for bit in (0..8).rev() {
//!             print!("{}", if byte & (1 << bit) != 0 { '@' } else { '.' });
//!         }
//!     }
//!     println!();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Any seekable byte source works, not just files:
//!
//! ```rust,no_run
//! use pcf_font::PcfFont;
//! use std::io::Cursor;
//!
//! # fn main() -> pcf_font::Result<()> {
//! # let bytes: Vec<u8> = Vec::new();
//! let mut font = PcfFont::from_reader(Cursor::new(bytes))?;
//! let glyph = font.glyph_for_code(0x6D4B)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`font`] - [`PcfFont`], the composition root
//! - [`toc`] - file header and table-of-contents scan
//! - [`metrics`] - per-glyph spacing metrics (compressed and uncompressed)
//! - [`bitmap`] - glyph raster addressing inside the shared bitmap blob
//! - [`encoding`] - character code to glyph index mapping
//! - [`reader`] - byte-order-aware primitive reads
//!
//! ## Scope
//!
//! This is a read-only decoder. Font creation, subsetting, the property /
//! glyph-name / swidth / accelerator tables, and rasterization beyond the raw
//! bitmap bytes are out of scope. Diagnostics are emitted as `tracing` events;
//! install a subscriber to see them.

pub mod bitmap;
pub mod encoding;
pub mod error;
pub mod font;
pub mod metrics;
pub mod reader;
pub mod toc;

pub use self::bitmap::BitmapTable;
pub use self::encoding::{EncodingTable, NO_GLYPH};
pub use self::error::{PcfError, Result};
pub use self::font::{DecodeOptions, Glyph, PcfFont, RowWidth};
pub use self::metrics::{MetricEntry, MetricTable};
pub use self::reader::StreamReader;
pub use self::toc::{FileHeader, FormatFlags, TableDescriptor, TableType, MAGIC};
