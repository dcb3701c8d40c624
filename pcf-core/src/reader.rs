//! Byte-order-aware primitive reader
//!
//! Every PCF sub-table stores its 16- and 32-bit integers swapped (big-endian)
//! regardless of host order, so the swap is applied uniformly at read time
//! rather than per field. The two exceptions — the header's table count and
//! each table's in-body format word — are read without the swap convention,
//! which on the little-endian hosts the format grew up on means taking the
//! bytes in stream order as a little-endian value. Both conventions get an
//! explicit method here; there is no generic decoding.

use crate::error::Result;
use std::io::{BufReader, Read, Seek, SeekFrom};

/// Positioned reader over a seekable byte source.
///
/// The caller is responsible for seeking before a run of reads; every read
/// consumes from the current position. A short read surfaces as
/// [`PcfError::Io`](crate::PcfError::Io) with no partial result.
pub struct StreamReader<R: Read + Seek> {
    inner: BufReader<R>,
}

impl<R: Read + Seek> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        StreamReader {
            inner: BufReader::new(inner),
        }
    }

    /// Seek to an absolute byte offset.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Read exactly `len` bytes from the current position.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read a 4-byte tag in stream order, untouched by any swap.
    pub fn read_tag(&mut self) -> Result<[u8; 4]> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.inner.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    pub fn read_i16_be(&mut self) -> Result<i16> {
        let mut buf = [0u8; 2];
        self.inner.read_exact(&mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    pub fn read_i32_be(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    /// Read a 32-bit word without the swap convention (stream order,
    /// interpreted little-endian). Used for the header's table count and for
    /// each table's in-body format word.
    pub fn read_u32_raw(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Read `count` swapped 32-bit values.
    pub fn read_u32_be_array(&mut self, count: usize) -> Result<Vec<u32>> {
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read_u32_be()?);
        }
        Ok(values)
    }

    /// Read `count` swapped 16-bit values.
    pub fn read_u16_be_array(&mut self, count: usize) -> Result<Vec<u16>> {
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read_u16_be()?);
        }
        Ok(values)
    }
}
