//! Binary writer for container headers.
//!
//! [`BinaryWriter`] writes little-endian fields into a growable, seekable
//! buffer. Size fields that depend on the final output length are written in
//! two steps: [`BinaryWriter::reserve_u32`] leaves a zeroed slot and returns a
//! [`Placeholder`], and [`BinaryWriter::patch_u32`] fills it in once the length
//! is known.

use std::io::{Cursor, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use zerocopy::{Immutable, IntoBytes};

use crate::{Error, Result};

/// A reserved 32-bit slot awaiting its final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a reserved field stays zero unless it is patched"]
pub struct Placeholder {
    offset: u64,
}

impl Placeholder {
    /// Absolute offset of the reserved slot.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// A little-endian binary writer over an in-memory buffer.
///
/// # Example
///
/// ```
/// use trutex_common::BinaryWriter;
///
/// let mut writer = BinaryWriter::new();
/// writer.write_bytes(b"SECT").unwrap();
/// let size = writer.reserve_u32().unwrap();
/// writer.write_bytes(&[0xAA; 8]).unwrap();
///
/// let total = writer.len();
/// writer.patch_u32(size, total - 8).unwrap();
///
/// let bytes = writer.into_inner();
/// assert_eq!(&bytes[4..8], &8u32.to_le_bytes());
/// ```
#[derive(Debug, Default)]
pub struct BinaryWriter {
    cursor: Cursor<Vec<u8>>,
}

impl BinaryWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cursor: Cursor::new(Vec::with_capacity(capacity)),
        }
    }

    /// Current write position.
    #[inline]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Length of everything written so far.
    #[inline]
    pub fn len(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    /// Check if nothing has been written yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor.get_ref().is_empty()
    }

    /// Seek to an absolute position.
    pub fn seek(&mut self, offset: u64) {
        self.cursor.set_position(offset);
    }

    /// Move the position by `delta` bytes, backwards if negative.
    pub fn seek_relative(&mut self, delta: i64) -> Result<()> {
        self.cursor.seek(SeekFrom::Current(delta))?;
        Ok(())
    }

    /// Skip `count` bytes, zero-filling anything past the current end.
    pub fn skip(&mut self, count: u64) {
        let target = self.position() + count;
        let buffer = self.cursor.get_mut();
        if target > buffer.len() as u64 {
            buffer.resize(target as usize, 0);
        }
        self.cursor.set_position(target);
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.cursor.write_all(bytes)?;
        Ok(())
    }

    /// Write a struct using zerocopy.
    pub fn write_struct<T: IntoBytes + Immutable>(&mut self, value: &T) -> Result<()> {
        self.write_bytes(value.as_bytes())
    }

    /// Write a single byte.
    pub fn write_u8(&mut self, value: impl Into<u64>) -> Result<()> {
        let value = narrow::<u8>(value.into(), 8)?;
        self.cursor.write_u8(value)?;
        Ok(())
    }

    /// Write a little-endian u16.
    pub fn write_u16(&mut self, value: impl Into<u64>) -> Result<()> {
        let value = narrow::<u16>(value.into(), 16)?;
        self.cursor.write_u16::<LittleEndian>(value)?;
        Ok(())
    }

    /// Write a little-endian u32.
    pub fn write_u32(&mut self, value: impl Into<u64>) -> Result<()> {
        let value = narrow::<u32>(value.into(), 32)?;
        self.cursor.write_u32::<LittleEndian>(value)?;
        Ok(())
    }

    /// Reserve a zeroed u32 slot to be filled by [`Self::patch_u32`].
    pub fn reserve_u32(&mut self) -> Result<Placeholder> {
        let offset = self.position();
        self.write_u32(0u32)?;
        Ok(Placeholder { offset })
    }

    /// Fill a reserved slot. The write position is left unchanged.
    pub fn patch_u32(&mut self, slot: Placeholder, value: impl Into<u64>) -> Result<()> {
        let resume = self.position();
        self.seek(slot.offset);
        let written = self.write_u32(value);
        self.seek(resume);
        written
    }

    /// Consume the writer and return the buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.cursor.into_inner()
    }
}

fn narrow<T: TryFrom<u64>>(value: u64, bits: u32) -> Result<T> {
    T::try_from(value).map_err(|_| Error::ValueOutOfRange { value, bits })
}
