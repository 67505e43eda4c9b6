//! Binary reader for container headers.
//!
//! [`BinaryReader`] is a cursor over a byte slice. All multi-byte integers are
//! little-endian, which is the byte order of both PCD9 and DDS headers.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// Decode a fixed-length text field up to its first NUL byte.
///
/// Bytes after the first NUL are ignored. A field without any NUL is decoded
/// in full.
pub fn fixed_str(bytes: &[u8]) -> Result<&str> {
    let end = memchr::memchr(0, bytes).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end]).map_err(Error::Utf8)
}

/// A binary reader over a byte slice.
///
/// # Example
///
/// ```
/// use trutex_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, b'D', b'X', 0, 0];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_fixed_string(4).unwrap(), "DX");
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    ///
    /// Seeking past the end is allowed; the next read reports the shortfall.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Advance the position by a number of bytes.
    #[inline]
    pub fn advance(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Read a fixed-size byte array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a text field of exactly `length` bytes, stopping at the first null.
    ///
    /// The whole field is consumed even when the null comes early.
    pub fn read_fixed_string(&mut self, length: usize) -> Result<&'a str> {
        let bytes = self.read_bytes(length)?;
        fixed_str(bytes)
    }

    /// Read a struct using zerocopy.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Expect specific magic bytes.
    pub fn expect_magic(&mut self, expected: &[u8]) -> Result<()> {
        let actual = self.read_bytes(expected.len())?;
        if actual != expected {
            return Err(Error::InvalidMagic {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [
            0x7F, // u8
            0x34, 0x12, // u16: 0x1234
            0xFF, 0xFF, 0xFF, 0xFF, // u32: 0xFFFFFFFF
        ];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x7F);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0xFFFFFFFF);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_fixed_string_consumes_whole_field() {
        let data = b"ab\0zzDXT5";
        let mut reader = BinaryReader::new(data);

        assert_eq!(reader.read_fixed_string(5).unwrap(), "ab");
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.read_fixed_string(4).unwrap(), "DXT5");
    }

    #[test]
    fn test_fixed_string_rejects_invalid_utf8() {
        let data = [0xC3, 0x28, 0x00, 0x00];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(reader.read_fixed_string(4), Err(Error::Utf8(_))));
    }

    #[test]
    fn test_invalid_utf8_after_null_is_ignored() {
        assert_eq!(fixed_str(&[b'A', 0, 0xFF, 0xFE]).unwrap(), "A");
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_u32(),
            Err(Error::UnexpectedEof {
                needed: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn test_seek_past_end_reports_on_read() {
        let data = [0u8; 8];
        let mut reader = BinaryReader::new(&data);

        reader.seek(24);
        assert_eq!(reader.remaining(), 0);
        assert!(matches!(reader.read_u8(), Err(Error::UnexpectedEof { .. })));
    }

    #[test]
    fn test_expect_magic() {
        let mut reader = BinaryReader::new(b"PCD9");
        assert!(reader.expect_magic(b"PCD9").is_ok());

        let mut reader = BinaryReader::new(b"PCD8");
        assert!(matches!(
            reader.expect_magic(b"PCD9"),
            Err(Error::InvalidMagic { .. })
        ));
    }
}
