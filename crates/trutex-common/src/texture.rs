//! Pixel format table and the container-independent texture descriptor.

use std::fmt;

use crate::{Error, Result};

/// Block-compressed pixel formats understood by both containers.
///
/// This is the only translation authority between PCD9 format codes and DDS
/// FourCC values. Anything not listed here is rejected while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// BC1 (`DXT1`).
    Dxt1,
    /// BC3 (`DXT5`).
    Dxt5,
}

impl PixelFormat {
    /// All supported formats.
    pub const ALL: [Self; 2] = [Self::Dxt1, Self::Dxt5];

    /// Look up a format by its four-character code.
    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.code() == code)
            .ok_or_else(|| Error::UnsupportedFormat(code.to_string()))
    }

    /// Four-character code as stored in PCD9 headers.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Dxt1 => "DXT1",
            Self::Dxt5 => "DXT5",
        }
    }

    /// DDS pixel format FourCC as a little-endian u32.
    pub const fn four_cc(self) -> u32 {
        match self {
            Self::Dxt1 => 827_611_204,
            Self::Dxt5 => 894_720_068,
        }
    }

    /// Multiplier used when sizing the top mip level.
    ///
    /// DXT1 is 0 in the table, so its derived top-level length is always 0.
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Dxt1 => 0,
            Self::Dxt5 => 8,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A texture decoded from one container, ready to be written to another.
///
/// Descriptors are built once by a reader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDescriptor {
    format: PixelFormat,
    width: u32,
    height: u32,
    mip_count: u32,
    flags: u8,
    data: Vec<u8>,
}

impl TextureDescriptor {
    /// Flags used when the source container carries none.
    pub const DEFAULT_FLAGS: u8 = 3;

    /// Create a descriptor with [`Self::DEFAULT_FLAGS`].
    pub fn new(
        format: PixelFormat,
        width: u32,
        height: u32,
        mip_count: u32,
        data: Vec<u8>,
    ) -> Self {
        Self {
            format,
            width,
            height,
            mip_count,
            flags: Self::DEFAULT_FLAGS,
            data,
        }
    }

    /// Replace the flags carried from the source container.
    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    /// Pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Width of the top mip level.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the top mip level.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of mip levels in the payload.
    pub fn mip_count(&self) -> u32 {
        self.mip_count
    }

    /// Container-specific flag bits.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// The full mip chain payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Byte length of the top mip level, `width * height * bpp / 8`.
    ///
    /// The product is formed in 128 bits; with at most 8 bits per pixel the
    /// quotient always fits in a u64.
    pub fn payload_length(&self) -> u64 {
        let bits = u128::from(self.width)
            * u128::from(self.height)
            * u128::from(self.format.bits_per_pixel());
        (bits / 8) as u64
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("DXT1", PixelFormat::Dxt1, 827_611_204)]
    #[case("DXT5", PixelFormat::Dxt5, 894_720_068)]
    fn format_table_lookup(
        #[case] code: &str,
        #[case] expected: PixelFormat,
        #[case] four_cc: u32,
    ) {
        let format = PixelFormat::from_code(code).unwrap();
        assert_eq!(format, expected);
        assert_eq!(format.four_cc(), four_cc);
        assert_eq!(format.four_cc().to_le_bytes(), code.as_bytes());
    }

    #[rstest]
    #[case("DXT3")]
    #[case("DX10")]
    #[case("dxt1")]
    #[case("")]
    fn format_table_rejects_unknown_codes(#[case] code: &str) {
        assert!(matches!(
            PixelFormat::from_code(code),
            Err(Error::UnsupportedFormat(c)) if c == code
        ));
    }

    #[test]
    fn payload_length_dxt5_is_one_byte_per_pixel() {
        let texture = TextureDescriptor::new(PixelFormat::Dxt5, 256, 128, 1, Vec::new());
        assert_eq!(texture.payload_length(), 256 * 128);
    }

    #[test]
    fn payload_length_dxt1_is_zero() {
        let texture = TextureDescriptor::new(PixelFormat::Dxt1, 1024, 1024, 11, Vec::new());
        assert_eq!(texture.payload_length(), 0);
    }

    #[test]
    fn payload_length_does_not_overflow() {
        let texture = TextureDescriptor::new(PixelFormat::Dxt5, u32::MAX, u32::MAX, 1, Vec::new());
        assert_eq!(texture.payload_length(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }

    #[test]
    fn flags_default_and_override() {
        let texture = TextureDescriptor::new(PixelFormat::Dxt1, 4, 4, 1, vec![0; 8]);
        assert_eq!(texture.flags(), TextureDescriptor::DEFAULT_FLAGS);
        assert_eq!(texture.with_flags(0x11).flags(), 0x11);
    }
}
