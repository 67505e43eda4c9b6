//! DDS reading and writing.

use trutex_common::{BinaryReader, BinaryWriter, TextureDescriptor};

use crate::header::DdsHeader;
use crate::{Result, DDS_MAGIC, DDS_PAYLOAD_OFFSET};

/// Parse a DDS file into a texture descriptor.
///
/// Everything after the 128-byte header is taken as the payload. DDS has no
/// equivalent of the PCD9 flag byte, so the descriptor gets
/// [`TextureDescriptor::DEFAULT_FLAGS`].
pub fn read_dds(data: &[u8]) -> Result<TextureDescriptor> {
    let mut reader = BinaryReader::new(data);

    reader.expect_magic(DDS_MAGIC)?;
    let header: DdsHeader = reader.read_struct()?;

    let four_cc = header.pixel_format.four_cc;
    let format = four_cc.pixel_format()?;

    let (width, height, mip_count) = (header.width, header.height, header.mipmap_count);

    reader.seek(DDS_PAYLOAD_OFFSET);
    let payload = reader.read_bytes(reader.remaining())?;

    tracing::debug!(
        %format,
        width,
        height,
        mip_count,
        payload = payload.len(),
        "parsed DDS header"
    );

    Ok(TextureDescriptor::new(format, width, height, mip_count, payload.to_vec()))
}

/// Serialize a texture descriptor as a DDS file.
///
/// The linear-size field holds the top mip length derived from the format
/// table. It fails only if that length does not fit in 32 bits.
pub fn write_dds(texture: &TextureDescriptor) -> Result<Vec<u8>> {
    let mut writer = BinaryWriter::with_capacity(DDS_PAYLOAD_OFFSET + texture.data().len());

    let linear_size = u32::try_from(texture.payload_length()).map_err(|_| {
        trutex_common::Error::ValueOutOfRange {
            value: texture.payload_length(),
            bits: 32,
        }
    })?;

    let header = DdsHeader::new(
        texture.format(),
        texture.width(),
        texture.height(),
        texture.mip_count(),
        linear_size,
    );

    writer.write_bytes(DDS_MAGIC)?;
    writer.write_struct(&header)?;
    debug_assert_eq!(writer.len(), DDS_PAYLOAD_OFFSET as u64);
    writer.write_bytes(texture.data())?;

    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use trutex_common::PixelFormat;

    use super::*;
    use crate::Error;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_write_layout() {
        let payload: Vec<u8> = (0..=255).cycle().take(256 * 256).collect();
        let texture = TextureDescriptor::new(PixelFormat::Dxt5, 256, 128, 1, payload.clone());

        let bytes = write_dds(&texture).unwrap();

        assert_eq!(bytes.len(), 128 + payload.len());
        assert_eq!(u32_at(&bytes, 0), 542_327_876);
        assert_eq!(u32_at(&bytes, 4), 124);
        assert_eq!(u32_at(&bytes, 8), 659_463);
        assert_eq!(u32_at(&bytes, 12), 128); // height
        assert_eq!(u32_at(&bytes, 16), 256); // width
        assert_eq!(u32_at(&bytes, 20), 256 * 128);
        assert_eq!(u32_at(&bytes, 24), 0);
        assert_eq!(u32_at(&bytes, 28), 1);
        assert!(bytes[32..76].iter().all(|&b| b == 0));
        assert_eq!(u32_at(&bytes, 76), 32);
        assert_eq!(u32_at(&bytes, 80), 4);
        assert_eq!(u32_at(&bytes, 84), 894_720_068);
        assert!(bytes[88..108].iter().all(|&b| b == 0));
        assert_eq!(u32_at(&bytes, 108), 4_198_408);
        assert!(bytes[112..128].iter().all(|&b| b == 0));
        assert_eq!(&bytes[128..], payload.as_slice());
    }

    #[test]
    fn test_write_empty_payload_keeps_full_header() {
        let texture = TextureDescriptor::new(PixelFormat::Dxt1, 4, 4, 1, Vec::new());
        assert_eq!(write_dds(&texture).unwrap().len(), 128);
    }

    #[test]
    fn test_dxt1_linear_size_is_zero() {
        let texture = TextureDescriptor::new(PixelFormat::Dxt1, 64, 64, 7, vec![0x55; 2736]);
        let bytes = write_dds(&texture).unwrap();

        assert_eq!(u32_at(&bytes, 20), 0);
        assert_eq!(u32_at(&bytes, 84), 827_611_204);
    }

    #[test]
    fn test_oversized_linear_size_is_rejected() {
        let texture = TextureDescriptor::new(PixelFormat::Dxt5, 65_536, 65_536, 1, Vec::new());
        assert!(matches!(
            write_dds(&texture),
            Err(Error::Common(trutex_common::Error::ValueOutOfRange { bits: 32, .. }))
        ));
    }

    #[rstest]
    #[case(PixelFormat::Dxt1, 64, 64, 7)]
    #[case(PixelFormat::Dxt5, 256, 256, 1)]
    #[case(PixelFormat::Dxt5, 512, 128, 10)]
    fn test_round_trip(
        #[case] format: PixelFormat,
        #[case] width: u32,
        #[case] height: u32,
        #[case] mip_count: u32,
    ) {
        let payload: Vec<u8> = (0..1000u32).map(|i| (i * 7) as u8).collect();
        let texture = TextureDescriptor::new(format, width, height, mip_count, payload);

        let decoded = read_dds(&write_dds(&texture).unwrap()).unwrap();

        assert_eq!(decoded.format(), format);
        assert_eq!(decoded.width(), width);
        assert_eq!(decoded.height(), height);
        assert_eq!(decoded.mip_count(), mip_count);
        assert_eq!(decoded.data(), texture.data());
        assert_eq!(decoded.flags(), TextureDescriptor::DEFAULT_FLAGS);
    }

    #[test]
    fn test_read_rejects_unsupported_format() {
        let texture = TextureDescriptor::new(PixelFormat::Dxt5, 4, 4, 1, vec![0; 16]);
        let mut bytes = write_dds(&texture).unwrap();
        bytes[84..88].copy_from_slice(b"DXT3");

        assert!(matches!(
            read_dds(&bytes),
            Err(Error::Common(trutex_common::Error::UnsupportedFormat(code))) if code == "DXT3"
        ));
    }

    #[test]
    fn test_read_rejects_bad_magic() {
        let texture = TextureDescriptor::new(PixelFormat::Dxt5, 4, 4, 1, vec![0; 16]);
        let mut bytes = write_dds(&texture).unwrap();
        bytes[0..4].copy_from_slice(b"SECT");

        assert!(matches!(
            read_dds(&bytes),
            Err(Error::Common(trutex_common::Error::InvalidMagic { .. }))
        ));
    }

    #[test]
    fn test_read_rejects_truncated_header() {
        let texture = TextureDescriptor::new(PixelFormat::Dxt5, 4, 4, 1, Vec::new());
        let bytes = write_dds(&texture).unwrap();

        assert!(matches!(
            read_dds(&bytes[..100]),
            Err(Error::Common(trutex_common::Error::UnexpectedEof { .. }))
        ));
    }
}
