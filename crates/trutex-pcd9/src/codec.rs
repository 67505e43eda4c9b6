//! PCD9 reading and writing.

use std::path::Path;

use trutex_common::{BinaryReader, BinaryWriter, PixelFormat, TextureDescriptor};

use crate::identifier::parse_identifier;
use crate::{Result, PCD9_MAGIC, PCD9_PAYLOAD_OFFSET, PCD9_TAG_OFFSET, SECT_MAGIC};

/// Length of the `SECT` header that precedes the `PCD9` tag.
const SECTION_HEADER_LEN: u64 = PCD9_TAG_OFFSET as u64;

const SECTION_VERSION: u8 = 5;
const SECTION_KIND: u32 = 10;
const SECTION_TERMINATOR: [u8; 4] = [0xFF; 4];

/// Texture type written for every converted texture.
const TEXTURE_TYPE: u16 = 3;

/// A decoded PCD9 file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcd9Texture {
    /// The texture itself.
    pub descriptor: TextureDescriptor,
    /// Resource identifier from the section header.
    pub identifier: u32,
    /// Texture type field. Kept for inspection only.
    pub texture_type: u16,
}

/// Parse a PCD9 file.
///
/// The payload length comes from the header's payload size field, so trailing
/// bytes after the payload are ignored.
pub fn read_pcd9(data: &[u8]) -> Result<Pcd9Texture> {
    let mut reader = BinaryReader::new(data);

    reader.seek(PCD9_TAG_OFFSET);
    reader.expect_magic(PCD9_MAGIC)?;

    let format = PixelFormat::from_code(reader.read_fixed_string(4)?)?;
    let payload_size = reader.read_u32()? as usize;
    reader.advance(4);

    let width = reader.read_u16()?;
    let height = reader.read_u16()?;
    let flags = reader.read_u8()?;
    let mip_count = reader.read_u8()?;
    let texture_type = reader.read_u16()?;
    let payload = reader.read_bytes(payload_size)?;

    reader.seek(16);
    let identifier = reader.read_u32()?;

    tracing::debug!(
        %format,
        width,
        height,
        flags,
        mip_count,
        texture_type,
        identifier,
        payload = payload_size,
        "parsed PCD9 header"
    );

    let descriptor = TextureDescriptor::new(
        format,
        width.into(),
        height.into(),
        mip_count.into(),
        payload.to_vec(),
    )
    .with_flags(flags);

    Ok(Pcd9Texture {
        descriptor,
        identifier,
        texture_type,
    })
}

/// Serialize a texture as a PCD9 file tagged with `identifier`.
///
/// The two size fields are reserved while the header is written and patched
/// once the payload is in place. Fails if the width or height exceed 16 bits
/// or the mip count exceeds 8 bits.
///
/// Offset 44 carries the descriptor's flags instead of being left zero, so
/// flags survive a PCD9 round trip and DDS sources get
/// [`TextureDescriptor::DEFAULT_FLAGS`]. Apart from that byte the output
/// matches the layout the game's own tooling produces.
pub fn write_pcd9(texture: &TextureDescriptor, identifier: u32) -> Result<Vec<u8>> {
    let mut writer = BinaryWriter::with_capacity(PCD9_PAYLOAD_OFFSET + texture.data().len());

    // SECT header
    writer.write_bytes(SECT_MAGIC)?;
    let section_size = writer.reserve_u32()?;
    writer.write_u8(SECTION_VERSION)?;
    writer.skip(3);
    writer.write_u32(SECTION_KIND)?;
    writer.write_u32(identifier)?;
    writer.write_bytes(&SECTION_TERMINATOR)?;

    // PCD9 header
    writer.write_bytes(PCD9_MAGIC)?;
    writer.write_bytes(texture.format().code().as_bytes())?;
    let payload_size = writer.reserve_u32()?;
    writer.skip(4);
    writer.write_u16(texture.width())?;
    writer.write_u16(texture.height())?;
    writer.write_u8(texture.flags())?;
    writer.write_u8(texture.mip_count())?;
    writer.write_u16(TEXTURE_TYPE)?;
    debug_assert_eq!(writer.position(), PCD9_PAYLOAD_OFFSET as u64);

    writer.write_bytes(texture.data())?;

    let total = writer.len();
    writer.patch_u32(section_size, total - SECTION_HEADER_LEN)?;
    writer.patch_u32(payload_size, total - PCD9_PAYLOAD_OFFSET as u64)?;

    Ok(writer.into_inner())
}

/// Serialize a texture as a PCD9 file destined for `path`.
///
/// The identifier is taken from the file name, see [`parse_identifier`].
pub fn write_pcd9_for_path(texture: &TextureDescriptor, path: &Path) -> Result<Vec<u8>> {
    let identifier = parse_identifier(path)?;
    tracing::debug!(path = %path.display(), identifier, "resolved identifier");
    write_pcd9(texture, identifier)
}
