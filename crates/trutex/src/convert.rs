//! File-level conversion between PCD9 and DDS.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use trutex_common::{PixelFormat, TextureDescriptor};
use trutex_pcd9::PCD9_EXTENSION;

use crate::{Error, Result};

/// Suffix appended to the stem when a PCD9 output name is already taken.
const DISAMBIGUATION_SUFFIX: &str = "_new";

/// A supported texture container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Proprietary `.tr8pcd9` container.
    Pcd9,
    /// DirectDraw Surface `.dds` container.
    Dds,
}

impl Container {
    /// Determine the container from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some(PCD9_EXTENSION) => Ok(Self::Pcd9),
            Some("dds") => Ok(Self::Dds),
            _ => Err(Error::UnknownExtension(path.to_path_buf())),
        }
    }

    /// Canonical extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pcd9 => PCD9_EXTENSION,
            Self::Dds => "dds",
        }
    }
}

/// Which way a conversion goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Read PCD9, write DDS.
    Pcd9ToDds,
    /// Read DDS, write PCD9.
    DdsToPcd9,
}

impl Direction {
    /// Pick the direction from the input file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(match Container::from_path(path)? {
            Container::Pcd9 => Self::Pcd9ToDds,
            Container::Dds => Self::DdsToPcd9,
        })
    }

    /// Container being read.
    pub const fn source(self) -> Container {
        match self {
            Self::Pcd9ToDds => Container::Pcd9,
            Self::DdsToPcd9 => Container::Dds,
        }
    }

    /// Container being written.
    pub const fn target(self) -> Container {
        match self {
            Self::Pcd9ToDds => Container::Dds,
            Self::DdsToPcd9 => Container::Pcd9,
        }
    }
}

/// Options for [`convert_file_with`].
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Directory for converted files. Defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
}

/// Summary of a texture file's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    /// Container the file was read as.
    pub container: Container,
    /// Pixel format.
    pub format: PixelFormat,
    /// Width of the top mip level.
    pub width: u32,
    /// Height of the top mip level.
    pub height: u32,
    /// Number of mip levels.
    pub mip_count: u32,
    /// Flag bits (synthesized for DDS).
    pub flags: u8,
    /// Size of the whole mip chain in bytes.
    pub payload_bytes: usize,
    /// Top mip length derived from the format table.
    pub top_level_length: u64,
    /// PCD9 resource identifier.
    pub identifier: Option<u32>,
    /// PCD9 texture type field.
    pub texture_type: Option<u16>,
}

/// Name the converted file for `input`.
///
/// The output is `<stem>.dds` or `<stem>.tr8pcd9`, placed in `output_dir` or
/// next to the input. A PCD9 name that already exists becomes
/// `<stem>_new.tr8pcd9`.
pub fn output_path(
    input: &Path,
    direction: Direction,
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| Error::UnknownExtension(input.to_path_buf()))?;
    let dir = output_dir
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new(""));

    let extension = direction.target().extension();
    let path = dir.join(file_name(stem.to_os_string(), extension));

    if direction == Direction::DdsToPcd9 && path.exists() {
        let mut stem = stem.to_os_string();
        stem.push(DISAMBIGUATION_SUFFIX);
        let renamed = dir.join(file_name(stem, extension));
        tracing::warn!(
            taken = %path.display(),
            using = %renamed.display(),
            "output already exists"
        );
        return Ok(renamed);
    }

    Ok(path)
}

fn file_name(mut stem: OsString, extension: &str) -> OsString {
    stem.push(".");
    stem.push(extension);
    stem
}

/// Transcode an in-memory file.
///
/// `output` is only used to name the result; PCD9 output takes its resource
/// identifier from it.
pub fn convert_bytes(direction: Direction, input: &[u8], output: &Path) -> Result<Vec<u8>> {
    match direction {
        Direction::Pcd9ToDds => {
            let texture = trutex_pcd9::read_pcd9(input)?;
            Ok(trutex_dds::write_dds(&texture.descriptor)?)
        }
        Direction::DdsToPcd9 => {
            let texture = trutex_dds::read_dds(input)?;
            Ok(trutex_pcd9::write_pcd9_for_path(&texture, output)?)
        }
    }
}

/// Convert a file next to itself. Returns the path written.
pub fn convert_file<P: AsRef<Path>>(input: P) -> Result<PathBuf> {
    convert_file_with(input, &ConvertOptions::default())
}

/// Convert a file. Returns the path written.
///
/// Nothing is written unless the input parses completely; an output directory
/// is only created once the conversion has succeeded. The output is staged in
/// a temporary file in the destination directory and renamed into place, so a
/// failure never leaves a partial file behind.
pub fn convert_file_with<P: AsRef<Path>>(input: P, options: &ConvertOptions) -> Result<PathBuf> {
    let input = input.as_ref();
    let direction = Direction::from_path(input)?;

    let data = fs::read(input)?;
    let output = output_path(input, direction, options.output_dir.as_deref())?;
    let converted = convert_bytes(direction, &data, &output)?;

    if let Some(dir) = &options.output_dir {
        fs::create_dir_all(dir)?;
    }
    commit(&output, &converted)?;

    tracing::info!(
        from = ?direction.source(),
        to = ?direction.target(),
        input = %input.display(),
        output = %output.display(),
        bytes = converted.len(),
        "converted"
    );

    Ok(output)
}

/// Read a texture file's header without converting it.
pub fn inspect_file<P: AsRef<Path>>(input: P) -> Result<TextureInfo> {
    let input = input.as_ref();
    let container = Container::from_path(input)?;
    let data = fs::read(input)?;

    let (texture, identifier, texture_type) = match container {
        Container::Pcd9 => {
            let pcd9 = trutex_pcd9::read_pcd9(&data)?;
            (pcd9.descriptor, Some(pcd9.identifier), Some(pcd9.texture_type))
        }
        Container::Dds => (trutex_dds::read_dds(&data)?, None, None),
    };

    Ok(TextureInfo {
        container,
        identifier,
        texture_type,
        ..summarize(container, &texture)
    })
}

fn summarize(container: Container, texture: &TextureDescriptor) -> TextureInfo {
    TextureInfo {
        container,
        format: texture.format(),
        width: texture.width(),
        height: texture.height(),
        mip_count: texture.mip_count(),
        flags: texture.flags(),
        payload_bytes: texture.data().len(),
        top_level_length: texture.payload_length(),
        identifier: None,
        texture_type: None,
    }
}

fn commit(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("a/b/tex_1_ff.tr8pcd9", Direction::Pcd9ToDds)]
    #[case("tex_1_ff.TR8PCD9", Direction::Pcd9ToDds)]
    #[case("tex.dds", Direction::DdsToPcd9)]
    #[case("tex.DDS", Direction::DdsToPcd9)]
    fn direction_from_extension(#[case] path: &str, #[case] expected: Direction) {
        assert_eq!(Direction::from_path(Path::new(path)).unwrap(), expected);
    }

    #[rstest]
    #[case(Direction::Pcd9ToDds, Container::Pcd9, Container::Dds)]
    #[case(Direction::DdsToPcd9, Container::Dds, Container::Pcd9)]
    fn direction_containers(
        #[case] direction: Direction,
        #[case] source: Container,
        #[case] target: Container,
    ) {
        assert_eq!(direction.source(), source);
        assert_eq!(direction.target(), target);
        let input = Path::new("tex_1_ff").with_extension(source.extension());
        assert_eq!(Direction::from_path(&input).unwrap(), direction);
    }

    #[rstest]
    #[case("tex.png")]
    #[case("tex")]
    #[case("tex.dds.bak")]
    fn unknown_extension(#[case] path: &str) {
        let error = Direction::from_path(Path::new(path)).unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::UnknownExtension);
    }

    #[test]
    fn output_path_replaces_extension() {
        let input = Path::new("in/tex_1_ff.tr8pcd9");
        let path = output_path(input, Direction::Pcd9ToDds, None).unwrap();
        assert_eq!(path, Path::new("in/tex_1_ff.dds"));

        let path = output_path(
            Path::new("in/tex_1_ff.dds"),
            Direction::DdsToPcd9,
            Some(Path::new("out")),
        )
        .unwrap();
        assert_eq!(path, Path::new("out/tex_1_ff.tr8pcd9"));
    }

    #[test]
    fn output_path_disambiguates_existing_pcd9() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tex_1_ff.dds");
        fs::write(dir.path().join("tex_1_ff.tr8pcd9"), b"taken").unwrap();

        let path = output_path(&input, Direction::DdsToPcd9, None).unwrap();
        assert_eq!(path, dir.path().join("tex_1_ff_new.tr8pcd9"));
    }

    #[test]
    fn output_path_overwrites_existing_dds() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tex_1_ff.tr8pcd9");
        fs::write(dir.path().join("tex_1_ff.dds"), b"old").unwrap();

        let path = output_path(&input, Direction::Pcd9ToDds, None).unwrap();
        assert_eq!(path, dir.path().join("tex_1_ff.dds"));
    }
}
