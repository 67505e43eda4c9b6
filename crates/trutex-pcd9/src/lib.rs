//! PCD9 texture container handling for trutex.
//!
//! A PCD9 file is a `SECT` section whose body is a `PCD9` texture header
//! followed by the block-compressed mip chain:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0  | 4 | `SECT` |
//! | 4  | 4 | section size (file length - 24) |
//! | 8  | 1 | section version (5) |
//! | 12 | 4 | section kind (10) |
//! | 16 | 4 | resource identifier |
//! | 20 | 4 | `FF FF FF FF` |
//! | 24 | 4 | `PCD9` |
//! | 28 | 4 | pixel format code |
//! | 32 | 4 | payload size (file length - 48) |
//! | 40 | 2 | width |
//! | 42 | 2 | height |
//! | 44 | 1 | flags |
//! | 45 | 1 | mip count |
//! | 46 | 2 | texture type |
//! | 48 | - | payload |
//!
//! The resource identifier is not stored anywhere else; writers recover it
//! from the output file name, see [`parse_identifier`].

mod codec;
mod error;
mod identifier;

pub use codec::{read_pcd9, write_pcd9, write_pcd9_for_path, Pcd9Texture};
pub use error::{Error, Result};
pub use identifier::parse_identifier;

/// Section magic at offset 0.
pub const SECT_MAGIC: &[u8; 4] = b"SECT";

/// Texture header tag.
pub const PCD9_MAGIC: &[u8; 4] = b"PCD9";

/// Offset of the [`PCD9_MAGIC`] tag.
pub const PCD9_TAG_OFFSET: usize = 24;

/// Offset of the payload.
pub const PCD9_PAYLOAD_OFFSET: usize = 48;

/// Conventional file extension, without the dot.
pub const PCD9_EXTENSION: &str = "tr8pcd9";
