//! DDS container handling for trutex.
//!
//! Only the legacy DDS profile is supported: a 4-byte magic, the 124-byte
//! `DDS_HEADER` with a FourCC pixel format, and the payload starting at byte
//! 128. The DX10 extension header is not understood; a `DX10` FourCC is
//! rejected like any other format missing from the format table.
//!
//! # Example
//!
//! ```no_run
//! use trutex_dds::{read_dds, write_dds};
//!
//! let texture = read_dds(&std::fs::read("texture.dds")?)?;
//! println!("{}x{} {}", texture.width(), texture.height(), texture.format());
//!
//! std::fs::write("copy.dds", write_dds(&texture)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod codec;
mod error;
mod header;

pub use codec::{read_dds, write_dds};
pub use error::{Error, Result};
pub use header::{DdsHeader, DdsPixelFormat, FourCC};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Size of magic plus header; the payload starts here.
pub const DDS_PAYLOAD_OFFSET: usize = 128;
