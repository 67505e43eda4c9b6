//! trutex - PCD9 and DDS texture container conversion.
//!
//! This crate ties the container crates together and provides the file-level
//! conversion entry points.
//!
//! # Crates
//!
//! - [`trutex_common`] - Binary header codec, format table, texture descriptor
//! - [`trutex_dds`] - DDS reading and writing
//! - [`trutex_pcd9`] - PCD9 reading and writing
//!
//! # Example
//!
//! ```no_run
//! use trutex::prelude::*;
//!
//! // texture_12_00a3f2c1.tr8pcd9 -> texture_12_00a3f2c1.dds
//! let output = convert_file("texture_12_00a3f2c1.tr8pcd9")?;
//! println!("wrote {}", output.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod error;

pub use convert::{
    convert_bytes, convert_file, convert_file_with, inspect_file, output_path, Container,
    ConvertOptions, Direction, TextureInfo,
};
pub use error::{Error, ErrorKind, Result};

// Re-export all sub-crates
pub use trutex_common as common;
pub use trutex_dds as dds;
pub use trutex_pcd9 as pcd9;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{convert_file, convert_file_with, inspect_file, ConvertOptions, Direction};
    pub use trutex_common::{PixelFormat, TextureDescriptor};
    pub use trutex_dds::{read_dds, write_dds};
    pub use trutex_pcd9::{read_pcd9, write_pcd9, write_pcd9_for_path, Pcd9Texture};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
