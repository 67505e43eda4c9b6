//! Common utilities for trutex.
//!
//! This crate provides the foundation shared by the container crates:
//!
//! - [`BinaryReader`] - Little-endian reading from byte slices
//! - [`BinaryWriter`] - Little-endian writing with reserve-then-patch support
//! - [`PixelFormat`] - The format table shared by PCD9 and DDS
//! - [`TextureDescriptor`] - The intermediate representation of a texture

mod error;
mod reader;
mod texture;
mod writer;

pub use error::{Error, Result};
pub use reader::{fixed_str, BinaryReader};
pub use texture::{PixelFormat, TextureDescriptor};
pub use writer::{BinaryWriter, Placeholder};

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
