//! Reader and writer for hmf mesh files
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod compression;
mod error;
mod options;
mod reader;
mod writer;

pub mod datasets;

#[doc(inline)]
pub use compression::Compression;

#[doc(inline)]
pub use options::{WriteOptions, WriteOptionsBuilder};

#[doc(inline)]
pub use reader::read;

#[doc(inline)]
pub use writer::{write, write_points_cells};

#[doc(inline)]
pub use error::{Error, Result};

// standard library
use std::path::Path;

// hmf modules
use hmf_mesh::MeshSummary;

/// Value of the root `type` attribute
pub const FORMAT_TYPE: &str = "hmf";

/// Value of the root `version` attribute
pub const FORMAT_VERSION: &str = "0.1";

/// Rewrite an hmf file in place with gzip compression
///
/// The level must be 0-9, see [Compression::DEFAULT_LEVEL] for a sensible
/// default.
pub fn compress(path: impl AsRef<Path>, level: u8) -> Result<()> {
    let options = WriteOptions::builder().gzip(level)?.build();
    let mesh = read(path.as_ref())?;
    write(path, &mesh, &options)
}

/// Rewrite an hmf file in place without any compression
pub fn uncompress(path: impl AsRef<Path>) -> Result<()> {
    let mesh = read(path.as_ref())?;
    write(path, &mesh, &WriteOptions::default())
}

/// Summary of an hmf file, including its size on disk
pub fn summarise(path: impl AsRef<Path>) -> Result<MeshSummary> {
    let mesh = read(path.as_ref())?;
    let bytes = std::fs::metadata(path)?.len();
    Ok(mesh.summary().with_file_size(bytes))
}
