//! Reader and writer for tmf mesh archives
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod archive;
mod error;
mod options;

#[doc(inline)]
pub use archive::{read, write, write_points_cells};

#[doc(inline)]
pub use options::{WriteOptions, WriteOptionsBuilder};

#[doc(inline)]
pub use error::{Error, Result};

// standard library
use std::path::Path;

// hmf modules
use hmf_h5::Compression;
use hmf_mesh::MeshSummary;

/// Rewrite a tmf archive in place with gzip compressed heavy data
pub fn compress(path: impl AsRef<Path>, level: u8) -> Result<()> {
    let options = WriteOptions::builder().gzip(level)?.build();
    let mesh = read(path.as_ref())?;
    write(path, &mesh, &options)
}

/// Rewrite a tmf archive in place without any compression
pub fn uncompress(path: impl AsRef<Path>) -> Result<()> {
    let options = WriteOptions::builder()
        .compression(Compression::None)
        .build();
    let mesh = read(path.as_ref())?;
    write(path, &mesh, &options)
}

/// Summary of a tmf archive, including its size on disk
pub fn summarise(path: impl AsRef<Path>) -> Result<MeshSummary> {
    let mesh = read(path.as_ref())?;
    let bytes = std::fs::metadata(path)?.len();
    Ok(mesh.summary().with_file_size(bytes))
}
