//! Configuration for writing hmf files

// crate modules
use crate::compression::Compression;
use crate::error::Result;

/// Options used when writing hmf files
///
/// The fields are left public for direct use, but a builder is also
/// implemented for chained setter calls.
///
/// ```rust
/// # use hmf_h5::{Compression, WriteOptions};
/// let options = WriteOptions::builder()
///     .gzip(6)
///     .unwrap()
///     .build();
///
/// assert_eq!(options.compression, Compression::Gzip(6));
/// assert_eq!(WriteOptions::default().compression, Compression::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Compression filter for every dataset
    pub compression: Compression,
}

impl WriteOptions {
    /// Start with the default configuration, uncompressed
    pub fn new() -> WriteOptions {
        Default::default()
    }

    /// Get an instance of the [WriteOptionsBuilder]
    pub fn builder() -> WriteOptionsBuilder {
        WriteOptionsBuilder::default()
    }
}

/// Builder implementation for [WriteOptions]
///
/// To get the final [WriteOptions] from the builder, call
/// [build()](WriteOptionsBuilder::build).
#[derive(Debug, Default)]
pub struct WriteOptionsBuilder {
    compression: Compression,
}

impl WriteOptionsBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [WriteOptions] type
    pub fn build(self) -> WriteOptions {
        WriteOptions {
            compression: self.compression,
        }
    }

    /// Set the compression filter directly
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Use gzip compression, failing for levels outside of 0-9
    pub fn gzip(mut self, level: u8) -> Result<Self> {
        self.compression = Compression::gzip(level)?;
        Ok(self)
    }
}
