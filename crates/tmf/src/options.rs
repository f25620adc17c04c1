//! Configuration for writing tmf archives

// hmf modules
use hmf_h5::Compression;

// crate modules
use crate::error::{Error, Result};

/// Options used when writing tmf archives
///
/// Unlike hmf files the heavy data is gzip compressed by default, at
/// [Compression::DEFAULT_LEVEL].
///
/// ```rust
/// # use hmf_tmf::WriteOptions;
/// # use hmf_h5::Compression;
/// assert_eq!(WriteOptions::default().compression, Compression::Gzip(4));
///
/// let options = WriteOptions::builder()
///     .compression(Compression::None)
///     .build();
/// assert_eq!(options.compression, Compression::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Compression filter for the HDF5 datasets inside the archive
    pub compression: Compression,
}

impl WriteOptions {
    /// Start with the default configuration
    pub fn new() -> WriteOptions {
        Default::default()
    }

    /// Get an instance of the [WriteOptionsBuilder]
    pub fn builder() -> WriteOptionsBuilder {
        WriteOptionsBuilder::default()
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptionsBuilder::default().build()
    }
}

/// Builder implementation for [WriteOptions]
#[derive(Debug)]
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
        self.compression =
            Compression::gzip(level).map_err(|_| Error::InvalidCompressionLevel(level))?;
        Ok(self)
    }
}

impl Default for WriteOptionsBuilder {
    fn default() -> Self {
        Self {
            compression: Compression::default_gzip(),
        }
    }
}
