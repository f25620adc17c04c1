// internal modules
use crate::data_item::DataFormat;
use crate::error::Result;
use crate::writer::XdmfWriter;

// hmf modules
use hmf_h5::Compression;

/// Builder implementation for XdmfWriter configuration
///
/// The fields of [XdmfWriter] are left public for direct use but the module
/// also implements a builder.
///
/// To get the final [XdmfWriter] from the builder, call
/// [build()](XdmfWriterBuilder::build).
///
/// ```rust, no_run
/// # use hmf_xdmf::{write, DataFormat, XdmfWriter};
/// # use hmf_mesh::Mesh;
/// # let mesh = Mesh::default();
/// // Keep everything in the descriptor
/// let writer = XdmfWriter::builder()
///     .data_format(DataFormat::Xml)
///     .build();
///
/// write("./mesh.xdmf", &mesh, &writer).unwrap();
/// ```
#[derive(Debug)]
pub struct XdmfWriterBuilder {
    data_format: DataFormat,
    compression: Compression,
    h5_name: Option<String>,
}

impl XdmfWriterBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [XdmfWriter] type
    pub fn build(self) -> XdmfWriter {
        XdmfWriter {
            data_format: self.data_format,
            compression: self.compression,
            h5_name: self.h5_name,
        }
    }

    /// Set where the heavy data is stored
    pub fn data_format(mut self, data_format: DataFormat) -> Self {
        self.data_format = data_format;
        self
    }

    /// Set the compression of the HDF5 datasets
    ///
    /// Has no effect on inline XML data.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Use gzip compression, failing for levels outside of 0-9
    pub fn gzip(mut self, level: u8) -> Result<Self> {
        self.compression = Compression::gzip(level)?;
        Ok(self)
    }

    /// Name of the heavy data file, created next to the descriptor
    ///
    /// Defaults to the descriptor file name with an `.h5` extension.
    pub fn h5_name(mut self, name: &str) -> Self {
        self.h5_name = Some(name.to_string());
        self
    }
}

impl Default for XdmfWriterBuilder {
    fn default() -> Self {
        Self {
            data_format: DataFormat::Hdf,
            compression: Compression::default_gzip(),
            h5_name: None,
        }
    }
}
