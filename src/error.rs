//! Result and Error types for hmf

use crate::FileFormat;

/// Type alias for `Result<T, hmf::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `hmf` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file system failure
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    /// Failure in the mesh model or the VTK conversion
    #[error("mesh error")]
    MeshError(#[from] hmf_mesh::Error),

    /// Failure reading or writing an hmf file
    #[cfg(feature = "h5")]
    #[error("hmf file error")]
    H5Error(#[from] hmf_h5::Error),

    /// Failure reading or writing a tmf archive
    #[cfg(feature = "tmf")]
    #[error("tmf archive error")]
    TmfError(#[from] hmf_tmf::Error),

    /// Failure reading or writing an XDMF descriptor
    #[cfg(feature = "xdmf")]
    #[error("xdmf error")]
    XdmfError(#[from] hmf_xdmf::Error),

    /// File format could not be determined from a name or extension
    #[error("unknown file format \"{0}\"")]
    UnknownFormat(String),

    /// Support for the format was not compiled in
    #[error("support for {0} files is not enabled")]
    DisabledFormat(FileFormat),
}
