//! Result and Error types for hmf-tmf

/// Type alias for `Result<T, tmf::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `hmf-tmf` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("xdmf error")]
    XdmfError(#[from] hmf_xdmf::Error),

    #[error("compression error")]
    H5Error(#[from] hmf_h5::Error),

    #[error("compression level must be 0-9, found {0}")]
    InvalidCompressionLevel(u8),

    #[error("no .xdmf or .xmf descriptor in archive {0}")]
    MissingDescriptor(String),
}
