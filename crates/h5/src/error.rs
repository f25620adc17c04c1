//! Result and Error types for hmf-h5

/// Type alias for `Result<T, h5::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `hmf-h5` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("hdf5 library error")]
    Hdf5Error(#[from] hdf5::Error),

    #[error("invalid hdf5 string")]
    StringError(#[from] hdf5::types::StringError),

    #[error("mesh data error")]
    MeshError(#[from] hmf_mesh::Error),

    #[error("incompatible array shapes")]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("file is not an hmf file (type \"{0}\")")]
    NotHmf(String),

    #[error("unsupported hmf version \"{0}\"")]
    UnsupportedVersion(String),

    #[error("unsupported hmf layout, {0}")]
    UnsupportedLayout(String),

    #[error("unsupported geometry \"{0}\"")]
    UnsupportedGeometry(String),

    #[error("missing attribute \"{attribute}\" on \"{object}\"")]
    MissingAttribute { object: String, attribute: String },

    #[error("unknown compression \"{0}\", expected none, gzip or gzip:<level>")]
    UnknownCompression(String),

    #[error("compression level must be 0-9, found {0}")]
    InvalidCompressionLevel(u8),
}
