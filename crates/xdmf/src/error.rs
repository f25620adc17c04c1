//! Result and Error types for hmf-xdmf

/// Type alias for `Result<T, xdmf::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `hmf-xdmf` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to parse xml")]
    XmlError(#[from] quick_xml::Error),

    #[error("invalid xml attribute")]
    XmlAttrError(#[from] quick_xml::events::attributes::AttrError),

    #[error("hdf5 library error")]
    Hdf5Error(#[from] hdf5::Error),

    #[error("heavy data error")]
    H5Error(#[from] hmf_h5::Error),

    #[error("mesh data error")]
    MeshError(#[from] hmf_mesh::Error),

    #[error("incompatible array shapes")]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("unsupported geometry \"{0}\"")]
    UnsupportedGeometry(String),

    #[error("unsupported xdmf layout, {0}")]
    UnsupportedLayout(String),

    #[error("unsupported DataItem format \"{0}\"")]
    UnsupportedDataFormat(String),

    #[error("missing <{0}> element")]
    MissingElement(String),

    #[error("missing attribute \"{attribute}\" on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    #[error("invalid DataItem, {0}")]
    InvalidDataItem(String),

    #[error("invalid mixed topology, {0}")]
    InvalidMixedTopology(String),

    #[error("failed to parse \"{0}\"")]
    ParseError(String),
}
