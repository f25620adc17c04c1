//! Result and Error types for hmf-mesh

use crate::CellType;

/// Type alias for `Result<T, mesh::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `hmf-mesh` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("vtkio error")]
    VtkioError(#[from] vtkio::Error),

    #[error("incompatible array shapes")]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    #[error("unknown cell type \"{0}\"")]
    UnknownCellType(String),

    #[error("unknown XDMF topology type \"{0}\"")]
    UnknownTopologyType(String),

    #[error("unknown XDMF mixed topology index {0}")]
    UnknownTopologyIndex(u64),

    #[error("no XDMF attribute type for data of shape {0:?}")]
    UnsupportedAttributeShape(Vec<usize>),

    #[error("unknown XDMF attribute type \"{0}\"")]
    UnknownAttributeType(String),

    #[error("unknown attribute center \"{0}\"")]
    UnknownCenter(String),

    #[error("cell data \"{name}\" is missing for {cell_type} cells")]
    IncompleteCellData { name: String, cell_type: CellType },

    #[error(
        "inconsistent length of cell data \"{name}\" (expected {expected:?}, found {found:?})"
    )]
    UnexpectedCellDataLength {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "inconsistent length of point data \"{name}\" (expected {expected:?}, found {found:?})"
    )]
    UnexpectedPointDataLength {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{cell_type} cells need {expected:?} nodes, found {found:?}")]
    UnexpectedNodesPerCell {
        cell_type: CellType,
        expected: usize,
        found: usize,
    },

    #[error("vtk cell type {0} has no mesh equivalent")]
    UnsupportedVtkCell(String),

    #[error("vtk data set is not an inline unstructured grid")]
    UnsupportedVtkDataSet,

    #[error("failure in mesh operations")]
    MeshError(String),
}
