//! Core mesh model shared by every hmf format
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod attribute;
mod cell_data;
mod cell_type;
mod error;
mod mesh;
mod summary;

pub mod vtk;

// inline the important mesh-related types for a nice public API
#[doc(inline)]
pub use mesh::{CellData, Cells, Consistency, FieldData, Mesh, PointData, RawCellData};

#[doc(inline)]
pub use cell_type::CellType;

#[doc(inline)]
pub use attribute::{AttributeType, Center};

#[doc(inline)]
pub use cell_data::{cell_data_from_raw, merge_cell_blocks, raw_from_cell_data};

#[doc(inline)]
pub use summary::{CellCount, MeshSummary};

#[doc(inline)]
pub use vtk::{read_vtk, write_vtk, MeshToVtk, VtkFormat};

#[doc(inline)]
pub use error::{Error, Result};
