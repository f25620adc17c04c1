//! Conversion between meshes and VTK unstructured grids
//!
//! Built on [vtkio](https://github.com/elrnv/vtkio), both for writing results
//! to plot in ParaView or Visit, and for importing meshes made elsewhere.
//!
//! ```rust, no_run
//! # use hmf_mesh::vtk::{read_vtk, write_vtk, MeshToVtk, VtkFormat};
//! // Read a mesh from an existing VTK file
//! let mesh = read_vtk("input.vtu").unwrap();
//!
//! // Convert and write it back out as a binary legacy file
//! let vtk = MeshToVtk::new().convert(&mesh).unwrap();
//! write_vtk(vtk, "output.vtk", VtkFormat::LegacyBinary).unwrap();
//! ```

mod builder;
mod convert;
mod import;

pub use builder::MeshToVtkBuilder;
pub use convert::MeshToVtk;
pub use import::{read_vtk, vtk_to_mesh};

// hmf modules
use crate::error::{Error, Result};
use crate::CellType;
use hmf_utils::f;

// standard library
use std::path::Path;

// extrenal crates
use vtkio::model::CellType as VtkCellType;
use vtkio::Vtk;

/// Supported VTK file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VtkFormat {
    /// Modern XML format, written to `.vtu` for unstructured grids
    Xml,
    /// Old legacy format as plain text
    LegacyAscii,
    /// Old legacy format as big endian binary
    LegacyBinary,
}

/// Write a [Vtk] to the given path in any of the [VtkFormat] styles
///
/// The extension is corrected to `.vtu` for XML output and `.vtk` for the
/// legacy formats.
pub fn write_vtk(vtk: Vtk, path: impl AsRef<Path>, format: VtkFormat) -> Result<()> {
    let mut path = path.as_ref().to_path_buf();
    match format {
        VtkFormat::Xml => {
            path.set_extension("vtu");
            vtk.export(&path)?
        }
        VtkFormat::LegacyAscii => {
            path.set_extension("vtk");
            vtk.export_ascii(&path)?
        }
        VtkFormat::LegacyBinary => {
            path.set_extension("vtk");
            vtk.export_be(&path)?
        }
    };
    Ok(())
}

/// Mapping to and from the vtkio cell types
impl CellType {
    /// Equivalent VTK cell type
    pub fn vtk_cell_type(&self) -> VtkCellType {
        match self {
            CellType::Vertex => VtkCellType::Vertex,
            CellType::Line => VtkCellType::Line,
            CellType::Triangle => VtkCellType::Triangle,
            CellType::Quad => VtkCellType::Quad,
            CellType::Tetra => VtkCellType::Tetra,
            CellType::Pyramid => VtkCellType::Pyramid,
            CellType::Wedge => VtkCellType::Wedge,
            CellType::Hexahedron => VtkCellType::Hexahedron,
            CellType::Line3 => VtkCellType::QuadraticEdge,
            CellType::Triangle6 => VtkCellType::QuadraticTriangle,
            CellType::Quad8 => VtkCellType::QuadraticQuad,
            CellType::Tetra10 => VtkCellType::QuadraticTetra,
            CellType::Pyramid13 => VtkCellType::QuadraticPyramid,
            CellType::Wedge15 => VtkCellType::QuadraticWedge,
            CellType::Hexahedron20 => VtkCellType::QuadraticHexahedron,
        }
    }

    /// Find the cell type for a VTK cell type, if there is one
    pub fn from_vtk_cell_type(vtk_type: VtkCellType) -> Result<CellType> {
        CellType::ALL
            .into_iter()
            .find(|cell_type| cell_type.vtk_cell_type() == vtk_type)
            .ok_or_else(|| Error::UnsupportedVtkCell(f!("{vtk_type:?}")))
    }
}
