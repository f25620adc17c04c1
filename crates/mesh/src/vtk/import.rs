// hmf modules
use crate::cell_data::{cell_data_from_raw, merge_cell_blocks};
use crate::error::{Error, Result};
use crate::{CellType, Mesh, RawCellData};
use hmf_utils::f;

// standard library
use std::path::Path;

// extrenal crates
use log::warn;
use ndarray::{Array2, ArrayD, IxDyn};
use vtkio::model::{Attribute, DataSet, IOBuffer, Piece, UnstructuredGridPiece, VertexNumbers, Vtk};

/// Read a `.vtk` or `.vtu` file into a [Mesh]
///
/// Only unstructured grids with a single inline piece are supported.
pub fn read_vtk(path: impl AsRef<Path>) -> Result<Mesh> {
    let vtk = Vtk::import(path.as_ref())?;
    vtk_to_mesh(vtk)
}

/// Convert an unstructured [Vtk] grid into a [Mesh]
///
/// Runs of the same VTK cell type become cell blocks, and cell attributes are
/// split accordingly. Points are always kept with three components, use
/// [Mesh::prune_z_0()] to drop a flat z axis.
///
/// Field attributes are not supported and are skipped with a warning.
pub fn vtk_to_mesh(vtk: Vtk) -> Result<Mesh> {
    let piece = match vtk.data {
        DataSet::UnstructuredGrid { mut pieces, .. } if pieces.len() == 1 => {
            match pieces.remove(0) {
                Piece::Inline(piece) => *piece,
                _ => return Err(Error::UnsupportedVtkDataSet),
            }
        }
        _ => return Err(Error::UnsupportedVtkDataSet),
    };

    let UnstructuredGridPiece {
        points,
        cells,
        data,
    } = piece;

    let points = buffer_to_f64("points", &points)?;
    let points = Array2::from_shape_vec((points.len() / 3, 3), points)?;

    let cell_runs = cell_runs(cells.types, cells.cell_verts)?;
    let blocks = cell_runs
        .iter()
        .map(|(cell_type, block)| (*cell_type, block.nrows()))
        .collect::<Vec<(CellType, usize)>>();
    let n_cells = blocks.iter().map(|(_, count)| count).sum::<usize>();

    let mut mesh = Mesh {
        points,
        cells: merge_cell_blocks(cell_runs)?,
        ..Default::default()
    };

    for attribute in data.point {
        if let Some((name, values)) = attribute_array(attribute, mesh.n_points())? {
            mesh.point_data.insert(name, values);
        }
    }

    let mut raw = RawCellData::new();
    for attribute in data.cell {
        if let Some((name, values)) = attribute_array(attribute, n_cells)? {
            raw.insert(name, values);
        }
    }
    mesh.cell_data = cell_data_from_raw(&blocks, &raw)?;

    Ok(mesh)
}

/// Group consecutive cells of the same type into connectivity blocks
fn cell_runs(
    types: Vec<vtkio::model::CellType>,
    cell_verts: VertexNumbers,
) -> Result<Vec<(CellType, Array2<usize>)>> {
    let (connectivity, offsets) = cell_verts.into_xml();

    let mut runs: Vec<(CellType, Vec<usize>)> = Vec::new();
    let mut start = 0;
    for (vtk_type, end) in types.into_iter().zip(offsets) {
        let cell_type = CellType::from_vtk_cell_type(vtk_type)?;
        let nodes = connectivity
            .get(start..end as usize)
            .ok_or_else(|| Error::MeshError("vtk cell offsets out of range".to_string()))?;
        start = end as usize;

        match runs.last_mut() {
            Some((last, flat)) if *last == cell_type => {
                flat.extend(nodes.iter().map(|&n| n as usize))
            }
            _ => runs.push((cell_type, nodes.iter().map(|&n| n as usize).collect())),
        }
    }

    runs.into_iter()
        .map(|(cell_type, flat)| {
            let nodes = cell_type.nodes_per_cell();
            let array = Array2::from_shape_vec((flat.len() / nodes, nodes), flat)?;
            Ok((cell_type, array))
        })
        .collect()
}

/// Reshape a data array to `(rows, components)`, or `(rows,)` for scalars
fn attribute_array(attribute: Attribute, rows: usize) -> Result<Option<(String, ArrayD<f64>)>> {
    let (name, data) = match attribute {
        Attribute::DataArray(array) => (array.name, array.data),
        Attribute::Field { name, .. } => {
            warn!("Warning: Skipping vtk field attribute \"{name}\"");
            return Ok(None);
        }
    };

    let values = buffer_to_f64(&name, &data)?;
    let shape = match (rows, values.len()) {
        (0, _) => vec![0],
        (r, n) if n == r => vec![r],
        (r, n) => vec![r, n / r],
    };

    let array = ArrayD::from_shape_vec(IxDyn(&shape), values)?;
    Ok(Some((name, array)))
}

fn buffer_to_f64(name: &str, buffer: &IOBuffer) -> Result<Vec<f64>> {
    buffer
        .cast_into::<f64>()
        .ok_or_else(|| Error::MeshError(f!("unable to read vtk buffer \"{name}\" as f64")))
}
