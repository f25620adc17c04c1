//! Reading meshes from XDMF descriptors

// crate modules
use crate::data_item::{read_data_item, read_index_item};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::information::{self, INFORMATION_NAME};
use crate::mixed;

// standard library
use std::path::Path;

// hmf modules
use hmf_h5::datasets::as_points;
use hmf_mesh::{cell_data_from_raw, merge_cell_blocks, CellType, Center, Mesh, RawCellData};
use hmf_utils::f;

// external crates
use log::{debug, warn};
use ndarray::{concatenate, Array2, ArrayD, Axis};

/// Read a [Mesh] from an XDMF descriptor
///
/// HDF heavy data is looked up relative to the directory of the descriptor.
/// Only a single uniform grid is supported, temporal collections are not.
///
/// ```rust, no_run
/// # use hmf_xdmf::read;
/// let mesh = read("mesh.xdmf").unwrap();
/// println!("{}", mesh.summary());
/// ```
pub fn read(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let base_dir = path.parent().unwrap_or(Path::new(""));
    let root = Element::parse(&std::fs::read_to_string(path)?)?;

    if root.name != "Xdmf" {
        return Err(Error::UnsupportedLayout(f!(
            "root element is <{}>, expected <Xdmf>",
            root.name
        )));
    }

    let grid = root.single_child("Domain")?.single_child("Grid")?;
    let grid_type = grid.get("GridType").unwrap_or("Uniform");
    if grid_type != "Uniform" {
        return Err(Error::UnsupportedLayout(f!(
            "only Uniform grids are supported, found {grid_type}"
        )));
    }

    let mut mesh = Mesh {
        points: read_geometry(grid.single_child("Geometry")?, base_dir)?,
        ..Default::default()
    };

    let blocks = match grid.children_named("Topology").count() {
        0 => Vec::new(),
        _ => read_topology(grid.single_child("Topology")?, base_dir)?,
    };
    let block_counts = blocks
        .iter()
        .map(|(cell_type, block)| (*cell_type, block.nrows()))
        .collect::<Vec<(CellType, usize)>>();
    mesh.cells = merge_cell_blocks(blocks)?;

    let mut raw = RawCellData::new();
    for element in &grid.children {
        match element.name.as_str() {
            "Geometry" | "Topology" | "Time" => (),
            "Attribute" => {
                let name = element.require("Name")?.to_string();
                let center = element.get("Center").unwrap_or("Node").parse::<Center>()?;
                let values = read_data_item(element.single_child("DataItem")?, base_dir)?;
                match center {
                    Center::Node => {
                        mesh.point_data.insert(name, values);
                    }
                    Center::Cell => {
                        raw.insert(name, values);
                    }
                    Center::Grid => warn!("Warning: Skipping grid centered attribute \"{name}\""),
                }
            }
            "Information" if element.get("Name") == Some(INFORMATION_NAME) => {
                mesh.field_data = information::decode(&element.text)?;
            }
            other => warn!("Warning: Ignoring unknown grid element <{other}>"),
        }
    }
    mesh.cell_data = cell_data_from_raw(&block_counts, &raw)?;

    debug!(
        "Read {} points and {} cells from {}",
        mesh.n_points(),
        mesh.n_cells(),
        path.display()
    );
    Ok(mesh)
}

fn read_geometry(geometry: &Element, base_dir: &Path) -> Result<Array2<f64>> {
    let geometry_type = geometry
        .get("GeometryType")
        .or_else(|| geometry.get("Type"))
        .unwrap_or("XYZ");

    let points = match geometry_type {
        "XY" | "XYZ" => as_points(read_data_item(
            geometry.single_child("DataItem")?,
            base_dir,
        )?)?,
        "X_Y" | "X_Y_Z" => {
            let columns = geometry
                .children_named("DataItem")
                .map(|item| read_data_item(item, base_dir))
                .collect::<Result<Vec<ArrayD<f64>>>>()?;
            stack_columns(geometry_type, &columns)?
        }
        _ => return Err(Error::UnsupportedGeometry(geometry_type.to_string())),
    };

    let expected = geometry_type.chars().filter(|c| *c != '_').count();
    if points.ncols() != expected {
        return Err(Error::UnsupportedGeometry(f!(
            "{geometry_type} with {} coordinates per point",
            points.ncols()
        )));
    }
    Ok(points)
}

/// Points from one array per coordinate
fn stack_columns(geometry_type: &str, columns: &[ArrayD<f64>]) -> Result<Array2<f64>> {
    let n_points = columns.first().map(|c| c.len()).unwrap_or(0);
    if columns.iter().any(|c| c.ndim() != 1 || c.len() != n_points) {
        return Err(Error::UnsupportedGeometry(f!(
            "{geometry_type} coordinates must be 1-D arrays of equal length"
        )));
    }

    let views = columns
        .iter()
        .map(|c| c.view().into_shape_with_order((n_points, 1)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(concatenate(Axis(1), &views)?)
}

fn read_topology(topology: &Element, base_dir: &Path) -> Result<Vec<(CellType, Array2<usize>)>> {
    let topology_type = topology
        .get("TopologyType")
        .or_else(|| topology.get("Type"))
        .ok_or_else(|| Error::MissingAttribute {
            element: "Topology".to_string(),
            attribute: "TopologyType".to_string(),
        })?;

    let indices = read_index_item(topology.single_child("DataItem")?, base_dir)?;

    if topology_type == "Mixed" {
        return mixed::decode(&indices);
    }

    let cell_type = CellType::from_xdmf(topology_type)?;
    let nodes = cell_type.nodes_per_cell();
    if indices.len() % nodes != 0 {
        return Err(Error::InvalidDataItem(f!(
            "{} node ids do not split into {topology_type} cells of {nodes} nodes",
            indices.len()
        )));
    }

    let connectivity = indices.into_iter().map(|i| i as usize).collect::<Vec<usize>>();
    let block = Array2::from_shape_vec((connectivity.len() / nodes, nodes), connectivity)?;
    Ok(vec![(cell_type, block)])
}
