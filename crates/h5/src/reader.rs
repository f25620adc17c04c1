//! Reading meshes from hmf files

// crate modules
use crate::datasets::{
    as_points, numbered_members, read_connectivity, read_f64, read_i64, read_str_attr,
    read_str_attr_any,
};
use crate::error::{Error, Result};
use crate::{FORMAT_TYPE, FORMAT_VERSION};

// standard library
use std::path::Path;

// hmf modules
use hmf_mesh::{cell_data_from_raw, merge_cell_blocks, CellType, Center, Mesh, RawCellData};
use hmf_utils::f;

// external crates
use hdf5::{File, Group};
use log::{debug, warn};
use ndarray::Array2;

/// Read a [Mesh] from an hmf file
///
/// Topology and attribute datasets are read in order of their numeric
/// suffix, and cell attributes are split using the topology order found in
/// the file. Attribute metadata is accepted as either `Name`/`Center` or the
/// lower case `name`/`center`.
///
/// ```rust, no_run
/// # use hmf_h5::read;
/// let mesh = read("mesh.hmf").unwrap();
/// println!("{}", mesh.summary());
/// ```
pub fn read(path: impl AsRef<Path>) -> Result<Mesh> {
    let file = File::open(path.as_ref())?;
    check_header(&file)?;

    let grid = single_member(&single_member(&file, "domain")?, "grid")?;
    let members = grid.member_names()?;

    let mut mesh = Mesh {
        points: read_geometry(&grid)?,
        ..Default::default()
    };

    let mut blocks = Vec::new();
    for name in numbered_members(&members, "Topology") {
        let dataset = grid.dataset(&name)?;
        let cell_type = CellType::from_xdmf(&read_str_attr(&dataset, "TopologyType")?)?;
        blocks.push((cell_type, read_connectivity(&dataset, cell_type)?));
    }
    let block_counts = blocks
        .iter()
        .map(|(cell_type, block)| (*cell_type, block.nrows()))
        .collect::<Vec<(CellType, usize)>>();
    mesh.cells = merge_cell_blocks(blocks)?;

    let mut raw = RawCellData::new();
    for name in numbered_members(&members, "Attribute") {
        let dataset = grid.dataset(&name)?;
        let attribute_name = read_str_attr_any(&dataset, &["Name", "name"])?;
        let center = read_str_attr_any(&dataset, &["Center", "center"])?.parse::<Center>()?;
        let values = read_f64(&dataset)?;

        match center {
            Center::Node => {
                mesh.point_data.insert(attribute_name, values);
            }
            Center::Cell => {
                raw.insert(attribute_name, values);
            }
            Center::Grid => warn!("Warning: Skipping grid centered attribute \"{attribute_name}\""),
        }
    }
    mesh.cell_data = cell_data_from_raw(&block_counts, &raw)?;

    if members.iter().any(|m| m == "Information") {
        let information = grid.group("Information")?;
        for tag in information.member_names()? {
            let values = read_i64(&information.dataset(&tag)?)?;
            mesh.field_data.insert(tag, values);
        }
    }

    for member in &members {
        if !is_known_member(member) {
            warn!("Warning: Ignoring unknown grid member \"{member}\"");
        }
    }

    debug!(
        "Read {} points and {} cells from {}",
        mesh.n_points(),
        mesh.n_cells(),
        path.as_ref().display()
    );
    Ok(mesh)
}

/// Root attributes must identify a supported hmf file
fn check_header(file: &File) -> Result<()> {
    let names = file.attr_names()?;

    let file_type = match names.iter().any(|n| n == "type") {
        true => read_str_attr(file, "type")?,
        false => return Err(Error::NotHmf("missing".to_string())),
    };
    if file_type != FORMAT_TYPE {
        return Err(Error::NotHmf(file_type));
    }

    let version = match names.iter().any(|n| n == "version") {
        true => read_str_attr(file, "version")?,
        false => return Err(Error::UnsupportedVersion("missing".to_string())),
    };
    if version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(())
}

/// Open the only member of a group, which must have the expected name
fn single_member(parent: &Group, name: &str) -> Result<Group> {
    let members = parent.member_names()?;
    match members.as_slice() {
        [only] if only == name => Ok(parent.group(name)?),
        _ => Err(Error::UnsupportedLayout(f!(
            "expected only \"{name}\" in \"{}\", found {members:?}",
            parent.name()
        ))),
    }
}

fn read_geometry(grid: &Group) -> Result<Array2<f64>> {
    let dataset = grid
        .dataset("Geometry")
        .map_err(|_| Error::UnsupportedLayout("missing Geometry dataset".to_string()))?;

    let geometry_type = read_str_attr(&dataset, "GeometryType")?;
    let expected = match geometry_type.as_str() {
        "X" => 1,
        "XY" => 2,
        "XYZ" => 3,
        _ => return Err(Error::UnsupportedGeometry(geometry_type)),
    };

    let points = as_points(read_f64(&dataset)?)?;
    if points.ncols() != expected {
        return Err(Error::UnsupportedGeometry(f!(
            "{geometry_type} with {} coordinates per point",
            points.ncols()
        )));
    }
    Ok(points)
}

fn is_known_member(name: &str) -> bool {
    let numbered = |prefix: &str| {
        name.strip_prefix(prefix)
            .is_some_and(|k| k.is_empty() || k.parse::<usize>().is_ok())
    };
    name == "Geometry" || name == "Information" || numbered("Topology") || numbered("Attribute")
}
