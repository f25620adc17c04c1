//! Writing meshes as XDMF descriptors

// crate modules
use crate::builder::XdmfWriterBuilder;
use crate::data_item::{DataFormat, HeavyData, NumberType};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::{information, mixed};

// standard library
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

// hmf modules
use hmf_h5::Compression;
use hmf_mesh::{AttributeType, Cells, Center, Mesh};
use hmf_utils::f;

// external crates
use log::{debug, warn};
use ndarray::{arr1, Array2, ArrayD};

/// XDMF version written to the root element
pub const XDMF_VERSION: &str = "3.0";

/// Configuration for writing XDMF files
///
/// The fields are left public for direct use, but a builder is also
/// implemented for chained setter calls. See [XdmfWriterBuilder].
///
/// By default the heavy data goes to a gzip compressed HDF5 file next to the
/// descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct XdmfWriter {
    /// Where `DataItem` values are stored
    pub data_format: DataFormat,
    /// Compression of the HDF5 datasets
    pub compression: Compression,
    /// Name of the heavy data file, `<stem>.h5` if not set
    pub h5_name: Option<String>,
}

impl XdmfWriter {
    /// Start with the default configuration
    pub fn new() -> XdmfWriter {
        Default::default()
    }

    /// Get an instance of the [XdmfWriterBuilder]
    pub fn builder() -> XdmfWriterBuilder {
        XdmfWriterBuilder::default()
    }

    /// Full path of the heavy data file for a descriptor at `path`
    pub fn h5_path(&self, path: &Path) -> PathBuf {
        match &self.h5_name {
            Some(name) => path.with_file_name(name),
            None => path.with_extension("h5"),
        }
    }
}

impl Default for XdmfWriter {
    fn default() -> Self {
        XdmfWriterBuilder::default().build()
    }
}

/// Write a [Mesh] as an XDMF descriptor, plus its heavy data file if needed
///
/// ```rust, no_run
/// # use hmf_xdmf::{write, XdmfWriter};
/// # use hmf_mesh::{CellType, Mesh};
/// # use ndarray::array;
/// let mesh = Mesh::new(
///     array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
///     [(CellType::Triangle, array![[0, 1, 2]])],
/// ).unwrap();
///
/// // Writes mesh.xdmf and mesh.h5
/// write("mesh.xdmf", &mesh, &XdmfWriter::default()).unwrap();
/// ```
pub fn write(path: impl AsRef<Path>, mesh: &Mesh, options: &XdmfWriter) -> Result<()> {
    let path = path.as_ref();
    mesh.validate()?;
    let raw_cell_data = mesh.raw_cell_data()?;
    let geometry_type = geometry_type(&mesh.points)?;

    let mut heavy = match options.data_format {
        DataFormat::Xml => HeavyData::xml(),
        DataFormat::Hdf => {
            let h5_path = options.h5_path(path);
            let name = h5_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .ok_or_else(|| Error::UnsupportedLayout(f!("no file name in {}", path.display())))?;
            HeavyData::hdf(&h5_path, &name, options.compression)?
        }
    };

    let mut grid = Element::new("Grid").attr("Name", "Grid").child(
        Element::new("Geometry")
            .attr("GeometryType", geometry_type)
            .child(heavy.item(mesh.points.view(), NumberType::Float)?),
    );

    if let Some(topology) = topology(&mut heavy, &mesh.cells)? {
        grid = grid.child(topology);
    }

    let attributes = mesh
        .point_data
        .iter()
        .map(|(name, values)| (name, values, Center::Node))
        .chain(
            raw_cell_data
                .iter()
                .map(|(name, values)| (name, values, Center::Cell)),
        );
    for (name, values, center) in attributes {
        grid = grid.child(attribute(&mut heavy, name, values, center)?);
    }

    if let Some(information) = information::encode(&mesh.field_data)? {
        grid = grid.child(information);
    }

    let document = Element::new("Xdmf")
        .attr("Version", XDMF_VERSION)
        .child(Element::new("Domain").child(grid));
    document.write_document(BufWriter::new(File::create(path)?))?;

    debug!(
        "Wrote {} points and {} cells to {}",
        mesh.n_points(),
        mesh.n_cells(),
        path.display()
    );
    Ok(())
}

fn geometry_type(points: &Array2<f64>) -> Result<&'static str> {
    match points.ncols() {
        2 => Ok("XY"),
        3 => Ok("XYZ"),
        n => Err(Error::UnsupportedGeometry(f!(
            "{n} coordinates per point, XDMF needs 2 or 3"
        ))),
    }
}

/// A single block keeps its own topology type, several are written as `Mixed`
///
/// Blocks without cells have no entries in a `Mixed` topology, so they are
/// skipped unless the mesh has nothing else.
fn topology(heavy: &mut HeavyData, cells: &Cells) -> Result<Option<Element>> {
    let (mut blocks, empty): (Vec<_>, Vec<_>) =
        cells.iter().partition(|(_, block)| block.nrows() > 0);
    match (blocks.is_empty(), empty.len()) {
        (true, 1) => blocks = empty,
        _ => empty
            .iter()
            .for_each(|(cell_type, _)| warn!("Warning: Skipping {cell_type} block with no cells")),
    }

    let n_cells = blocks.iter().map(|(_, block)| block.nrows()).sum::<usize>();
    let element = match blocks.as_slice() {
        [] => return Ok(None),
        [(cell_type, block)] => {
            let connectivity = block.mapv(|node| node as u64);
            Element::new("Topology")
                .attr("TopologyType", cell_type.xdmf_name())
                .attr("NumberOfElements", n_cells)
                .attr("NodesPerElement", cell_type.nodes_per_cell())
                .child(heavy.item(connectivity.view(), NumberType::UInt)?)
        }
        _ => {
            let values = arr1(&mixed::encode(blocks.iter().copied()));
            Element::new("Topology")
                .attr("TopologyType", "Mixed")
                .attr("NumberOfElements", n_cells)
                .child(heavy.item(values.view(), NumberType::UInt)?)
        }
    };

    Ok(Some(element))
}

fn attribute(
    heavy: &mut HeavyData,
    name: &str,
    values: &ArrayD<f64>,
    center: Center,
) -> Result<Element> {
    let attribute_type = AttributeType::classify(values.shape())?;
    Ok(Element::new("Attribute")
        .attr("Name", name)
        .attr("AttributeType", attribute_type)
        .attr("Center", center)
        .child(heavy.item(values.view(), NumberType::Float)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmf_mesh::CellType;
    use ndarray::array;

    #[test]
    fn heavy_data_next_to_descriptor() {
        let default = XdmfWriter::default();
        assert_eq!(
            default.h5_path(Path::new("out/mesh.xdmf")),
            PathBuf::from("out/mesh.h5")
        );

        let named = XdmfWriter::builder().h5_name("data.h5").build();
        assert_eq!(
            named.h5_path(Path::new("out/mesh.xdmf")),
            PathBuf::from("out/data.h5")
        );
    }

    #[test]
    fn topology_elements() {
        let mut heavy = HeavyData::xml();
        assert!(topology(&mut heavy, &Cells::new()).unwrap().is_none());

        let mut cells = Cells::new();
        cells.insert(CellType::Triangle, array![[0, 1, 2], [1, 2, 3]]);
        let single = topology(&mut heavy, &cells).unwrap().unwrap();
        assert_eq!(single.get("TopologyType"), Some("Triangle"));
        assert_eq!(single.get("NumberOfElements"), Some("2"));
        assert_eq!(single.get("NodesPerElement"), Some("3"));
        assert_eq!(single.children[0].get("Dimensions"), Some("2 3"));

        cells.insert(CellType::Line, array![[0, 1]]);
        let mixed = topology(&mut heavy, &cells).unwrap().unwrap();
        assert_eq!(mixed.get("TopologyType"), Some("Mixed"));
        assert_eq!(mixed.get("NumberOfElements"), Some("3"));
        assert_eq!(mixed.children[0].get("Dimensions"), Some("12"));
        assert_eq!(mixed.children[0].text, "2 2 0 1 4 0 1 2 4 1 2 3");
    }

    #[test]
    fn empty_blocks_are_skipped() {
        let mut heavy = HeavyData::xml();
        let mut cells = Cells::new();
        cells.insert(CellType::Quad, Array2::zeros((0, 4)));
        let only_empty = topology(&mut heavy, &cells).unwrap().unwrap();
        assert_eq!(only_empty.get("TopologyType"), Some("Quadrilateral"));
        assert_eq!(only_empty.get("NumberOfElements"), Some("0"));

        cells.insert(CellType::Triangle, array![[0, 1, 2]]);
        let single = topology(&mut heavy, &cells).unwrap().unwrap();
        assert_eq!(single.get("TopologyType"), Some("Triangle"));
        assert_eq!(single.get("NumberOfElements"), Some("1"));

        cells.insert(CellType::Line, array![[0, 1]]);
        let mixed = topology(&mut heavy, &cells).unwrap().unwrap();
        assert_eq!(mixed.get("TopologyType"), Some("Mixed"));
        assert_eq!(mixed.children[0].text, "2 2 0 1 4 0 1 2");
    }

    #[test]
    fn line_geometry_is_rejected() {
        assert!(matches!(
            geometry_type(&array![[0.0], [1.0]]),
            Err(Error::UnsupportedGeometry(_))
        ));
    }
}
