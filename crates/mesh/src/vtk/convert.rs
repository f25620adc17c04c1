// hmf modules
use crate::error::{Error, Result};
use crate::Mesh;
use hmf_utils::f;

// internal modules
use crate::vtk::MeshToVtkBuilder;

// extrenal crates
use ndarray::ArrayD;
use vtkio::model::{
    Attribute, Attributes, ByteOrder, Cells, DataArray, DataSet, ElementType, IOBuffer,
    UnstructuredGridPiece, Version, VertexNumbers, Vtk,
};

/// Convert a [Mesh] to VTK unstructured grids for plotting
///
/// Every cell block becomes a run of VTK cells in the same order, so raw cell
/// data lines up with the VTK cells without reordering. Points with fewer than
/// three coordinates are padded with zeros.
///
/// The fields remain public for direct use, but for convenience and style
/// preference a builder pattern is also implemented.
///
/// ```rust
/// # use hmf_mesh::vtk::MeshToVtk;
/// # use hmf_mesh::{CellType, Mesh};
/// # use ndarray::array;
/// let mesh = Mesh::new(
///     array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
///     [(CellType::Triangle, array![[0, 1, 2]])],
/// ).unwrap();
/// let vtk = MeshToVtk::new().convert(&mesh).unwrap();
/// assert_eq!(vtk.title, "hmf mesh");
/// ```
///
/// ## Vtk formatting
///
/// The byte ordering is important for binary file compatability with plotting
/// software. ParaView does not care, but something like Visit only likes big
/// endian. This is the default for convenience.
///
/// ```rust
/// # use hmf_mesh::vtk::MeshToVtk;
/// # use vtkio::model::ByteOrder;
/// let converter = MeshToVtk::builder()
///     .byte_order(ByteOrder::LittleEndian)
///     .build();
/// ```
#[derive(Debug, PartialEq)]
pub struct MeshToVtk {
    /// Byte ordering as big or little endian
    pub byte_order: ByteOrder,
    /// Title written to the file header
    pub title: String,
}

// Public API
impl MeshToVtk {
    /// Start with the default configuration
    pub fn new() -> MeshToVtk {
        Default::default()
    }

    /// Get an instance of the [MeshToVtkBuilder]
    pub fn builder() -> MeshToVtkBuilder {
        MeshToVtkBuilder::default()
    }

    /// Convert a [Mesh] to vtkio::Vtk object
    ///
    /// Fails for points with more than three components, or if the cell data
    /// is not consistent with the cells.
    pub fn convert(&self, mesh: &Mesh) -> Result<Vtk> {
        Ok(Vtk {
            version: Version::Auto,
            title: self.title.clone(),
            byte_order: self.byte_order,
            file_path: None,
            data: DataSet::inline(UnstructuredGridPiece {
                points: IOBuffer::F64(Self::points(mesh)?),
                cells: Self::cells(mesh),
                data: self.attributes(mesh)?,
            }),
        })
    }
}

impl Default for MeshToVtk {
    fn default() -> Self {
        MeshToVtkBuilder::default().build()
    }
}

impl MeshToVtk {
    /// Flat xyz coordinates, zero padded up to three components
    fn points(mesh: &Mesh) -> Result<Vec<f64>> {
        if mesh.dim() > 3 {
            return Err(Error::MeshError(f!(
                "vtk points need at most 3 components, found {}",
                mesh.dim()
            )));
        }

        let mut points = Vec::with_capacity(mesh.n_points() * 3);
        for row in mesh.points.rows() {
            points.extend(row.iter());
            points.extend(std::iter::repeat(0.0).take(3 - row.len()));
        }
        Ok(points)
    }

    /// Connectivity with XML style offsets
    fn cells(mesh: &Mesh) -> Cells {
        let mut connectivity = Vec::new();
        let mut offsets = Vec::with_capacity(mesh.n_cells());
        let mut types = Vec::with_capacity(mesh.n_cells());

        for (cell_type, block) in &mesh.cells {
            let vtk_type = cell_type.vtk_cell_type();
            for cell in block.rows() {
                connectivity.extend(cell.iter().map(|&node| node as u64));
                offsets.push(connectivity.len() as u64);
                types.push(vtk_type);
            }
        }

        Cells {
            cell_verts: VertexNumbers::XML {
                connectivity,
                offsets,
            },
            types,
        }
    }

    /// Point data and raw cell data as VTK data arrays
    fn attributes(&self, mesh: &Mesh) -> Result<Attributes> {
        let mut attributes = Attributes::new();

        for (name, values) in &mesh.point_data {
            attributes.point.push(Self::data_array(name, values));
        }
        for (name, values) in &mesh.raw_cell_data()? {
            attributes.cell.push(Self::data_array(name, values));
        }

        Ok(attributes)
    }

    /// Flattened values, with components taken from the trailing axes
    fn data_array(name: &str, values: &ArrayD<f64>) -> Attribute {
        let num_comp = values.shape().iter().skip(1).product::<usize>() as u32;

        let elem = match (values.shape(), num_comp) {
            ([_, 3], _) => ElementType::Vectors,
            ([_, 9], _) | ([_, 3, 3], _) => ElementType::Tensors,
            (_, 1..=4) => ElementType::Scalars {
                num_comp,
                lookup_table: None,
            },
            _ => ElementType::Generic(num_comp),
        };

        Attribute::DataArray(DataArray {
            name: name.to_string(),
            elem,
            data: IOBuffer::F64(values.iter().copied().collect()),
        })
    }
}
