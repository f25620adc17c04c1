// internal modules
use crate::vtk::MeshToVtk;

// extrenal crates
use vtkio::model::ByteOrder;

/// Builder implementation for MeshToVtk configuration
///
/// The fields of [MeshToVtk] are left public for direct use but the module also
/// implements a builder.
///
/// The builder allows for chained setter calls for a functional approach that
/// could be considered more readable. Any number of parameters can be set this
/// way (including none).
///
/// To get the final [MeshToVtk] from the builder, call
/// [build()](MeshToVtkBuilder::build).
///
/// ```rust, no_run
/// # use hmf_mesh::vtk::{write_vtk, MeshToVtk, VtkFormat};
/// # use hmf_mesh::Mesh;
/// # use vtkio::model::ByteOrder;
/// # let mesh = Mesh::default();
/// // Make a new builder, change some values
/// let converter = MeshToVtk::builder()
///     .byte_order(ByteOrder::LittleEndian)
///     .title("converted mesh")
///     .build();
///
/// // Convert the mesh using the parameters set
/// let vtk = converter.convert(&mesh).unwrap();
///
/// // Write to "output.vtk" using the old ASCII text format
/// write_vtk(vtk, "./output.vtk", VtkFormat::LegacyAscii).unwrap();
/// ```
pub struct MeshToVtkBuilder {
    /// Byte ordering as big or little endian
    byte_order: ByteOrder,
    /// Title written to the file header
    title: String,
}

impl MeshToVtkBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [MeshToVtk] type
    pub fn build(self) -> MeshToVtk {
        MeshToVtk {
            byte_order: self.byte_order,
            title: self.title,
        }
    }

    /// Set the byte ordering
    ///
    /// Note that Visit only reads big endian, even though most systems are
    /// little endian. Defaults to big endian for convenience.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Set the title stored in the file header
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }
}

impl Default for MeshToVtkBuilder {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
            title: "hmf mesh".to_string(),
        }
    }
}
