//! Cell shapes and their XDMF topology names

// crate modules
use crate::error::{Error, Result};

// standard library
use std::str::FromStr;

/// Cell shapes supported by the mesh formats
///
/// Every variant maps to exactly one primary XDMF topology type, and some
/// XDMF types have shorter aliases that are also recognised when reading:
///
/// | Cell type        | XDMF topology       | Aliases  | Nodes |
/// | ---------------- | ------------------- | -------- | ----- |
/// | `vertex`         | `Polyvertex`        |          | 1     |
/// | `line`           | `Polyline`          |          | 2     |
/// | `triangle`       | `Triangle`          |          | 3     |
/// | `quad`           | `Quadrilateral`     |          | 4     |
/// | `tetra`          | `Tetrahedron`       |          | 4     |
/// | `pyramid`        | `Pyramid`           |          | 5     |
/// | `wedge`          | `Wedge`             |          | 6     |
/// | `hexahedron`     | `Hexahedron`        |          | 8     |
/// | `line3`          | `Edge_3`            |          | 3     |
/// | `triangle6`      | `Triangle_6`        | `Tri_6`  | 6     |
/// | `quad8`          | `Quadrilateral_8`   | `Quad_8` | 8     |
/// | `tetra10`        | `Tetrahedron_10`    | `Tet_10` | 10    |
/// | `pyramid13`      | `Pyramid_13`        |          | 13    |
/// | `wedge15`        | `Wedge_15`          |          | 15    |
/// | `hexahedron20`   | `Hexahedron_20`     | `Hex_20` | 20    |
///
/// The variant order is the table order, and is also the iteration order of
/// cell blocks in a [Mesh](crate::Mesh).
///
/// ```rust
/// # use hmf_mesh::CellType;
/// assert_eq!(CellType::from_xdmf("Tri_6").unwrap(), CellType::Triangle6);
/// assert_eq!(CellType::Triangle6.xdmf_name(), "Triangle_6");
/// assert_eq!("tetra".parse::<CellType>().unwrap().nodes_per_cell(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellType {
    Vertex,
    Line,
    Triangle,
    Quad,
    Tetra,
    Pyramid,
    Wedge,
    Hexahedron,
    Line3,
    Triangle6,
    Quad8,
    Tetra10,
    Pyramid13,
    Wedge15,
    Hexahedron20,
}

impl CellType {
    /// Every cell type in table order
    pub const ALL: [CellType; 15] = [
        CellType::Vertex,
        CellType::Line,
        CellType::Triangle,
        CellType::Quad,
        CellType::Tetra,
        CellType::Pyramid,
        CellType::Wedge,
        CellType::Hexahedron,
        CellType::Line3,
        CellType::Triangle6,
        CellType::Quad8,
        CellType::Tetra10,
        CellType::Pyramid13,
        CellType::Wedge15,
        CellType::Hexahedron20,
    ];

    /// Mesh-side identifier i.e. 'triangle', 'tetra10'
    pub fn name(&self) -> &'static str {
        match self {
            CellType::Vertex => "vertex",
            CellType::Line => "line",
            CellType::Triangle => "triangle",
            CellType::Quad => "quad",
            CellType::Tetra => "tetra",
            CellType::Pyramid => "pyramid",
            CellType::Wedge => "wedge",
            CellType::Hexahedron => "hexahedron",
            CellType::Line3 => "line3",
            CellType::Triangle6 => "triangle6",
            CellType::Quad8 => "quad8",
            CellType::Tetra10 => "tetra10",
            CellType::Pyramid13 => "pyramid13",
            CellType::Wedge15 => "wedge15",
            CellType::Hexahedron20 => "hexahedron20",
        }
    }

    /// Find a cell type from its mesh-side identifier
    pub fn from_name(name: &str) -> Result<CellType> {
        CellType::ALL
            .into_iter()
            .find(|cell_type| cell_type.name() == name)
            .ok_or_else(|| Error::UnknownCellType(name.to_string()))
    }

    /// Primary XDMF topology type, always used when writing
    pub fn xdmf_name(&self) -> &'static str {
        self.xdmf_names()[0]
    }

    /// Alternative XDMF spellings accepted when reading
    pub fn xdmf_aliases(&self) -> &'static [&'static str] {
        &self.xdmf_names()[1..]
    }

    /// Find a cell type from any XDMF topology name or alias
    ///
    /// XDMF is case sensitive for these, so no case folding is done.
    pub fn from_xdmf(topology: &str) -> Result<CellType> {
        CellType::ALL
            .into_iter()
            .find(|cell_type| cell_type.xdmf_names().contains(&topology))
            .ok_or_else(|| Error::UnknownTopologyType(topology.to_string()))
    }

    /// Number of nodes that make up one cell
    pub fn nodes_per_cell(&self) -> usize {
        match self {
            CellType::Vertex => 1,
            CellType::Line => 2,
            CellType::Triangle | CellType::Line3 => 3,
            CellType::Quad | CellType::Tetra => 4,
            CellType::Pyramid => 5,
            CellType::Wedge | CellType::Triangle6 => 6,
            CellType::Hexahedron | CellType::Quad8 => 8,
            CellType::Tetra10 => 10,
            CellType::Pyramid13 => 13,
            CellType::Wedge15 => 15,
            CellType::Hexahedron20 => 20,
        }
    }

    /// Topological dimension of the cell, 0 for points up to 3 for volumes
    pub fn dimension(&self) -> u8 {
        match self {
            CellType::Vertex => 0,
            CellType::Line | CellType::Line3 => 1,
            CellType::Triangle | CellType::Quad | CellType::Triangle6 | CellType::Quad8 => 2,
            _ => 3,
        }
    }

    /// Type code used in XDMF `Mixed` topologies
    pub fn xdmf_index(&self) -> u64 {
        match self {
            CellType::Vertex => 1,
            CellType::Line => 2,
            CellType::Triangle => 4,
            CellType::Quad => 5,
            CellType::Tetra => 6,
            CellType::Pyramid => 7,
            CellType::Wedge => 8,
            CellType::Hexahedron => 9,
            CellType::Line3 => 34,
            CellType::Triangle6 => 36,
            CellType::Quad8 => 37,
            CellType::Tetra10 => 38,
            CellType::Pyramid13 => 39,
            CellType::Wedge15 => 40,
            CellType::Hexahedron20 => 48,
        }
    }

    /// Find a cell type from an XDMF `Mixed` topology type code
    pub fn from_xdmf_index(index: u64) -> Result<CellType> {
        CellType::ALL
            .into_iter()
            .find(|cell_type| cell_type.xdmf_index() == index)
            .ok_or(Error::UnknownTopologyIndex(index))
    }

    /// Polyvertex and Polyline carry an explicit node count in mixed data
    pub fn has_mixed_node_count(&self) -> bool {
        matches!(self, CellType::Vertex | CellType::Line)
    }

    /// Primary name followed by any aliases
    fn xdmf_names(&self) -> &'static [&'static str] {
        match self {
            CellType::Vertex => &["Polyvertex"],
            CellType::Line => &["Polyline"],
            CellType::Triangle => &["Triangle"],
            CellType::Quad => &["Quadrilateral"],
            CellType::Tetra => &["Tetrahedron"],
            CellType::Pyramid => &["Pyramid"],
            CellType::Wedge => &["Wedge"],
            CellType::Hexahedron => &["Hexahedron"],
            CellType::Line3 => &["Edge_3"],
            CellType::Triangle6 => &["Triangle_6", "Tri_6"],
            CellType::Quad8 => &["Quadrilateral_8", "Quad_8"],
            CellType::Tetra10 => &["Tetrahedron_10", "Tet_10"],
            CellType::Pyramid13 => &["Pyramid_13"],
            CellType::Wedge15 => &["Wedge_15"],
            CellType::Hexahedron20 => &["Hexahedron_20", "Hex_20"],
        }
    }
}

impl FromStr for CellType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CellType::from_name(s)
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_xdmf_name_maps_back() {
        for cell_type in CellType::ALL {
            assert_eq!(CellType::from_xdmf(cell_type.xdmf_name()).unwrap(), cell_type);
            for alias in cell_type.xdmf_aliases() {
                assert_eq!(CellType::from_xdmf(alias).unwrap(), cell_type);
            }
        }
    }

    #[test]
    fn every_name_and_index_maps_back() {
        for cell_type in CellType::ALL {
            assert_eq!(CellType::from_name(cell_type.name()).unwrap(), cell_type);
            assert_eq!(
                CellType::from_xdmf_index(cell_type.xdmf_index()).unwrap(),
                cell_type
            );
        }
    }

    #[test]
    fn aliases() {
        assert_eq!(CellType::Hexahedron20.xdmf_aliases(), &["Hex_20"]);
        assert!(CellType::Triangle.xdmf_aliases().is_empty());
        assert_eq!(CellType::from_xdmf("Quad_8").unwrap(), CellType::Quad8);
    }

    #[test]
    fn unknown_names() {
        assert!(matches!(
            CellType::from_xdmf("triangle"),
            Err(Error::UnknownTopologyType(_))
        ));
        assert!(matches!(
            CellType::from_name("Triangle"),
            Err(Error::UnknownCellType(_))
        ));
        assert!(matches!(
            CellType::from_xdmf_index(3),
            Err(Error::UnknownTopologyIndex(3))
        ));
    }

    #[test]
    fn table_order_is_ord() {
        let mut sorted = CellType::ALL;
        sorted.sort();
        assert_eq!(sorted, CellType::ALL);
    }
}
