//! Human and machine readable overview of a mesh

// crate modules
use crate::error::Result;
use crate::mesh::Consistency;

// external crates
use hmf_utils::{f, ValueExt};
use serde::Serialize;

/// Number of cells for one cell shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellCount {
    /// Mesh-side cell type name, e.g. `triangle`
    pub cell_type: String,
    /// Number of cells of this type
    pub count: usize,
}

/// Overview of mesh content, as reported by the `info` operations
///
/// The [Display](std::fmt::Display) implementation gives the plain text
/// report, while [to_json()](MeshSummary::to_json) gives the same content as
/// JSON.
///
/// ```text
/// File size: 0.0123 MB
/// Number of points: 4
/// Number of cells:
///   triangle: 2
/// Point data: u
/// Cell data: c
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    /// Size of the source file in MB, if read from a file
    pub file_size_mb: Option<f64>,
    /// Number of points
    pub n_points: usize,
    /// Number of coordinate components per point
    pub dimension: usize,
    /// `[min, max]` of every coordinate axis
    pub bounds: Vec<[f64; 2]>,
    /// Cell counts in cell type order
    pub cells: Vec<CellCount>,
    /// Names of the point data arrays
    pub point_data: Vec<String>,
    /// Union of cell data names over all cell shapes
    pub cell_data: Vec<String>,
    /// Names of the field data tags
    pub field_data: Vec<String>,
    /// Verdict of the connectivity checks
    pub consistency: Consistency,
}

impl MeshSummary {
    /// Attach the size of the source file, given in bytes
    pub fn with_file_size(mut self, bytes: u64) -> Self {
        self.file_size_mb = Some(bytes as f64 / 1024.0_f64.powi(2));
        self
    }

    /// Serialise the summary to a pretty JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Wrap a list of names onto continuation lines
    fn name_list(label: &str, names: &[String]) -> String {
        let indent = " ".repeat(label.len() + 2);
        let options = textwrap::Options::new(80).subsequent_indent(&indent);
        textwrap::fill(&f!("{label}: {}", names.join(", ")), options)
    }
}

impl std::fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = String::new();

        if let Some(size) = self.file_size_mb {
            s += &f!("File size: {size} MB\n");
        }
        s += &f!("Number of points: {}\n", self.n_points);

        for (axis, [lo, hi]) in ["x", "y", "z"].iter().zip(&self.bounds) {
            s += &f!("  {axis}: {:>11} - {:>11}\n", lo.sci(4, 2), hi.sci(4, 2));
        }

        s += "Number of cells:\n";
        for cell in &self.cells {
            s += &f!("  {}: {}\n", cell.cell_type, cell.count);
        }

        if !self.point_data.is_empty() {
            s += &f!("{}\n", Self::name_list("Point data", &self.point_data));
        }
        if !self.cell_data.is_empty() {
            s += &f!("{}\n", Self::name_list("Cell data", &self.cell_data));
        }
        if !self.field_data.is_empty() {
            s += &f!("{}\n", Self::name_list("Field data", &self.field_data));
        }

        match self.consistency {
            Consistency::Consistent => (),
            Consistency::OutOfRange => {
                s += "\nATTENTION: Inconsistent mesh. Cells refer to nonexistent points.\n"
            }
            Consistency::OrphanedPoints(_) => {
                s += "ATTENTION: Some points are not part of any cell.\n"
            }
        }

        write!(f, "{}", s.trim_end())
    }
}
