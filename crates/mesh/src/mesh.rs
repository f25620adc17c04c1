//! Module for mesh-related data and implementations

// crate modules
use crate::cell_data::{leading_length, merge_cell_blocks, raw_from_cell_data};
use crate::error::{Error, Result};
use crate::summary::{CellCount, MeshSummary};
use crate::CellType;

// standard library
use std::collections::BTreeMap;

// external crates
use log::debug;
use ndarray::{s, Array2, ArrayD, Axis};
use serde::Serialize;

/// Connectivity arrays keyed by cell shape, `(n_cells, nodes_per_cell)`
pub type Cells = BTreeMap<CellType, Array2<usize>>;

/// Named arrays with one row per point
pub type PointData = BTreeMap<String, ArrayD<f64>>;

/// Named arrays with one row per cell, kept separate for every cell shape
pub type CellData = BTreeMap<CellType, BTreeMap<String, ArrayD<f64>>>;

/// Named arrays with one row per cell, concatenated over all cell shapes
pub type RawCellData = BTreeMap<String, ArrayD<f64>>;

/// Auxiliary integer values by tag name, conventionally `[tag, dimension]`
pub type FieldData = BTreeMap<String, Vec<i64>>;

/// Common data structure for an unstructured mesh
///
/// Every format reads into and writes from a [Mesh], so any mesh can be
/// converted between them.
///
/// - `points` are stored as rows of coordinates, `(n_points, dim)`
/// - `cells` map a [CellType] to its connectivity, `(n_cells, nodes)`
/// - `point_data` has one row per point for every named array
/// - `cell_data` has one row per cell, separated by [CellType]
/// - `field_data` holds auxiliary integer tags
///
/// Cell blocks always iterate in [CellType] table order, and cell data for a
/// given name is always concatenated in that same order. See
/// [raw_from_cell_data()](crate::raw_from_cell_data) for details.
///
/// ## Examples
///
/// ```rust
/// # use hmf_mesh::{CellType, Mesh};
/// # use ndarray::array;
/// let mesh = Mesh::new(
///     array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
///     [(CellType::Triangle, array![[0, 1, 2], [0, 2, 3]])],
/// )
/// .unwrap()
/// .with_point_data("u", array![0.0, 1.0, 2.0, 3.0].into_dyn())
/// .with_cell_data(CellType::Triangle, "id", array![7.0, 8.0].into_dyn());
///
/// assert_eq!(mesh.n_points(), 4);
/// assert_eq!(mesh.n_cells(), 2);
/// assert_eq!(mesh.dim(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Point coordinates, one row per point
    pub points: Array2<f64>,
    /// Connectivity for every cell shape
    pub cells: Cells,
    /// Named point data arrays
    pub point_data: PointData,
    /// Named cell data arrays by cell shape
    pub cell_data: CellData,
    /// Auxiliary tags
    pub field_data: FieldData,
}

/// Result of checking cell connectivity against the points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Consistency {
    /// Every node index is valid and every point is used
    Consistent,
    /// Cells refer to nonexistent points
    OutOfRange,
    /// Some number of points are not part of any cell
    OrphanedPoints(usize),
}

impl Mesh {
    /// Create a mesh from points and any number of cell blocks
    ///
    /// Blocks of the same [CellType] are concatenated in the order given.
    /// Every block must have the node count of its cell type.
    pub fn new<I>(points: Array2<f64>, cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (CellType, Array2<usize>)>,
    {
        Ok(Self {
            points,
            cells: merge_cell_blocks(cells.into_iter().collect())?,
            ..Default::default()
        })
    }

    /// Add a named point data array
    pub fn with_point_data(mut self, name: &str, values: ArrayD<f64>) -> Self {
        self.point_data.insert(name.to_string(), values);
        self
    }

    /// Add a named cell data array for one cell shape
    pub fn with_cell_data(mut self, cell_type: CellType, name: &str, values: ArrayD<f64>) -> Self {
        self.cell_data
            .entry(cell_type)
            .or_default()
            .insert(name.to_string(), values);
        self
    }

    /// Add a named set of auxiliary tag values
    pub fn with_field_data(mut self, name: &str, values: Vec<i64>) -> Self {
        self.field_data.insert(name.to_string(), values);
        self
    }

    /// Number of coordinate components per point
    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.points.nrows()
    }

    /// Total number of cells over all shapes
    pub fn n_cells(&self) -> usize {
        self.cells.values().map(|block| block.nrows()).sum()
    }

    /// Ordered `(cell type, number of cells)` pairs
    pub fn cell_blocks(&self) -> Vec<(CellType, usize)> {
        self.cells
            .iter()
            .map(|(cell_type, block)| (*cell_type, block.nrows()))
            .collect()
    }

    /// Cell data concatenated over all cell shapes
    pub fn raw_cell_data(&self) -> Result<BTreeMap<String, ArrayD<f64>>> {
        raw_from_cell_data(&self.cells, &self.cell_data)
    }

    /// Union of cell data names over every cell shape
    pub fn cell_data_names(&self) -> Vec<String> {
        let mut names = self
            .cell_data
            .values()
            .flat_map(|fields| fields.keys().cloned())
            .collect::<Vec<String>>();
        names.sort();
        names.dedup();
        names
    }

    /// Check array lengths before anything is written
    ///
    /// Point data must have one row per point, every connectivity block must
    /// have the right number of nodes for its shape, and cell data must have
    /// one row per cell.
    pub fn validate(&self) -> Result<()> {
        for (name, values) in &self.point_data {
            let found = leading_length(values);
            if found != self.n_points() {
                return Err(Error::UnexpectedPointDataLength {
                    name: name.clone(),
                    expected: self.n_points(),
                    found,
                });
            }
        }

        for (cell_type, block) in &self.cells {
            if block.ncols() != cell_type.nodes_per_cell() {
                return Err(Error::UnexpectedNodesPerCell {
                    cell_type: *cell_type,
                    expected: cell_type.nodes_per_cell(),
                    found: block.ncols(),
                });
            }
        }

        raw_from_cell_data(&self.cells, &self.cell_data).map(|_| ())
    }
}

/// Consistency checks of connectivity against the points
impl Mesh {
    /// True if any cell refers to a point index that does not exist
    pub fn has_out_of_range_cells(&self) -> bool {
        let n_points = self.n_points();
        self.cells
            .values()
            .any(|block| block.iter().any(|&node| node >= n_points))
    }

    /// Indices of points that are not part of any cell
    ///
    /// Out of range node indices are ignored.
    pub fn orphaned_points(&self) -> Vec<usize> {
        self.point_usage()
            .into_iter()
            .enumerate()
            .filter_map(|(idx, used)| (!used).then_some(idx))
            .collect()
    }

    /// Overall verdict, out of range cells take precedence over orphans
    ///
    /// ```rust
    /// # use hmf_mesh::{CellType, Consistency, Mesh};
    /// # use ndarray::array;
    /// let mesh = Mesh::new(
    ///     array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [5.0, 5.0]],
    ///     [(CellType::Triangle, array![[0, 1, 2]])],
    /// ).unwrap();
    /// assert_eq!(mesh.consistency(), Consistency::OrphanedPoints(1));
    /// ```
    pub fn consistency(&self) -> Consistency {
        if self.has_out_of_range_cells() {
            return Consistency::OutOfRange;
        }

        match self.orphaned_points().len() {
            0 => Consistency::Consistent,
            n => Consistency::OrphanedPoints(n),
        }
    }

    /// Flag every point that is referenced by at least one cell
    fn point_usage(&self) -> Vec<bool> {
        let mut used = vec![false; self.n_points()];
        for block in self.cells.values() {
            for &node in block.iter() {
                if let Some(flag) = used.get_mut(node) {
                    *flag = true;
                }
            }
        }
        used
    }
}

/// Clean-up operations applied during conversion
impl Mesh {
    /// Drop the z coordinate if every point lies in the z=0 plane
    ///
    /// Only applies to 3D points. Returns true if the mesh was changed.
    ///
    /// ```rust
    /// # use hmf_mesh::Mesh;
    /// # use ndarray::array;
    /// let mut mesh = Mesh::new(array![[0.0, 0.0, 0.0], [1.0, 2.0, 1e-15]], []).unwrap();
    /// assert!(mesh.prune_z_0(1e-13));
    /// assert_eq!(mesh.points, array![[0.0, 0.0], [1.0, 2.0]]);
    /// ```
    pub fn prune_z_0(&mut self, tolerance: f64) -> bool {
        if self.dim() != 3 {
            return false;
        }

        let flat = self
            .points
            .column(2)
            .iter()
            .all(|z| z.abs() < tolerance);

        if flat {
            self.points = self.points.slice(s![.., ..2]).to_owned();
        }
        flat
    }

    /// Remove cell blocks of lower topological dimension than the highest
    ///
    /// e.g. boundary triangles of a tetrahedral mesh. Any cell data for the
    /// removed shapes goes with them. Returns the cell types removed.
    pub fn remove_lower_dimensional_cells(&mut self) -> Vec<CellType> {
        let max_dimension = match self.cells.keys().map(|t| t.dimension()).max() {
            Some(dimension) => dimension,
            None => return Vec::new(),
        };

        let removed = self
            .cells
            .keys()
            .copied()
            .filter(|t| t.dimension() < max_dimension)
            .collect::<Vec<CellType>>();

        for cell_type in &removed {
            debug!("Removing {cell_type} cells");
            self.cells.remove(cell_type);
            self.cell_data.remove(cell_type);
        }
        removed
    }

    /// Remove points that are not part of any cell
    ///
    /// Cells are renumbered and point data filtered to match. Returns the
    /// number of points removed.
    pub fn remove_orphaned_points(&mut self) -> Result<usize> {
        if self.has_out_of_range_cells() {
            return Err(Error::MeshError(
                "cells refer to nonexistent points".to_string(),
            ));
        }
        self.validate()?;

        let used = self.point_usage();
        let kept = used
            .iter()
            .enumerate()
            .filter_map(|(idx, used)| used.then_some(idx))
            .collect::<Vec<usize>>();

        let removed = self.n_points() - kept.len();
        if removed == 0 {
            return Ok(0);
        }

        let mut renumber = vec![usize::MAX; self.n_points()];
        for (new, old) in kept.iter().enumerate() {
            renumber[*old] = new;
        }

        self.points = self.points.select(Axis(0), &kept);
        for block in self.cells.values_mut() {
            block.mapv_inplace(|node| renumber[node]);
        }
        for values in self.point_data.values_mut() {
            *values = values.select(Axis(0), &kept);
        }

        debug!("Removed {removed} orphaned points");
        Ok(removed)
    }

    /// Remove lower dimensional cells and then any orphaned points
    pub fn prune(&mut self) -> Result<()> {
        self.remove_lower_dimensional_cells();
        self.remove_orphaned_points()?;
        Ok(())
    }

    /// Summary of the mesh content and consistency
    pub fn summary(&self) -> MeshSummary {
        let bounds = self
            .points
            .axis_iter(Axis(1))
            .map(|column| {
                column.iter().fold([f64::INFINITY, f64::NEG_INFINITY], |[lo, hi], &v| {
                    [lo.min(v), hi.max(v)]
                })
            })
            .collect();

        MeshSummary {
            file_size_mb: None,
            n_points: self.n_points(),
            dimension: self.dim(),
            bounds,
            cells: self
                .cells
                .iter()
                .map(|(cell_type, block)| CellCount {
                    cell_type: cell_type.name().to_string(),
                    count: block.nrows(),
                })
                .collect(),
            point_data: self.point_data.keys().cloned().collect(),
            cell_data: self.cell_data_names(),
            field_data: self.field_data.keys().cloned().collect(),
            consistency: self.consistency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Two triangles over four points plus a boundary line and a stray point
    fn mesh() -> Mesh {
        Mesh::new(
            array![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
                [9.0, 9.0, 0.0]
            ],
            [
                (CellType::Triangle, array![[0, 1, 2], [0, 2, 3]]),
                (CellType::Line, array![[0, 1]]),
            ],
        )
        .unwrap()
        .with_point_data("u", array![0.0, 1.0, 2.0, 3.0, 4.0].into_dyn())
        .with_cell_data(CellType::Triangle, "id", array![1.0, 2.0].into_dyn())
        .with_cell_data(CellType::Line, "id", array![3.0].into_dyn())
    }

    #[test]
    fn new_joins_repeated_blocks() {
        let mesh = Mesh::new(
            array![[0.0], [1.0], [2.0]],
            [
                (CellType::Line, array![[0, 1]]),
                (CellType::Line, array![[1, 2]]),
            ],
        ).unwrap();
        assert_eq!(mesh.cells[&CellType::Line], array![[0, 1], [1, 2]]);
        assert_eq!(mesh.n_cells(), 2);
    }

    #[test]
    fn new_rejects_mismatched_blocks() {
        let result = Mesh::new(
            array![[0.0], [1.0], [2.0]],
            [
                (CellType::Line, array![[0, 1]]),
                (CellType::Line, array![[0, 1, 2]]),
            ],
        );
        assert!(matches!(
            result,
            Err(Error::UnexpectedNodesPerCell {
                cell_type: CellType::Line,
                expected: 2,
                found: 3,
            })
        ));
    }

    #[test]
    fn blocks_follow_table_order() {
        assert_eq!(
            mesh().cell_blocks(),
            vec![(CellType::Line, 1), (CellType::Triangle, 2)]
        );
    }

    #[test]
    fn raw_cell_data_follows_blocks() {
        let raw = mesh().raw_cell_data().unwrap();
        assert_eq!(raw["id"], array![3.0, 1.0, 2.0].into_dyn());
    }

    #[test]
    fn consistency_checks() {
        let mut mesh = mesh();
        assert_eq!(mesh.orphaned_points(), vec![4]);
        assert_eq!(mesh.consistency(), Consistency::OrphanedPoints(1));

        mesh.cells.insert(CellType::Vertex, array![[5]]);
        assert!(mesh.has_out_of_range_cells());
        assert_eq!(mesh.consistency(), Consistency::OutOfRange);
    }

    #[test]
    fn index_equal_to_point_count_is_out_of_range() {
        let mesh = Mesh::new(array![[0.0], [1.0]], [(CellType::Line, array![[0, 2]])]).unwrap();
        assert!(mesh.has_out_of_range_cells());
    }

    #[test]
    fn validate_point_data_length() {
        let mesh = mesh().with_point_data("bad", array![1.0, 2.0].into_dyn());
        assert!(matches!(
            mesh.validate(),
            Err(Error::UnexpectedPointDataLength {
                expected: 5,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn prune_z_only_when_flat() {
        let mut flat = mesh();
        assert!(flat.prune_z_0(1e-13));
        assert_eq!(flat.dim(), 2);
        assert!(!flat.prune_z_0(1e-13));

        let mut lifted = mesh();
        lifted.points[[4, 2]] = 1.0;
        assert!(!lifted.prune_z_0(1e-13));
        assert_eq!(lifted.dim(), 3);
    }

    #[test]
    fn prune_removes_lines_and_orphans() {
        let mut mesh = mesh();
        mesh.prune().unwrap();

        assert_eq!(mesh.cell_blocks(), vec![(CellType::Triangle, 2)]);
        assert!(!mesh.cell_data.contains_key(&CellType::Line));
        assert_eq!(mesh.n_points(), 4);
        assert_eq!(mesh.point_data["u"], array![0.0, 1.0, 2.0, 3.0].into_dyn());
        assert_eq!(mesh.consistency(), Consistency::Consistent);
    }

    #[test]
    fn orphan_removal_renumbers_cells() {
        let mut mesh = Mesh::new(
            array![[9.0, 9.0], [0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            [(CellType::Triangle, array![[1, 2, 3]])],
        )
        .unwrap()
        .with_point_data("u", array![9.0, 0.0, 1.0, 2.0].into_dyn());

        assert_eq!(mesh.remove_orphaned_points().unwrap(), 1);
        assert_eq!(mesh.cells[&CellType::Triangle], array![[0, 1, 2]]);
        assert_eq!(mesh.points, array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(mesh.point_data["u"], array![0.0, 1.0, 2.0].into_dyn());
    }

    #[test]
    fn summary_counts() {
        let summary = mesh().summary();
        assert_eq!(summary.n_points, 5);
        assert_eq!(summary.dimension, 3);
        assert_eq!(summary.bounds[0], [0.0, 9.0]);
        assert_eq!(summary.cells.len(), 2);
        assert_eq!(summary.cells[0].cell_type, "line");
        assert_eq!(summary.point_data, vec!["u".to_string()]);
        assert_eq!(summary.cell_data, vec!["id".to_string()]);
        assert_eq!(summary.consistency, Consistency::OrphanedPoints(1));
    }
}
