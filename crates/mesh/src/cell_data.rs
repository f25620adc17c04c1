//! Flattening of per-shape cell data and the inverse split
//!
//! Formats built on XDMF store one array per cell data field, with values for
//! every cell shape concatenated together. A [Mesh](crate::Mesh) keeps the
//! values separated by shape instead.
//!
//! ```text
//! by shape                          raw
//! triangle: {"u": [a, b]}    <=>    {"u": [a, b, c, d, e]}
//! quad:     {"u": [c, d, e]}
//! ```
//!
//! The raw order always follows the order of the cell blocks, so the two
//! functions here are exact inverses when given the same blocks.

// crate modules
use crate::error::{Error, Result};
use crate::{CellData, CellType, Cells, RawCellData};

// standard library
use std::collections::{BTreeMap, BTreeSet};

// external crates
use log::warn;
use ndarray::{concatenate, Array2, ArrayD, ArrayViewD, Axis, Slice};

/// Merge per-shape cell data into one array per field name
///
/// Values are concatenated along the first axis in the order of `cells`. Every
/// field must be defined for every cell block, with one row per cell.
///
/// ```rust
/// # use hmf_mesh::{raw_from_cell_data, CellType, Cells, CellData};
/// # use ndarray::{array, Array2};
/// let mut cells = Cells::new();
/// cells.insert(CellType::Triangle, Array2::zeros((2, 3)));
/// cells.insert(CellType::Quad, Array2::zeros((1, 4)));
///
/// let mut cell_data = CellData::new();
/// cell_data.entry(CellType::Triangle).or_default()
///     .insert("u".to_string(), array![1.0, 2.0].into_dyn());
/// cell_data.entry(CellType::Quad).or_default()
///     .insert("u".to_string(), array![3.0].into_dyn());
///
/// let raw = raw_from_cell_data(&cells, &cell_data).unwrap();
/// assert_eq!(raw["u"], array![1.0, 2.0, 3.0].into_dyn());
/// ```
pub fn raw_from_cell_data(cells: &Cells, cell_data: &CellData) -> Result<RawCellData> {
    for cell_type in cell_data.keys() {
        if !cells.contains_key(cell_type) {
            warn!("Warning: Ignoring cell data for {cell_type}, the mesh has no {cell_type} cells");
        }
    }

    let names = cell_data
        .iter()
        .filter(|(cell_type, _)| cells.contains_key(cell_type))
        .flat_map(|(_, fields)| fields.keys())
        .collect::<BTreeSet<&String>>();

    let mut raw = RawCellData::new();
    for name in names {
        let mut views: Vec<ArrayViewD<f64>> = Vec::with_capacity(cells.len());

        for (cell_type, block) in cells {
            let values = cell_data
                .get(cell_type)
                .and_then(|fields| fields.get(name))
                .ok_or_else(|| Error::IncompleteCellData {
                    name: name.clone(),
                    cell_type: *cell_type,
                })?;

            let found = leading_length(values);
            if found != block.nrows() {
                return Err(Error::UnexpectedCellDataLength {
                    name: name.clone(),
                    expected: block.nrows(),
                    found,
                });
            }
            views.push(values.view());
        }

        raw.insert(name.clone(), concatenate(Axis(0), &views)?);
    }

    Ok(raw)
}

/// Split raw cell data back into per-shape arrays
///
/// The `blocks` are the `(cell type, number of cells)` pairs in the order the
/// raw values were written. A cell type may appear more than once, e.g. for
/// interleaved cells in a mixed topology, in which case the pieces are joined
/// back together in order.
///
/// ```rust
/// # use hmf_mesh::{cell_data_from_raw, CellType, RawCellData};
/// # use ndarray::array;
/// let mut raw = RawCellData::new();
/// raw.insert("u".to_string(), array![1.0, 2.0, 3.0].into_dyn());
///
/// let blocks = [(CellType::Triangle, 2), (CellType::Quad, 1)];
/// let cell_data = cell_data_from_raw(&blocks, &raw).unwrap();
///
/// assert_eq!(cell_data[&CellType::Triangle]["u"], array![1.0, 2.0].into_dyn());
/// assert_eq!(cell_data[&CellType::Quad]["u"], array![3.0].into_dyn());
/// ```
pub fn cell_data_from_raw(blocks: &[(CellType, usize)], raw: &RawCellData) -> Result<CellData> {
    let total = blocks.iter().map(|(_, count)| count).sum::<usize>();
    let mut cell_data = CellData::new();

    for (name, values) in raw {
        let found = leading_length(values);
        if found != total {
            return Err(Error::UnexpectedCellDataLength {
                name: name.clone(),
                expected: total,
                found,
            });
        }

        let mut pieces: BTreeMap<CellType, Vec<ArrayViewD<f64>>> = BTreeMap::new();
        let mut offset = 0;
        for (cell_type, count) in blocks {
            let piece = values.slice_axis(Axis(0), Slice::from(offset..offset + count));
            pieces.entry(*cell_type).or_default().push(piece);
            offset += count;
        }

        for (cell_type, views) in pieces {
            let merged = match views.as_slice() {
                [single] => single.to_owned(),
                _ => concatenate(Axis(0), &views)?,
            };
            cell_data
                .entry(cell_type)
                .or_default()
                .insert(name.clone(), merged);
        }
    }

    Ok(cell_data)
}

/// Join connectivity blocks that share a cell type
///
/// Readers meet blocks in file order, possibly with the same type more than
/// once. The result keeps every block of a type in the order it was found.
pub fn merge_cell_blocks(blocks: Vec<(CellType, Array2<usize>)>) -> Result<Cells> {
    let mut grouped: BTreeMap<CellType, Vec<Array2<usize>>> = BTreeMap::new();
    for (cell_type, block) in blocks {
        if block.ncols() != cell_type.nodes_per_cell() {
            return Err(Error::UnexpectedNodesPerCell {
                cell_type,
                expected: cell_type.nodes_per_cell(),
                found: block.ncols(),
            });
        }
        grouped.entry(cell_type).or_default().push(block);
    }

    let mut cells = Cells::new();
    for (cell_type, mut arrays) in grouped {
        let merged = if arrays.len() == 1 {
            arrays.remove(0)
        } else {
            let views = arrays.iter().map(|a| a.view()).collect::<Vec<_>>();
            concatenate(Axis(0), &views)?
        };
        cells.insert(cell_type, merged);
    }

    Ok(cells)
}

/// Length of the first axis, treating 0-d arrays as empty
pub(crate) fn leading_length(values: &ArrayD<f64>) -> usize {
    values.shape().first().copied().unwrap_or(0)
}
