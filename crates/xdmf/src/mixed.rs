//! Encoding of the XDMF `Mixed` topology
//!
//! Every cell is written as its topology type code followed by its node ids.
//! Polyvertex and Polyline cells also carry their node count after the code.
//!
//! ```text
//! triangle [0, 1, 2], line [2, 3]   =>   4 0 1 2 2 2 2 3
//! ```

// crate modules
use crate::error::{Error, Result};

// hmf modules
use hmf_mesh::CellType;
use hmf_utils::f;

// external crates
use ndarray::Array2;

/// Flatten cell blocks into one mixed topology array
pub(crate) fn encode<'c, I>(blocks: I) -> Vec<u64>
where
    I: IntoIterator<Item = (&'c CellType, &'c Array2<usize>)>,
{
    let mut values = Vec::new();
    for (cell_type, block) in blocks {
        for cell in block.rows() {
            values.push(cell_type.xdmf_index());
            if cell_type.has_mixed_node_count() {
                values.push(cell_type.nodes_per_cell() as u64);
            }
            values.extend(cell.iter().map(|&node| node as u64));
        }
    }
    values
}

/// Split a mixed topology array into runs of cells with the same type
///
/// Consecutive cells of one type form a single block, so the order of the
/// returned blocks is the order of the cells in the file.
pub(crate) fn decode(values: &[u64]) -> Result<Vec<(CellType, Array2<usize>)>> {
    let mut runs: Vec<(CellType, Vec<usize>)> = Vec::new();
    let mut i = 0;

    while i < values.len() {
        let cell_type = CellType::from_xdmf_index(values[i])?;
        i += 1;

        let nodes = cell_type.nodes_per_cell();
        if cell_type.has_mixed_node_count() {
            let count = *values.get(i).ok_or_else(|| {
                Error::InvalidMixedTopology(f!("missing node count for {cell_type} at {i}"))
            })?;
            if count as usize != nodes {
                return Err(Error::InvalidMixedTopology(f!(
                    "{cell_type} with {count} nodes at {i}, only {nodes} is supported"
                )));
            }
            i += 1;
        }

        let cell = values.get(i..i + nodes).ok_or_else(|| {
            Error::InvalidMixedTopology(f!("truncated {cell_type} cell at {i}"))
        })?;
        i += nodes;

        match runs.last_mut() {
            Some((last, connectivity)) if *last == cell_type => {
                connectivity.extend(cell.iter().map(|&node| node as usize))
            }
            _ => runs.push((cell_type, cell.iter().map(|&node| node as usize).collect())),
        }
    }

    runs.into_iter()
        .map(|(cell_type, connectivity)| -> Result<(CellType, Array2<usize>)> {
            let n = connectivity.len() / cell_type.nodes_per_cell();
            let block = Array2::from_shape_vec((n, cell_type.nodes_per_cell()), connectivity)?;
            Ok((cell_type, block))
        })
        .collect()
}
