//! Thin helpers over the hdf5 crate shared by the hmf and XDMF writers

// crate modules
use crate::compression::Compression;
use crate::error::{Error, Result};

// external crates
use hdf5::types::{FixedAscii, FixedUnicode, VarLenAscii, VarLenUnicode};
use hdf5::{Dataset, Group, H5Type, Location};
use hmf_mesh::CellType;
use ndarray::{Array2, ArrayD, ArrayView, Dimension, IxDyn};

/// Write an array to a new dataset with the requested compression
///
/// Compressed datasets are chunked as a single chunk of the full shape. Empty
/// arrays can not be chunked and are always stored uncompressed.
pub fn write_dataset<'d, T, D>(
    group: &Group,
    name: &str,
    values: ArrayView<'d, T, D>,
    compression: Compression,
) -> Result<Dataset>
where
    T: H5Type,
    D: Dimension,
{
    let shape = values.shape().to_vec();
    let is_empty = values.is_empty();
    let builder = group.new_dataset_builder().with_data(values);

    let dataset = match compression.level() {
        Some(level) if !is_empty => builder.chunk(shape).deflate(level).create(name)?,
        _ => builder.create(name)?,
    };

    Ok(dataset)
}

/// Read any numeric dataset as `f64` values of the stored shape
pub fn read_f64(dataset: &Dataset) -> Result<ArrayD<f64>> {
    Ok(dataset.read_dyn::<f64>()?)
}

/// Read a connectivity dataset as `(n_cells, nodes_per_cell)` node indices
///
/// One dimensional datasets are accepted when the node count divides the
/// length, which is how single node cells are often stored.
pub fn read_connectivity(dataset: &Dataset, cell_type: CellType) -> Result<Array2<usize>> {
    let values = dataset.read_dyn::<u64>()?;
    let nodes = cell_type.nodes_per_cell();

    let found = match values.shape() {
        [_, found] => *found,
        [n] if n % nodes == 0 => nodes,
        _ => values.shape().last().copied().unwrap_or(0),
    };
    if found != nodes {
        return Err(hmf_mesh::Error::UnexpectedNodesPerCell {
            cell_type,
            expected: nodes,
            found,
        }
        .into());
    }

    let flat = values.iter().map(|&n| n as usize).collect::<Vec<usize>>();
    Ok(Array2::from_shape_vec((flat.len() / nodes, nodes), flat)?)
}

/// Read a 1D integer dataset
pub fn read_i64(dataset: &Dataset) -> Result<Vec<i64>> {
    Ok(dataset.read_raw::<i64>()?)
}

/// Reshape geometry to `(n_points, dim)`, treating 1D datasets as `X` only
pub fn as_points(values: ArrayD<f64>) -> Result<Array2<f64>> {
    let values = match values.ndim() {
        1 => {
            let n = values.len();
            values.into_shape_with_order(IxDyn(&[n, 1]))?
        }
        _ => values,
    };
    Ok(values.into_dimensionality()?)
}

/// Attach a scalar string attribute
pub fn write_str_attr(location: &Location, name: &str, value: &str) -> Result<()> {
    let value = value.parse::<VarLenUnicode>()?;
    location
        .new_attr::<VarLenUnicode>()
        .shape(())
        .create(name)?
        .write_scalar(&value)?;
    Ok(())
}

/// Read a scalar string attribute, whichever string type it was stored as
pub fn read_str_attr(location: &Location, name: &str) -> Result<String> {
    let attr = location.attr(name)?;

    if let Ok(value) = attr.read_scalar::<VarLenUnicode>() {
        return Ok(value.as_str().to_string());
    }
    if let Ok(value) = attr.read_scalar::<VarLenAscii>() {
        return Ok(value.as_str().to_string());
    }
    if let Ok(value) = attr.read_scalar::<FixedUnicode<255>>() {
        return Ok(value.as_str().to_string());
    }
    let value = attr.read_scalar::<FixedAscii<255>>()?;
    Ok(value.as_str().to_string())
}

/// Read the first attribute present out of several spellings
pub fn read_str_attr_any(location: &Location, names: &[&str]) -> Result<String> {
    let present = location.attr_names()?;
    match names.iter().find(|name| present.iter().any(|p| p.as_str() == **name)) {
        Some(name) => read_str_attr(location, name),
        None => Err(Error::MissingAttribute {
            object: location.name(),
            attribute: names.join("|"),
        }),
    }
}

/// Members of a group named `<prefix><k>`, sorted by `k`
///
/// HDF5 iterates links alphabetically, so `Topology10` would otherwise come
/// before `Topology2`. A bare `<prefix>` counts as index 0.
pub(crate) fn numbered_members(members: &[String], prefix: &str) -> Vec<String> {
    let mut numbered = members
        .iter()
        .filter_map(|name| {
            let suffix = name.strip_prefix(prefix)?;
            match suffix {
                "" => Some((0, name.clone())),
                _ => suffix.parse::<usize>().ok().map(|k| (k, name.clone())),
            }
        })
        .collect::<Vec<(usize, String)>>();

    numbered.sort();
    numbered.into_iter().map(|(_, name)| name).collect()
}
