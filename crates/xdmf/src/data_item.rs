//! Reading and writing `DataItem` elements and their heavy data

// crate modules
use crate::element::Element;
use crate::error::{Error, Result};
use crate::parsers::{dimensions, hdf_reference, indices, values};

// standard library
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

// hmf modules
use hmf_h5::datasets::{read_f64, write_dataset};
use hmf_h5::Compression;
use hmf_utils::f;

// external crates
use hdf5::H5Type;
use ndarray::{ArrayD, ArrayView, Dimension, IxDyn};

/// Where the values of every `DataItem` are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    /// Datasets in a separate HDF5 file next to the descriptor
    #[default]
    Hdf,
    /// Values written inline as text
    Xml,
}

impl DataFormat {
    /// Name used for the XDMF `Format` attribute
    pub fn xdmf_name(&self) -> &'static str {
        match self {
            DataFormat::Hdf => "HDF",
            DataFormat::Xml => "XML",
        }
    }
}

impl FromStr for DataFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HDF" => Ok(DataFormat::Hdf),
            "XML" => Ok(DataFormat::Xml),
            _ => Err(Error::UnsupportedDataFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.xdmf_name())
    }
}

/// Number type written for the XDMF `DataType`, always 8 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberType {
    Float,
    UInt,
    Int,
}

impl NumberType {
    fn xdmf_name(&self) -> &'static str {
        match self {
            NumberType::Float => "Float",
            NumberType::UInt => "UInt",
            NumberType::Int => "Int",
        }
    }
}

/// Collects the heavy data while a descriptor is being written
pub(crate) struct HeavyData {
    /// Open HDF5 file and the name it is referenced by, for HDF output
    h5: Option<(hdf5::File, String)>,
    compression: Compression,
    count: usize,
}

impl HeavyData {
    /// Inline text values
    pub(crate) fn xml() -> Self {
        Self {
            h5: None,
            compression: Compression::None,
            count: 0,
        }
    }

    /// Datasets in a new HDF5 file at `path`, referenced as `name`
    pub(crate) fn hdf(path: &Path, name: &str, compression: Compression) -> Result<Self> {
        Ok(Self {
            h5: Some((hdf5::File::create(path)?, name.to_string())),
            compression,
            count: 0,
        })
    }

    /// Store an array and return the `DataItem` that refers to it
    pub(crate) fn item<T, D>(&mut self, values: ArrayView<T, D>, number: NumberType) -> Result<Element>
    where
        T: H5Type + Display,
        D: Dimension,
    {
        let dims = values
            .shape()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<String>>()
            .join(" ");

        let item = Element::new("DataItem")
            .attr("DataType", number.xdmf_name())
            .attr("Precision", 8)
            .attr("Dimensions", dims);

        match &self.h5 {
            Some((file, name)) => {
                let dataset = f!("data{}", self.count);
                self.count += 1;
                write_dataset(file, &dataset, values, self.compression)?;
                Ok(item
                    .attr("Format", DataFormat::Hdf)
                    .text(f!("{name}:/{dataset}")))
            }
            None => Ok(item
                .attr("Format", DataFormat::Xml)
                .text(Self::inline_text(&values))),
        }
    }

    /// One line per leading index, values separated by spaces
    fn inline_text<T: Display, D: Dimension>(values: &ArrayView<T, D>) -> String {
        let row_length = values.shape().iter().skip(1).product::<usize>().max(1);
        let flat = values.iter().map(|v| v.to_string()).collect::<Vec<String>>();
        flat.chunks(row_length)
            .map(|row| row.join(" "))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Read the values of a `DataItem` as `f64`, in the shape of `Dimensions`
///
/// HDF references are resolved relative to `base_dir`, the directory of the
/// descriptor.
pub(crate) fn read_data_item(item: &Element, base_dir: &Path) -> Result<ArrayD<f64>> {
    reject_nested(item)?;
    let shape = dimensions(item.require("Dimensions")?)?;
    let format = item.get("Format").unwrap_or("XML").parse::<DataFormat>()?;

    let values = match format {
        DataFormat::Xml => ArrayD::from_shape_vec(IxDyn(&shape), values(&item.text)?)?,
        DataFormat::Hdf => {
            let (file_name, path) = hdf_reference(&item.text)?;
            let file = hdf5::File::open(base_dir.join(file_name))?;
            let values = read_f64(&file.dataset(&path)?)?;
            if values.len() != shape.iter().product::<usize>() {
                return Err(Error::InvalidDataItem(f!(
                    "{path} has shape {:?}, expected {shape:?}",
                    values.shape()
                )));
            }
            values.into_shape_with_order(IxDyn(&shape))?
        }
    };

    Ok(values)
}

/// Read node ids or type codes from a `DataItem`, flattened
///
/// Integer items are read exactly. Items with the default `Float` type are
/// read as `f64` and must hold non-negative whole numbers.
pub(crate) fn read_index_item(item: &Element, base_dir: &Path) -> Result<Vec<u64>> {
    let number = item
        .get("DataType")
        .or_else(|| item.get("NumberType"))
        .unwrap_or("Float");
    if number.eq_ignore_ascii_case("Float") {
        return as_indices(&read_data_item(item, base_dir)?);
    }

    reject_nested(item)?;
    let expected = dimensions(item.require("Dimensions")?)?
        .iter()
        .product::<usize>();
    let format = item.get("Format").unwrap_or("XML").parse::<DataFormat>()?;

    let values = match format {
        DataFormat::Xml => indices(&item.text)?,
        DataFormat::Hdf => {
            let (file_name, path) = hdf_reference(&item.text)?;
            let file = hdf5::File::open(base_dir.join(file_name))?;
            let dataset = file.dataset(&path)?;
            match number {
                "Int" => dataset
                    .read_raw::<i64>()?
                    .into_iter()
                    .map(|v| u64::try_from(v).map_err(|_| invalid_index(v)))
                    .collect::<Result<Vec<u64>>>()?,
                _ => dataset.read_raw::<u64>()?,
            }
        }
    };

    if values.len() != expected {
        return Err(Error::InvalidDataItem(f!(
            "found {} indices, expected {expected}",
            values.len()
        )));
    }
    Ok(values)
}

/// Node ids and type codes must be non-negative whole numbers
fn as_indices(values: &ArrayD<f64>) -> Result<Vec<u64>> {
    values
        .iter()
        .map(|&v| match v >= 0.0 && v.fract() == 0.0 {
            true => Ok(v as u64),
            false => Err(invalid_index(v)),
        })
        .collect()
}

fn invalid_index(v: impl Display) -> Error {
    Error::InvalidDataItem(f!("{v} is not a valid index"))
}

fn reject_nested(item: &Element) -> Result<()> {
    match item.children_named("DataItem").next() {
        Some(_) => Err(Error::InvalidDataItem(f!(
            "nested items ({}) are not supported",
            item.get("ItemType").unwrap_or("Uniform")
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn inline_items() {
        let mut heavy = HeavyData::xml();
        let item = heavy
            .item(array![[1.5, 2.0], [3.0, 4.0]].view(), NumberType::Float)
            .unwrap();

        assert_eq!(item.get("Format"), Some("XML"));
        assert_eq!(item.get("Dimensions"), Some("2 2"));
        assert_eq!(item.get("DataType"), Some("Float"));
        assert_eq!(item.text, "1.5 2\n3 4");

        let values = read_data_item(&item, Path::new(".")).unwrap();
        assert_eq!(values, array![[1.5, 2.0], [3.0, 4.0]].into_dyn());
    }

    #[test]
    fn inline_non_finite_values() {
        let mut heavy = HeavyData::xml();
        let item = heavy
            .item(
                array![1.0, f64::INFINITY, f64::NEG_INFINITY, f64::NAN].view(),
                NumberType::Float,
            )
            .unwrap();
        assert_eq!(item.text, "1 inf -inf NaN");

        let values = read_data_item(&item, Path::new(".")).unwrap();
        assert_eq!(values.shape(), &[4]);
        assert_eq!(values[[0]], 1.0);
        assert_eq!(values[[1]], f64::INFINITY);
        assert_eq!(values[[2]], f64::NEG_INFINITY);
        assert!(values[[3]].is_nan());
    }

    #[test]
    fn hdf_items() {
        let dir = tempfile::tempdir().unwrap();
        let mut heavy =
            HeavyData::hdf(&dir.path().join("heavy.h5"), "heavy.h5", Compression::Gzip(4)).unwrap();

        let first = heavy.item(array![1_u64, 2, 3].view(), NumberType::UInt).unwrap();
        let second = heavy.item(array![[0.5], [1.5]].view(), NumberType::Float).unwrap();
        drop(heavy);

        assert_eq!(first.text, "heavy.h5:/data0");
        assert_eq!(second.text, "heavy.h5:/data1");
        assert_eq!(
            read_data_item(&first, dir.path()).unwrap(),
            array![1.0, 2.0, 3.0].into_dyn()
        );
        assert_eq!(
            read_data_item(&second, dir.path()).unwrap(),
            array![[0.5], [1.5]].into_dyn()
        );
    }

    #[test]
    fn large_node_ids_are_exact() {
        let big = (1_u64 << 53) + 1;
        let dir = tempfile::tempdir().unwrap();
        let mut heavy =
            HeavyData::hdf(&dir.path().join("ids.h5"), "ids.h5", Compression::None).unwrap();
        let hdf = heavy.item(array![0, big].view(), NumberType::UInt).unwrap();
        drop(heavy);

        let xml = HeavyData::xml()
            .item(array![0, big].view(), NumberType::UInt)
            .unwrap();

        assert_eq!(read_index_item(&hdf, dir.path()).unwrap(), vec![0, big]);
        assert_eq!(read_index_item(&xml, Path::new(".")).unwrap(), vec![0, big]);
    }

    #[test]
    fn float_indices() {
        let item = |text: &str| {
            Element::new("DataItem")
                .attr("Dimensions", "2")
                .attr("Format", "XML")
                .text(text)
        };
        assert_eq!(read_index_item(&item("0 4"), Path::new(".")).unwrap(), vec![0, 4]);
        assert!(read_index_item(&item("0 -1"), Path::new(".")).is_err());
        assert!(read_index_item(&item("0 0.5"), Path::new(".")).is_err());
        assert!(read_index_item(&item("0 NaN"), Path::new(".")).is_err());
    }

    #[test]
    fn negative_integer_indices() {
        let item = Element::new("DataItem")
            .attr("DataType", "Int")
            .attr("Dimensions", "2")
            .attr("Format", "XML")
            .text("0 -1");
        assert!(read_index_item(&item, Path::new(".")).is_err());
    }

    #[test]
    fn dimension_mismatch() {
        let item = Element::new("DataItem")
            .attr("Dimensions", "4")
            .attr("Format", "XML")
            .text("1 2 3");
        assert!(matches!(
            read_data_item(&item, Path::new(".")),
            Err(Error::ShapeError(_))
        ));
    }

    #[test]
    fn binary_format_is_unsupported() {
        let item = Element::new("DataItem")
            .attr("Dimensions", "1")
            .attr("Format", "Binary")
            .text("data.bin");
        assert!(matches!(
            read_data_item(&item, Path::new(".")),
            Err(Error::UnsupportedDataFormat(_))
        ));
    }
}
