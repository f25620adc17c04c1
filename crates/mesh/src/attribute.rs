//! XDMF attribute metadata derived from data array shapes

// crate modules
use crate::error::{Error, Result};

// standard library
use std::str::FromStr;

/// XDMF attribute types, i.e. `Scalar`, `Vector`, `Tensor`...
///
/// The type is inferred from the shape of the data array, where the first
/// axis always runs over points or cells.
///
/// | Shape                    | Attribute type |
/// | ------------------------ | -------------- |
/// | `(n)` or `(n, 1)`        | `Scalar`       |
/// | `(n, 2)` or `(n, 3)`     | `Vector`       |
/// | `(n, 9)` or `(n, 3, 3)`  | `Tensor`       |
/// | `(n, 6)`                 | `Tensor6`      |
/// | any other `(n, a, b)`    | `Matrix`       |
///
/// ```rust
/// # use hmf_mesh::AttributeType;
/// assert_eq!(AttributeType::classify(&[10, 3]).unwrap(), AttributeType::Vector);
/// assert_eq!(AttributeType::classify(&[10, 3, 3]).unwrap(), AttributeType::Tensor);
/// assert!(AttributeType::classify(&[10, 4]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Scalar,
    Vector,
    Tensor,
    Tensor6,
    Matrix,
}

impl AttributeType {
    /// Infer the attribute type from the full shape of a data array
    pub fn classify(shape: &[usize]) -> Result<AttributeType> {
        match shape {
            [_] | [_, 1] => Ok(AttributeType::Scalar),
            [_, 2] | [_, 3] => Ok(AttributeType::Vector),
            [_, 9] | [_, 3, 3] => Ok(AttributeType::Tensor),
            [_, 6] => Ok(AttributeType::Tensor6),
            [_, _, _] => Ok(AttributeType::Matrix),
            _ => Err(Error::UnsupportedAttributeShape(shape.to_vec())),
        }
    }

    /// Name used for the XDMF `AttributeType`
    pub fn xdmf_name(&self) -> &'static str {
        match self {
            AttributeType::Scalar => "Scalar",
            AttributeType::Vector => "Vector",
            AttributeType::Tensor => "Tensor",
            AttributeType::Tensor6 => "Tensor6",
            AttributeType::Matrix => "Matrix",
        }
    }
}

impl FromStr for AttributeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Scalar" => Ok(AttributeType::Scalar),
            "Vector" => Ok(AttributeType::Vector),
            "Tensor" => Ok(AttributeType::Tensor),
            "Tensor6" => Ok(AttributeType::Tensor6),
            "Matrix" => Ok(AttributeType::Matrix),
            _ => Err(Error::UnknownAttributeType(s.to_string())),
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.xdmf_name())
    }
}

/// Where attribute values live, i.e. on nodes or on cells
///
/// Parsing is case-insensitive because writers disagree on the spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Center {
    /// One value per point
    Node,
    /// One value per cell
    Cell,
    /// One value for the whole grid
    Grid,
}

impl Center {
    /// Name used for the XDMF `Center`
    pub fn xdmf_name(&self) -> &'static str {
        match self {
            Center::Node => "Node",
            Center::Cell => "Cell",
            Center::Grid => "Grid",
        }
    }
}

impl FromStr for Center {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "node" => Ok(Center::Node),
            "cell" => Ok(Center::Cell),
            "grid" => Ok(Center::Grid),
            _ => Err(Error::UnknownCenter(s.to_string())),
        }
    }
}

impl std::fmt::Display for Center {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.xdmf_name())
    }
}
