//! Library of parser functions for DataItem content

// crate modules
use crate::error::{Error, Result};

// nom parser combinators
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{digit1, multispace0, multispace1};
use nom::combinator::{map_res, rest, verify};
use nom::multi::separated_list0;
use nom::sequence::{delimited, separated_pair};
use nom::IResult;

/// Parse a `Dimensions` attribute, e.g. `"10 3"`
///
/// ```rust
/// # use hmf_xdmf::parsers::dimensions;
/// assert_eq!(dimensions(" 10 3 ").unwrap(), vec![10, 3]);
/// assert!(dimensions("10 x").is_err());
/// ```
pub fn dimensions(i: &str) -> Result<Vec<usize>> {
    finish(i, separated_list0(multispace1, unsigned)(i.trim()))
}

/// Parse whitespace separated numbers from inline XML data
///
/// Accepts anything written by `Display` for `f64`, including `inf`, `-inf`
/// and `NaN`.
///
/// ```rust
/// # use hmf_xdmf::parsers::values;
/// assert_eq!(values("1 2.5\n -3e2").unwrap(), vec![1.0, 2.5, -300.0]);
/// assert_eq!(values("-inf").unwrap(), vec![f64::NEG_INFINITY]);
/// ```
pub fn values(i: &str) -> Result<Vec<f64>> {
    finish(
        i,
        delimited(multispace0, separated_list0(multispace1, number), multispace0)(i),
    )
}

/// Parse whitespace separated non-negative integers, e.g. node ids
///
/// ```rust
/// # use hmf_xdmf::parsers::indices;
/// assert_eq!(indices("4 0 1\n2").unwrap(), vec![4, 0, 1, 2]);
/// assert!(indices("0 -1").is_err());
/// ```
pub fn indices(i: &str) -> Result<Vec<u64>> {
    finish(
        i,
        delimited(multispace0, separated_list0(multispace1, index), multispace0)(i),
    )
}

/// Split an HDF reference `file.h5:/path/to/data` into the file and path
///
/// ```rust
/// # use hmf_xdmf::parsers::hdf_reference;
/// let (file, path) = hdf_reference("mesh.h5:/data0").unwrap();
/// assert_eq!(file, "mesh.h5");
/// assert_eq!(path, "/data0");
/// ```
pub fn hdf_reference(i: &str) -> Result<(String, String)> {
    let (file, path) = finish(i, reference(i.trim()))?;
    Ok((file.to_string(), path.to_string()))
}

fn reference(i: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_till1(|c| c == ':'),
        tag(":"),
        verify(rest, |path: &str| path.starts_with('/')),
    )(i)
}

fn number(i: &str) -> IResult<&str, f64> {
    map_res(take_till1(char::is_whitespace), str::parse::<f64>)(i)
}

fn index(i: &str) -> IResult<&str, u64> {
    map_res(digit1, str::parse::<u64>)(i)
}

fn unsigned(i: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(i)
}

/// Require the whole input to be consumed
fn finish<T>(original: &str, result: IResult<&str, T>) -> Result<T> {
    match result {
        Ok((remainder, value)) if remainder.trim().is_empty() => Ok(value),
        _ => Err(Error::ParseError(original.trim().to_string())),
    }
}
