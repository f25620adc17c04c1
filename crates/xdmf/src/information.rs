//! Field data stored in the grid `Information` element
//!
//! Each entry is a `[tag, dimension]` pair, kept as an XML fragment in the
//! CDATA of the element.
//!
//! ```text
//! <main><map key="inlet" dim="2">1</map></main>   <=>   {"inlet": [1, 2]}
//! ```

// crate modules
use crate::element::Element;
use crate::error::{Error, Result};

// hmf modules
use hmf_mesh::FieldData;

// external crates
use log::warn;

/// Name of the grid `Information` element holding the field data
pub(crate) const INFORMATION_NAME: &str = "Information";

/// Build the `Information` element, if there is any field data to keep
pub(crate) fn encode(field_data: &FieldData) -> Result<Option<Element>> {
    let mut main = Element::new("main");
    for (name, values) in field_data {
        match values.as_slice() {
            [tag, dim] => {
                main = main.child(
                    Element::new("map")
                        .attr("key", name)
                        .attr("dim", dim)
                        .text(tag.to_string()),
                )
            }
            _ => warn!("Warning: Skipping field data \"{name}\", only [tag, dimension] pairs are kept"),
        }
    }

    if main.children.is_empty() {
        return Ok(None);
    }

    Ok(Some(
        Element::new("Information")
            .attr("Name", INFORMATION_NAME)
            .attr("Value", main.children.len())
            .cdata(main.to_xml()?),
    ))
}

/// Recover the field data from the content of an `Information` element
pub(crate) fn decode(text: &str) -> Result<FieldData> {
    let main = Element::parse(text)?;
    let mut field_data = FieldData::new();

    for map in main.children_named("map") {
        let name = map.require("key")?;
        let dim = parse_integer(map.require("dim")?)?;
        let tag = parse_integer(&map.text)?;
        field_data.insert(name.to_string(), vec![tag, dim]);
    }

    Ok(field_data)
}

fn parse_integer(text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| Error::ParseError(text.to_string()))
}
