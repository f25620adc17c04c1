//! XDMF descriptor reader and writer
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod builder;
mod data_item;
mod element;
mod error;
mod information;
mod mixed;
mod reader;
mod writer;

pub mod parsers;

#[doc(inline)]
pub use builder::XdmfWriterBuilder;

#[doc(inline)]
pub use data_item::DataFormat;

#[doc(inline)]
pub use element::Element;

#[doc(inline)]
pub use reader::read;

#[doc(inline)]
pub use writer::{write, XdmfWriter, XDMF_VERSION};

#[doc(inline)]
pub use error::{Error, Result};
