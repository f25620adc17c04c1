//! `hmf` is a small toolkit for mesh archives built on XDMF and HDF5
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Split into subfiles for development, but anything important is re-exported
mod convert;
mod error;
mod options;

#[doc(inline)]
pub use convert::{convert, info, read, write, FileFormat, PRUNE_Z_TOLERANCE};

#[doc(inline)]
pub use options::{ConvertOptions, ConvertOptionsBuilder};

#[doc(inline)]
pub use error::{Error, Result};

// Re-exports of member crates.
#[doc(inline)]
pub use hmf_mesh as mesh;

#[cfg(feature = "h5")]
#[cfg_attr(docsrs, doc(cfg(feature = "h5")))]
#[doc(inline)]
pub use hmf_h5 as h5;

#[cfg(feature = "tmf")]
#[cfg_attr(docsrs, doc(cfg(feature = "tmf")))]
#[doc(inline)]
pub use hmf_tmf as tmf;

#[cfg(feature = "xdmf")]
#[cfg_attr(docsrs, doc(cfg(feature = "xdmf")))]
#[doc(inline)]
pub use hmf_xdmf as xdmf;
