//! Dataset compression settings

// crate modules
use crate::error::{Error, Result};

// standard library
use std::str::FromStr;

/// Compression filter applied to every dataset written
///
/// Only gzip (deflate) is supported, which every HDF5 reader understands.
///
/// ```rust
/// # use hmf_h5::Compression;
/// assert_eq!(Compression::gzip(6).unwrap(), Compression::Gzip(6));
/// assert!(Compression::gzip(10).is_err());
///
/// // parse from a name, with an optional level
/// assert_eq!("gzip".parse::<Compression>().unwrap(), Compression::Gzip(4));
/// assert_eq!("gzip:1".parse::<Compression>().unwrap(), Compression::Gzip(1));
/// assert_eq!("none".parse::<Compression>().unwrap(), Compression::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Store datasets contiguously without any filters
    #[default]
    None,
    /// Deflate with a level from 0 (fastest) to 9 (smallest)
    Gzip(u8),
}

impl Compression {
    /// Level used when none is given
    pub const DEFAULT_LEVEL: u8 = 4;

    /// Gzip compression, checking that the level is 0-9
    pub fn gzip(level: u8) -> Result<Self> {
        match level {
            0..=9 => Ok(Compression::Gzip(level)),
            _ => Err(Error::InvalidCompressionLevel(level)),
        }
    }

    /// Gzip compression at the default level
    pub fn default_gzip() -> Self {
        Compression::Gzip(Self::DEFAULT_LEVEL)
    }

    /// Deflate level, if any
    pub fn level(&self) -> Option<u8> {
        match self {
            Compression::None => None,
            Compression::Gzip(level) => Some(*level),
        }
    }
}

impl FromStr for Compression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        let (name, level) = match lower.split_once(':') {
            Some((name, level)) => (name, Some(level)),
            None => (lower.as_str(), None),
        };

        match (name, level) {
            ("none", None) => Ok(Compression::None),
            ("gzip", None) => Ok(Compression::default_gzip()),
            ("gzip", Some(level)) => match level.parse::<u8>() {
                Ok(level) => Compression::gzip(level),
                Err(_) => Err(Error::UnknownCompression(s.to_string())),
            },
            _ => Err(Error::UnknownCompression(s.to_string())),
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Gzip(level) => write!(f, "gzip:{level}"),
        }
    }
}
