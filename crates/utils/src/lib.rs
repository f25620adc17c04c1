//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, file extension checks and prettier formatting for scientific
//! numbers are needed by every format crate.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod path_ext;
mod value_ext;

// Flatten
pub use path_ext::PathExt;
pub use value_ext::ValueExt;
