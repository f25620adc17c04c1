//! Configuration for converting between formats

// crate modules
use crate::FileFormat;

/// Options used by [convert()](crate::convert)
///
/// The fields are left public for direct use, but a builder is also
/// implemented for chained setter calls.
///
/// ```rust
/// # use hmf::{ConvertOptions, FileFormat};
/// let options = ConvertOptions::builder()
///     .output_format(FileFormat::Vtu)
///     .prune(true)
///     .build();
///
/// assert_eq!(options.input_format, None);
/// assert!(options.prune && !options.prune_z_0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertOptions {
    /// Input format, guessed from the extension if not set
    pub input_format: Option<FileFormat>,
    /// Output format, guessed from the extension if not set
    pub output_format: Option<FileFormat>,
    /// Remove lower dimensional cells and orphaned points
    pub prune: bool,
    /// Drop the z coordinate when every point lies in the z=0 plane
    pub prune_z_0: bool,
}

impl ConvertOptions {
    /// Start with the default configuration, formats taken from extensions
    pub fn new() -> ConvertOptions {
        Default::default()
    }

    /// Get an instance of the [ConvertOptionsBuilder]
    pub fn builder() -> ConvertOptionsBuilder {
        ConvertOptionsBuilder::default()
    }
}

/// Builder implementation for [ConvertOptions]
///
/// To get the final [ConvertOptions] from the builder, call
/// [build()](ConvertOptionsBuilder::build).
#[derive(Debug, Default)]
pub struct ConvertOptionsBuilder {
    input_format: Option<FileFormat>,
    output_format: Option<FileFormat>,
    prune: bool,
    prune_z_0: bool,
}

impl ConvertOptionsBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [ConvertOptions] type
    pub fn build(self) -> ConvertOptions {
        ConvertOptions {
            input_format: self.input_format,
            output_format: self.output_format,
            prune: self.prune,
            prune_z_0: self.prune_z_0,
        }
    }

    /// Force the input format
    pub fn input_format(mut self, format: FileFormat) -> Self {
        self.input_format = Some(format);
        self
    }

    /// Force the output format
    pub fn output_format(mut self, format: FileFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Remove lower dimensional cells and orphaned points before writing
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Drop the z coordinate of flat meshes before writing
    pub fn prune_z_0(mut self, prune_z_0: bool) -> Self {
        self.prune_z_0 = prune_z_0;
        self
    }
}
