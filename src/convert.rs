//! Reading, writing and converting meshes in any supported format

// crate modules
use crate::error::{Error, Result};
use crate::options::ConvertOptions;

// standard library
use std::path::Path;
use std::str::FromStr;

// hmf modules
use hmf_mesh::{read_vtk, write_vtk, Mesh, MeshSummary, MeshToVtk, VtkFormat};
use hmf_utils::PathExt;

// external crates
use log::debug;

/// Tolerance on |z| used to decide that a mesh is flat
pub const PRUNE_Z_TOLERANCE: f64 = 1e-13;

/// Mesh file formats known to the toolkit
///
/// ```rust
/// # use hmf::FileFormat;
/// # use std::path::Path;
/// assert_eq!(FileFormat::from_path(Path::new("a/mesh.xmf")).unwrap(), FileFormat::Xdmf);
/// assert_eq!("TMF".parse::<FileFormat>().unwrap(), FileFormat::Tmf);
/// assert!(FileFormat::from_path(Path::new("mesh.msh")).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Single HDF5 file with an XDMF style layout
    Hmf,
    /// Tar archive of an XDMF descriptor and its HDF5 data
    Tmf,
    /// XDMF descriptor, heavy data in HDF5 or inline
    Xdmf,
    /// Legacy VTK unstructured grid
    Vtk,
    /// XML VTK unstructured grid
    Vtu,
}

impl FileFormat {
    /// Guess the format from the file extension
    pub fn from_path(path: &Path) -> Result<FileFormat> {
        path.extension_lower()
            .unwrap_or_default()
            .parse::<FileFormat>()
            .map_err(|_| Error::UnknownFormat(path.display().to_string()))
    }

    /// Short lower case name of the format
    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Hmf => "hmf",
            FileFormat::Tmf => "tmf",
            FileFormat::Xdmf => "xdmf",
            FileFormat::Vtk => "vtk",
            FileFormat::Vtu => "vtu",
        }
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hmf" => Ok(FileFormat::Hmf),
            "tmf" => Ok(FileFormat::Tmf),
            "xdmf" | "xmf" => Ok(FileFormat::Xdmf),
            "vtk" => Ok(FileFormat::Vtk),
            "vtu" => Ok(FileFormat::Vtu),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Read a mesh, with the format guessed from the extension if not given
pub fn read(path: impl AsRef<Path>, format: Option<FileFormat>) -> Result<Mesh> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => FileFormat::from_path(path)?,
    };
    debug!("Reading {} as {format}", path.display());

    match format {
        #[cfg(feature = "h5")]
        FileFormat::Hmf => Ok(hmf_h5::read(path)?),
        #[cfg(feature = "tmf")]
        FileFormat::Tmf => Ok(hmf_tmf::read(path)?),
        #[cfg(feature = "xdmf")]
        FileFormat::Xdmf => Ok(hmf_xdmf::read(path)?),
        FileFormat::Vtk | FileFormat::Vtu => Ok(read_vtk(path)?),
        #[allow(unreachable_patterns)]
        disabled => Err(Error::DisabledFormat(disabled)),
    }
}

/// Write a mesh with default options for the format
///
/// The format is guessed from the extension if not given. hmf files are
/// uncompressed, tmf archives and XDMF heavy data are gzip compressed, and
/// `.vtk` files use the binary legacy format.
pub fn write(path: impl AsRef<Path>, mesh: &Mesh, format: Option<FileFormat>) -> Result<()> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => FileFormat::from_path(path)?,
    };
    debug!("Writing {} as {format}", path.display());

    match format {
        #[cfg(feature = "h5")]
        FileFormat::Hmf => Ok(hmf_h5::write(path, mesh, &hmf_h5::WriteOptions::default())?),
        #[cfg(feature = "tmf")]
        FileFormat::Tmf => Ok(hmf_tmf::write(path, mesh, &hmf_tmf::WriteOptions::default())?),
        #[cfg(feature = "xdmf")]
        FileFormat::Xdmf => Ok(hmf_xdmf::write(path, mesh, &hmf_xdmf::XdmfWriter::default())?),
        FileFormat::Vtk => Ok(write_vtk(
            MeshToVtk::new().convert(mesh)?,
            path,
            VtkFormat::LegacyBinary,
        )?),
        FileFormat::Vtu => Ok(write_vtk(
            MeshToVtk::new().convert(mesh)?,
            path,
            VtkFormat::Xml,
        )?),
        #[allow(unreachable_patterns)]
        disabled => Err(Error::DisabledFormat(disabled)),
    }
}

/// Convert a mesh file from one format to another
///
/// Pruning is applied in between, lower dimensional cells and orphaned points
/// first and then the z coordinate of flat meshes.
///
/// ```rust, no_run
/// # use hmf::{convert, ConvertOptions};
/// let options = ConvertOptions::builder().prune_z_0(true).build();
/// convert("mesh.vtu", "mesh.tmf", &options).unwrap();
/// ```
pub fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<()> {
    let mut mesh = read(input.as_ref(), options.input_format)?;

    if options.prune {
        mesh.prune()?;
    }

    if options.prune_z_0 && mesh.prune_z_0(PRUNE_Z_TOLERANCE) {
        debug!("Dropped the z coordinate of a flat mesh");
    }

    write(output.as_ref(), &mesh, options.output_format)?;
    debug!(
        "Converted {} to {}",
        input.as_ref().display(),
        output.as_ref().display()
    );
    Ok(())
}

/// Summary of any mesh file, including its size on disk
pub fn info(path: impl AsRef<Path>, format: Option<FileFormat>) -> Result<MeshSummary> {
    let mesh = read(path.as_ref(), format)?;
    let bytes = std::fs::metadata(path)?.len();
    Ok(mesh.summary().with_file_size(bytes))
}
