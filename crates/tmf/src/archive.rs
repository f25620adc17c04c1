//! Bundling XDMF descriptors and heavy data into tar archives

// crate modules
use crate::error::{Error, Result};
use crate::options::WriteOptions;

// standard library
use std::fs::File;
use std::path::{Path, PathBuf};

// hmf modules
use hmf_mesh::{Cells, Mesh};
use hmf_utils::{f, PathExt};
use hmf_xdmf::{DataFormat, XdmfWriter};

// external crates
use log::debug;
use ndarray::Array2;

/// Write a [Mesh] to a tmf archive, replacing any existing file
///
/// The archive holds `<stem>.xdmf` and `<stem>.h5` at its root, where the stem
/// is taken from `path`.
///
/// ```rust, no_run
/// # use hmf_tmf::{write, WriteOptions};
/// # use hmf_mesh::{CellType, Mesh};
/// # use ndarray::array;
/// let mesh = Mesh::new(
///     array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
///     [(CellType::Triangle, array![[0, 1, 2]])],
/// ).unwrap();
/// write("mesh.tmf", &mesh, &WriteOptions::default()).unwrap();
/// ```
pub fn write(path: impl AsRef<Path>, mesh: &Mesh, options: &WriteOptions) -> Result<()> {
    let path = path.as_ref();
    let stem = path.stem_or("mesh");

    let staging = tempfile::tempdir()?;
    let writer = XdmfWriter::builder()
        .data_format(DataFormat::Hdf)
        .compression(options.compression)
        .build();
    hmf_xdmf::write(staging.path().join(f!("{stem}.xdmf")), mesh, &writer)?;

    let files = sorted_files(staging.path())?;
    let mut archive = tar::Builder::new(File::create(path)?);
    for file in &files {
        if let Some(name) = file.file_name() {
            archive.append_path_with_name(file, name)?;
        }
    }
    archive.finish()?;

    debug!("Wrote {} files to {}", files.len(), path.display());
    Ok(())
}

/// Write a mesh made of only points and cells
pub fn write_points_cells(
    path: impl AsRef<Path>,
    points: Array2<f64>,
    cells: Cells,
    options: &WriteOptions,
) -> Result<()> {
    let mesh = Mesh {
        points,
        cells,
        ..Default::default()
    };
    write(path, &mesh, options)
}

/// Read a [Mesh] from a tmf archive
///
/// The archive is extracted to a temporary directory and the first `.xdmf`
/// or `.xmf` file at its root, by name, is read.
///
/// ```rust, no_run
/// # use hmf_tmf::read;
/// let mesh = read("mesh.tmf").unwrap();
/// println!("{}", mesh.summary());
/// ```
pub fn read(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let staging = tempfile::tempdir()?;
    tar::Archive::new(File::open(path)?).unpack(staging.path())?;

    let descriptor = sorted_files(staging.path())?
        .into_iter()
        .find(|file| is_descriptor(file))
        .ok_or_else(|| Error::MissingDescriptor(path.display().to_string()))?;

    debug!("Reading {} from {}", descriptor.display(), path.display());
    Ok(hmf_xdmf::read(descriptor)?)
}

/// Regular files directly inside `dir`, sorted by name
fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn is_descriptor(path: &Path) -> bool {
    path.has_extension(&["xdmf", "xmf"])
}
