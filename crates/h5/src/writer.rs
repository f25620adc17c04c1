//! Writing meshes to hmf files

// crate modules
use crate::datasets::{write_dataset, write_str_attr};
use crate::error::{Error, Result};
use crate::options::WriteOptions;
use crate::{FORMAT_TYPE, FORMAT_VERSION};

// standard library
use std::path::Path;

// hmf modules
use hmf_mesh::{AttributeType, Cells, Center, Mesh};
use hmf_utils::f;

// external crates
use hdf5::{File, Group};
use log::debug;
use ndarray::{arr1, Array2, ArrayD};

/// Write a [Mesh] to an hmf file, replacing any existing file
///
/// Fails before anything is written if the point or cell data lengths do not
/// match the points and cells.
///
/// ```rust, no_run
/// # use hmf_h5::{write, WriteOptions};
/// # use hmf_mesh::{CellType, Mesh};
/// # use ndarray::array;
/// let mesh = Mesh::new(
///     array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
///     [(CellType::Triangle, array![[0, 1, 2]])],
/// ).unwrap();
/// write("mesh.hmf", &mesh, &WriteOptions::default()).unwrap();
/// ```
pub fn write(path: impl AsRef<Path>, mesh: &Mesh, options: &WriteOptions) -> Result<()> {
    mesh.validate()?;
    let raw_cell_data = mesh.raw_cell_data()?;

    let file = File::create(path.as_ref())?;
    write_str_attr(&file, "type", FORMAT_TYPE)?;
    write_str_attr(&file, "version", FORMAT_VERSION)?;

    let grid = file.create_group("domain")?.create_group("grid")?;
    let writer = GridWriter {
        grid: &grid,
        options,
    };

    writer.geometry(&mesh.points)?;
    writer.topology(&mesh.cells)?;

    let attributes = mesh
        .point_data
        .iter()
        .map(|(name, values)| (name, values, Center::Node))
        .chain(
            raw_cell_data
                .iter()
                .map(|(name, values)| (name, values, Center::Cell)),
        );
    for (k, (name, values, center)) in attributes.enumerate() {
        writer.attribute(k, name, values, center)?;
    }

    if !mesh.field_data.is_empty() {
        writer.information(mesh)?;
    }

    debug!(
        "Wrote {} points and {} cells to {}",
        mesh.n_points(),
        mesh.n_cells(),
        path.as_ref().display()
    );
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

/// Writes the datasets of the `/domain/grid` group
struct GridWriter<'a> {
    grid: &'a Group,
    options: &'a WriteOptions,
}

impl GridWriter<'_> {
    fn geometry(&self, points: &Array2<f64>) -> Result<()> {
        let geometry_type = match points.ncols() {
            1 => "X",
            2 => "XY",
            3 => "XYZ",
            n => return Err(Error::UnsupportedGeometry(f!("{n} coordinates per point"))),
        };

        let dataset = write_dataset(
            self.grid,
            "Geometry",
            points.view(),
            self.options.compression,
        )?;
        write_str_attr(&dataset, "GeometryType", geometry_type)
    }

    fn topology(&self, cells: &Cells) -> Result<()> {
        for (k, (cell_type, block)) in cells.iter().enumerate() {
            let connectivity = block.mapv(|node| node as u64);
            let dataset = write_dataset(
                self.grid,
                &f!("Topology{k}"),
                connectivity.view(),
                self.options.compression,
            )?;
            write_str_attr(&dataset, "TopologyType", cell_type.xdmf_name())?;
        }
        Ok(())
    }

    fn attribute(&self, k: usize, name: &str, values: &ArrayD<f64>, center: Center) -> Result<()> {
        let attribute_type = AttributeType::classify(values.shape())?;
        let dataset = write_dataset(
            self.grid,
            &f!("Attribute{k}"),
            values.view(),
            self.options.compression,
        )?;
        write_str_attr(&dataset, "Name", name)?;
        write_str_attr(&dataset, "Center", center.xdmf_name())?;
        write_str_attr(&dataset, "AttributeType", attribute_type.xdmf_name())
    }

    fn information(&self, mesh: &Mesh) -> Result<()> {
        let information = self.grid.create_group("Information")?;
        for (tag, values) in &mesh.field_data {
            write_dataset(
                &information,
                tag,
                arr1(values).view(),
                self.options.compression,
            )?;
        }
        Ok(())
    }
}
