//! Integration tests for reading and writing XDMF descriptors

use hmf_mesh::{CellType, Mesh};
use hmf_xdmf::{read, write, DataFormat, Error, XdmfWriter};
use ndarray::{array, Array2};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Triangles and a quad in the plane, so the topology is mixed
#[fixture]
fn mesh() -> Mesh {
    Mesh::new(
        array![
            [0.0, 0.0],
            [1.0, 0.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [2.0, 0.0],
            [2.0, 1.0]
        ],
        [
            (CellType::Triangle, array![[0, 1, 2], [1, 3, 2]]),
            (CellType::Quad, array![[1, 4, 5, 3]]),
        ],
    )
    .unwrap()
    .with_point_data("temperature", array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0].into_dyn())
    .with_point_data("displacement", Array2::<f64>::from_elem((6, 2), 0.25).into_dyn())
    .with_cell_data(CellType::Triangle, "material", array![1.0, 2.0].into_dyn())
    .with_cell_data(CellType::Quad, "material", array![3.0].into_dyn())
    .with_field_data("boundary", vec![1, 1])
    .with_field_data("surface", vec![2, 2])
}

#[rstest]
#[case(DataFormat::Hdf)]
#[case(DataFormat::Xml)]
fn round_trip(dir: TempDir, mesh: Mesh, #[case] data_format: DataFormat) {
    let path = dir.path().join("mesh.xdmf");
    let writer = XdmfWriter::builder().data_format(data_format).build();

    write(&path, &mesh, &writer).unwrap();
    assert_eq!(read(&path).unwrap(), mesh);
    assert_eq!(dir.path().join("mesh.h5").exists(), data_format == DataFormat::Hdf);
}

#[rstest]
fn single_block_round_trip(dir: TempDir) {
    let mesh = Mesh::new(
        array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        [(CellType::Tetra, array![[0, 1, 2, 3]])],
    )
    .unwrap()
    .with_cell_data(CellType::Tetra, "volume", array![1.0 / 6.0].into_dyn());

    let path = dir.path().join("tetra.xdmf");
    write(&path, &mesh, &XdmfWriter::default()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("TopologyType=\"Tetrahedron\""));
    assert!(!text.contains("Mixed"));
    assert_eq!(read(&path).unwrap(), mesh);
}

#[rstest]
fn custom_heavy_data_name(dir: TempDir, mesh: Mesh) {
    let path = dir.path().join("mesh.xdmf");
    let writer = XdmfWriter::builder()
        .h5_name("heavy.h5")
        .gzip(9)
        .unwrap()
        .build();

    write(&path, &mesh, &writer).unwrap();
    assert!(dir.path().join("heavy.h5").exists());
    assert!(std::fs::read_to_string(&path).unwrap().contains("heavy.h5:/data0"));
    assert_eq!(read(&path).unwrap(), mesh);
}

#[rstest]
fn interleaved_mixed_topology(dir: TempDir) {
    // triangle, quad, triangle with one material value per cell in file order
    let xdmf = r#"<?xml version="1.0"?>
<Xdmf Version="3.0">
  <Domain>
    <Grid Name="Grid">
      <Geometry GeometryType="X_Y_Z">
        <DataItem Dimensions="5" Format="XML">0 1 0 1 2</DataItem>
        <DataItem Dimensions="5" Format="XML">0 0 1 1 0</DataItem>
        <DataItem Dimensions="5" Format="XML">0 0 0 0 0</DataItem>
      </Geometry>
      <Topology TopologyType="Mixed" NumberOfElements="3">
        <DataItem Dimensions="13" DataType="UInt" Format="XML">4 0 1 2 5 0 1 3 2 4 1 4 3</DataItem>
      </Topology>
      <Attribute Name="material" Center="Cell">
        <DataItem Dimensions="3" Format="XML">10 20 30</DataItem>
      </Attribute>
      <Time Value="0.0"/>
    </Grid>
  </Domain>
</Xdmf>"#;
    let path = dir.path().join("mixed.xdmf");
    std::fs::write(&path, xdmf).unwrap();

    let mesh = read(&path).unwrap();
    assert_eq!(mesh.points.ncols(), 3);
    assert_eq!(mesh.cells[&CellType::Triangle], array![[0, 1, 2], [1, 4, 3]]);
    assert_eq!(mesh.cells[&CellType::Quad], array![[0, 1, 3, 2]]);
    assert_eq!(
        mesh.cell_data[&CellType::Triangle]["material"],
        array![10.0, 30.0].into_dyn()
    );
    assert_eq!(
        mesh.cell_data[&CellType::Quad]["material"],
        array![20.0].into_dyn()
    );
}

#[rstest]
fn topology_alias(dir: TempDir) {
    let xdmf = r#"<Xdmf Version="3.0"><Domain><Grid>
      <Geometry GeometryType="XY">
        <DataItem Dimensions="6 2" Format="XML">0 0 2 0 0 2 1 0 1 1 0 1</DataItem>
      </Geometry>
      <Topology TopologyType="Tri_6" NumberOfElements="1">
        <DataItem Dimensions="1 6" Format="XML">0 1 2 3 4 5</DataItem>
      </Topology>
    </Grid></Domain></Xdmf>"#;
    let path = dir.path().join("alias.xdmf");
    std::fs::write(&path, xdmf).unwrap();

    let mesh = read(&path).unwrap();
    assert_eq!(mesh.cells[&CellType::Triangle6], array![[0, 1, 2, 3, 4, 5]]);
}

#[rstest]
fn line_geometry_is_rejected(dir: TempDir) {
    let mesh = Mesh::new(array![[0.0], [1.0]], [(CellType::Line, array![[0, 1]])]).unwrap();
    let path = dir.path().join("line.xdmf");

    assert!(matches!(
        write(&path, &mesh, &XdmfWriter::default()),
        Err(Error::UnsupportedGeometry(_))
    ));
    assert!(!path.exists());
    assert!(!dir.path().join("line.h5").exists());
}

#[rstest]
#[case::collection(
    r#"<Xdmf><Domain><Grid GridType="Collection" CollectionType="Temporal"/></Domain></Xdmf>"#
)]
#[case::two_grids(r#"<Xdmf><Domain><Grid/><Grid/></Domain></Xdmf>"#)]
fn unsupported_layouts(dir: TempDir, #[case] xdmf: &str) {
    let path = dir.path().join("layout.xdmf");
    std::fs::write(&path, xdmf).unwrap();
    assert!(matches!(read(&path), Err(Error::UnsupportedLayout(_))));
}

#[rstest]
fn binary_data_is_unsupported(dir: TempDir) {
    let xdmf = r#"<Xdmf><Domain><Grid>
      <Geometry GeometryType="XY">
        <DataItem Dimensions="1 2" Format="Binary">points.bin</DataItem>
      </Geometry>
    </Grid></Domain></Xdmf>"#;
    let path = dir.path().join("binary.xdmf");
    std::fs::write(&path, xdmf).unwrap();
    assert!(matches!(read(&path), Err(Error::UnsupportedDataFormat(_))));
}

#[rstest]
fn empty_block_next_to_others(dir: TempDir) {
    let mesh = Mesh::new(
        array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        [
            (CellType::Triangle, array![[0, 1, 2]]),
            (CellType::Quad, Array2::zeros((0, 4))),
        ],
    )
    .unwrap()
    .with_cell_data(CellType::Triangle, "material", array![1.0].into_dyn())
    .with_cell_data(CellType::Quad, "material", ndarray::Array1::<f64>::zeros(0).into_dyn());

    let path = dir.path().join("empty.xdmf");
    write(&path, &mesh, &XdmfWriter::default()).unwrap();
    let read_back = read(&path).unwrap();

    assert_eq!(read_back.cell_blocks(), vec![(CellType::Triangle, 1)]);
    assert!(!read_back.cell_data.contains_key(&CellType::Quad));
    assert_eq!(
        read_back.cell_data[&CellType::Triangle]["material"],
        array![1.0].into_dyn()
    );
}

#[rstest]
fn inline_non_finite_point_data(dir: TempDir, mesh: Mesh) {
    let values = array![1.0, f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 0.0, -0.5];
    let mesh = mesh.with_point_data("limits", values.into_dyn());
    let path = dir.path().join("limits.xdmf");
    let writer = XdmfWriter::builder().data_format(DataFormat::Xml).build();

    write(&path, &mesh, &writer).unwrap();
    let limits = read(&path).unwrap().point_data["limits"].clone();

    assert_eq!(limits[[1]], f64::INFINITY);
    assert_eq!(limits[[2]], f64::NEG_INFINITY);
    assert!(limits[[3]].is_nan());
    assert_eq!(limits[[5]], -0.5);
}
