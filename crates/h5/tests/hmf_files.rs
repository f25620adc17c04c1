//! Integration tests for reading and writing hmf files

use hmf_h5::datasets::{write_dataset, write_str_attr};
use hmf_h5::{compress, read, summarise, uncompress, write, Compression, Error, WriteOptions};
use hmf_mesh::{CellType, Consistency, Mesh};
use hdf5::filters::Filter;
use ndarray::{array, Array2};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Tetrahedra with boundary triangles and every kind of data
#[fixture]
fn mesh() -> Mesh {
    Mesh::new(
        array![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0]
        ],
        [
            (CellType::Tetra, array![[0, 1, 2, 3], [1, 2, 3, 4]]),
            (CellType::Triangle, array![[0, 1, 2]]),
        ],
    )
    .unwrap()
    .with_point_data("temperature", array![1.0, 2.0, 3.0, 4.0, 5.0].into_dyn())
    .with_point_data("velocity", Array2::<f64>::ones((5, 3)).into_dyn())
    .with_cell_data(CellType::Tetra, "material", array![1.0, 2.0].into_dyn())
    .with_cell_data(CellType::Triangle, "material", array![3.0].into_dyn())
    .with_field_data("inlet", vec![1, 2])
    .with_field_data("volume", vec![2, 3])
}

#[rstest]
#[case(Compression::None)]
#[case(Compression::Gzip(0))]
#[case(Compression::Gzip(9))]
fn round_trip(dir: TempDir, mesh: Mesh, #[case] compression: Compression) {
    let path = dir.path().join("mesh.hmf");
    let options = WriteOptions::builder().compression(compression).build();

    write(&path, &mesh, &options).unwrap();
    assert_eq!(read(&path).unwrap(), mesh);
}

#[rstest]
fn layout_on_disk(dir: TempDir, mesh: Mesh) {
    let path = dir.path().join("mesh.hmf");
    write(&path, &mesh, &WriteOptions::default()).unwrap();

    let file = hdf5::File::open(&path).unwrap();
    let grid = file.group("domain/grid").unwrap();
    let mut members = grid.member_names().unwrap();
    members.sort();
    assert_eq!(
        members,
        vec![
            "Attribute0",
            "Attribute1",
            "Attribute2",
            "Geometry",
            "Information",
            "Topology0",
            "Topology1"
        ]
    );

    // triangle before tetra in cell type order
    let topology = grid.dataset("Topology0").unwrap();
    assert_eq!(
        hmf_h5::datasets::read_str_attr(&topology, "TopologyType").unwrap(),
        "Triangle"
    );

    let attribute = grid.dataset("Attribute2").unwrap();
    assert_eq!(
        hmf_h5::datasets::read_str_attr(&attribute, "Center").unwrap(),
        "Cell"
    );
    let raw = attribute.read_raw::<f64>().unwrap();
    assert_eq!(raw, vec![3.0, 1.0, 2.0]);
}

#[rstest]
fn many_topologies_keep_order(dir: TempDir) {
    // one cell of every type, so there are more than ten topology datasets
    let points = Array2::<f64>::zeros((20, 3));
    let blocks = CellType::ALL.map(|cell_type| {
        let nodes = cell_type.nodes_per_cell();
        (cell_type, Array2::from_shape_fn((1, nodes), |(_, j)| j))
    });
    let mut mesh = Mesh::new(points, blocks).unwrap();
    for (i, cell_type) in CellType::ALL.into_iter().enumerate() {
        mesh = mesh.with_cell_data(cell_type, "id", array![i as f64].into_dyn());
    }

    let path = dir.path().join("mesh.hmf");
    write(&path, &mesh, &WriteOptions::default()).unwrap();
    let read_back = read(&path).unwrap();

    assert_eq!(read_back.cell_blocks(), mesh.cell_blocks());
    assert_eq!(read_back.cell_data, mesh.cell_data);
}

/// Filters of the geometry, first topology and first attribute datasets
fn grid_filters(path: &std::path::Path) -> Vec<Vec<Filter>> {
    let file = hdf5::File::open(path).unwrap();
    let grid = file.group("domain/grid").unwrap();
    ["Geometry", "Topology0", "Attribute0"]
        .iter()
        .map(|name| grid.dataset(name).unwrap().filters())
        .collect()
}

#[rstest]
fn compress_in_place(dir: TempDir, mesh: Mesh) {
    let path = dir.path().join("mesh.hmf");
    write(&path, &mesh, &WriteOptions::default()).unwrap();

    compress(&path, 9).unwrap();
    assert_eq!(read(&path).unwrap(), mesh);
    for filters in grid_filters(&path) {
        assert!(filters.contains(&Filter::Deflate(9)));
    }

    uncompress(&path).unwrap();
    assert_eq!(read(&path).unwrap(), mesh);
    for filters in grid_filters(&path) {
        assert!(filters.is_empty());
    }

    assert!(matches!(
        compress(&path, 10),
        Err(Error::InvalidCompressionLevel(10))
    ));
}

#[rstest]
fn summary_of_file(dir: TempDir, mesh: Mesh) {
    let path = dir.path().join("mesh.hmf");
    write(&path, &mesh, &WriteOptions::default()).unwrap();

    let summary = summarise(&path).unwrap();
    assert!(summary.file_size_mb.unwrap() > 0.0);
    assert_eq!(summary.n_points, 5);
    assert_eq!(summary.cell_data, vec!["material".to_string()]);
    assert_eq!(summary.consistency, Consistency::Consistent);
}

#[rstest]
fn line_geometry(dir: TempDir) {
    let mesh = Mesh::new(
        array![[0.0], [0.5], [1.0]],
        [(CellType::Line, array![[0, 1], [1, 2]])],
    ).unwrap();
    let path = dir.path().join("line.hmf");
    write(&path, &mesh, &WriteOptions::default()).unwrap();
    assert_eq!(read(&path).unwrap(), mesh);
}

#[rstest]
fn lower_case_attribute_metadata(dir: TempDir) {
    let path = dir.path().join("legacy.hmf");
    {
        let file = hdf5::File::create(&path).unwrap();
        write_str_attr(&file, "type", "hmf").unwrap();
        write_str_attr(&file, "version", "0.1").unwrap();
        let grid = file.create_group("domain").unwrap().create_group("grid").unwrap();

        let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let geometry = write_dataset(&grid, "Geometry", points.view(), Compression::None).unwrap();
        write_str_attr(&geometry, "GeometryType", "XY").unwrap();

        let cells = array![[0_u64, 1, 2]];
        let topology = write_dataset(&grid, "Topology0", cells.view(), Compression::None).unwrap();
        write_str_attr(&topology, "TopologyType", "Triangle").unwrap();

        let values = array![7.0, 8.0, 9.0];
        let attribute = write_dataset(&grid, "Attribute", values.view(), Compression::None).unwrap();
        write_str_attr(&attribute, "name", "u").unwrap();
        write_str_attr(&attribute, "center", "Node").unwrap();
    }

    let mesh = read(&path).unwrap();
    assert_eq!(mesh.point_data["u"], array![7.0, 8.0, 9.0].into_dyn());
    assert_eq!(mesh.cells[&CellType::Triangle], array![[0, 1, 2]]);
}

#[rstest]
#[case("other", "0.1")]
#[case("hmf", "0.2")]
fn header_is_checked(dir: TempDir, #[case] file_type: &str, #[case] version: &str) {
    let path = dir.path().join("bad.hmf");
    {
        let file = hdf5::File::create(&path).unwrap();
        write_str_attr(&file, "type", file_type).unwrap();
        write_str_attr(&file, "version", version).unwrap();
    }

    match read(&path) {
        Err(Error::NotHmf(found)) => assert_eq!(found, file_type),
        Err(Error::UnsupportedVersion(found)) => assert_eq!(found, version),
        other => panic!("unexpected result {other:?}"),
    }
}

#[rstest]
fn second_grid_is_rejected(dir: TempDir) {
    let path = dir.path().join("grids.hmf");
    {
        let file = hdf5::File::create(&path).unwrap();
        write_str_attr(&file, "type", "hmf").unwrap();
        write_str_attr(&file, "version", "0.1").unwrap();
        let domain = file.create_group("domain").unwrap();
        domain.create_group("grid").unwrap();
        domain.create_group("grid2").unwrap();
    }

    assert!(matches!(read(&path), Err(Error::UnsupportedLayout(_))));
}

#[rstest]
fn invalid_cell_data_is_not_written(dir: TempDir, mesh: Mesh) {
    let mesh = mesh.with_cell_data(CellType::Tetra, "partial", array![1.0, 2.0].into_dyn());
    let path = dir.path().join("mesh.hmf");

    assert!(matches!(
        write(&path, &mesh, &WriteOptions::default()),
        Err(Error::MeshError(_))
    ));
    assert!(!path.exists());
}
