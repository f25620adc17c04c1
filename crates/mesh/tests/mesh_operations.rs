//! Integration tests for mesh checks, clean up and vtk exchange

use hmf_mesh::vtk::{read_vtk, write_vtk, MeshToVtk, VtkFormat};
use hmf_mesh::{cell_data_from_raw, CellType, Consistency, Mesh};
use ndarray::array;
use rstest::{fixture, rstest};

/// Unit square split into two triangles, with a boundary edge
#[fixture]
fn square() -> Mesh {
    Mesh::new(
        array![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0]
        ],
        [
            (CellType::Triangle, array![[0, 1, 2], [0, 2, 3]]),
            (CellType::Line, array![[0, 1]]),
        ],
    )
    .unwrap()
    .with_point_data("u", array![0.0, 1.0, 2.0, 3.0].into_dyn())
    .with_cell_data(CellType::Triangle, "c", array![10.0, 20.0].into_dyn())
    .with_cell_data(CellType::Line, "c", array![30.0].into_dyn())
    .with_field_data("boundary", vec![1, 1])
}

#[rstest]
fn raw_cell_data_round_trip(square: Mesh) {
    let raw = square.raw_cell_data().unwrap();
    assert_eq!(raw["c"], array![30.0, 10.0, 20.0].into_dyn());

    let split = cell_data_from_raw(&square.cell_blocks(), &raw).unwrap();
    assert_eq!(split, square.cell_data);
}

#[rstest]
#[case(vec![[0, 1, 4]], Consistency::OutOfRange)]
#[case(vec![[0, 1, 2]], Consistency::OrphanedPoints(1))]
#[case(vec![[0, 1, 2], [0, 2, 3]], Consistency::Consistent)]
fn consistency_verdicts(#[case] triangles: Vec<[usize; 3]>, #[case] expected: Consistency) {
    let cells = ndarray::Array2::from(triangles);
    let mesh = Mesh::new(
        array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        [(CellType::Triangle, cells)],
    ).unwrap();
    assert_eq!(mesh.consistency(), expected);
}

#[rstest]
fn convert_time_clean_up(mut square: Mesh) {
    assert!(square.prune_z_0(1e-13));
    square.prune().unwrap();

    assert_eq!(square.dim(), 2);
    assert_eq!(square.cell_blocks(), vec![(CellType::Triangle, 2)]);
    assert_eq!(square.n_points(), 4);
    assert_eq!(square.field_data["boundary"], vec![1, 1]);
}

#[rstest]
fn summary_report(square: Mesh) {
    let text = square.summary().to_string();
    assert!(text.contains("Number of points: 4"));
    assert!(text.contains("  line: 1\n  triangle: 2"));
    assert!(text.contains("Point data: u"));
    assert!(text.contains("Cell data: c"));
    assert!(!text.contains("ATTENTION"));
}

#[rstest]
#[case(VtkFormat::Xml, "mesh.vtu")]
#[case(VtkFormat::LegacyAscii, "mesh.vtk")]
#[case(VtkFormat::LegacyBinary, "mesh.vtk")]
fn vtk_files_round_trip(square: Mesh, #[case] format: VtkFormat, #[case] expected: &str) {
    let dir = tempfile::tempdir().unwrap();
    let vtk = MeshToVtk::new().convert(&square).unwrap();
    write_vtk(vtk, dir.path().join("mesh.out"), format).unwrap();

    let mesh = read_vtk(dir.path().join(expected)).unwrap();
    assert_eq!(mesh.points, square.points);
    assert_eq!(mesh.cells, square.cells);
    assert_eq!(mesh.cell_data, square.cell_data);
}
