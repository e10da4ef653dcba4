use eigenlay::generators;
use eigenlay::{Error, Graph, Point};
use nalgebra::DMatrix;

fn graph_from(rows: &[&[u8]]) -> Graph {
    let rows: Vec<Vec<f64>> = rows
        .iter()
        .map(|r| r.iter().map(|&v| f64::from(v)).collect())
        .collect();
    Graph::from_rows(&rows).expect("square rows")
}

#[test]
fn add_vertex_builds_a_symmetric_matrix() {
    let mut g = Graph::new();
    g.add_vertex(&[], false);
    g.add_vertex(&[], false);
    g.add_vertex(&[0, 1], false);
    g.add_vertex(&[2], false);
    g.add_vertex(&[3], true);

    let expected = graph_from(&[
        &[0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0],
        &[1, 1, 0, 1, 0],
        &[0, 0, 1, 0, 1],
        &[0, 0, 0, 1, 1],
    ]);
    assert_eq!(g.size(), 5);
    assert_eq!(g.adjacency(), expected.adjacency());
    assert!(g.is_dirty());
}

#[test]
fn add_vertex_skips_only_out_of_bounds_connections() {
    let mut g = generators::path(3);
    let added = g.add_vertex(&[0, 3, 42, 2], false);

    assert_eq!(added.index, 3);
    assert_eq!(added.rejected, vec![3, 42]);
    assert_eq!(g.size(), 4);
    assert_eq!(g.connections(3).unwrap(), vec![1.0, 0.0, 1.0, 0.0]);
}

#[test]
fn add_then_remove_restores_the_matrix_exactly() {
    let mut g = generators::cube();
    let before = g.adjacency().clone();

    let added = g.add_vertex(&[0, 3, 5], true);
    g.remove_vertex(added.index).unwrap();

    assert_eq!(g.adjacency(), &before);
    assert_eq!(g.size(), 8);
}

#[test]
fn remove_vertex_renumbers_higher_indices() {
    // Edges: (0, 2), (1, 4), (3, 4), (2, 3)
    let mut g = graph_from(&[
        &[0, 0, 1, 0, 0],
        &[0, 0, 0, 0, 1],
        &[1, 0, 0, 1, 0],
        &[0, 0, 1, 0, 1],
        &[0, 1, 0, 1, 0],
    ]);
    g.remove_vertex(2).unwrap();

    // (0, 2) and (2, 3) go with vertex 2; (3, 4) -> (2, 3); (1, 4) straddles 2 -> (1, 3).
    assert_eq!(g.size(), 4);
    assert_eq!(g.edges(), vec![(1, 3), (2, 3)]);
}

#[test]
fn out_of_bounds_operations_are_reported_and_change_nothing() {
    let mut g = generators::path(3);
    g.coordinates().unwrap();
    let before = g.adjacency().clone();

    assert!(matches!(
        g.remove_vertex(3),
        Err(Error::OutOfBounds { index: 3, size: 3 })
    ));
    assert!(matches!(
        g.connections(5),
        Err(Error::OutOfBounds { index: 5, size: 3 })
    ));
    assert!(g.neighbors(3).is_err());
    assert!(g.set_edge(0, 3, 1.0).is_err());

    assert_eq!(g.adjacency(), &before);
    assert!(!g.is_dirty());
}

#[test]
fn from_adjacency_rejects_non_square_input() {
    let err = Graph::from_adjacency(DMatrix::zeros(2, 3)).unwrap_err();
    assert!(matches!(err, Error::NotSquare { rows: 2, cols: 3 }));

    let err = Graph::from_rows(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
    assert!(matches!(err, Error::NotSquare { rows: 2, cols: 1 }));
}

#[test]
fn self_loops_stay_out_of_neighbor_and_edge_lists() {
    let g = graph_from(&[&[1, 1, 0], &[1, 0, 1], &[0, 1, 1]]);
    assert_eq!(g.neighbors(0).unwrap(), vec![1]);
    assert_eq!(g.neighbors(1).unwrap(), vec![0, 2]);
    assert_eq!(g.edges(), vec![(0, 1), (1, 2)]);
    assert_eq!(g.degrees(), vec![2.0, 2.0, 2.0]);
}

#[test]
fn set_edge_is_symmetric_and_zero_removes() {
    let mut g = generators::path(3);
    g.set_edge(0, 2, 1.0).unwrap();
    assert_eq!(g.edges(), vec![(0, 1), (0, 2), (1, 2)]);
    g.set_edge(1, 0, 0.0).unwrap();
    assert_eq!(g.edges(), vec![(0, 2), (1, 2)]);
}

#[test]
fn coordinates_are_cached_until_a_mutation() {
    let mut g = generators::cube();
    assert!(g.is_dirty());

    let first = g.coordinates().unwrap().to_vec();
    assert!(!g.is_dirty());
    let ptr = g.coordinates().unwrap().as_ptr();
    let second = g.coordinates().unwrap();
    assert_eq!(second.as_ptr(), ptr);
    assert_eq!(second.len(), first.len());
    for (a, b) in first.iter().zip(second) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }

    g.add_vertex(&[0], false);
    assert!(g.is_dirty());
    assert_eq!(g.coordinates().unwrap().len(), 9);
    assert!(!g.is_dirty());
}

#[test]
fn empty_graph_has_no_coordinates() {
    let mut g = Graph::new();
    assert!(g.is_empty());
    assert_eq!(g.coordinates().unwrap(), &[] as &[Point]);
    assert!(!g.is_dirty());
}

#[test]
fn single_vertex_sits_at_the_origin() {
    let mut g = Graph::new();
    g.add_vertex(&[], true);
    assert_eq!(g.coordinates().unwrap(), &[Point::new(0.0, 0.0)]);
}

#[test]
fn invalid_pinned_axes_keep_the_graph_dirty() {
    let mut g = generators::path(3);
    g.set_layout_options(eigenlay::SpectralOptions {
        axes: eigenlay::AxisChoice::Pinned { x: 0, y: 3 },
        ..Default::default()
    });
    assert!(matches!(
        g.coordinates(),
        Err(Error::AxisOutOfRange { index: 3, size: 3 })
    ));
    assert!(g.is_dirty());
}
