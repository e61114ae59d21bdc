//! Geometric and algebraic properties of the frame pipeline.

use approx::assert_relative_eq;
use tesseract_core::{
    generate_edges, generate_vertices, identity_matrix, multiply_matrices,
    multiply_matrix_vector, project_4d_to_3d, render, rotate_vertices, Edge, Matrix4,
    ProjectedPoint, RenderStyle, RotationAngles, RotationPlane, Vertex4,
};

/// Deterministic spread of angle sets across all six planes
fn angle_sets() -> Vec<RotationAngles> {
    (1..=12)
        .map(|i| {
            let t = i as f64;
            RotationAngles {
                xy: (t * 0.37).sin() * 3.0,
                xz: (t * 0.91).cos() * 2.0,
                xw: t * 0.53,
                yz: -(t * 0.29),
                yw: (t * 1.7).sin(),
                zw: (t * 0.11).cos() * 6.0,
            }
        })
        .collect()
}

#[test]
fn test_counts_hold_for_any_scale() {
    for scale in [0.0, 0.25, 1.0, 3.5, -2.0, 1e6] {
        assert_eq!(generate_vertices(scale).len(), 16);
    }
    assert_eq!(generate_edges().len(), 32);
}

#[test]
fn test_every_vertex_has_degree_four() {
    let edges = generate_edges();
    for i in 0..16 {
        let degree = edges.iter().filter(|e| e.contains(i)).count();
        assert_eq!(degree, 4, "vertex {} has degree {}", i, degree);
    }
}

#[test]
fn test_edge_endpoints_differ_in_one_bit() {
    for edge in generate_edges() {
        let x = edge.a ^ edge.b;
        assert_ne!(x, 0);
        assert_eq!(x & (x - 1), 0, "edge {:?} is not axis-aligned", edge);
    }
}

#[test]
fn test_vertex_bits_map_to_coordinate_signs() {
    let vertices = generate_vertices(2.0);
    assert_eq!(vertices[0], Vertex4::new(-2.0, -2.0, -2.0, -2.0));
    assert_eq!(vertices[15], Vertex4::new(2.0, 2.0, 2.0, 2.0));
    // bit 0 → x, bit 3 → w
    assert_eq!(vertices[1], Vertex4::new(2.0, -2.0, -2.0, -2.0));
    assert_eq!(vertices[8], Vertex4::new(-2.0, -2.0, -2.0, 2.0));
}

#[test]
fn test_rotation_preserves_norm() {
    let vertices = generate_vertices(1.0);
    for angles in angle_sets() {
        let rotated = rotate_vertices(&angles.to_matrix(), &vertices);
        for (before, after) in vertices.iter().zip(&rotated) {
            assert_relative_eq!(before.norm(), after.norm(), epsilon = 1e-12);
        }
    }
}

#[test]
fn test_rotation_matrices_are_orthogonal_with_unit_determinant() {
    for angles in angle_sets() {
        let m = angles.to_matrix();
        assert!(m.is_orthogonal(1e-12));
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_zero_angles_compose_to_identity() {
    let m = RotationAngles::zero().to_matrix();
    assert_eq!(m, identity_matrix());

    let explicit = RotationPlane::ALL
        .iter()
        .map(|&plane| Matrix4::rotation(plane, 0.0))
        .fold(identity_matrix(), |acc, r| multiply_matrices(&acc, &r));
    assert!(explicit.approx_eq(&identity_matrix(), 0.0));

    for v in generate_vertices(1.7) {
        assert_eq!(multiply_matrix_vector(&m, &v), v);
    }
}

#[test]
fn test_multiplication_is_associative() {
    let sets = angle_sets();
    for window in sets.windows(3) {
        let a = window[0].to_matrix();
        let b = window[1].to_matrix();
        let c = window[2].to_matrix();
        let left = multiply_matrices(&multiply_matrices(&a, &b), &c);
        let right = multiply_matrices(&a, &multiply_matrices(&b, &c));
        assert!(left.approx_eq(&right, 1e-12));
    }
}

#[test]
fn test_composition_order_matters() {
    let xy = Matrix4::rotation(RotationPlane::XY, 0.8);
    let yw = Matrix4::rotation(RotationPlane::YW, 1.1);
    assert!(!(xy * yw).approx_eq(&(yw * xy), 1e-6));

    let angles = RotationAngles::zero()
        .with(RotationPlane::XY, 0.8)
        .with(RotationPlane::YW, 1.1);
    assert!(angles.to_matrix().approx_eq(&(xy * yw), 1e-15));
}

#[test]
fn test_projection_scale_grows_toward_camera() {
    let distance = 2.5;
    let mut previous = f64::NEG_INFINITY;
    let mut w = -3.0;
    while w < distance - 0.01 {
        let scale = project_4d_to_3d(&Vertex4::new(1.0, 1.0, 1.0, w), distance).scale;
        assert!(scale > previous, "scale did not grow at w = {}", w);
        previous = scale;
        w += 0.05;
    }
}

#[test]
fn test_equal_depth_edges_keep_input_order() {
    let point = |x: f64, depth: f64| ProjectedPoint {
        x,
        y: 0.0,
        depth,
        scale: 1.0,
    };
    // Edges (0,1), (2,3) and (4,5) all average to depth 0; (0,3) is farther
    let points = [
        point(0.0, -1.0),
        point(1.0, 1.0),
        point(2.0, 0.5),
        point(3.0, -0.5),
        point(4.0, -0.0),
        point(5.0, 0.0),
    ];
    let edges = [
        Edge::new(0, 3),
        Edge::new(4, 5),
        Edge::new(2, 3),
        Edge::new(0, 1),
    ];
    let list = render(&points, &edges, &RenderStyle::default());
    let order: Vec<Edge> = list.lines.iter().map(|l| l.edge).collect();
    assert_eq!(
        order,
        vec![Edge::new(0, 3), Edge::new(4, 5), Edge::new(2, 3), Edge::new(0, 1)]
    );

    // Reversing the input reverses the tie order
    let reversed: Vec<Edge> = edges.iter().rev().copied().collect();
    let list = render(&points, &reversed, &RenderStyle::default());
    let order: Vec<Edge> = list.lines.iter().map(|l| l.edge).collect();
    assert_eq!(
        order,
        vec![Edge::new(0, 3), Edge::new(0, 1), Edge::new(2, 3), Edge::new(4, 5)]
    );
}
