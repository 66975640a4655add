use super::tetrahedron_dirs;
use epa3d::math::{Isometry, Point, Real, Vector};
use epa3d::query::epa::{EpaOptions, Termination, EPA};
use epa3d::query::gjk::{CSOPoint, GjkSimplex, Positioned};
use epa3d::shape::Cuboid;

#[test]
#[allow(non_snake_case)]
fn cuboid_cuboid_EPA() {
    let c = Cuboid::new(Vector::new(2.0, 1.0, 1.0));
    let mut epa = EPA::new();

    let moved = Positioned::new(Isometry::translation(3.5, 0.0, 0.0), &c);
    let simplex = GjkSimplex::from_support_directions(&c, &moved, &tetrahedron_dirs());
    let res = epa.evaluate(&c, &moved, &simplex);
    assert!(res.is_valid());
    assert_relative_eq!(res.signed_distance, -0.5, epsilon = 1.0e-6);
    assert_relative_eq!(res.point_on_a.x, 2.0, epsilon = 1.0e-6);
    assert_relative_eq!(res.point_on_b.x, 1.5, epsilon = 1.0e-6);

    let moved = Positioned::new(Isometry::translation(0.0, 0.2, 0.0), &c);
    let simplex = GjkSimplex::from_support_directions(&c, &moved, &tetrahedron_dirs());
    let res = epa.evaluate(&c, &moved, &simplex);
    assert!(res.is_valid());
    assert_relative_eq!(res.signed_distance, -1.8, epsilon = 1.0e-6);
}

#[test]
fn rotated_cube_keeps_face_depth() {
    let cube = Cuboid::new(Vector::repeat(0.5));
    let pos = Isometry::new(
        Vector::new(0.75, 0.0, 0.0),
        Vector::x() * (30.0 as Real).to_radians(),
    );
    let moved = Positioned::new(pos, &cube);
    let simplex = GjkSimplex::from_support_directions(&cube, &moved, &tetrahedron_dirs());

    let res = EPA::new().evaluate(&cube, &moved, &simplex);
    assert!(res.is_valid());
    assert_relative_eq!(res.depth(), 0.25, epsilon = 1.0e-6);
    assert_relative_eq!(
        (res.point_on_a - res.point_on_b).norm(),
        0.25,
        epsilon = 1.0e-6
    );
}

#[test]
fn evaluation_is_idempotent() {
    let a = Cuboid::new(Vector::new(1.0, 0.7, 1.3));
    let b = Cuboid::new(Vector::new(0.6, 1.1, 0.9));
    let moved = Positioned::new(Isometry::translation(0.2, -0.3, 0.1), &b);
    let simplex = GjkSimplex::from_support_directions(&a, &moved, &tetrahedron_dirs());

    let mut epa = EPA::new();
    let first = epa.evaluate(&a, &moved, &simplex);
    let second = epa.evaluate(&a, &moved, &simplex);
    let fresh = EPA::new().evaluate(&a, &moved, &simplex);

    for res in [second, fresh] {
        assert_eq!(res.signed_distance, first.signed_distance);
        assert_eq!(res.point_on_a, first.point_on_a);
        assert_eq!(res.point_on_b, first.point_on_b);
        assert_eq!(res.iterations, first.iterations);
        assert_eq!(res.termination, first.termination);
    }
}

#[test]
fn single_iteration_budget() {
    let cube = Cuboid::new(Vector::repeat(0.5));
    let moved = Positioned::new(Isometry::translation(0.75, 0.0, 0.0), &cube);
    let simplex = GjkSimplex::from_support_directions(&cube, &moved, &tetrahedron_dirs());

    let mut epa = EPA::with_options(EpaOptions {
        max_iterations: 1,
        ..EpaOptions::default()
    });
    let res = epa.evaluate(&cube, &moved, &simplex);

    assert_eq!(res.iterations, 1);
    assert!(res.is_valid());
    assert!(epa.closest_face().is_some());
    // The first face popped is a lower bound of the depth.
    assert!(res.depth() > 0.0 && res.depth() <= 0.25 + 1.0e-9);
}

#[test]
fn origin_on_simplex_face() {
    let cube = Cuboid::new(Vector::repeat(0.5));
    let moved = Positioned::new(Isometry::translation(0.75, 0.0, 0.0), &cube);

    // The first three points span a triangle whose interior contains the origin.
    let simplex = GjkSimplex::from_points(&[
        CSOPoint::new(Point::new(0.5, 0.5, 0.5), Point::new(0.25, -0.5, -0.5)),
        CSOPoint::new(Point::new(0.5, -0.5, -0.5), Point::new(0.25, 0.5, 0.5)),
        CSOPoint::new(Point::new(-0.5, 0.0, 0.0), Point::new(1.25, 0.0, 0.0)),
        CSOPoint::new(Point::new(-0.5, 0.5, -0.5), Point::new(0.25, -0.5, 0.5)),
    ]);

    let res = EPA::new().evaluate(&cube, &moved, &simplex);
    assert!(res.is_valid());
    assert_eq!(res.termination, Termination::AccuracyReached);
    assert_relative_eq!(res.depth(), 0.25, epsilon = 1.0e-6);
    assert_relative_eq!(res.point_on_a, Point::new(0.5, 0.0, 0.0), epsilon = 1.0e-6);
    assert_relative_eq!(res.point_on_b, Point::new(0.25, 0.0, 0.0), epsilon = 1.0e-6);
}
