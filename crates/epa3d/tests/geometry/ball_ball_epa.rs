use super::tetrahedron_dirs;
use epa3d::math::{Isometry, Point, Vector};
use epa3d::query::epa::{EpaOptions, Termination, EPA};
use epa3d::query::gjk::{CSOPoint, DilatedShape, GjkSimplex, Positioned};
use epa3d::shape::{Ball, Cuboid};

#[test]
fn ball_ball_depth() {
    let ball = Ball::new(1.0);
    let moved = Positioned::new(Isometry::translation(1.0, 0.0, 0.0), &ball);
    let simplex = GjkSimplex::from_support_directions(&ball, &moved, &tetrahedron_dirs());

    let mut epa = EPA::with_options(EpaOptions {
        epsilon: 1.0e-6,
        ..EpaOptions::default()
    });
    let res = epa.evaluate(&ball, &moved, &simplex);

    assert!(res.is_valid());
    assert_relative_eq!(res.depth(), 1.0, epsilon = 1.0e-3);
    assert_relative_eq!(res.point_on_a, Point::new(1.0, 0.0, 0.0), epsilon = 1.0e-2);
    assert_relative_eq!(res.point_on_b, Point::origin(), epsilon = 1.0e-2);
}

#[test]
fn dilated_cube_depth() {
    let cube = Cuboid::new(Vector::repeat(0.5));
    let rounded = DilatedShape {
        shape: &cube,
        radius: 0.1,
    };
    let moved = Positioned::new(Isometry::translation(0.0, 0.0, 1.0), &rounded);
    let simplex = GjkSimplex::from_support_directions(&rounded, &moved, &tetrahedron_dirs());

    let mut epa = EPA::with_options(EpaOptions {
        epsilon: 1.0e-6,
        ..EpaOptions::default()
    });
    let res = epa.evaluate(&rounded, &moved, &simplex);

    assert!(res.is_valid());
    assert_relative_eq!(res.depth(), 0.2, epsilon = 1.0e-3);
    assert_relative_eq!(res.point_on_a.z, 0.6, epsilon = 1.0e-3);
    assert_relative_eq!(res.point_on_b.z, 0.4, epsilon = 1.0e-3);
}

#[test]
fn touching_balls() {
    let ball = Ball::new(1.0);
    let moved = Positioned::new(Isometry::translation(2.0, 0.0, 0.0), &ball);
    let touching = CSOPoint::from_shapes(&ball, &moved, &Vector::x());
    let simplex = GjkSimplex::from_points(&[touching]);

    let res = EPA::new().evaluate(&ball, &moved, &simplex);
    assert!(!res.shapes_are_colliding);
    assert!(res.signed_distance.is_nan());
    assert!(res.point_on_a.iter().chain(res.point_on_b.iter()).all(|x| x.is_nan()));
    assert!(matches!(
        res.termination,
        Termination::InvalidInitialPolytope(_)
    ));
}
