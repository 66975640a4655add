#[macro_use]
extern crate approx;

mod ball_ball_epa;
mod barycentric_projection;
mod cuboid_cuboid_epa;
mod epa_bounds;

use epa3d::math::{Real, Vector};

/// Directions whose support points form a tetrahedron enclosing the origin for any pair of
/// boxes or balls overlapping deeply enough.
pub fn tetrahedron_dirs() -> [Vector<Real>; 4] {
    [
        Vector::new(1.0, 1.0, 1.0),
        Vector::new(1.0, -1.0, -1.0),
        Vector::new(-1.0, 1.0, -1.0),
        Vector::new(-1.0, -1.0, 1.0),
    ]
}
