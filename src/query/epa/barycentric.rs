//! Projection of the origin onto low-dimensional simplices.
//!
//! The signed-area formulation follows the "signed volumes" sub-routines used by
//! modern GJK implementations: every sub-determinant is computed on the Cartesian
//! plane (or axis) where the simplex has the largest projected extent, which keeps
//! thin triangles well conditioned.

use crate::math::{Point, Real};

/// Location of the projection of the origin on a triangle.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProjectionLocation {
    /// The projection of the origin on the triangle plane lies inside of the triangle.
    Inside,
    /// The projection lies outside of the triangle and had to be clamped to its boundary.
    Outside,
    /// The triangle is degenerate: its vertices are (almost) aligned.
    AffinelyDependent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CartesianPlane {
    Yz,
    Zx,
    Xy,
}

impl CartesianPlane {
    /// Twice the signed area of the triangle `(a, b, c)` projected on this plane.
    #[inline]
    fn signed_area(self, a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Real {
        match self {
            CartesianPlane::Yz => triangle_signed_area(a.y, a.z, b.y, b.z, c.y, c.z),
            CartesianPlane::Zx => triangle_signed_area(a.z, a.x, b.z, b.x, c.z, c.x),
            CartesianPlane::Xy => triangle_signed_area(a.x, a.y, b.x, b.y, c.x, c.y),
        }
    }
}

/// Twice the signed area of a 2D triangle.
///
/// Positive for a counter-clockwise ordering of the vertices, negative otherwise.
#[inline]
pub fn triangle_signed_area(ax: Real, ay: Real, bx: Real, by: Real, cx: Real, cy: Real) -> Real {
    ax * (by - cy) + bx * (cy - ay) + cx * (ay - by)
}

/// Tests that `b` has the same sign as the non-zero reference `a`.
///
/// A zero `b` matches any sign, a zero `a` matches nothing.
#[inline]
pub fn compare_signs(a: Real, b: Real) -> bool {
    (a > 0.0 && b >= 0.0) || (a < 0.0 && b <= 0.0)
}

/// Six times the signed volume of the tetrahedron `(a, b, c, d)`.
#[inline]
pub fn tetrahedron_signed_volume(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    d: &Point<Real>,
) -> Real {
    (b - a).cross(&(c - a)).dot(&(d - a))
}

/// Tests if the origin lies inside of, or on the boundary of, the tetrahedron `(a, b, c, d)`.
///
/// For each face, the origin must lie on the same side as the opposite vertex. A flat
/// tetrahedron never contains the origin.
pub fn tetrahedron_contains_origin(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    d: &Point<Real>,
) -> bool {
    let origin = Point::origin();
    let faces = [(b, c, d, a), (a, c, d, b), (a, b, d, c), (a, b, c, d)];

    faces.iter().all(|(p, q, r, opposite)| {
        compare_signs(
            tetrahedron_signed_volume(p, q, r, opposite),
            tetrahedron_signed_volume(p, q, r, &origin),
        )
    })
}

/// Barycentric coordinates of the point of the segment `(s1, s2)` closest to the origin.
///
/// When the projection of the origin on the segment line falls outside of the segment,
/// the coordinates of the nearest endpoint are returned, i.e., `[1.0, 0.0]` or `[0.0, 1.0]`.
pub fn barycentric_coordinates_from_1_simplex(s1: &Point<Real>, s2: &Point<Real>) -> [Real; 2] {
    let t = s2 - s1;
    let param = -t.dot(&s2.coords) / t.norm_squared();
    let p0 = s2 + t * param;

    // Work along the axis where the segment is the longest.
    let mut axis = 0;
    let mut mu_max = s1.x - s2.x;

    for i in 1..3 {
        let mu = s1[i] - s2[i];

        if mu.abs() > mu_max.abs() {
            axis = i;
            mu_max = mu;
        }
    }

    let c1 = p0[axis] - s2[axis];
    let c2 = s1[axis] - p0[axis];

    if !compare_signs(mu_max, c1) {
        // The projection lies past `s2`.
        [0.0, 1.0]
    } else if !compare_signs(mu_max, c2) {
        // The projection lies past `s1`.
        [1.0, 0.0]
    } else {
        [c1 / mu_max, c2 / mu_max]
    }
}

/// Barycentric coordinates of the point of the triangle `(s1, s2, s3)` closest to the origin.
///
/// If the triangle is affinely dependent with regard to `eps`, its coordinates are all NaN.
/// If the orthogonal projection of the origin on the triangle plane lies outside of the
/// triangle, the coordinates of the closest point of its boundary are returned instead and
/// the location is reported as [`ProjectionLocation::Outside`], unless every sign violation
/// is smaller than `eps` in which case the location is [`ProjectionLocation::Inside`].
pub fn barycentric_coordinates_from_2_simplex(
    s1: &Point<Real>,
    s2: &Point<Real>,
    s3: &Point<Real>,
    eps: Real,
) -> (ProjectionLocation, [Real; 3]) {
    // Select the Cartesian plane onto which the triangle has the largest area.
    let mut plane = CartesianPlane::Yz;
    let mut mu_max = plane.signed_area(s1, s2, s3);

    for candidate in [CartesianPlane::Zx, CartesianPlane::Xy] {
        let mu = candidate.signed_area(s1, s2, s3);

        if mu.abs() > mu_max.abs() {
            mu_max = mu;
            plane = candidate;
        }
    }

    // NOTE: written so that a NaN area is also reported as degenerate.
    if !(mu_max.abs() >= eps) {
        return (ProjectionLocation::AffinelyDependent, [Real::NAN; 3]);
    }

    // Projection of the origin onto the triangle plane.
    let n = (s1 - s2).cross(&(s1 - s3));
    let p0 = Point::from(n * (s1.coords.dot(&n) / n.norm_squared()));

    let c1 = plane.signed_area(&p0, s2, s3);
    let c2 = plane.signed_area(s1, &p0, s3);
    let c3 = plane.signed_area(s1, s2, &p0);

    if compare_signs(mu_max, c1) && compare_signs(mu_max, c2) && compare_signs(mu_max, c3) {
        return (
            ProjectionLocation::Inside,
            [c1 / mu_max, c2 / mu_max, c3 / mu_max],
        );
    }

    let mut best_dist = Real::INFINITY;
    let mut best_bcoords = [Real::NAN; 3];
    let mut is_almost_inside = true;

    let edges = [
        (c1, s2, s3, 1, 2),
        (c2, s1, s3, 0, 2),
        (c3, s1, s2, 0, 1),
    ];

    for (c, a, b, ia, ib) in edges {
        if !compare_signs(mu_max, -c) {
            continue;
        }

        if c.abs() > eps {
            is_almost_inside = false;
        }

        let [la, lb] = barycentric_coordinates_from_1_simplex(a, b);
        let candidate = a.coords * la + b.coords * lb;
        let dist = candidate.norm_squared();

        if dist < best_dist {
            best_dist = dist;
            best_bcoords = [0.0; 3];
            best_bcoords[ia] = la;
            best_bcoords[ib] = lb;
        }
    }

    if is_almost_inside {
        (ProjectionLocation::Inside, best_bcoords)
    } else {
        (ProjectionLocation::Outside, best_bcoords)
    }
}
