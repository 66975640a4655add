use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;

/// A point of a Configuration-Space Obstacle.
///
/// A Configuration-Space Obstacle (CSO) is the result of the
/// Minkowski Difference of two solids. In other words, each of its
/// points correspond to the difference of two point, each belonging
/// to a different solid.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CSOPoint {
    /// The point on the CSO. This is equal to `self.orig1 - self.orig2`.
    pub point: Point<Real>,
    /// The original point on the first shape used to compute `self.point`.
    pub orig1: Point<Real>,
    /// The original point on the second shape used to compute `self.point`.
    pub orig2: Point<Real>,
}

impl CSOPoint {
    /// Initializes a CSO point with `orig1 - orig2`.
    pub fn new(orig1: Point<Real>, orig2: Point<Real>) -> Self {
        let point = Point::from(orig1 - orig2);
        Self::new_with_point(point, orig1, orig2)
    }

    /// Initializes a CSO point with all information provided.
    ///
    /// It is assumed, but not checked, that `point == orig1 - orig2`.
    pub fn new_with_point(point: Point<Real>, orig1: Point<Real>, orig2: Point<Real>) -> Self {
        CSOPoint {
            point,
            orig1,
            orig2,
        }
    }

    /// Initializes a CSO point where both original points are equal.
    pub fn single_point(point: Point<Real>) -> Self {
        Self::new_with_point(point, point, Point::origin())
    }

    /// CSO point where all components are set to zero.
    pub fn origin() -> Self {
        CSOPoint::new(Point::origin(), Point::origin())
    }

    /// Computes the support point of the CSO of `g1` and `g2` toward the direction `dir`.
    ///
    /// Both shapes are expected to be expressed in the same frame. The support point of
    /// `g1` is taken along `dir` and the one of `g2` along `-dir`.
    pub fn from_shapes<G1, G2>(g1: &G1, g2: &G2, dir: &Vector<Real>) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let sp1 = g1.local_support_point(dir);
        let sp2 = g2.local_support_point(&-*dir);

        CSOPoint::new(sp1, sp2)
    }

    /// Interpolates the three CSO points of a triangle with the barycentric coordinates
    /// `bcoords`, returning the matching points on the first and on the second shape.
    pub fn interpolate_origins(
        pts: [&CSOPoint; 3],
        bcoords: [Real; 3],
    ) -> (Point<Real>, Point<Real>) {
        (
            pts[0].orig1 * bcoords[0]
                + pts[1].orig1.coords * bcoords[1]
                + pts[2].orig1.coords * bcoords[2],
            pts[0].orig2 * bcoords[0]
                + pts[1].orig2.coords * bcoords[1]
                + pts[2].orig2.coords * bcoords[2],
        )
    }
}
