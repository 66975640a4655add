use arrayvec::ArrayVec;

use crate::math::{Real, Vector};
use crate::query::gjk::CSOPoint;
use crate::shape::SupportMap;

/// The terminal simplex of a GJK intersection test.
///
/// This is the hand-off point between a GJK implementation and the penetration depth
/// computation: an ordered set of one to four CSO points (a point, a segment, a triangle
/// or a tetrahedron) enclosing, or touching, the origin.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GjkSimplex {
    vertices: ArrayVec<CSOPoint, 4>,
}

impl GjkSimplex {
    /// Creates an empty simplex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simplex from the given CSO points.
    ///
    /// Panics if more than four points are given.
    pub fn from_points(points: &[CSOPoint]) -> Self {
        let mut res = Self::new();

        for pt in points {
            res.push(*pt);
        }

        res
    }

    /// Creates a simplex by sampling the CSO of `g1` and `g2` along each of `dirs`.
    ///
    /// This is useful when the enclosing simplex is known beforehand, e.g., four
    /// directions spanning the space for shapes known to overlap deeply.
    /// Panics if more than four directions are given.
    pub fn from_support_directions<G1, G2>(g1: &G1, g2: &G2, dirs: &[Vector<Real>]) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let mut res = Self::new();

        for dir in dirs {
            res.push(CSOPoint::from_shapes(g1, g2, dir));
        }

        res
    }

    /// Appends a vertex to this simplex.
    ///
    /// Panics if this simplex already has four vertices.
    pub fn push(&mut self, point: CSOPoint) {
        self.vertices.push(point);
    }

    /// The number of vertices of this simplex.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Is this simplex empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertices of this simplex.
    #[inline]
    pub fn vertices(&self) -> &[CSOPoint] {
        &self.vertices
    }
}
