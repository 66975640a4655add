use alloc::vec::Vec;

use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;

/// A convex shape implicitly defined as the convex hull of a set of points.
///
/// The hull itself is never computed: the support function simply returns the point of
/// the cloud with the largest projection on the query direction.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPointCloud {
    points: Vec<Point<Real>>,
}

impl ConvexPointCloud {
    /// Creates the implicit convex hull of `points`.
    ///
    /// Returns `None` if `points` is empty.
    pub fn new(points: Vec<Point<Real>>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(ConvexPointCloud { points })
        }
    }

    /// The points this convex shape is the hull of.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The index of the point of this cloud farthest along `dir`.
    ///
    /// Ties are resolved in favor of the first point.
    pub fn support_point_id(&self, dir: &Vector<Real>) -> usize {
        let mut best_pt = 0;
        let mut best_dot = self.points[0].coords.dot(dir);

        for (i, p) in self.points.iter().enumerate().skip(1) {
            let dot = p.coords.dot(dir);

            if dot > best_dot {
                best_dot = dot;
                best_pt = i;
            }
        }

        best_pt
    }
}

impl SupportMap for ConvexPointCloud {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.points[self.support_point_id(dir)]
    }
}
