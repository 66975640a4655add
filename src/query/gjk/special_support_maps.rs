use na::Unit;

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;

/// A support mapping that is a single point.
pub struct ConstantPoint(pub Point<Real>);

impl SupportMap for ConstantPoint {
    #[inline]
    fn support_point(&self, m: &Isometry<Real>, _: &Vector<Real>) -> Point<Real> {
        m * self.0
    }

    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        self.0
    }
}

/// A support mapping that is the point at (0.0, 0.0, 0.0).
pub struct ConstantOrigin;

impl SupportMap for ConstantOrigin {
    #[inline]
    fn support_point(&self, m: &Isometry<Real>, _: &Vector<Real>) -> Point<Real> {
        m.translation.vector.into()
    }

    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        Point::origin()
    }
}

/// The Minkowski sum of a shape and a ball.
pub struct DilatedShape<'a, S: ?Sized + SupportMap> {
    /// The shape involved in the Minkowski sum.
    pub shape: &'a S,
    /// The radius of the ball involved in the Minkowski sum.
    pub radius: Real,
}

impl<S: ?Sized + SupportMap> SupportMap for DilatedShape<'_, S> {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.local_support_point_toward(&Unit::new_normalize(*dir))
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.shape.local_support_point_toward(dir) + **dir * self.radius
    }
}

/// A shape placed in space by an isometry.
///
/// Its local support function is the support function of `shape` transformed by `pos`,
/// which lets two independently positioned shapes be queried in a common frame.
pub struct Positioned<'a, S: ?Sized + SupportMap> {
    /// The position of the shape.
    pub pos: Isometry<Real>,
    /// The positioned shape.
    pub shape: &'a S,
}

impl<'a, S: ?Sized + SupportMap> Positioned<'a, S> {
    /// Places `shape` at `pos`.
    pub fn new(pos: Isometry<Real>, shape: &'a S) -> Self {
        Positioned { pos, shape }
    }
}

impl<S: ?Sized + SupportMap> SupportMap for Positioned<'_, S> {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.shape.support_point(&self.pos, dir)
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.shape.support_point_toward(&self.pos, dir)
    }
}
