use crate::math::{Point, Real, Vector};
use crate::query::epa::Termination;

/// The penetration information computed by [`EPA::evaluate`](crate::query::epa::EPA::evaluate).
///
/// Contact normals are not computed and are always set to NaN. If no polytope could be
/// built from the input simplex, every geometric quantity is NaN and `shapes_are_colliding`
/// is `false`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EpaResult {
    /// Whether the penetration depth could be computed.
    pub shapes_are_colliding: bool,
    /// Minus the penetration depth.
    pub signed_distance: Real,
    /// The deepest point of the first shape inside of the second one.
    pub point_on_a: Point<Real>,
    /// The deepest point of the second shape inside of the first one.
    pub point_on_b: Point<Real>,
    /// Always NaN.
    pub normal_on_a: Vector<Real>,
    /// Always NaN.
    pub normal_on_b: Vector<Real>,
    /// The number of faces the expansion went through.
    pub iterations: usize,
    /// Why the expansion stopped.
    pub termination: Termination,
}

impl EpaResult {
    /// A result for shapes whose penetration could not be evaluated.
    pub fn degenerate(termination: Termination) -> Self {
        let nan_pt = Point::new(Real::NAN, Real::NAN, Real::NAN);
        let nan_vec = Vector::repeat(Real::NAN);

        EpaResult {
            shapes_are_colliding: false,
            signed_distance: Real::NAN,
            point_on_a: nan_pt,
            point_on_b: nan_pt,
            normal_on_a: nan_vec,
            normal_on_b: nan_vec,
            iterations: 0,
            termination,
        }
    }

    /// The penetration depth, i.e., `-self.signed_distance`.
    #[inline]
    pub fn depth(&self) -> Real {
        -self.signed_distance
    }

    /// Is this a colliding result with finite distance and contact points?
    pub fn is_valid(&self) -> bool {
        self.shapes_are_colliding
            && self.signed_distance.is_finite()
            && self.point_on_a.iter().all(|x| x.is_finite())
            && self.point_on_b.iter().all(|x| x.is_finite())
    }
}
