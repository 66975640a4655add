//! Support mapping based Cuboid shape.

use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;
use crate::utils::WSign;

/// Shape of a box.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cuboid {
    /// The half-extents of the cuboid.
    pub half_extents: Vector<Real>,
}

impl Cuboid {
    /// Creates a new box from its half-extents. Half-extents are the box half-width along each
    /// axis. Each half-extent must be positive.
    #[inline]
    pub fn new(half_extents: Vector<Real>) -> Cuboid {
        Cuboid { half_extents }
    }

    /// The eight corners of this cuboid, in its local frame.
    pub fn vertices(&self) -> [Point<Real>; 8] {
        let mut res = [Point::origin(); 8];

        for (vid, pt) in res.iter_mut().enumerate() {
            let mut coords = self.half_extents;

            for i in 0..3 {
                if vid & (1 << i) != 0 {
                    coords[i] = -coords[i]
                }
            }

            *pt = Point::from(coords);
        }

        res
    }
}

impl SupportMap for Cuboid {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        dir.copy_sign_to(self.half_extents).into()
    }
}
