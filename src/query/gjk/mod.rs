//! Interface with the GJK algorithm.
//!
//! The GJK intersection test itself is not part of this crate: it only consumes the
//! terminal simplex such a test produces, along with the support mapping of the shapes.

pub use self::cso_point::CSOPoint;
pub use self::simplex::GjkSimplex;
pub use self::special_support_maps::{ConstantOrigin, ConstantPoint, DilatedShape, Positioned};

mod cso_point;
mod simplex;
mod special_support_maps;
