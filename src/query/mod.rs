//! Penetration queries between overlapping convex shapes.
//!
//! The entry point is [`epa::EPA`], which computes the penetration depth and the deepest
//! points of two shapes from the terminal simplex of a GJK intersection test. The [`gjk`]
//! module provides the types this simplex is expressed with.

pub use self::epa::{EpaOptions, EpaResult, EPA};
pub use self::gjk::{CSOPoint, GjkSimplex};

pub mod epa;
pub mod gjk;
