//! The Expanding Polytope Algorithm for penetration depth computation.

pub use self::barycentric::{
    barycentric_coordinates_from_1_simplex, barycentric_coordinates_from_2_simplex,
    compare_signs, tetrahedron_contains_origin, triangle_signed_area, ProjectionLocation,
};
pub use self::epa3::{EpaOptions, IterationRecord, Termination, EPA};
pub use self::polytope::{EdgeId, Face, FaceId, HalfEdge, PolytopeGraph, Vertex, VertexId};
pub use self::result::EpaResult;
pub use self::seed::{initial_polytope, InitialPolytopeError};
pub use self::snapshot::{Polytope, TopologyError};

pub mod barycentric;
mod epa3;
mod polytope;
mod result;
mod seed;
mod snapshot;
