//! Construction of the initial polytope from the terminal simplex of GJK.

use crate::math::{Point, Real, Vector};
use crate::query::epa::barycentric::tetrahedron_contains_origin;
use crate::query::epa::polytope::{EdgeId, FaceId, PolytopeGraph, VertexId};
use crate::query::gjk::{CSOPoint, GjkSimplex};
use crate::shape::SupportMap;
use crate::utils;
use alloc::vec::Vec;
use core::f64::consts::PI;
use na::{Rotation3, Unit};
use thiserror::Error;

/// Reasons why no initial polytope could be built from a GJK simplex.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitialPolytopeError {
    /// The simplex has no vertex.
    #[error("cannot build a polytope from an empty simplex")]
    EmptySimplex,
    /// The simplex is a single point: the shapes are at most touching.
    #[error("the simplex is a single point, the shapes are touching")]
    TouchingContact,
    /// One of the faces of the initial polytope has (almost) aligned vertices.
    #[error("the initial polytope has an affinely dependent face")]
    AffinelyDependentFace,
    /// A half-edge of the initial polytope has no opposite half-edge.
    #[error("the half-edge {0:?} of the initial polytope has no twin")]
    UnmatchedEdge(EdgeId),
}

/// Builds, into `graph`, a closed polytope enclosing the origin from a GJK simplex.
///
/// The graph is cleared first. Simplices with fewer than four vertices are inflated by
/// sampling the CSO of `g1` and `g2`:
/// - a segment is surrounded by three support points taken around it, 120 degrees apart;
/// - a triangle is completed with the support points along both of its normals.
///
/// Returns the faces of the polytope, in creation order.
pub fn initial_polytope<G1, G2>(
    graph: &mut PolytopeGraph,
    g1: &G1,
    g2: &G2,
    simplex: &GjkSimplex,
    eps: Real,
) -> Result<Vec<FaceId>, InitialPolytopeError>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    graph.clear();

    let faces = match simplex.vertices() {
        [] => return Err(InitialPolytopeError::EmptySimplex),
        [_] => return Err(InitialPolytopeError::TouchingContact),
        [y0, y1] => {
            let axis = Unit::try_new(y1.point - y0.point, eps)
                .ok_or(InitialPolytopeError::AffinelyDependentFace)?;
            let rot = Rotation3::from_axis_angle(&axis, 2.0 * PI / 3.0);
            let d2 = utils::orthogonal_vector(&axis);
            let d3 = rot * d2;
            let d4 = rot * d3;
            let [y2, y3, y4] = [d2, d3, d4].map(|dir| CSOPoint::from_shapes(g1, g2, &dir));

            if contains_origin([y0, &y2, &y3, &y4]) {
                tetrahedron(graph, [y0, &y2, &y3, &y4], eps)?
            } else if contains_origin([y1, &y2, &y3, &y4]) {
                tetrahedron(graph, [y1, &y2, &y3, &y4], eps)?
            } else {
                bipyramid(graph, [&y2, &y3, &y4], [y0, y1], eps)?
            }
        }
        [y0, y1, y2] => {
            let n = (y1.point - y0.point).cross(&(y2.point - y0.point));
            let y3 = CSOPoint::from_shapes(g1, g2, &n);
            let y4 = CSOPoint::from_shapes(g1, g2, &-n);

            if contains_origin([y0, y1, y2, &y3]) {
                tetrahedron(graph, [y0, y1, y2, &y3], eps)?
            } else if contains_origin([y0, y1, y2, &y4]) {
                tetrahedron(graph, [y0, y1, y2, &y4], eps)?
            } else {
                bipyramid(graph, [y0, y1, y2], [&y3, &y4], eps)?
            }
        }
        [y0, y1, y2, y3] => tetrahedron(graph, [y0, y1, y2, y3], eps)?,
        _ => unreachable!(),
    };

    link_twins(graph, &faces)?;
    Ok(faces)
}

fn contains_origin(pts: [&CSOPoint; 4]) -> bool {
    tetrahedron_contains_origin(&pts[0].point, &pts[1].point, &pts[2].point, &pts[3].point)
}

fn add_faces(
    graph: &mut PolytopeGraph,
    vertices: &[VertexId],
    indices: &[[usize; 3]],
    eps: Real,
) -> Result<Vec<FaceId>, InitialPolytopeError> {
    let mut faces = Vec::with_capacity(indices.len());

    for idx in indices {
        let face = graph.add_face(idx.map(|i| vertices[i]), eps);

        if graph.face(face).is_affinely_dependent() {
            return Err(InitialPolytopeError::AffinelyDependentFace);
        }

        faces.push(face);
    }

    Ok(faces)
}

/// Four faces wound counter-clockwise when seen from outside of the tetrahedron.
fn tetrahedron(
    graph: &mut PolytopeGraph,
    pts: [&CSOPoint; 4],
    eps: Real,
) -> Result<Vec<FaceId>, InitialPolytopeError> {
    let vertices = pts.map(|pt| graph.add_vertex(*pt));
    let [a, b, c, d] = pts.map(|pt| pt.point);

    if is_above(&a, &b, &c, &d) {
        add_faces(graph, &vertices, &[[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]], eps)
    } else {
        add_faces(graph, &vertices, &[[0, 1, 2], [0, 2, 3], [2, 1, 3], [1, 0, 3]], eps)
    }
}

/// Two tetrahedra glued along the triangle `ring`, one on each side.
fn bipyramid(
    graph: &mut PolytopeGraph,
    ring: [&CSOPoint; 3],
    apexes: [&CSOPoint; 2],
    eps: Real,
) -> Result<Vec<FaceId>, InitialPolytopeError> {
    let [a, b, c] = ring.map(|pt| pt.point);
    let [mut top, mut bottom] = apexes;

    if !is_above(&a, &b, &c, &top.point) {
        core::mem::swap(&mut top, &mut bottom);
    }

    let vertices = [ring[0], ring[1], ring[2], top, bottom].map(|pt| graph.add_vertex(*pt));
    add_faces(
        graph,
        &vertices,
        &[
            [0, 1, 3],
            [1, 2, 3],
            [2, 0, 3],
            [1, 0, 4],
            [2, 1, 4],
            [0, 2, 4],
        ],
        eps,
    )
}

/// Tests if `pt` lies on the side of the triangle `(a, b, c)` its counter-clockwise normal points to.
fn is_above(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>, pt: &Point<Real>) -> bool {
    let n: Vector<Real> = (b - a).cross(&(c - a));
    (pt - a).dot(&n) > 0.0
}

fn link_twins(graph: &mut PolytopeGraph, faces: &[FaceId]) -> Result<(), InitialPolytopeError> {
    for f in faces {
        for e in graph.face(*f).edges() {
            let edge = *graph.edge(e);

            if edge.twin().is_some() {
                continue;
            }

            let twin = graph
                .edge_to(edge.destination(), edge.origin())
                .ok_or(InitialPolytopeError::UnmatchedEdge(e))?;
            graph.set_twin(e, twin);
        }
    }

    Ok(())
}
