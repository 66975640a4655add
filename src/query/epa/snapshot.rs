use crate::math::{Point, Real};
use crate::query::epa::polytope::{EdgeId, FaceId, PolytopeGraph, VertexId};
use alloc::vec::Vec;
use thiserror::Error;

/// A broken invariant of the half-edge structure of a polytope.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// A face lists a half-edge attached to another face.
    #[error("the half-edge {0:?} does not belong to the face listing it")]
    EdgeFaceMismatch(EdgeId),
    /// The `next`/`previous` links of the half-edges of a face are not a 3-cycle.
    #[error("the half-edges of the face {0:?} do not form a closed loop")]
    BrokenLoop(FaceId),
    /// A half-edge of a live face has no twin.
    #[error("the half-edge {0:?} has no twin")]
    MissingTwin(EdgeId),
    /// A half-edge is not the twin of its own twin.
    #[error("the half-edge {0:?} is not the twin of its own twin")]
    TwinNotReciprocal(EdgeId),
    /// A half-edge and its twin do not join the same vertices in opposite directions.
    #[error("the half-edge {0:?} and its twin do not join the same vertices")]
    TwinEndpointMismatch(EdgeId),
    /// A half-edge of a live face is twinned with a half-edge of an obsolete face.
    #[error("the half-edge {0:?} is adjacent to an obsolete face")]
    ObsoleteNeighbor(EdgeId),
    /// The numbers of vertices, edges and faces do not describe a closed sphere-like surface.
    #[error("the polytope has {vertices} vertices, {edges} edges and {faces} faces, which is not a closed surface")]
    EulerCharacteristic {
        /// The number of distinct vertices.
        vertices: usize,
        /// The number of undirected edges.
        edges: usize,
        /// The number of faces.
        faces: usize,
    },
}

/// A read-only view of the connected, non-obsolete part of an expanding polytope.
///
/// This is mostly useful for debugging and testing: the polytope is gathered by walking
/// the twin links from a starting face, so a broken link shows up as missing faces or as
/// a [`TopologyError`].
#[derive(Clone, Debug)]
pub struct Polytope<'a> {
    graph: &'a PolytopeGraph,
    faces: Vec<FaceId>,
    half_edges: Vec<EdgeId>,
    vertices: Vec<VertexId>,
}

impl<'a> Polytope<'a> {
    /// Collects the live faces reachable from `start` through twin links.
    ///
    /// The result is empty if `start` is obsolete.
    pub fn from_face(graph: &'a PolytopeGraph, start: FaceId) -> Self {
        let mut faces = Vec::new();
        let mut half_edges = Vec::new();
        let mut vertices = Vec::new();
        let mut visited_faces = vec![false; graph.num_faces()];
        let mut visited_vertices = vec![false; graph.num_vertices()];
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            let face = graph.face(id);

            if visited_faces[id.index()] || face.is_obsolete() {
                continue;
            }

            visited_faces[id.index()] = true;
            faces.push(id);

            for v in face.vertices() {
                if !visited_vertices[v.index()] {
                    visited_vertices[v.index()] = true;
                    vertices.push(v);
                }
            }

            for e in face.edges() {
                half_edges.push(e);

                if let Some(twin) = graph.edge(e).twin() {
                    stack.push(graph.edge(twin).face());
                }
            }
        }

        Polytope {
            graph,
            faces,
            half_edges,
            vertices,
        }
    }

    /// Collects the polytope containing the most recently created live face of `graph`.
    pub fn from_graph(graph: &'a PolytopeGraph) -> Option<Self> {
        let start = graph.live_faces().last()?;
        Some(Self::from_face(graph, start))
    }

    /// The graph this polytope lives in.
    #[inline]
    pub fn graph(&self) -> &'a PolytopeGraph {
        self.graph
    }

    /// The faces of this polytope.
    #[inline]
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// The half-edges of this polytope.
    #[inline]
    pub fn half_edges(&self) -> &[EdgeId] {
        &self.half_edges
    }

    /// The vertices of this polytope.
    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Checks that the faces of this polytope form a closed, consistently linked surface.
    pub fn check_topology(&self) -> Result<(), TopologyError> {
        let graph = self.graph;

        for &f in &self.faces {
            let face = graph.face(f);

            for e in face.edges() {
                let edge = graph.edge(e);

                if edge.face() != f {
                    return Err(TopologyError::EdgeFaceMismatch(e));
                }

                let next = graph.edge(edge.next());
                let previous = graph.edge(edge.previous());

                if next.origin() != edge.destination()
                    || previous.destination() != edge.origin()
                    || next.previous() != e
                    || graph.edge(next.next()).next() != e
                {
                    return Err(TopologyError::BrokenLoop(f));
                }

                let twin_id = edge.twin().ok_or(TopologyError::MissingTwin(e))?;
                let twin = graph.edge(twin_id);

                if twin.twin() != Some(e) {
                    return Err(TopologyError::TwinNotReciprocal(e));
                }

                if twin.origin() != edge.destination() || twin.destination() != edge.origin() {
                    return Err(TopologyError::TwinEndpointMismatch(e));
                }

                if graph.face(twin.face()).is_obsolete() {
                    return Err(TopologyError::ObsoleteNeighbor(e));
                }
            }
        }

        let (vertices, edges, faces) = (
            self.vertices.len(),
            self.half_edges.len() / 2,
            self.faces.len(),
        );

        if vertices + faces != edges + 2 {
            return Err(TopologyError::EulerCharacteristic {
                vertices,
                edges,
                faces,
            });
        }

        Ok(())
    }

    /// The volume enclosed by this polytope.
    pub fn volume(&self) -> Real {
        self.faces
            .iter()
            .map(|f| {
                let [a, b, c] = self.graph.face_points(*f);
                a.coords.dot(&b.coords.cross(&c.coords))
            })
            .sum::<Real>()
            / 6.0
    }

    /// The center of mass of this polytope, assuming a uniform density.
    ///
    /// Returns `None` if the polytope has a zero volume.
    pub fn centroid(&self) -> Option<Point<Real>> {
        let mut volume = 0.0;
        let mut weighted = Point::origin();

        for f in &self.faces {
            let [a, b, c] = self.graph.face_points(*f);
            let v = a.coords.dot(&b.coords.cross(&c.coords));
            volume += v;
            weighted += (a.coords + b.coords + c.coords) * (v / 4.0);
        }

        if volume == 0.0 {
            None
        } else {
            Some(weighted / volume)
        }
    }
}
