//! Arena-based half-edge representation of the polytope expanded by EPA.
//!
//! Vertices, half-edges and faces are stored in three flat arrays and refer to each
//! other through typed indices. Nothing is ever removed from the arena during a query:
//! faces and half-edges swallowed by the polytope are only flagged as obsolete, and
//! vertices forget about their obsolete outgoing half-edges lazily.

use crate::math::{Point, Real, Vector};
use crate::query::epa::barycentric::{self, ProjectionLocation};
use crate::query::gjk::CSOPoint;
use alloc::vec::Vec;
use smallvec::SmallVec;

macro_rules! arena_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            /// The index of this element in its arena.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_index!(
    /// Index of a vertex of a [`PolytopeGraph`].
    VertexId
);
arena_index!(
    /// Index of a half-edge of a [`PolytopeGraph`].
    EdgeId
);
arena_index!(
    /// Index of a face of a [`PolytopeGraph`].
    FaceId
);

/// A vertex of the polytope, i.e., a point of the CSO.
#[derive(Clone, Debug)]
pub struct Vertex {
    cso: CSOPoint,
    edges: SmallVec<[EdgeId; 8]>,
}

impl Vertex {
    /// The CSO point this vertex was built from.
    #[inline]
    pub fn cso_point(&self) -> &CSOPoint {
        &self.cso
    }

    /// The position of this vertex.
    #[inline]
    pub fn point(&self) -> &Point<Real> {
        &self.cso.point
    }

    /// The half-edges starting at this vertex.
    ///
    /// This may still contain obsolete half-edges until the vertex is pruned.
    #[inline]
    pub fn outgoing_edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// A directed edge of a polytope face.
#[derive(Copy, Clone, Debug)]
pub struct HalfEdge {
    origin: VertexId,
    destination: VertexId,
    face: FaceId,
    next: EdgeId,
    previous: EdgeId,
    twin: Option<EdgeId>,
    obsolete: bool,
}

impl HalfEdge {
    /// The vertex this half-edge starts from.
    #[inline]
    pub fn origin(&self) -> VertexId {
        self.origin
    }

    /// The vertex this half-edge points to.
    #[inline]
    pub fn destination(&self) -> VertexId {
        self.destination
    }

    /// The face this half-edge belongs to.
    #[inline]
    pub fn face(&self) -> FaceId {
        self.face
    }

    /// The next half-edge on the same face.
    #[inline]
    pub fn next(&self) -> EdgeId {
        self.next
    }

    /// The previous half-edge on the same face.
    #[inline]
    pub fn previous(&self) -> EdgeId {
        self.previous
    }

    /// The oppositely oriented half-edge of the adjacent face, if linked already.
    #[inline]
    pub fn twin(&self) -> Option<EdgeId> {
        self.twin
    }

    /// Whether the face of this half-edge has been removed from the polytope.
    #[inline]
    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }
}

/// A triangular face of the polytope, with its cached projection of the origin.
#[derive(Copy, Clone, Debug)]
pub struct Face {
    vertices: [VertexId; 3],
    edges: [EdgeId; 3],
    normal: Vector<Real>,
    location: ProjectionLocation,
    bcoords: [Real; 3],
    closest_point: Point<Real>,
    distance_squared: Real,
    obsolete: bool,
}

impl Face {
    /// The three vertices of this face, in counter-clockwise order seen from outside.
    #[inline]
    pub fn vertices(&self) -> [VertexId; 3] {
        self.vertices
    }

    /// The three half-edges of this face: `v0 -> v1`, `v1 -> v2`, and `v2 -> v0`.
    #[inline]
    pub fn edges(&self) -> [EdgeId; 3] {
        self.edges
    }

    /// The non-normalized outward normal `(v1 - v0) x (v2 - v0)`.
    #[inline]
    pub fn normal(&self) -> &Vector<Real> {
        &self.normal
    }

    /// Where the projection of the origin lies with regard to this face.
    #[inline]
    pub fn location(&self) -> ProjectionLocation {
        self.location
    }

    /// Is the projection of the origin inside of this face (up to the query tolerance)?
    #[inline]
    pub fn is_closest_point_internal(&self) -> bool {
        self.location == ProjectionLocation::Inside
    }

    /// Are the vertices of this face (almost) aligned?
    #[inline]
    pub fn is_affinely_dependent(&self) -> bool {
        self.location == ProjectionLocation::AffinelyDependent
    }

    /// The barycentric coordinates of the point of this face closest to the origin.
    #[inline]
    pub fn barycentric_coordinates(&self) -> [Real; 3] {
        self.bcoords
    }

    /// The point of this face closest to the origin.
    #[inline]
    pub fn closest_point(&self) -> &Point<Real> {
        &self.closest_point
    }

    /// The squared distance between the origin and this face.
    #[inline]
    pub fn distance_squared(&self) -> Real {
        self.distance_squared
    }

    /// Whether this face has been swallowed by the polytope.
    #[inline]
    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }
}

/// The vertices, half-edges and faces of an expanding polytope.
#[derive(Clone, Debug, Default)]
pub struct PolytopeGraph {
    vertices: Vec<Vertex>,
    edges: Vec<HalfEdge>,
    faces: Vec<Face>,
}

impl PolytopeGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every element from this graph, keeping the allocated memory.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.faces.clear();
    }

    /// The number of vertices ever added to this graph.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The number of faces ever added to this graph, obsolete ones included.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// The vertex with the given index.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// The half-edge with the given index.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &HalfEdge {
        &self.edges[id.index()]
    }

    /// The face with the given index.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    /// Iterates through the faces of this graph which are still part of the polytope.
    pub fn live_faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, face)| !face.obsolete)
            .map(|(i, _)| FaceId::from_index(i))
    }

    /// The positions of the three vertices of a face.
    #[inline]
    pub fn face_points(&self, id: FaceId) -> [&Point<Real>; 3] {
        let [a, b, c] = self.face(id).vertices;
        [self.vertex(a).point(), self.vertex(b).point(), self.vertex(c).point()]
    }

    /// Adds an isolated vertex.
    pub fn add_vertex(&mut self, cso: CSOPoint) -> VertexId {
        let id = VertexId::from_index(self.vertices.len());
        self.vertices.push(Vertex {
            cso,
            edges: SmallVec::new(),
        });
        id
    }

    /// Adds the face `(a, b, c)` along with its three half-edges.
    ///
    /// The half-edges are not linked to their twins. The projection of the origin on the
    /// face is computed right away, with `eps` as the degeneracy tolerance.
    pub fn add_face(&mut self, vertices: [VertexId; 3], eps: Real) -> FaceId {
        let face = FaceId::from_index(self.faces.len());
        let first_edge = self.edges.len();
        let edges = [0, 1, 2].map(|k| EdgeId::from_index(first_edge + k));

        for k in 0..3 {
            let origin = vertices[k];
            self.edges.push(HalfEdge {
                origin,
                destination: vertices[(k + 1) % 3],
                face,
                next: edges[(k + 1) % 3],
                previous: edges[(k + 2) % 3],
                twin: None,
                obsolete: false,
            });
            self.vertices[origin.index()].edges.push(edges[k]);
        }

        let [p0, p1, p2] = vertices.map(|v| self.vertices[v.index()].cso.point);
        let normal = (p1 - p0).cross(&(p2 - p0));
        let (location, bcoords) =
            barycentric::barycentric_coordinates_from_2_simplex(&p0, &p1, &p2, eps);
        let closest_point =
            Point::from(p0.coords * bcoords[0] + p1.coords * bcoords[1] + p2.coords * bcoords[2]);

        self.faces.push(Face {
            vertices,
            edges,
            normal,
            location,
            bcoords,
            closest_point,
            distance_squared: closest_point.coords.norm_squared(),
            obsolete: false,
        });

        face
    }

    /// Adds the face `(edge.destination, edge.origin, apex)` and twins its first half-edge
    /// with `edge`.
    pub fn add_face_on_edge(&mut self, apex: VertexId, edge: EdgeId, eps: Real) -> FaceId {
        let twin = self.edges[edge.index()];
        let face = self.add_face([twin.destination, twin.origin, apex], eps);
        let base = self.faces[face.index()].edges[0];
        self.set_twin(base, edge);
        face
    }

    /// Links two half-edges as twins of each other.
    ///
    /// # Panics
    /// Panics if the half-edges do not join the same two vertices in opposite directions.
    pub fn set_twin(&mut self, edge: EdgeId, twin: EdgeId) {
        let (e, t) = (self.edges[edge.index()], self.edges[twin.index()]);

        if e.origin != t.destination || e.destination != t.origin {
            panic!(
                "Twin half-edges must join the same vertices in opposite directions: {:?} -> {:?} vs. {:?} -> {:?}.",
                e.origin, e.destination, t.origin, t.destination
            );
        }

        self.edges[edge.index()].twin = Some(twin);
        self.edges[twin.index()].twin = Some(edge);
    }

    /// The non-obsolete half-edge going from `from` to `to`, if any.
    pub fn edge_to(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.vertices[from.index()]
            .edges
            .iter()
            .copied()
            .find(|e| {
                let edge = &self.edges[e.index()];
                !edge.obsolete && edge.destination == to
            })
    }

    /// Flags a face and its half-edges as removed from the polytope.
    pub fn mark_obsolete(&mut self, face: FaceId) {
        let f = &mut self.faces[face.index()];
        f.obsolete = true;

        for e in f.edges {
            self.edges[e.index()].obsolete = true;
        }
    }

    /// Tests if `point` lies strictly above the supporting plane of a face.
    #[inline]
    pub fn can_be_seen_by(&self, face: FaceId, point: &Point<Real>) -> bool {
        let f = &self.faces[face.index()];
        let p0 = self.vertices[f.vertices[0].index()].point();
        (point - p0).dot(&f.normal) > 0.0
    }

    /// Tests if `point` coincides exactly with one of the vertices of a face.
    pub fn face_contains_point(&self, face: FaceId, point: &Point<Real>) -> bool {
        self.face_points(face).iter().any(|p| *p == point)
    }

    /// Computes the horizon seen by `observer`, starting the walk at `start`.
    ///
    /// Every live face visible from `observer` reached by the walk is marked obsolete.
    /// The half-edges of non-visible faces bordering a visible region are appended to `out`.
    /// A `None` start, or a half-edge whose face is already obsolete, contributes nothing.
    pub fn silhouette(
        &mut self,
        start: Option<EdgeId>,
        observer: &Point<Real>,
        out: &mut Vec<EdgeId>,
    ) {
        let mut stack: SmallVec<[EdgeId; 32]> = SmallVec::new();
        stack.extend(start);

        while let Some(edge) = stack.pop() {
            let e = self.edges[edge.index()];

            if self.faces[e.face.index()].obsolete {
                continue;
            }

            if !self.can_be_seen_by(e.face, observer) {
                out.push(edge);
                continue;
            }

            self.mark_obsolete(e.face);

            // The walk continues through `next` first, hence it is pushed last.
            stack.extend(self.edges[e.previous.index()].twin);
            stack.extend(self.edges[e.next.index()].twin);
        }
    }

    /// Twins every half-edge leaving `vertex` with the half-edge coming back to it.
    ///
    /// Returns `false` if one of these half-edges has no possible twin.
    pub fn relink_twins(&mut self, vertex: VertexId) -> bool {
        let outgoing = self.vertices[vertex.index()].edges.clone();

        for edge in outgoing {
            let destination = self.edges[edge.index()].destination;

            match self.edge_to(destination, vertex) {
                Some(twin) => self.set_twin(edge, twin),
                None => return false,
            }
        }

        true
    }

    /// Forgets the obsolete half-edges leaving `vertex`.
    pub fn prune_obsolete_edges(&mut self, vertex: VertexId) {
        let edges = &self.edges;
        self.vertices[vertex.index()]
            .edges
            .retain(|e| !edges[e.index()].obsolete);
    }

    /// The points of both shapes matching the closest point of a face to the origin.
    pub fn closest_points(&self, face: FaceId) -> (Point<Real>, Point<Real>) {
        let f = &self.faces[face.index()];
        let [a, b, c] = f.vertices.map(|v| &self.vertices[v.index()].cso);
        CSOPoint::interpolate_origins([a, b, c], f.bcoords)
    }
}
