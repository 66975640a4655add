//! Three-dimensional penetration depth queries using the Expanding Polytope Algorithm.

use crate::math::{Point, Real, Vector};
use crate::query::epa::polytope::{EdgeId, Face, FaceId, PolytopeGraph};
use crate::query::epa::seed::{self, InitialPolytopeError};
use crate::query::epa::{EpaResult, Polytope};
use crate::query::gjk::{CSOPoint, ConstantOrigin, GjkSimplex};
use crate::shape::SupportMap;
use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;
use ordered_float::OrderedFloat;

/// Substituted to the first zero component of a support direction.
///
/// Shapes with flat features (boxes, polyhedra) have many equally valid support points
/// along axis-aligned directions, and the one they pick may already be a vertex of the
/// polytope. Tilting the direction slightly makes the pick consistent.
const SUPPORT_DIRECTION_WIGGLE: Real = 1.234e-16;

/// Options controlling the accuracy and the cost of the Expanding Polytope Algorithm.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EpaOptions {
    /// Tolerance used for degeneracy tests and for the convergence criterion.
    pub epsilon: Real,
    /// The maximum number of faces the polytope is expanded from.
    pub max_iterations: usize,
}

impl Default for EpaOptions {
    fn default() -> Self {
        Self {
            epsilon: 1.0e-12,
            max_iterations: 10_000,
        }
    }
}

/// The reason why the expansion of the polytope stopped.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// No initial polytope could be built from the simplex.
    InvalidInitialPolytope(InitialPolytopeError),
    /// Every face has been processed.
    EmptyQueue,
    /// The closest remaining face is farther than the known upper bound of the depth.
    UpperBoundExceeded,
    /// The new support point is already a vertex of the face being expanded.
    DuplicateSupportPoint,
    /// The lower and upper bounds of the depth are close enough.
    AccuracyReached,
    /// The new support point does not see the face it was sampled from.
    MalformedSilhouette,
    /// The expansion created a face with (almost) aligned vertices.
    AffinelyDependentFace,
    /// The faces created by the expansion could not be stitched together.
    MissingTwin,
    /// The iteration limit was hit.
    MaxIterations,
}

/// The bounds of the squared penetration depth known at one iteration.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IterationRecord {
    /// The squared distance from the origin to the expanded face, a lower bound.
    pub distance_squared: Real,
    /// The upper bound of the squared penetration depth.
    pub mu: Real,
}

#[derive(Copy, Clone, PartialEq, Eq)]
struct QueuedFace {
    id: FaceId,
    distance_squared: OrderedFloat<Real>,
}

impl QueuedFace {
    fn new(id: FaceId, face: &Face) -> Self {
        QueuedFace {
            id,
            distance_squared: OrderedFloat(face.distance_squared()),
        }
    }
}

impl PartialOrd for QueuedFace {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedFace {
    // Reversed so that the binary heap pops the closest face first.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance_squared
            .cmp(&self.distance_squared)
            .then_with(|| other.id.cmp(&self.id))
    }
}

fn wiggle_zero_component(dir: &mut Vector<Real>) -> Option<usize> {
    let i = dir.iter().position(|x| *x == 0.0)?;
    dir[i] = SUPPORT_DIRECTION_WIGGLE;
    Some(i)
}

/// The Expanding Polytope Algorithm in 3D.
///
/// Given two overlapping convex shapes and the terminal simplex of a GJK intersection
/// test, EPA grows a convex polytope inside of their Minkowski difference (the CSO) until
/// its face closest to the origin lies on the boundary of the CSO. The distance from that
/// face to the origin is the penetration depth.
///
/// Each iteration pops the face closest to the origin, samples the CSO along its closest
/// point (or its normal if the origin lies on it), removes every face visible from the new
/// point, and closes the hole with a fan of faces around the new point. Only faces the
/// origin projects inside of, and that are within the current depth bounds, are queued.
///
/// The same `EPA` can be reused for several queries to avoid allocations. After a query,
/// the final polytope and the per-iteration bounds can be inspected.
///
/// # Example
///
/// ```
/// use epa3d::math::{Isometry, Vector};
/// use epa3d::query::epa::EPA;
/// use epa3d::query::gjk::{GjkSimplex, Positioned};
/// use epa3d::shape::Cuboid;
///
/// let cube = Cuboid::new(Vector::repeat(0.5));
/// let moved = Positioned::new(Isometry::translation(0.75, 0.0, 0.0), &cube);
///
/// // A tetrahedron enclosing the origin, as returned by GJK.
/// let dirs = [
///     Vector::new(1.0, 1.0, 1.0),
///     Vector::new(1.0, -1.0, -1.0),
///     Vector::new(-1.0, 1.0, -1.0),
///     Vector::new(-1.0, -1.0, 1.0),
/// ];
/// let simplex = GjkSimplex::from_support_directions(&cube, &moved, &dirs);
///
/// let mut epa = EPA::new();
/// let result = epa.evaluate(&cube, &moved, &simplex);
/// assert!(result.shapes_are_colliding);
/// assert!((result.depth() - 0.25).abs() < 1.0e-6);
/// ```
#[derive(Default)]
pub struct EPA {
    options: EpaOptions,
    graph: PolytopeGraph,
    heap: BinaryHeap<QueuedFace>,
    silhouette: Vec<EdgeId>,
    history: Vec<IterationRecord>,
    closest_face: Option<FaceId>,
    iterations: usize,
}

impl EPA {
    /// Creates a new instance of the 3D Expanding Polytope Algorithm with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new instance of the 3D Expanding Polytope Algorithm.
    pub fn with_options(options: EpaOptions) -> Self {
        EPA {
            options,
            ..Self::default()
        }
    }

    /// The options used by this solver.
    #[inline]
    pub fn options(&self) -> &EpaOptions {
        &self.options
    }

    /// Sets the options used by the next queries.
    pub fn set_options(&mut self, options: EpaOptions) {
        self.options = options;
    }

    /// The vertices, half-edges and faces created by the last query.
    #[inline]
    pub fn graph(&self) -> &PolytopeGraph {
        &self.graph
    }

    /// The face the penetration depth of the last query was read from.
    ///
    /// This face may have been expanded, hence flagged obsolete, after being selected.
    pub fn closest_face(&self) -> Option<&Face> {
        self.closest_face.map(|f| self.graph.face(f))
    }

    /// The polytope reached by the last query.
    pub fn polytope(&self) -> Option<Polytope<'_>> {
        Polytope::from_graph(&self.graph)
    }

    /// The bounds of the squared penetration depth at each iteration of the last query.
    #[inline]
    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    fn reset(&mut self) {
        self.graph.clear();
        self.heap.clear();
        self.silhouette.clear();
        self.history.clear();
        self.closest_face = None;
        self.iterations = 0;
    }

    /// Projects the origin onto the boundary of `g`, assuming the origin is inside of `g`.
    ///
    /// The simplex must enclose the origin and be made of points of `g`, e.g., sampled
    /// against [`ConstantOrigin`]. Returns `None` if the projection failed.
    pub fn project_origin<G: ?Sized + SupportMap>(
        &mut self,
        g: &G,
        simplex: &GjkSimplex,
    ) -> Option<Point<Real>> {
        let result = self.evaluate(g, &ConstantOrigin, simplex);

        if result.is_valid() {
            Some(result.point_on_a)
        } else {
            None
        }
    }

    /// Computes the penetration depth and the deepest points of two overlapping shapes.
    ///
    /// Both shapes must be expressed in the same frame, and `simplex` must enclose, or
    /// touch, the origin as the terminal simplex of a GJK intersection test does.
    ///
    /// If no initial polytope can be built from `simplex` (e.g., a single point when the
    /// shapes are only touching), a result with NaN values is returned. Otherwise the
    /// result is read from the last face selected by the expansion, whatever stopped it.
    pub fn evaluate<G1, G2>(&mut self, g1: &G1, g2: &G2, simplex: &GjkSimplex) -> EpaResult
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        self.reset();

        let eps = self.options.epsilon;
        let initial = match seed::initial_polytope(&mut self.graph, g1, g2, simplex, eps) {
            Ok(faces) => faces,
            Err(err) => {
                log::debug!("EPA: no initial polytope: {}.", err);
                return EpaResult::degenerate(Termination::InvalidInitialPolytope(err));
            }
        };

        for f in initial {
            self.heap.push(QueuedFace::new(f, self.graph.face(f)));
        }

        let mut mu = Real::INFINITY;
        let mut termination = Termination::MaxIterations;

        while self.iterations < self.options.max_iterations {
            let Some(entry) = self.heap.pop() else {
                termination = Termination::EmptyQueue;
                break;
            };

            let face = *self.graph.face(entry.id);

            if face.is_obsolete() {
                continue;
            }

            let current = face.distance_squared();
            self.iterations += 1;

            if current > mu + eps {
                termination = Termination::UpperBoundExceeded;
                break;
            }

            self.closest_face = Some(entry.id);

            let mut dir = if current > eps {
                face.closest_point().coords
            } else {
                *face.normal()
            };
            let wiggled = wiggle_zero_component(&mut dir);
            let mut support = CSOPoint::from_shapes(g1, g2, &dir);

            if self.graph.face_contains_point(entry.id, &support.point) {
                let Some(i) = wiggled else {
                    termination = Termination::DuplicateSupportPoint;
                    break;
                };

                dir[i] = -SUPPORT_DIRECTION_WIGGLE;
                support = CSOPoint::from_shapes(g1, g2, &dir);

                if self.graph.face_contains_point(entry.id, &support.point) {
                    termination = Termination::DuplicateSupportPoint;
                    break;
                }
            }

            let projection = support.point.coords.dot(&dir);
            mu = mu.min(projection * projection / current);

            log::trace!(
                "EPA iteration {}: squared distance {}, upper bound {}.",
                self.iterations,
                current,
                mu
            );
            self.history.push(IterationRecord {
                distance_squared: current,
                mu,
            });

            if mu <= (1.0 + eps) * (1.0 + eps) * current {
                termination = Termination::AccuracyReached;
                break;
            }

            if !self.graph.can_be_seen_by(entry.id, &support.point) {
                termination = Termination::MalformedSilhouette;
                break;
            }

            let apex = self.graph.add_vertex(support);
            self.graph.mark_obsolete(entry.id);
            self.silhouette.clear();

            for e in face.edges() {
                let twin = self.graph.edge(e).twin();
                self.graph
                    .silhouette(twin, &support.point, &mut self.silhouette);
            }

            let mut degenerate = false;

            for &edge in &self.silhouette {
                let new_face = self.graph.add_face_on_edge(apex, edge, eps);
                let f = self.graph.face(new_face);

                if f.is_affinely_dependent() {
                    degenerate = true;
                    break;
                }

                let dist = f.distance_squared();

                if f.is_closest_point_internal() && current <= dist && dist <= mu + eps {
                    self.heap.push(QueuedFace::new(new_face, f));
                }
            }

            if degenerate {
                termination = Termination::AffinelyDependentFace;
                break;
            }

            if !self.graph.relink_twins(apex) {
                termination = Termination::MissingTwin;
                break;
            }

            for &edge in &self.silhouette {
                let origin = self.graph.edge(edge).origin();
                self.graph.prune_obsolete_edges(origin);
            }
        }

        log::debug!(
            "EPA stopped after {} iterations: {:?}.",
            self.iterations,
            termination
        );

        // With a zero iteration budget, fall back to the closest initial face.
        let Some(closest) = self
            .closest_face
            .or_else(|| self.heap.peek().map(|entry| entry.id))
        else {
            return EpaResult::degenerate(termination);
        };
        self.closest_face = Some(closest);

        let face = self.graph.face(closest);
        let (point_on_a, point_on_b) = self.graph.closest_points(closest);
        let nan = Vector::repeat(Real::NAN);

        EpaResult {
            shapes_are_colliding: true,
            signed_distance: -face.distance_squared().sqrt(),
            point_on_a,
            point_on_b,
            normal_on_a: nan,
            normal_on_b: nan,
            iterations: self.iterations,
            termination,
        }
    }
}
