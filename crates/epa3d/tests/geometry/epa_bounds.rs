use super::tetrahedron_dirs;
use epa3d::math::{Isometry, Real, Vector};
use epa3d::query::epa::{EpaOptions, Termination, EPA};
use epa3d::query::gjk::{GjkSimplex, Positioned};
use epa3d::shape::{Ball, Cuboid};

fn random_cuboid(rng: &mut oorandom::Rand64) -> Cuboid {
    Cuboid::new(Vector::from_fn(|_, _| 0.5 + rng.rand_float()))
}

#[test]
fn random_cuboid_pairs() {
    let mut rng = oorandom::Rand64::new(42);
    let mut epa = EPA::new();

    for _ in 0..50 {
        let a = random_cuboid(&mut rng);
        let b = random_cuboid(&mut rng);
        let shift = Vector::from_fn(|_, _| rng.rand_float() * 0.5 - 0.25);
        let moved = Positioned::new(Isometry::new(shift, Vector::zeros()), &b);
        let simplex = GjkSimplex::from_support_directions(&a, &moved, &tetrahedron_dirs());

        let res = epa.evaluate(&a, &moved, &simplex);
        let expected = (0..3)
            .map(|i| a.half_extents[i] + b.half_extents[i] - shift[i].abs())
            .fold(Real::MAX, Real::min);

        assert!(res.is_valid());
        assert_relative_eq!(res.depth(), expected, epsilon = 1.0e-6);
        assert_relative_eq!(
            (res.point_on_a - res.point_on_b).norm(),
            expected,
            epsilon = 1.0e-6
        );
    }
}

#[test]
fn depth_bounds_are_monotonic() {
    let ball = Ball::new(1.0);
    let cube = Cuboid::new(Vector::new(0.8, 0.6, 0.7));
    let pos = Isometry::new(Vector::new(0.3, 0.2, -0.1), Vector::new(0.3, -0.2, 0.5));
    let moved = Positioned::new(pos, &cube);
    let simplex = GjkSimplex::from_support_directions(&ball, &moved, &tetrahedron_dirs());

    let mut epa = EPA::with_options(EpaOptions {
        epsilon: 1.0e-8,
        ..EpaOptions::default()
    });
    let res = epa.evaluate(&ball, &moved, &simplex);
    let history = epa.history();

    assert!(res.is_valid());
    assert!(!history.is_empty());

    for w in history.windows(2) {
        assert!(w[1].distance_squared >= w[0].distance_squared);
        assert!(w[1].mu <= w[0].mu);
    }

    // Only the last record may see both bounds cross.
    for record in &history[..history.len() - 1] {
        assert!(record.mu >= record.distance_squared);
    }

    // The reported depth is the last lower bound.
    let last = history[history.len() - 1];
    assert!(res.depth() * res.depth() >= last.distance_squared * (1.0 - 1.0e-12));

    if res.termination == Termination::AccuracyReached {
        assert!(last.mu <= last.distance_squared * (1.0 + 1.0e-7));
    }
}

#[test]
fn iteration_budget_is_respected() {
    let ball = Ball::new(1.0);
    let moved = Positioned::new(Isometry::translation(0.5, 0.5, 0.0), &ball);
    let simplex = GjkSimplex::from_support_directions(&ball, &moved, &tetrahedron_dirs());

    for max_iterations in [1, 2, 5, 20] {
        let mut epa = EPA::with_options(EpaOptions {
            max_iterations,
            ..EpaOptions::default()
        });
        let res = epa.evaluate(&ball, &moved, &simplex);

        assert!(res.is_valid());
        assert!(res.iterations <= max_iterations);

        if res.termination == Termination::MaxIterations {
            assert_eq!(res.iterations, max_iterations);
        }
    }
}
