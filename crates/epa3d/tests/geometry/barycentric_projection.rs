use epa3d::math::{Point, Real, Vector};
use epa3d::query::epa::{
    barycentric_coordinates_from_1_simplex, barycentric_coordinates_from_2_simplex,
    ProjectionLocation,
};

// Closest point of a triangle to the origin, from its Voronoi regions.
fn reference_projection(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Point<Real> {
    let p = Point::origin();
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return a + ab * (d1 / (d1 - d3));
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return a + ac * (d2 / (d2 - d6));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        return b + (c - b) * ((d4 - d3) / ((d4 - d3) + (d5 - d6)));
    }

    let denom = 1.0 / (va + vb + vc);
    a + ab * (vb * denom) + ac * (vc * denom)
}

fn random_point(rng: &mut oorandom::Rand64) -> Point<Real> {
    Point::from(Vector::from_fn(|_, _| rng.rand_float() * 4.0 - 2.0))
}

#[test]
fn random_triangle_projections() {
    let mut rng = oorandom::Rand64::new(42);
    let mut num_inside = 0;
    let mut num_outside = 0;

    for _ in 0..1000 {
        let [a, b, c] = [(); 3].map(|_| random_point(&mut rng));

        if (b - a).cross(&(c - a)).norm() < 0.1 {
            continue;
        }

        let (loc, bcoords) = barycentric_coordinates_from_2_simplex(&a, &b, &c, 1.0e-12);
        let proj = Point::from(a.coords * bcoords[0] + b.coords * bcoords[1] + c.coords * bcoords[2]);

        match loc {
            ProjectionLocation::Inside => num_inside += 1,
            ProjectionLocation::Outside => num_outside += 1,
            ProjectionLocation::AffinelyDependent => panic!("unexpected degenerate triangle"),
        }

        assert_relative_eq!(bcoords.iter().sum::<Real>(), 1.0, epsilon = 1.0e-9);
        assert_relative_eq!(proj, reference_projection(&a, &b, &c), epsilon = 1.0e-9);
    }

    assert!(num_inside > 0 && num_outside > 0);
}

#[test]
fn random_segment_projections() {
    let mut rng = oorandom::Rand64::new(1234);

    for _ in 0..1000 {
        let a = random_point(&mut rng);
        let b = random_point(&mut rng);

        if (b - a).norm() < 0.1 {
            continue;
        }

        let [la, lb] = barycentric_coordinates_from_1_simplex(&a, &b);
        let proj = a.coords * la + b.coords * lb;

        let t = (-(b - a).dot(&a.coords) / (b - a).norm_squared()).clamp(0.0, 1.0);
        let expected = a.coords + (b - a) * t;

        assert!(la >= 0.0 && lb >= 0.0);
        assert_relative_eq!(la + lb, 1.0, epsilon = 1.0e-9);
        assert_relative_eq!(proj, expected, epsilon = 1.0e-9);
    }
}
