//! Seeded random and regular grid point sets

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geometry::{Point2D, Point3D};

/// Uniform random points inside an axis-aligned rectangle
///
/// # Arguments
///
/// * `count` - Number of points to generate
/// * `bounds` - Opposite corners of the rectangle, in any order
/// * `seed` - Random seed
///
/// # Example
///
/// ```rust
/// use delaunay_kernel::generation::random_points_2d;
/// use delaunay_kernel::Point2D;
///
/// let bounds = (Point2D::new(0.0, 0.0), Point2D::new(10.0, 5.0));
/// let points = random_points_2d(100, bounds, 42);
/// assert_eq!(points.len(), 100);
/// assert_eq!(points, random_points_2d(100, bounds, 42));
/// ```
pub fn random_points_2d(count: usize, bounds: (Point2D, Point2D), seed: u64) -> Vec<Point2D> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (a, b) = bounds;
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));

    (0..count)
        .map(|_| Point2D::new(sample(&mut rng, x0, x1), sample(&mut rng, y0, y1)))
        .collect()
}

/// Uniform random points inside an axis-aligned box
pub fn random_points_3d(count: usize, bounds: (Point3D, Point3D), seed: u64) -> Vec<Point3D> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (a, b) = bounds;
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
    let (z0, z1) = (a.z.min(b.z), a.z.max(b.z));

    (0..count)
        .map(|_| {
            Point3D::new(
                sample(&mut rng, x0, x1),
                sample(&mut rng, y0, y1),
                sample(&mut rng, z0, z1),
            )
        })
        .collect()
}

#[inline]
fn sample(rng: &mut ChaCha8Rng, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// `cols × rows` lattice starting at the origin, row by row
pub fn grid_points_2d(cols: usize, rows: usize, spacing: f64) -> Vec<Point2D> {
    (0..rows)
        .flat_map(|y| (0..cols).map(move |x| Point2D::new(x as f64 * spacing, y as f64 * spacing)))
        .collect()
}

/// `n × n × n` lattice starting at the origin
pub fn grid_points_3d(n: usize, spacing: f64) -> Vec<Point3D> {
    let mut points = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                points.push(Point3D::new(
                    x as f64 * spacing,
                    y as f64 * spacing,
                    z as f64 * spacing,
                ));
            }
        }
    }
    points
}
