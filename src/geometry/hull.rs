//! 2D convex hull (quickhull) and polygon area
//!
//! The planar engines recover every hull edge, so the hull of the input is
//! exactly the region their output covers. That makes it the reference for
//! area checks.

use super::point::Point2D;
use super::predicates::orient2d;
use super::EPSILON;

/// Convex hull in counter-clockwise order
///
/// Starts at the point with the smallest x (then smallest y). Points on hull
/// edges are not included. Fewer than 3 non-collinear points return the
/// distinct extreme points found.
pub fn convex_hull_2d(points: &[Point2D]) -> Vec<Point2D> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };

    let lexicographic = |a: &Point2D, b: &Point2D| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y));
    let min = points.iter().copied().min_by(lexicographic).unwrap_or(first);
    let max = points.iter().copied().max_by(lexicographic).unwrap_or(first);

    if min == max {
        return vec![min];
    }

    let mut hull = vec![min];
    // the right side of min->max is the lower chain when walking CCW
    find_hull(points, min, max, &mut hull);
    hull.push(max);
    find_hull(points, max, min, &mut hull);
    hull
}

/// Append, in order, the hull points strictly to the right of `a -> b`
///
/// A point counts only if it is more than `EPSILON·|ab|` away from the line.
fn find_hull(points: &[Point2D], a: Point2D, b: Point2D, hull: &mut Vec<Point2D>) {
    let mut farthest = None;
    let mut max_distance = EPSILON * a.distance_squared(b);

    for &p in points {
        // negative orientation = right of a->b
        let distance = -orient2d(a, b, p);
        if distance > max_distance {
            max_distance = distance;
            farthest = Some(p);
        }
    }

    if let Some(p) = farthest {
        find_hull(points, a, p, hull);
        hull.push(p);
        find_hull(points, p, b, hull);
    }
}

/// Absolute area of a simple polygon (shoelace formula)
pub fn polygon_area(polygon: &[Point2D]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice: f64 = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice.abs() * 0.5
}
