//! Constrained Delaunay triangulation in the plane
//!
//! The unconstrained triangulation is built first; each constraint is then
//! recovered by flipping away the edges that properly cross it. Flips that
//! would need a non-convex quad are retried after the others, which always
//! makes progress for constraints that do not cross each other. The edges
//! created along the way are then re-legalized, so everything except the
//! constraints stays Delaunay.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::delaunay2d::build_mesh;
use crate::config::TriangulationConfig;
use crate::geometry::{Edge, Point2D, Triangle, VertexKey};

/// Mandatory edge of a constrained triangulation
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub start: Point2D,
    pub end: Point2D,
}

impl Constraint {
    pub const fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn edge(&self) -> Edge {
        Edge::new(self.start, self.end)
    }
}

/// Triangulate with mandatory edges using the default configuration
///
/// Constraint endpoints missing from `points` are added. Constraints are
/// expected not to cross each other; a constraint that cannot be recovered
/// is logged and left out.
///
/// # Example
///
/// ```rust
/// use delaunay_kernel::*;
///
/// // A flat diamond: the unconstrained triangulation uses the short diagonal.
/// let points = [
///     Point2D::new(0.0, 0.0),
///     Point2D::new(4.0, 0.0),
///     Point2D::new(2.0, 1.0),
///     Point2D::new(2.0, -1.0),
/// ];
/// let long = Constraint::new(points[0], points[1]);
///
/// let triangles = triangulate_constrained(&points, &[long]);
/// assert_eq!(triangles.len(), 2);
/// assert!(triangles.iter().all(|t| t.has_edge(&long.edge(), 0.0)));
/// ```
pub fn triangulate_constrained(points: &[Point2D], constraints: &[Constraint]) -> Vec<Triangle> {
    triangulate_constrained_with_config(points, constraints, &TriangulationConfig::default())
}

/// Constrained triangulation with an explicit configuration
pub fn triangulate_constrained_with_config(
    points: &[Point2D],
    constraints: &[Constraint],
    config: &TriangulationConfig,
) -> Vec<Triangle> {
    let tolerance = config.vertex_tolerance;

    let mut all = points.to_vec();
    let mut known: HashSet<VertexKey> = points.iter().map(|p| p.key(tolerance)).collect();
    for constraint in constraints {
        for p in [constraint.start, constraint.end] {
            if known.insert(p.key(tolerance)) {
                all.push(p);
            }
        }
    }

    let Some(mut mesh) = build_mesh(&all, config) else {
        return Vec::new();
    };

    let lookup: HashMap<VertexKey, usize> = mesh
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, p)| (p.key(tolerance), i))
        .collect();

    let mut recovered = 0usize;
    for constraint in constraints {
        let (Some(&a), Some(&b)) = (
            lookup.get(&constraint.start.key(tolerance)),
            lookup.get(&constraint.end.key(tolerance)),
        ) else {
            continue;
        };
        if a == b {
            continue;
        }

        if mesh.recover_edge(a, b) {
            recovered += 1;
        } else {
            warn!(
                start = ?constraint.start,
                end = ?constraint.end,
                "constraint could not be recovered"
            );
        }
    }

    debug!(
        points = points.len(),
        constraints = constraints.len(),
        recovered,
        triangles = mesh.triangle_count(),
        "constrained triangulation finished"
    );

    mesh.into_triangles()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{orientation, segments_intersect, Orientation};
    use crate::triangulation::triangulate;
    use approx::assert_relative_eq;

    fn grid3() -> Vec<Point2D> {
        let mut points = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                points.push(Point2D::new(x as f64, y as f64));
            }
        }
        points
    }

    fn assert_constrained(triangles: &[Triangle], constraint: &Constraint) {
        let edge = constraint.edge();
        assert!(
            triangles.iter().any(|t| t.has_edge(&edge, 0.0)),
            "missing constraint edge {:?}",
            constraint
        );
        for t in triangles {
            for e in t.edges() {
                assert!(
                    !segments_intersect(e.start, e.end, constraint.start, constraint.end),
                    "edge {:?} crosses {:?}",
                    e,
                    constraint
                );
            }
        }
    }

    fn total_area(triangles: &[Triangle]) -> f64 {
        triangles.iter().map(Triangle::area).sum()
    }

    #[test]
    fn test_existing_grid_edge() {
        let c = Constraint::new(Point2D::new(1.0, 0.0), Point2D::new(1.0, 1.0));
        let triangles = triangulate_constrained(&grid3(), &[c]);
        assert_eq!(triangles.len(), 8);
        assert_constrained(&triangles, &c);
    }

    #[test]
    fn test_skew_constraint_across_grid() {
        let c = Constraint::new(Point2D::new(0.0, 0.0), Point2D::new(2.0, 1.0));
        let triangles = triangulate_constrained(&grid3(), &[c]);
        assert_eq!(triangles.len(), 8);
        assert_constrained(&triangles, &c);
        assert_relative_eq!(total_area(&triangles), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_constraint_through_vertex_is_split() {
        let c = Constraint::new(Point2D::new(0.0, 0.0), Point2D::new(2.0, 2.0));
        let triangles = triangulate_constrained(&grid3(), &[c]);

        let center = Point2D::new(1.0, 1.0);
        let first = Edge::new(c.start, center);
        let second = Edge::new(center, c.end);
        assert!(triangles.iter().any(|t| t.has_edge(&first, 0.0)));
        assert!(triangles.iter().any(|t| t.has_edge(&second, 0.0)));
        for t in &triangles {
            for e in t.edges() {
                assert!(!segments_intersect(e.start, e.end, c.start, c.end));
            }
        }
        assert_relative_eq!(total_area(&triangles), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_diamond_long_diagonal() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(2.0, 1.0),
            Point2D::new(2.0, -1.0),
        ];
        let plain = triangulate(&points);
        let short = Edge::new(points[2], points[3]);
        assert!(plain.iter().any(|t| t.has_edge(&short, 0.0)));

        let c = Constraint::new(points[0], points[1]);
        let triangles = triangulate_constrained(&points, &[c]);
        assert_eq!(triangles.len(), 2);
        assert_constrained(&triangles, &c);
        assert!(!triangles.iter().any(|t| t.has_edge(&short, 0.0)));
        for t in &triangles {
            let [p, q, r] = t.points;
            assert_eq!(orientation(p, q, r), Orientation::CounterClockwise);
        }
    }

    #[test]
    fn test_missing_endpoints_are_added() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
        ];
        let c = Constraint::new(Point2D::new(0.5, 0.2), Point2D::new(0.5, 0.8));
        let triangles = triangulate_constrained(&points, &[c]);

        assert!(triangles.iter().any(|t| t.has_vertex(c.start)));
        assert!(triangles.iter().any(|t| t.has_vertex(c.end)));
        assert_constrained(&triangles, &c);
        assert_relative_eq!(total_area(&triangles), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_several_constraints() {
        let constraints = [
            Constraint::new(Point2D::new(1.0, 0.0), Point2D::new(1.0, 1.0)),
            Constraint::new(Point2D::new(0.0, 1.0), Point2D::new(1.0, 1.0)),
            Constraint::new(Point2D::new(1.0, 2.0), Point2D::new(1.0, 1.0)),
            Constraint::new(Point2D::new(2.0, 1.0), Point2D::new(1.0, 1.0)),
            Constraint::new(Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)),
        ];
        let triangles = triangulate_constrained(&grid3(), &constraints);
        assert_eq!(triangles.len(), 8);
        for c in &constraints {
            assert_constrained(&triangles, c);
        }
    }

    #[test]
    fn test_long_constraints_between_random_points() {
        let bounds = (Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0));
        for seed in [4, 30, 36, 47, 69, 72, 97, 98] {
            let points = crate::generation::random_points_2d(80, bounds, seed);
            let hull = crate::geometry::polygon_area(&crate::geometry::convex_hull_2d(&points));
            for c in [
                Constraint::new(points[0], points[1]),
                Constraint::new(Point2D::new(0.5, 0.5), Point2D::new(9.5, 9.0)),
            ] {
                let triangles = triangulate_constrained(&points, &[c]);
                assert_constrained(&triangles, &c);
                if points.contains(&c.start) && points.contains(&c.end) {
                    assert_relative_eq!(total_area(&triangles), hull, max_relative = 1e-9);
                }
                for t in &triangles {
                    assert!(t.signed_area() > 0.0, "seed {}: {:?} is not counter-clockwise", seed, t);
                }
            }
        }
    }

    #[test]
    fn test_constraints_stay_delaunay_elsewhere() {
        let points = crate::generation::random_points_2d(50, (Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)), 8);
        let c = Constraint::new(points[2], points[3]);
        let triangles = triangulate_constrained(&points, &[c]);
        assert_constrained(&triangles, &c);

        // a point may only sit inside a circumcircle if the constraint hides it
        for t in &triangles {
            let circle = t.circumcircle().unwrap();
            let r2 = circle.radius * circle.radius;
            let centroid = Point2D::new(
                (t.points[0].x + t.points[1].x + t.points[2].x) / 3.0,
                (t.points[0].y + t.points[1].y + t.points[2].y) / 3.0,
            );
            for &p in &points {
                if t.has_vertex(p) || circle.center.distance_squared(p) >= r2 * (1.0 - 1e-9) {
                    continue;
                }
                assert!(
                    segments_intersect(centroid, p, c.start, c.end),
                    "{:?} sees {:?} inside its circumcircle",
                    t,
                    p
                );
            }
        }
    }

    #[test]
    fn test_tiny_scale_constraint() {
        let scale = 1e-5;
        let points: Vec<Point2D> = grid3().iter().map(|p| Point2D::new(p.x * scale, p.y * scale)).collect();
        let c = Constraint::new(points[0], Point2D::new(2.0 * scale, scale));
        let triangles = triangulate_constrained(&points, &[c]);
        assert_eq!(triangles.len(), 8);
        assert_constrained(&triangles, &c);
        assert_relative_eq!(total_area(&triangles), 4.0 * scale * scale, max_relative = 1e-9);
    }

    #[test]
    fn test_degenerate_constraints_are_ignored() {
        let points = grid3();
        let zero = Constraint::new(Point2D::new(1.0, 1.0), Point2D::new(1.0, 1.0));
        let triangles = triangulate_constrained(&points, &[zero]);
        assert_eq!(triangles.len(), triangulate(&points).len());

        assert!(triangulate_constrained(&points[..2], &[]).is_empty());
    }
}
