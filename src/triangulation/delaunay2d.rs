//! Bowyer–Watson triangulation in the plane
//!
//! Points are inserted one at a time into a triangulation seeded with a
//! synthetic super-triangle. Every triangle whose circumcircle contains the
//! new point is removed and the cavity boundary is reconnected to it. The
//! convex hull edges are then forced in, so the output always covers the
//! whole hull however close the super-triangle comes to it.
//!
//! # Example
//!
//! ```rust
//! use delaunay_kernel::*;
//!
//! let points = [
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(1.0, 0.0),
//!     Point2D::new(0.0, 1.0),
//!     Point2D::new(1.0, 1.0),
//! ];
//! let triangles = triangulate(&points);
//! assert_eq!(triangles.len(), 2);
//! ```

use tracing::{debug, trace};

use super::dedup_points;
use super::keys::{edge_key, BoundarySet};
use super::planar::PlanarMesh;
use crate::config::TriangulationConfig;
use crate::geometry::predicates::circumcircle_with_epsilon;
use crate::geometry::{Circumcircle, Point2D, Triangle};

/// Triangulate a point set with the default configuration
///
/// Returns an empty list for fewer than 3 distinct points or collinear
/// input. Triangles are wound counter-clockwise and together cover the
/// convex hull of the input.
pub fn triangulate(points: &[Point2D]) -> Vec<Triangle> {
    triangulate_with_config(points, &TriangulationConfig::default())
}

/// Triangulate a point set with an explicit configuration
pub fn triangulate_with_config(points: &[Point2D], config: &TriangulationConfig) -> Vec<Triangle> {
    build_mesh(points, config)
        .map(PlanarMesh::into_triangles)
        .unwrap_or_default()
}

/// Triangle in the working set, with its circumcircle computed once
#[derive(Debug, Clone, Copy)]
struct Cell {
    vertices: [usize; 3],
    circle: Option<Circumcircle>,
}

impl Cell {
    fn new(vertices: [usize; 3], points: &[Point2D], eps: f64) -> Self {
        let triangle = Triangle::new(points[vertices[0]], points[vertices[1]], points[vertices[2]]);
        Self {
            vertices,
            circle: circumcircle_with_epsilon(&triangle, eps),
        }
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

/// Run Bowyer–Watson over the points and recover the convex hull
///
/// `None` with fewer than 3 distinct points. The returned mesh still holds
/// the super-triangle; [`PlanarMesh::into_triangles`] drops it.
pub(crate) fn build_mesh(points: &[Point2D], config: &TriangulationConfig) -> Option<PlanarMesh> {
    let mut vertices = dedup_points(points, |p| p.key(config.vertex_tolerance));
    let n = vertices.len();
    if n < 3 {
        debug!(input = points.len(), distinct = n, "too few points for 2D triangulation");
        return None;
    }

    let eps = config.epsilon;
    vertices.extend(super_triangle(&vertices, config.super_margin));
    let mut cells = vec![Cell::new([n, n + 1, n + 2], &vertices, eps)];

    for i in 0..n {
        let point = vertices[i];
        let mut boundary = BoundarySet::new();
        let mut kept = Vec::with_capacity(cells.len() + 2);
        let mut bad = 0usize;

        for cell in cells.drain(..) {
            if cell.circle.is_some_and(|circle| circle.contains(point, eps)) {
                bad += 1;
                for (a, b) in cell.edges() {
                    boundary.toggle(edge_key(a, b), (a, b));
                }
            } else {
                kept.push(cell);
            }
        }

        if bad == 0 {
            debug!(index = i, x = point.x, y = point.y, "point outside every circumcircle, skipped");
        }
        trace!(index = i, bad, boundary = boundary.len(), "inserted point");

        kept.extend(boundary.into_values().map(|(a, b)| Cell::new([a, b, i], &vertices, eps)));
        cells = kept;
    }

    let working = cells.len();
    let mut mesh = PlanarMesh::new(vertices, n, cells.into_iter().map(|cell| cell.vertices).collect(), eps);
    let corners = mesh.recover_hull();

    debug!(
        input = points.len(),
        distinct = n,
        working,
        hull = corners,
        triangles = mesh.triangle_count(),
        "2D triangulation finished"
    );

    Some(mesh)
}

/// Counter-clockwise triangle strictly enclosing the bounding box
///
/// With `d` the larger side of the box and `m` the margin, the vertices sit
/// `m·d` to the sides and above the box center and `d` below it.
fn super_triangle(points: &[Point2D], margin: f64) -> [Point2D; 3] {
    let (min, max) = points.iter().fold(
        (points[0], points[0]),
        |(min, max), p| {
            (
                Point2D::new(min.x.min(p.x), min.y.min(p.y)),
                Point2D::new(max.x.max(p.x), max.y.max(p.y)),
            )
        },
    );

    let extent = (max.x - min.x).max(max.y - min.y);
    let d = if extent > 0.0 && extent.is_finite() { extent } else { 1.0 };
    let mid = Point2D::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);

    [
        Point2D::new(mid.x - margin * d, mid.y - d),
        Point2D::new(mid.x + margin * d, mid.y - d),
        Point2D::new(mid.x, mid.y + margin * d),
    ]
}
