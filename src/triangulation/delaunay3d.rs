//! Bowyer–Watson tetrahedralization
//!
//! Works like the planar engine with faces in place of edges. Input is
//! first mapped into the unit cube (see [`Normalization`]) so that the
//! circumsphere determinants stay well scaled; the emitted tetrahedra carry
//! the caller's original coordinates.

use glam::DVec3;
use tracing::{debug, trace};

use super::dedup_points;
use super::keys::{face_key, BoundarySet};
use crate::config::TriangulationConfig;
use crate::geometry::predicates::circumsphere_with_tolerance;
use crate::geometry::{bounds, signed_volume, Circumsphere, Normalization, Point3D, Tetrahedron};

/// Tetrahedralize a point set with the default configuration
///
/// Returns an empty list for fewer than 4 distinct points or coplanar
/// input. Every tetrahedron has positive signed volume.
///
/// # Example
///
/// ```rust
/// use delaunay_kernel::*;
///
/// let points = [
///     Point3D::new(0.0, 0.0, 0.0),
///     Point3D::new(1.0, 0.0, 0.0),
///     Point3D::new(0.0, 1.0, 0.0),
///     Point3D::new(0.0, 0.0, 1.0),
/// ];
/// let tetrahedra = triangulate3d(&points);
/// assert_eq!(tetrahedra.len(), 1);
/// assert!((tetrahedra[0].volume() - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn triangulate3d(points: &[Point3D]) -> Vec<Tetrahedron> {
    triangulate3d_with_config(points, &TriangulationConfig::default())
}

/// Tetrahedralize a point set with an explicit configuration
///
/// `config.min_volume` applies in the normalized frame when
/// `config.normalize` is set.
pub fn triangulate3d_with_config(points: &[Point3D], config: &TriangulationConfig) -> Vec<Tetrahedron> {
    let unique = dedup_points(points, |p| p.key(config.vertex_tolerance));
    let n = unique.len();
    if n < 4 {
        debug!(input = points.len(), distinct = n, "too few points for 3D triangulation");
        return Vec::new();
    }

    let map = if config.normalize {
        Normalization::from_points(&unique).unwrap_or_else(Normalization::identity)
    } else {
        Normalization::identity()
    };
    trace!(scale = map.scale(), offset = ?map.offset(), "normalization");

    let mut working: Vec<Point3D> = unique.iter().map(|&p| map.normalize(p)).collect();
    working.extend(super_tetrahedron(&working, config.super_margin));

    let eps = config.epsilon;
    let min_volume = config.min_volume;
    let mut cells = vec![Cell::new(oriented([n, n + 1, n + 2, n + 3], &working), &working, config)];
    let mut flat = 0usize;

    for i in 0..n {
        let point = working[i];
        let mut boundary = BoundarySet::new();
        let mut kept = Vec::with_capacity(cells.len() + 4);
        let mut bad = 0usize;

        for cell in cells.drain(..) {
            if cell.sphere.is_some_and(|sphere| sphere.contains(point, eps)) {
                bad += 1;
                for face in cell.faces() {
                    boundary.toggle(face_key(face), face);
                }
            } else {
                kept.push(cell);
            }
        }

        trace!(index = i, bad, boundary = boundary.len(), "inserted point");

        for [a, b, c] in boundary.into_values() {
            let volume = signed_volume(working[a], working[b], working[c], point);
            if volume.abs() <= min_volume {
                flat += 1;
                continue;
            }
            let vertices = if volume > 0.0 { [a, b, c, i] } else { [a, c, b, i] };
            kept.push(Cell::new(vertices, &working, config));
        }
        cells = kept;
    }

    let total = cells.len();
    let tetrahedra: Vec<Tetrahedron> = cells
        .into_iter()
        .filter(|cell| cell.sphere.is_some() && cell.vertices.iter().all(|&v| v < n))
        .map(|cell| {
            let [a, b, c, d] = cell.vertices;
            Tetrahedron::new(unique[a], unique[b], unique[c], unique[d])
        })
        .collect();

    debug!(
        input = points.len(),
        distinct = n,
        working = total,
        flat,
        tetrahedra = tetrahedra.len(),
        "3D triangulation finished"
    );

    tetrahedra
}

/// Tetrahedron in the working set, with its circumsphere computed once
#[derive(Debug, Clone, Copy)]
struct Cell {
    vertices: [usize; 4],
    sphere: Option<Circumsphere>,
}

impl Cell {
    fn new(vertices: [usize; 4], points: &[Point3D], config: &TriangulationConfig) -> Self {
        let [a, b, c, d] = vertices.map(|v| points[v]);
        Self {
            vertices,
            sphere: circumsphere_with_tolerance(
                &Tetrahedron::new(a, b, c, d),
                config.epsilon,
                config.min_volume,
            ),
        }
    }

    fn faces(&self) -> [[usize; 3]; 4] {
        let [a, b, c, d] = self.vertices;
        [[a, b, c], [a, b, d], [a, c, d], [b, c, d]]
    }
}

/// Reorder so the signed volume is positive
fn oriented(vertices: [usize; 4], points: &[Point3D]) -> [usize; 4] {
    let [a, b, c, d] = vertices;
    if signed_volume(points[a], points[b], points[c], points[d]) < 0.0 {
        [a, c, b, d]
    } else {
        vertices
    }
}

/// Regular tetrahedron around the bounding box center
///
/// With vertices at `center ± r` in alternating sign patterns the solid
/// contains the cube of half-width `r / 3`; `r = margin · extent` with a
/// margin of at least 2 keeps the whole box well inside.
fn super_tetrahedron(points: &[Point3D], margin: f64) -> [Point3D; 4] {
    let (min, max) = bounds(points).unwrap_or_default();
    let extent = (max - min).max_element();
    let extent = if extent > 0.0 && extent.is_finite() { extent } else { 1.0 };
    let center = (min + max) / 2.0;
    let r = margin * extent;

    [
        (center + r * DVec3::new(1.0, 1.0, 1.0)).into(),
        (center + r * DVec3::new(1.0, -1.0, -1.0)).into(),
        (center + r * DVec3::new(-1.0, 1.0, -1.0)).into(),
        (center + r * DVec3::new(-1.0, -1.0, 1.0)).into(),
    ]
}
