//! Triangle and tetrahedron value types

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::point::{Point2D, Point3D, VertexKey};
use super::predicates;

/// Circle through the three vertices of a triangle
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    pub center: Point2D,
    pub radius: f64,
}

impl Circumcircle {
    /// Inclusive containment: `dist² <= radius²·(1 + eps)`
    ///
    /// `eps` is relative to the squared radius, so the test reads the same
    /// at every coordinate scale.
    #[inline]
    pub fn contains(&self, point: Point2D, eps: f64) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius * (1.0 + eps)
    }

    /// Strict containment with the boundary band `radius²·eps` excluded
    #[inline]
    pub fn strictly_contains(&self, point: Point2D, eps: f64) -> bool {
        self.center.distance_squared(point) < self.radius * self.radius * (1.0 - eps)
    }
}

/// Sphere through the four vertices of a tetrahedron
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumsphere {
    pub center: Point3D,
    pub radius: f64,
}

impl Circumsphere {
    /// Inclusive containment: `dist² <= radius²·(1 + eps)`
    #[inline]
    pub fn contains(&self, point: Point3D, eps: f64) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius * (1.0 + eps)
    }
}

/// Unordered pair of points
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point2D,
    pub end: Point2D,
}

impl Edge {
    pub const fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Canonical key: `(a, b)` and `(b, a)` produce the same value
    pub fn key(&self, tolerance: f64) -> (VertexKey, VertexKey) {
        let a = self.start.key(tolerance);
        let b = self.end.key(tolerance);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Same edge regardless of direction
    pub fn is_same(&self, other: &Edge, tolerance: f64) -> bool {
        self.key(tolerance) == other.key(tolerance)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance_squared(self.end).sqrt()
    }
}

/// Ordered triple of points
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Point2D; 3],
}

impl Triangle {
    pub const fn new(a: Point2D, b: Point2D, c: Point2D) -> Self {
        Self { points: [a, b, c] }
    }

    /// Circumcircle, or `None` when the vertices are collinear
    #[inline]
    pub fn circumcircle(&self) -> Option<Circumcircle> {
        predicates::circumcircle(self)
    }

    /// Edges in winding order: `ab`, `bc`, `ca`
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.points;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }

    /// Positive for counter-clockwise winding
    #[inline]
    pub fn signed_area(&self) -> f64 {
        let [a, b, c] = self.points;
        predicates::triangle_signed_area(a, b, c)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[inline]
    pub fn contains_point(&self, point: Point2D) -> bool {
        predicates::is_point_in_triangle(point, self)
    }

    /// Exact vertex membership
    #[inline]
    pub fn has_vertex(&self, point: Point2D) -> bool {
        self.points.contains(&point)
    }

    /// Whether `edge` is one of this triangle's edges
    pub fn has_edge(&self, edge: &Edge, tolerance: f64) -> bool {
        let key = edge.key(tolerance);
        self.edges().iter().any(|e| e.key(tolerance) == key)
    }
}

/// Ordered quadruple of points
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetrahedron {
    pub points: [Point3D; 4],
}

impl Tetrahedron {
    pub const fn new(a: Point3D, b: Point3D, c: Point3D, d: Point3D) -> Self {
        Self { points: [a, b, c, d] }
    }

    /// Circumsphere, or `None` when the tetrahedron is flat
    #[inline]
    pub fn circumsphere(&self) -> Option<Circumsphere> {
        predicates::circumsphere(self)
    }

    /// The four triangular faces `{p1p2p3, p1p2p4, p1p3p4, p2p3p4}`
    pub fn faces(&self) -> [[Point3D; 3]; 4] {
        let [p1, p2, p3, p4] = self.points;
        [[p1, p2, p3], [p1, p2, p4], [p1, p3, p4], [p2, p3, p4]]
    }

    #[inline]
    pub fn signed_volume(&self) -> f64 {
        let [a, b, c, d] = self.points;
        predicates::signed_volume(a, b, c, d)
    }

    #[inline]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    pub fn centroid(&self) -> Point3D {
        let sum: DVec3 = self.points.iter().map(|&p| DVec3::from(p)).sum();
        (sum / 4.0).into()
    }

    /// Exact vertex membership
    #[inline]
    pub fn has_vertex(&self, point: Point3D) -> bool {
        self.points.contains(&point)
    }
}
