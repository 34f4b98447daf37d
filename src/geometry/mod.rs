//! Geometric primitives
//!
//! Point and simplex value types plus the floating-point predicates the
//! triangulation engines are built on.

mod hull;
mod normalize;
mod point;
pub mod predicates;
mod simplex;

pub use hull::{convex_hull_2d, polygon_area};
pub use normalize::Normalization;
pub use point::{Point2D, Point3D, VertexKey};
pub use predicates::{
    circumcircle, circumsphere, is_point_in_circumcircle, is_point_in_circumsphere,
    is_point_in_triangle, orientation, segments_intersect, signed_volume, tetrahedron_volume,
    Orientation,
};
pub use simplex::{Circumcircle, Circumsphere, Edge, Tetrahedron, Triangle};

pub(crate) use normalize::bounds;

/// Tolerance for determinant and containment tests
pub const EPSILON: f64 = 1e-10;

/// Tetrahedra with a smaller volume are treated as degenerate
pub const MIN_VOLUME: f64 = 1e-12;
