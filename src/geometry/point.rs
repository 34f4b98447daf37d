//! Point value types and vertex identity

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in the plane
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point
    #[inline]
    pub fn distance_squared(self, other: Point2D) -> f64 {
        DVec2::from(self).distance_squared(DVec2::from(other))
    }

    /// Identity of this point under the given vertex tolerance
    #[inline]
    pub fn key(self, tolerance: f64) -> VertexKey {
        VertexKey::new([self.x, self.y, 0.0], tolerance)
    }
}

impl From<DVec2> for Point2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point2D> for DVec2 {
    fn from(p: Point2D) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A point in space
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to another point
    #[inline]
    pub fn distance_squared(self, other: Point3D) -> f64 {
        DVec3::from(self).distance_squared(DVec3::from(other))
    }

    /// Identity of this point under the given vertex tolerance
    #[inline]
    pub fn key(self, tolerance: f64) -> VertexKey {
        VertexKey::new([self.x, self.y, self.z], tolerance)
    }
}

impl From<DVec3> for Point3D {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3D> for DVec3 {
    fn from(p: Point3D) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl From<[f64; 3]> for Point3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point2D> for Point3D {
    fn from(p: Point2D) -> Self {
        Self::new(p.x, p.y, 0.0)
    }
}

/// Hashable vertex identity
///
/// Every place that asks "is this the same vertex?" goes through this key:
/// input deduplication, constraint endpoint matching and mesh indexing.
/// With a positive tolerance each coordinate is bucketed to the nearest
/// multiple of the tolerance; with zero tolerance coordinates are compared
/// bit for bit. `-0.0` and `0.0` always share a key.
///
/// Bucketing rounds, so two points closer than the tolerance can still land
/// in neighbouring buckets when they straddle a bucket boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey([u64; 3]);

impl VertexKey {
    pub fn new(coords: [f64; 3], tolerance: f64) -> Self {
        Self(coords.map(|c| {
            let bucketed = if tolerance > 0.0 { (c / tolerance).round() } else { c };
            // fold -0.0 into 0.0
            (bucketed + 0.0).to_bits()
        }))
    }
}
